/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Recovery planning: mapping a failing module/stage to ordered
//! continuation options.

use std::fmt::Write;

use strum::{AsRefStr, Display};

use crate::{modules, stages, FailureTrace};

/// A recovery action. The variant names are the public action names.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RecoveryAction {
    Retry,
    Replay,
    Skip,
    Cancel,
}

/// One step of a plan. The description is data carried by the plan, not
/// behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct RecoveryStep {
    pub action: RecoveryAction,
    pub description: String,
}

impl RecoveryStep {
    fn new(action: RecoveryAction, description: &str) -> RecoveryStep {
        RecoveryStep {
            action,
            description: description.to_owned(),
        }
    }
}

/// An ordered set of continuation options for one failure. Every plan ends
/// with `Cancel`.
#[derive(Clone, Debug)]
pub struct RecoveryPlan {
    pub correlation_id: u64,
    pub failure_module: String,
    pub failure_stage: String,
    pub error_message: String,
    pub steps: Vec<RecoveryStep>,
}

impl RecoveryPlan {
    /// Human-readable rendering, shown alongside the failure diagnostic.
    pub fn format(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Recovery Plan for {}/{}",
            self.failure_module, self.failure_stage
        );
        let _ = writeln!(out, "  error: {}", self.error_message);
        for (index, step) in self.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}: {}", index + 1, step.action, step.description);
        }
        out
    }
}

/// Pure planner with an append-only history of the plans it produced.
#[derive(Default)]
pub struct RecoveryPlanner {
    history: Vec<RecoveryPlan>,
}

impl RecoveryPlanner {
    pub fn new() -> RecoveryPlanner {
        RecoveryPlanner {
            history: Vec::new(),
        }
    }

    /// Produce a plan for a failure in `module`/`stage`.
    pub fn plan_from_stage(&mut self, module: &str, stage: &str, error: &str) -> RecoveryPlan {
        let plan = RecoveryPlan {
            correlation_id: 0,
            failure_module: module.to_owned(),
            failure_stage: stage.to_owned(),
            error_message: error.to_owned(),
            steps: steps_for(module, stage),
        };
        self.history.push(plan.clone());
        plan
    }

    /// Produce a plan for a captured trace, carrying its correlation id.
    pub fn plan_from_trace(&mut self, trace: &FailureTrace) -> RecoveryPlan {
        let mut plan =
            self.plan_from_stage(&trace.module, &trace.stage, &trace.error_message);
        plan.correlation_id = trace.correlation_id;
        if let Some(recorded) = self.history.last_mut() {
            recorded.correlation_id = trace.correlation_id;
        }
        plan
    }

    pub fn history(&self) -> &[RecoveryPlan] {
        &self.history
    }
}

fn steps_for(module: &str, stage: &str) -> Vec<RecoveryStep> {
    let cancel = RecoveryStep::new(RecoveryAction::Cancel, "Cancel the navigation");

    if module == modules::NETWORK || stage == stages::FETCH || stage == stages::CONNECT {
        return vec![
            RecoveryStep::new(RecoveryAction::Retry, "Retry the request"),
            RecoveryStep::new(RecoveryAction::Skip, "Skip this resource and continue"),
            cancel,
        ];
    }
    if module == modules::HTML || module == modules::CSS || stage == stages::PARSE {
        return vec![
            RecoveryStep::new(RecoveryAction::Replay, "Replay parsing from the captured input"),
            cancel,
        ];
    }
    if module == modules::RENDER ||
        module == modules::LAYOUT ||
        stage == stages::PAINT ||
        stage == stages::LAYOUT
    {
        return vec![
            RecoveryStep::new(RecoveryAction::Replay, "Replay the render pass"),
            cancel,
        ];
    }
    vec![
        RecoveryStep::new(RecoveryAction::Retry, "Retry the failed operation"),
        cancel,
    ]
}
