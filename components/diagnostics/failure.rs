/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Failure traces: reproducible snapshots of an error and its context.

use crate::{DiagnosticEmitter, DiagnosticEvent};

/// A captured failure.
///
/// Two traces are *reproducible with* each other iff they agree on
/// `module`, `stage`, `error_message` and the ordered snapshot pairs.
/// The correlation id and the surrounding events are circumstantial and
/// excluded from that equality.
#[derive(Clone, Debug)]
pub struct FailureTrace {
    pub correlation_id: u64,
    pub module: String,
    pub stage: String,
    pub error_message: String,
    snapshots: Vec<(String, String)>,
    context_events: Vec<DiagnosticEvent>,
}

impl FailureTrace {
    /// Attach a key/value snapshot. Order is preserved and significant.
    pub fn add_snapshot(&mut self, key: &str, value: &str) {
        self.snapshots.push((key.to_owned(), value.to_owned()));
    }

    pub fn snapshots(&self) -> &[(String, String)] {
        &self.snapshots
    }

    pub fn context_events(&self) -> &[DiagnosticEvent] {
        &self.context_events
    }

    pub fn is_reproducible_with(&self, other: &FailureTrace) -> bool {
        self.module == other.module &&
            self.stage == other.stage &&
            self.error_message == other.error_message &&
            self.snapshots == other.snapshots
    }
}

/// Owns the traces captured over a session.
#[derive(Default)]
pub struct FailureTraceCollector {
    traces: Vec<FailureTrace>,
}

impl FailureTraceCollector {
    pub fn new() -> FailureTraceCollector {
        FailureTraceCollector { traces: Vec::new() }
    }

    /// Capture a failure: the emitter's correlation id and its current event
    /// log are copied into a stored trace. Snapshots are the caller's to add
    /// on the returned trace.
    pub fn capture(
        &mut self,
        emitter: &DiagnosticEmitter,
        module: &str,
        stage: &str,
        error_message: &str,
    ) -> &mut FailureTrace {
        let trace = FailureTrace {
            correlation_id: emitter.correlation_id(),
            module: module.to_owned(),
            stage: stage.to_owned(),
            error_message: error_message.to_owned(),
            snapshots: Vec::new(),
            context_events: emitter.events().to_vec(),
        };
        let index = self.traces.len();
        self.traces.push(trace);
        &mut self.traces[index]
    }

    pub fn traces(&self) -> &[FailureTrace] {
        &self.traces
    }

    pub fn size(&self) -> usize {
        self.traces.len()
    }

    pub fn clear(&mut self) {
        self.traces.clear();
    }
}
