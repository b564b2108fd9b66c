/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The ordered diagnostic event log and its observer fan-out.

use std::time::{Duration, Instant};

use log::{error, info, warn};

use crate::Severity;

/// One recorded diagnostic.
///
/// `timestamp` is measured against the owning emitter's epoch and is
/// monotonically non-decreasing within that emitter. Timestamps from
/// different emitters are not comparable.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticEvent {
    pub severity: Severity,
    pub module: String,
    pub stage: String,
    pub message: String,
    pub correlation_id: u64,
    pub timestamp: Duration,
}

/// Render a diagnostic in its wire form:
/// `[<severity>] <module>/<stage>: <message>`, with ` cid:<n>` appended iff
/// the correlation id is non-zero.
pub fn format_diagnostic(event: &DiagnosticEvent) -> String {
    let mut formatted = format!(
        "[{}] {}/{}: {}",
        event.severity, event.module, event.stage, event.message
    );
    if event.correlation_id != 0 {
        formatted.push_str(&format!(" cid:{}", event.correlation_id));
    }
    formatted
}

/// Opaque handle returned by [`DiagnosticEmitter::add_observer`], usable to
/// remove the observer again.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ObserverHandle(u64);

type Observer = Box<dyn FnMut(&DiagnosticEvent)>;

/// An ordered, severity-filtered diagnostic log.
///
/// Emission appends atomically: `events()` reflects every completed `emit`
/// call, in program order. Observers run in registration order and must not
/// re-enter `emit` on the same emitter.
pub struct DiagnosticEmitter {
    min_severity: Severity,
    correlation_id: u64,
    events: Vec<DiagnosticEvent>,
    observers: Vec<(u64, Observer)>,
    next_observer_id: u64,
    epoch: Instant,
    last_timestamp: Duration,
}

impl Default for DiagnosticEmitter {
    fn default() -> DiagnosticEmitter {
        DiagnosticEmitter::new()
    }
}

impl DiagnosticEmitter {
    pub fn new() -> DiagnosticEmitter {
        DiagnosticEmitter {
            min_severity: Severity::Info,
            correlation_id: 0,
            events: Vec::new(),
            observers: Vec::new(),
            next_observer_id: 0,
            epoch: Instant::now(),
            last_timestamp: Duration::ZERO,
        }
    }

    pub fn with_min_severity(min_severity: Severity) -> DiagnosticEmitter {
        let mut emitter = DiagnosticEmitter::new();
        emitter.min_severity = min_severity;
        emitter
    }

    /// Record one event if it clears the severity filter, then fan it out to
    /// the observers in registration order.
    pub fn emit(&mut self, severity: Severity, module: &str, stage: &str, message: &str) {
        if severity < self.min_severity {
            return;
        }

        // Instant is already monotonic; the clamp keeps equal-instant bursts
        // non-decreasing even if the platform clock has coarse resolution.
        let timestamp = self.epoch.elapsed().max(self.last_timestamp);
        self.last_timestamp = timestamp;

        match severity {
            Severity::Info => info!(target: "quill", "{}/{}: {}", module, stage, message),
            Severity::Warning => warn!(target: "quill", "{}/{}: {}", module, stage, message),
            Severity::Error => error!(target: "quill", "{}/{}: {}", module, stage, message),
        }

        self.events.push(DiagnosticEvent {
            severity,
            module: module.to_owned(),
            stage: stage.to_owned(),
            message: message.to_owned(),
            correlation_id: self.correlation_id,
            timestamp,
        });
        let event = &self.events[self.events.len() - 1];
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    /// Stable-order view of the events at one severity.
    pub fn events_by_severity(&self, severity: Severity) -> Vec<&DiagnosticEvent> {
        self.events
            .iter()
            .filter(|e| e.severity == severity)
            .collect()
    }

    /// Stable-order view of the events from one module.
    pub fn events_by_module(&self, module: &str) -> Vec<&DiagnosticEvent> {
        self.events.iter().filter(|e| e.module == module).collect()
    }

    pub fn correlation_id(&self) -> u64 {
        self.correlation_id
    }

    /// Change the correlation id stamped on future events. Events already
    /// recorded keep the id they were emitted with.
    pub fn set_correlation_id(&mut self, id: u64) {
        self.correlation_id = id;
    }

    pub fn min_severity(&self) -> Severity {
        self.min_severity
    }

    pub fn set_min_severity(&mut self, min_severity: Severity) {
        self.min_severity = min_severity;
    }

    /// Drop all recorded events. Observers stay registered.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Register an observer, invoked for each event that clears the filter.
    /// Observers must not call `emit` on this emitter.
    pub fn add_observer<F>(&mut self, observer: F) -> ObserverHandle
    where
        F: FnMut(&DiagnosticEvent) + 'static,
    {
        let id = self.next_observer_id;
        self.next_observer_id += 1;
        self.observers.push((id, Box::new(observer)));
        ObserverHandle(id)
    }

    /// Remove a previously registered observer. Returns whether the handle
    /// was still registered.
    pub fn remove_observer(&mut self, handle: ObserverHandle) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != handle.0);
        self.observers.len() != before
    }
}
