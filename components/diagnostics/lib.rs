/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The engine's diagnostic substrate.
//!
//! Components report what happened through a [`DiagnosticEmitter`]: an
//! ordered, severity-filtered event log with observer fan-out and a
//! correlation id threading related events together. On failure, a
//! [`FailureTraceCollector`] snapshots enough context to decide whether two
//! failures are the same failure, and a [`RecoveryPlanner`] maps the failing
//! module/stage to an ordered list of user-visible continuation options.

mod emitter;
mod failure;
mod recovery;

pub use emitter::{format_diagnostic, DiagnosticEmitter, DiagnosticEvent, ObserverHandle};
pub use failure::{FailureTrace, FailureTraceCollector};
pub use recovery::{RecoveryAction, RecoveryPlan, RecoveryPlanner, RecoveryStep};

use strum::{AsRefStr, Display};

/// Event severity, ordered. The public names are lowercase.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Well-known module names used in diagnostics and recovery planning.
pub mod modules {
    pub const NETWORK: &str = "network";
    pub const HTML: &str = "html";
    pub const CSS: &str = "css";
    pub const STYLE: &str = "style";
    pub const LAYOUT: &str = "layout";
    pub const RENDER: &str = "render";
    pub const CACHE: &str = "cache";
    pub const POLICY: &str = "policy";
    pub const ENGINE: &str = "engine";
}

/// Well-known stage names used in diagnostics and recovery planning.
pub mod stages {
    pub const CONNECT: &str = "connect";
    pub const FETCH: &str = "fetch";
    pub const PARSE: &str = "parse";
    pub const CASCADE: &str = "cascade";
    pub const LAYOUT: &str = "layout";
    pub const PAINT: &str = "paint";
}
