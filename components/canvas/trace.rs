/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Render stage tracing.
//!
//! A traced render appends one entry per stage, in a fixed order. The stage
//! sequence is the reproducible part; the elapsed times are informational
//! and excluded from trace comparison.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use strum::{AsRefStr, Display};

/// The render stages, in the order a render passes through them.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum TraceStage {
    CanvasInit,
    BackgroundResolve,
    Paint,
    Complete,
}

/// One recorded stage and the time since the previous entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceEntry {
    pub stage: TraceStage,
    pub elapsed_since_prev_ms: f64,
}

/// An ordered render trace.
#[derive(Clone, Debug, Default)]
pub struct RenderTrace {
    entries: Vec<TraceEntry>,
}

impl RenderTrace {
    pub fn new() -> RenderTrace {
        RenderTrace {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Two traces reproduce each other iff their stage sequences agree.
    pub fn is_reproducible_with(&self, other: &RenderTrace) -> bool {
        self.entries.len() == other.entries.len() &&
            self.entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a.stage == b.stage)
    }
}

/// Write a trace in the line-oriented collaborator format: one entry per
/// line, each carrying `stage=<Name>` and numeric fields.
pub fn write_render_trace(trace: &RenderTrace, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (index, entry) in trace.entries().iter().enumerate() {
        writeln!(
            writer,
            "stage={} index={} elapsed_ms={:.3}",
            entry.stage, index, entry.elapsed_since_prev_ms
        )?;
    }
    writer.flush()
}
