/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Rasterizing a display list into the canvas.

use std::time::Instant;

use layout::LayoutBox;
use log::debug;

use crate::display_list::{build_display_list, DisplayItem};
use crate::trace::{RenderTrace, TraceEntry, TraceStage};
use crate::Canvas;

/// Render a layout tree to a fresh canvas.
pub fn render_to_canvas(root: &LayoutBox, width: usize, height: usize) -> Canvas {
    render_impl(root, width, height, None)
}

/// Render with stage tracing. Appends exactly `CanvasInit`,
/// `BackgroundResolve`, `Paint`, `Complete` to `trace`, in that order. The
/// pixel output is identical to the untraced render.
pub fn render_to_canvas_traced(
    root: &LayoutBox,
    width: usize,
    height: usize,
    trace: &mut RenderTrace,
) -> Canvas {
    render_impl(root, width, height, Some(trace))
}

fn render_impl(
    root: &LayoutBox,
    width: usize,
    height: usize,
    mut trace: Option<&mut RenderTrace>,
) -> Canvas {
    let mut last_stage = Instant::now();
    let mut record = |trace: &mut Option<&mut RenderTrace>, stage: TraceStage| {
        if let Some(trace) = trace.as_deref_mut() {
            let now = Instant::now();
            trace.push(TraceEntry {
                stage,
                elapsed_since_prev_ms: now.duration_since(last_stage).as_secs_f64() * 1000.0,
            });
            last_stage = now;
        }
    };

    let mut canvas = Canvas::new(width, height);
    record(&mut trace, TraceStage::CanvasInit);

    let items = build_display_list(root);
    debug!("display list has {} items", items.len());
    record(&mut trace, TraceStage::BackgroundResolve);

    for item in &items {
        paint_item(&mut canvas, item);
    }
    record(&mut trace, TraceStage::Paint);

    record(&mut trace, TraceStage::Complete);
    canvas
}

fn paint_item(canvas: &mut Canvas, item: &DisplayItem) {
    match *item {
        DisplayItem::SolidRect { rect, color } | DisplayItem::Glyph { rect, color } => {
            canvas.fill_rect(
                rect.origin.x,
                rect.origin.y,
                rect.size.width,
                rect.size.height,
                color,
            );
        },
    }
}

/// Serialize the visible text of a layout tree with naive wrapping at
/// `line_width` characters. Runs concatenate in tree order.
pub fn render_to_text(root: &LayoutBox, line_width: usize) -> String {
    let mut words = Vec::new();
    collect_words(root, &mut words);

    let line_width = line_width.max(1);
    let mut out = String::new();
    let mut column = 0;
    for word in words {
        let width = word.chars().count();
        if column > 0 && column + 1 + width > line_width {
            out.push('\n');
            column = 0;
        } else if column > 0 {
            out.push(' ');
            column += 1;
        }
        out.push_str(&word);
        column += width;
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn collect_words(layout_box: &LayoutBox, words: &mut Vec<String>) {
    for run in &layout_box.text_runs {
        words.extend(run.text.split_ascii_whitespace().map(str::to_owned));
    }
    for child in &layout_box.children {
        collect_words(child, words);
    }
}
