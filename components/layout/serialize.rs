/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Canonical textual dump of a layout tree.
//!
//! The dump carries every geometric and style input that painting consumes,
//! so equality of two dumps is equality of the frames they would produce.
//! Regression tests compare these strings.

use std::fmt::Write;

use app_units::Au;
use euclid::Rect;
use style::{CSSPixel, Color};

use crate::{BoxType, LayoutBox};

/// Serialize a laid-out box tree.
pub fn serialize_layout(root: &LayoutBox) -> String {
    let mut out = String::new();
    serialize_box(root, 0, &mut out);
    out
}

fn serialize_box(layout_box: &LayoutBox, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let kind = match layout_box.box_type {
        BoxType::Block => "block",
        BoxType::Inline => "inline",
        BoxType::Anonymous => "anonymous",
    };
    let _ = write!(out, "{}{}", indent, kind);
    if let Some(ref tag) = layout_box.tag_name {
        let _ = write!(out, " <{}>", tag);
    }
    if let Some(ref id) = layout_box.element_id {
        let _ = write!(out, " id={}", id);
    }
    let d = &layout_box.dimensions;
    let _ = write!(out, " content={}", fmt_rect(&d.content));
    let _ = write!(
        out,
        " padding=({},{},{},{}) border=({},{},{},{}) margin=({},{},{},{})",
        d.padding.top.0,
        d.padding.right.0,
        d.padding.bottom.0,
        d.padding.left.0,
        d.border.top.0,
        d.border.right.0,
        d.border.bottom.0,
        d.border.left.0,
        d.margin.top.0,
        d.margin.right.0,
        d.margin.bottom.0,
        d.margin.left.0,
    );
    if let Some(bg) = layout_box.style.background_color {
        let _ = write!(out, " bg={}", fmt_color(bg));
    }
    out.push('\n');

    for run in &layout_box.text_runs {
        let _ = writeln!(
            out,
            "{}  run {:?} at ({},{}) font={} color={}",
            indent, run.text, run.origin.x.0, run.origin.y.0, run.font_size.0,
            fmt_color(run.color),
        );
    }
    for child in &layout_box.children {
        serialize_box(child, depth + 1, out);
    }
}

/// Rects print in raw `Au` units: exact integers, no float formatting.
fn fmt_rect(rect: &Rect<Au, CSSPixel>) -> String {
    format!(
        "({},{})+({}x{})",
        rect.origin.x.0, rect.origin.y.0, rect.size.width.0, rect.size.height.0
    )
}

fn fmt_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}{:02x}", color.r, color.g, color.b, color.a)
}
