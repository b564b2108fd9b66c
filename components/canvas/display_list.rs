/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Flattening a layout tree into paint-order display items.

use app_units::Au;
use euclid::Rect;
use layout::LayoutBox;
use style::{CSSPixel, Color};

use crate::DevicePixel;

/// One paintable item, in device pixels. Item order is paint order.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayItem {
    /// A solid fill.
    SolidRect {
        rect: Rect<i32, DevicePixel>,
        color: Color,
    },
    /// One glyph cell of a text run. Glyphs paint as fixed-advance blocks;
    /// there is no font rasterization, but every pixel is a pure function
    /// of the run's text, position and style.
    Glyph {
        rect: Rect<i32, DevicePixel>,
        color: Color,
    },
}

/// Build the display list for a laid-out tree: for each box, background
/// first, then the four border edges, then its text, then its children.
pub fn build_display_list(root: &LayoutBox) -> Vec<DisplayItem> {
    let mut items = Vec::new();
    push_box(root, &mut items);
    items
}

fn push_box(layout_box: &LayoutBox, items: &mut Vec<DisplayItem>) {
    push_background(layout_box, items);
    push_borders(layout_box, items);
    push_text(layout_box, items);
    for child in &layout_box.children {
        push_box(child, items);
    }
}

fn push_background(layout_box: &LayoutBox, items: &mut Vec<DisplayItem>) {
    let Some(color) = layout_box.style.background_color else {
        return;
    };
    items.push(DisplayItem::SolidRect {
        rect: to_device(&layout_box.dimensions.border_box()),
        color,
    });
}

fn push_borders(layout_box: &LayoutBox, items: &mut Vec<DisplayItem>) {
    let d = &layout_box.dimensions;
    let border = &d.border;
    if border.top == Au(0) &&
        border.right == Au(0) &&
        border.bottom == Au(0) &&
        border.left == Au(0)
    {
        return;
    }
    let color = layout_box.style.border_color;
    let border_box = to_device(&d.border_box());
    let top = au_px(border.top);
    let right = au_px(border.right);
    let bottom = au_px(border.bottom);
    let left = au_px(border.left);

    let mut edge = |x: i32, y: i32, w: i32, h: i32| {
        if w > 0 && h > 0 {
            items.push(DisplayItem::SolidRect {
                rect: Rect::new(euclid::Point2D::new(x, y), euclid::Size2D::new(w, h)),
                color,
            });
        }
    };
    let (x, y) = (border_box.origin.x, border_box.origin.y);
    let (w, h) = (border_box.size.width, border_box.size.height);
    edge(x, y, w, top);
    edge(x, y + h - bottom, w, bottom);
    edge(x, y, left, h);
    edge(x + w - right, y, right, h);
}

fn push_text(layout_box: &LayoutBox, items: &mut Vec<DisplayItem>) {
    for run in &layout_box.text_runs {
        let font_px = au_px(run.font_size);
        let advance = (run.font_size.0 as f32 * layout::CHAR_ADVANCE_FACTOR / 60.0).round() as i32;
        let glyph_height = (font_px * 7 + 5) / 10;
        let glyph_width = (advance - 1).max(1);
        // Baseline-ish placement: glyphs sit at the bottom of the em box.
        let y = au_px(run.origin.y) + font_px - glyph_height;

        let mut x = au_px(run.origin.x);
        for c in run.text.chars() {
            if !c.is_whitespace() {
                items.push(DisplayItem::Glyph {
                    rect: Rect::new(
                        euclid::Point2D::new(x, y),
                        euclid::Size2D::new(glyph_width, glyph_height),
                    ),
                    color: run.color,
                });
            }
            x += advance;
        }
    }
}

fn au_px(value: Au) -> i32 {
    value.to_nearest_px()
}

fn to_device(rect: &Rect<Au, CSSPixel>) -> Rect<i32, DevicePixel> {
    Rect::new(
        euclid::Point2D::new(au_px(rect.origin.x), au_px(rect.origin.y)),
        euclid::Size2D::new(au_px(rect.size.width), au_px(rect.size.height)),
    )
}
