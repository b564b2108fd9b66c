/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Block flow and inline line breaking.
//!
//! Block boxes stack vertically at their containing block's content edge.
//! Widths resolve top-down, positions and heights bottom-up. Inline content
//! breaks at word boundaries against the content width, using the fixed
//! character advance from the crate root.

use app_units::Au;
use euclid::{Point2D, Rect};
use style::CSSPixel;

use crate::{text_advance, BoxType, EdgeSizes, LayoutBox, TextRun};

/// Lay out `layout_box` against its containing block's content rect, with
/// the block-direction cursor at `cursor_y`. Returns the margin-box height
/// the box consumed.
pub fn layout_block(
    layout_box: &mut LayoutBox,
    containing: Rect<Au, CSSPixel>,
    cursor_y: Au,
) -> Au {
    compute_width(layout_box, containing);
    position_box(layout_box, containing, cursor_y);
    layout_children(layout_box);
    compute_height(layout_box);
    layout_box.dimensions.margin_box().size.height
}

/// Resolve the box's own width and edges from style and the containing
/// width. A styled `width` wins; otherwise the box fills the containing
/// block minus its own edges.
fn compute_width(layout_box: &mut LayoutBox, containing: Rect<Au, CSSPixel>) {
    let style = &layout_box.style;
    let margin = EdgeSizes::from_px(&style.margin);
    let border = EdgeSizes::from_px(&style.border_width);
    let padding = EdgeSizes::from_px(&style.padding);

    let horizontal_edges = margin.horizontal() + border.horizontal() + padding.horizontal();
    let width = match style.width {
        Some(px) => Au::from_f32_px(px),
        None => (containing.size.width - horizontal_edges).max(Au(0)),
    };

    let d = &mut layout_box.dimensions;
    d.margin = margin;
    d.border = border;
    d.padding = padding;
    d.content.size.width = width;
}

fn position_box(layout_box: &mut LayoutBox, containing: Rect<Au, CSSPixel>, cursor_y: Au) {
    let d = &mut layout_box.dimensions;
    d.content.origin.x = containing.origin.x + d.margin.left + d.border.left + d.padding.left;
    d.content.origin.y = cursor_y + d.margin.top + d.border.top + d.padding.top;
}

fn layout_children(layout_box: &mut LayoutBox) {
    if !layout_box.inline_items.is_empty() {
        layout_inline_content(layout_box);
        return;
    }

    let containing = layout_box.dimensions.content;
    let mut cursor_y = containing.origin.y;
    let mut content_height = Au(0);
    let mut children = std::mem::take(&mut layout_box.children);
    for child in &mut children {
        let consumed = layout_block(child, containing, cursor_y);
        cursor_y += consumed;
        content_height += consumed;
    }
    layout_box.children = children;
    layout_box.dimensions.content.size.height = content_height;
}

/// Break a box's inline items into text runs within its content width.
///
/// Words of one item share a run while they fit on the line; a word that
/// would overflow starts a new line. The line advance is the tallest
/// `line-height` placed on that line.
fn layout_inline_content(layout_box: &mut LayoutBox) {
    let content = layout_box.dimensions.content;
    let max_x = content.origin.x + content.size.width;

    let mut runs: Vec<TextRun> = Vec::new();
    let mut cursor = Point2D::new(content.origin.x, content.origin.y);
    let mut line_height = Au(0);
    let mut total_height = Au(0);

    for item in &layout_box.inline_items {
        let font_size = item.style.font_size;
        let item_line_height = Au::from_f32_px(item.style.line_height);
        let space = text_advance(" ", font_size);

        let mut current: Option<TextRun> = None;
        for word in item.text.split_ascii_whitespace() {
            let word_width = text_advance(word, font_size);
            let at_line_start = cursor.x == content.origin.x;
            let needed = if current.is_some() {
                space + word_width
            } else {
                word_width
            };

            if !at_line_start && cursor.x + needed > max_x {
                if let Some(run) = current.take() {
                    runs.push(run);
                }
                total_height += line_height;
                cursor.x = content.origin.x;
                cursor.y += line_height;
                line_height = Au(0);
            }

            line_height = line_height.max(item_line_height);
            match current {
                Some(ref mut run) => {
                    run.text.push(' ');
                    run.text.push_str(word);
                    cursor.x += space + word_width;
                },
                None => {
                    current = Some(TextRun {
                        text: word.to_owned(),
                        origin: cursor,
                        font_size: Au::from_f32_px(font_size),
                        line_height: item_line_height,
                        color: item.style.color,
                    });
                    cursor.x += word_width;
                },
            }
        }
        if let Some(run) = current.take() {
            runs.push(run);
        }
        // A following item continues on the same line, in its own run.
        if cursor.x > content.origin.x {
            cursor.x += space;
        }
    }

    if !runs.is_empty() {
        total_height += line_height;
    }

    layout_box.text_runs = runs;
    layout_box.dimensions.content.size.height = total_height;
}

/// An explicit `height` on a block element overrides the content height.
fn compute_height(layout_box: &mut LayoutBox) {
    if layout_box.box_type == BoxType::Block {
        if let Some(px) = layout_box.style.height {
            layout_box.dimensions.content.size.height = Au::from_f32_px(px);
        }
    }
}
