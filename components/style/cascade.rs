/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The cascade: from matching rules to a computed style.

use css::{parse_declarations, Declaration, Stylesheet};
use dom::Element;
use log::debug;
use smallvec::SmallVec;

use crate::matching::matches_selector;
use crate::values::{parse_color, parse_number, parse_px_length, Color};
use crate::{initial_display, Display};

const INITIAL_FONT_SIZE: f32 = 16.0;
const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Per-edge widths in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EdgeWidths {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl EdgeWidths {
    fn uniform(value: f32) -> EdgeWidths {
        EdgeWidths {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

/// The computed style of one element: exactly the properties layout and
/// paint consume.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedStyle {
    pub display: Display,
    pub color: Color,
    pub background_color: Option<Color>,
    pub font_size: f32,
    pub line_height: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub padding: EdgeWidths,
    pub margin: EdgeWidths,
    pub border_width: EdgeWidths,
    pub border_color: Color,
}

impl ComputedStyle {
    /// The root style: what an element with no parent and no rules gets.
    pub fn initial() -> ComputedStyle {
        ComputedStyle {
            display: Display::Block,
            color: Color::black(),
            background_color: None,
            font_size: INITIAL_FONT_SIZE,
            line_height: INITIAL_FONT_SIZE * LINE_HEIGHT_FACTOR,
            width: None,
            height: None,
            padding: EdgeWidths::default(),
            margin: EdgeWidths::default(),
            border_width: EdgeWidths::default(),
            border_color: Color::black(),
        }
    }
}

struct Applicable<'a> {
    specificity: (u32, u32, u32),
    order: usize,
    declarations: &'a [Declaration],
}

/// Compute an element's style under a stylesheet and its parent's computed
/// style.
///
/// Matching rules apply in (specificity, sheet order), then the inline
/// `style` attribute. The inherited properties are `color`, `font-size` and
/// `line-height`; everything else resets per element.
pub fn style_for_element(
    element: &Element,
    parent: Option<&ComputedStyle>,
    sheet: &Stylesheet,
) -> ComputedStyle {
    let mut style = ComputedStyle::initial();
    if let Some(parent) = parent {
        style.color = parent.color;
        style.font_size = parent.font_size;
        style.line_height = parent.line_height;
    }
    style.display = initial_display(&element.name);

    let mut applicable: SmallVec<[Applicable; 8]> = SmallVec::new();
    for (order, rule) in sheet.rules.iter().enumerate() {
        let best = rule
            .selectors
            .iter()
            .filter(|selector| matches_selector(element, selector))
            .map(|selector| selector.specificity())
            .max();
        if let Some(specificity) = best {
            applicable.push(Applicable {
                specificity,
                order,
                declarations: &rule.declarations,
            });
        }
    }
    applicable.sort_by_key(|a| (a.specificity, a.order));

    for entry in &applicable {
        for declaration in entry.declarations {
            apply_declaration(&mut style, declaration);
        }
    }

    if let Some(inline) = element.get_attribute("style") {
        for declaration in parse_declarations(inline) {
            apply_declaration(&mut style, &declaration);
        }
    }
    style
}

fn apply_declaration(style: &mut ComputedStyle, declaration: &Declaration) {
    let value = declaration.value.as_str();
    match declaration.property.as_str() {
        "display" => match value {
            "block" => style.display = Display::Block,
            "inline" => style.display = Display::Inline,
            "none" => style.display = Display::None,
            _ => debug!("unsupported display value {:?}", value),
        },
        "color" => {
            if let Some(color) = parse_color(value) {
                style.color = color;
            }
        },
        "background" | "background-color" => {
            if let Some(color) = parse_color(value) {
                style.background_color = Some(color);
            }
        },
        "font-size" => {
            if let Some(size) = parse_px_length(value) {
                style.font_size = size;
                style.line_height = size * LINE_HEIGHT_FACTOR;
            }
        },
        "line-height" => {
            if let Some(px) = parse_px_length(value) {
                style.line_height = px;
            } else if let Some(factor) = parse_number(value) {
                style.line_height = style.font_size * factor;
            }
        },
        "width" => style.width = parse_px_length(value),
        "height" => style.height = parse_px_length(value),
        "padding" => {
            if let Some(px) = parse_px_length(value) {
                style.padding = EdgeWidths::uniform(px);
            }
        },
        "padding-top" => apply_edge(value, &mut style.padding.top),
        "padding-right" => apply_edge(value, &mut style.padding.right),
        "padding-bottom" => apply_edge(value, &mut style.padding.bottom),
        "padding-left" => apply_edge(value, &mut style.padding.left),
        "margin" => {
            if let Some(px) = parse_px_length(value) {
                style.margin = EdgeWidths::uniform(px);
            }
        },
        "margin-top" => apply_edge(value, &mut style.margin.top),
        "margin-right" => apply_edge(value, &mut style.margin.right),
        "margin-bottom" => apply_edge(value, &mut style.margin.bottom),
        "margin-left" => apply_edge(value, &mut style.margin.left),
        "border-width" => {
            if let Some(px) = parse_px_length(value) {
                style.border_width = EdgeWidths::uniform(px);
            }
        },
        "border-color" => {
            if let Some(color) = parse_color(value) {
                style.border_color = color;
            }
        },
        "border" => apply_border_shorthand(style, value),
        other => debug!("unsupported property {:?} ignored", other),
    }
}

fn apply_edge(value: &str, edge: &mut f32) {
    if let Some(px) = parse_px_length(value) {
        *edge = px;
    }
}

/// `border: <width> <style> <color>`. The line style is accepted and
/// discarded; every border paints solid.
fn apply_border_shorthand(style: &mut ComputedStyle, value: &str) {
    for word in value.split_ascii_whitespace() {
        if let Some(px) = parse_px_length(word) {
            style.border_width = EdgeWidths::uniform(px);
        } else if let Some(color) = parse_color(word) {
            style.border_color = color;
        }
    }
}
