/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Selector matching and the cascade.
//!
//! Styling an element is a single ordered fold: matching sheet rules sorted
//! by (specificity, sheet order), then the element's inline `style`
//! declarations. Last writer wins per property, so inline style beats every
//! sheet rule, id selectors included. A fixed property list inherits.

mod cascade;
mod matching;
pub mod values;

pub use cascade::{style_for_element, ComputedStyle, EdgeWidths};
pub use matching::matches_selector;
pub use values::Color;

use strum::Display;

/// Unit tag for lengths in CSS pixel space.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CSSPixel;

/// The `display` values the layout engine understands.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum Display {
    Block,
    Inline,
    None,
}

/// The default display of an element, by tag, before any stylesheet rule.
pub fn initial_display(tag: &str) -> Display {
    match tag {
        "a" | "b" | "code" | "em" | "i" | "img" | "label" | "small" | "span" | "strong" |
        "sub" | "sup" | "u" => Display::Inline,
        "head" | "link" | "meta" | "script" | "style" | "title" => Display::None,
        _ => Display::Block,
    }
}
