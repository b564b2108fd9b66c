/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Selector matching against elements.

use css::{Selector, SimpleSelector};
use dom::Element;

/// Whether a compound selector matches an element. Every part of the
/// conjunction must match.
pub fn matches_selector(element: &Element, selector: &Selector) -> bool {
    selector.parts.iter().all(|part| match *part {
        SimpleSelector::Universal => true,
        SimpleSelector::Type(ref name) => element.name == *name,
        SimpleSelector::Id(ref id) => element.id() == Some(id.as_str()),
        SimpleSelector::Class(ref class) => element.classes().any(|c| c == class),
    })
}
