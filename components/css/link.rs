/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Linked stylesheet extraction and merging.
//!
//! `<style>` blocks carry their text inline; `<link rel="stylesheet">`
//! references go through the [`CssLoader`] collaborator. A reference that
//! cannot be loaded degrades to a warning plus a `failed_urls` entry; the
//! merge never fails as a whole.

use dom::{Document, Node, NodeData};
use log::debug;

use crate::{parse_css, Stylesheet};

/// One stylesheet reference found in a document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StylesheetRef {
    /// A `<style>` element's text.
    Inline { text: String },
    /// A `<link rel="stylesheet" href="...">` reference.
    External { href: String },
}

/// The collaborator that resolves external stylesheet references to text.
/// Fetching bytes is outside the engine core.
pub trait CssLoader {
    fn load(&mut self, href: &str) -> Result<String, String>;
}

/// The merged sheet plus everything that went wrong along the way.
#[derive(Debug, Default)]
pub struct LinkedCssResult {
    pub merged: Stylesheet,
    pub warnings: Vec<String>,
    pub failed_urls: Vec<String>,
}

/// Collect stylesheet references in document order. `<link>` elements with
/// other `rel` values are ignored.
pub fn extract_linked_css(document: &Document) -> Vec<StylesheetRef> {
    let mut refs = Vec::new();
    document.for_each_node(|node| {
        if let Some(stylesheet_ref) = reference_for(node) {
            refs.push(stylesheet_ref);
        }
    });
    refs
}

fn reference_for(node: &Node) -> Option<StylesheetRef> {
    let element = node.as_element()?;
    match element.name.as_str() {
        "style" => Some(StylesheetRef::Inline {
            text: node.text_content(),
        }),
        "link" => {
            let rel = element.get_attribute("rel")?;
            if !rel.eq_ignore_ascii_case("stylesheet") {
                return None;
            }
            let href = element.get_attribute("href")?;
            Some(StylesheetRef::External {
                href: href.to_owned(),
            })
        },
        _ => None,
    }
}

/// Build the merged stylesheet for a document.
///
/// Rule order is fixed: the caller's inline CSS first, then every `<style>`
/// block in document order, then every successfully loaded `<link>` in
/// document order. Failed links contribute a warning and a `failed_urls`
/// entry instead of rules.
pub fn load_linked_css(
    document: &Document,
    inline_css: &str,
    loader: &mut dyn CssLoader,
) -> LinkedCssResult {
    let mut result = LinkedCssResult::default();
    if !inline_css.is_empty() {
        result.merged.append(parse_css(inline_css));
    }

    let refs = extract_linked_css(document);
    for stylesheet_ref in &refs {
        if let StylesheetRef::Inline { text } = stylesheet_ref {
            result.merged.append(parse_css(text));
        }
    }
    for stylesheet_ref in &refs {
        let StylesheetRef::External { href } = stylesheet_ref else {
            continue;
        };
        match loader.load(href) {
            Ok(text) => result.merged.append(parse_css(&text)),
            Err(reason) => {
                debug!("stylesheet {} failed to load: {}", href, reason);
                result
                    .warnings
                    .push(format!("Failed to load stylesheet {}: {}", href, reason));
                result.failed_urls.push(href.clone());
            },
        }
    }
    result
}
