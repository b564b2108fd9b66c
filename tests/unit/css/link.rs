/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use css::{extract_linked_css, load_linked_css, CssLoader, SimpleSelector, StylesheetRef};
use html::parse_html;

struct MapLoader {
    entries: Vec<(&'static str, &'static str)>,
}

impl CssLoader for MapLoader {
    fn load(&mut self, href: &str) -> Result<String, String> {
        self.entries
            .iter()
            .find(|(name, _)| *name == href)
            .map(|(_, text)| (*text).to_owned())
            .ok_or_else(|| "not found".to_owned())
    }
}

#[test]
fn test_extract_finds_style_and_stylesheet_links() {
    let parsed = parse_html(
        "<style>p { color: red; }</style>\
         <link rel=\"stylesheet\" href=\"site.css\">\
         <link rel=\"icon\" href=\"favicon.ico\">",
    );
    let refs = extract_linked_css(&parsed.document);
    assert_eq!(refs.len(), 2);
    assert_eq!(
        refs[0],
        StylesheetRef::Inline {
            text: "p { color: red; }".to_owned()
        }
    );
    assert_eq!(
        refs[1],
        StylesheetRef::External {
            href: "site.css".to_owned()
        }
    );
}

#[test]
fn test_merge_order_is_inline_then_style_then_links() {
    let parsed = parse_html(
        "<link rel=\"stylesheet\" href=\"linked.css\">\
         <style>em { color: green; }</style>",
    );
    let mut loader = MapLoader {
        entries: vec![("linked.css", "span { color: blue; }")],
    };
    let result = load_linked_css(&parsed.document, "div { color: red; }", &mut loader);

    assert!(result.warnings.is_empty());
    assert!(result.failed_urls.is_empty());
    let selectors: Vec<&SimpleSelector> = result
        .merged
        .rules
        .iter()
        .map(|rule| &rule.selectors[0].parts[0])
        .collect();
    // Caller CSS first, then the <style> block, then the <link>, even
    // though the link appears first in the document.
    assert_eq!(
        selectors,
        vec![
            &SimpleSelector::Type("div".to_owned()),
            &SimpleSelector::Type("em".to_owned()),
            &SimpleSelector::Type("span".to_owned()),
        ]
    );
}

#[test]
fn test_failed_link_degrades_to_warning() {
    let parsed = parse_html(
        "<style>p { color: red; }</style>\
         <link rel=\"stylesheet\" href=\"missing.css\">",
    );
    let mut loader = MapLoader { entries: vec![] };
    let result = load_linked_css(&parsed.document, "", &mut loader);

    assert_eq!(result.merged.rules.len(), 1);
    assert_eq!(result.failed_urls, vec!["missing.css".to_owned()]);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("missing.css"));
}

#[test]
fn test_multiple_style_blocks_merge_in_document_order() {
    let parsed = parse_html(
        "<style>p { color: red; }</style><div><style>em { color: blue; }</style></div>",
    );
    let mut loader = MapLoader { entries: vec![] };
    let result = load_linked_css(&parsed.document, "", &mut loader);
    assert_eq!(result.merged.rules.len(), 2);
    assert_eq!(
        result.merged.rules[0].selectors[0].parts,
        vec![SimpleSelector::Type("p".to_owned())]
    );
    assert_eq!(
        result.merged.rules[1].selectors[0].parts,
        vec![SimpleSelector::Type("em".to_owned())]
    );
}
