/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use css::{parse_css, parse_declarations, parse_selector, SimpleSelector};

#[test]
fn test_parse_single_rule() {
    let sheet = parse_css("div { color: red; padding: 5px; }");
    assert_eq!(sheet.rules.len(), 1);
    let rule = &sheet.rules[0];
    assert_eq!(rule.selectors.len(), 1);
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(rule.declarations[0].property, "color");
    assert_eq!(rule.declarations[0].value, "red");
}

#[test]
fn test_selector_variants() {
    let sheet = parse_css("* { margin: 0; } div { margin: 0; } #main { margin: 0; } .note { margin: 0; }");
    assert_eq!(sheet.rules.len(), 4);
    assert_eq!(sheet.rules[0].selectors[0].parts, vec![SimpleSelector::Universal]);
    assert_eq!(
        sheet.rules[1].selectors[0].parts,
        vec![SimpleSelector::Type("div".to_owned())]
    );
    assert_eq!(
        sheet.rules[2].selectors[0].parts,
        vec![SimpleSelector::Id("main".to_owned())]
    );
    assert_eq!(
        sheet.rules[3].selectors[0].parts,
        vec![SimpleSelector::Class("note".to_owned())]
    );
}

#[test]
fn test_compound_selector_parses_in_order() {
    let selector = parse_selector("div.note#main").unwrap();
    assert_eq!(
        selector.parts,
        vec![
            SimpleSelector::Type("div".to_owned()),
            SimpleSelector::Class("note".to_owned()),
            SimpleSelector::Id("main".to_owned()),
        ]
    );
}

#[test]
fn test_selector_list_splits_on_commas() {
    let sheet = parse_css("h1, h2, .title { color: blue; }");
    assert_eq!(sheet.rules[0].selectors.len(), 3);
}

#[test]
fn test_specificity_orders_id_class_type() {
    let id = parse_selector("#a").unwrap().specificity();
    let class = parse_selector(".a").unwrap().specificity();
    let type_ = parse_selector("a").unwrap().specificity();
    let compound = parse_selector("a.b#c").unwrap().specificity();
    assert!(id > class);
    assert!(class > type_);
    assert_eq!(compound, (1, 1, 1));
    assert_eq!(parse_selector("*").unwrap().specificity(), (0, 0, 0));
}

#[test]
fn test_comments_are_ignored() {
    let sheet = parse_css("/* header */ div { /* inner */ color: red; }");
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(sheet.rules[0].declarations.len(), 1);
}

#[test]
fn test_unknown_at_rules_are_skipped() {
    let sheet = parse_css(
        "@import url(x.css); @media screen { p { color: red; } } div { color: blue; }",
    );
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(
        sheet.rules[0].selectors[0].parts,
        vec![SimpleSelector::Type("div".to_owned())]
    );
}

#[test]
fn test_combinator_selectors_are_dropped() {
    let sheet = parse_css("div p { color: red; } span { color: blue; }");
    assert_eq!(sheet.rules.len(), 1);
    assert_eq!(
        sheet.rules[0].selectors[0].parts,
        vec![SimpleSelector::Type("span".to_owned())]
    );
}

#[test]
fn test_malformed_declarations_are_dropped() {
    let declarations = parse_declarations("color red; font-size: 12px; ;");
    assert_eq!(declarations.len(), 1);
    assert_eq!(declarations[0].property, "font-size");
}

#[test]
fn test_property_names_lowercase_values_keep_case() {
    let declarations = parse_declarations("COLOR: Red");
    assert_eq!(declarations[0].property, "color");
    assert_eq!(declarations[0].value, "Red");
}

#[test]
fn test_parse_is_deterministic() {
    let input = "@media x { a { b: c; } } div, .x { color: red; } broken { ";
    assert_eq!(parse_css(input), parse_css(input));
}

#[test]
fn test_sheet_append_preserves_order() {
    let mut base = parse_css("div { color: red; }");
    base.append(parse_css("span { color: blue; }"));
    assert_eq!(base.rules.len(), 2);
    assert_eq!(
        base.rules[1].selectors[0].parts,
        vec![SimpleSelector::Type("span".to_owned())]
    );
}
