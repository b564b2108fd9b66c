/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use css::parse_css;
use dom::Element;
use style::{matches_selector, style_for_element, Color, ComputedStyle, Display};

fn div_with(attrs: &[(&str, &str)]) -> Element {
    let mut element = Element::new("div");
    for (name, value) in attrs {
        element.set_attribute(name, value);
    }
    element
}

#[test]
fn test_type_selector_applies() {
    let sheet = parse_css("div { color: red; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.color, Color::rgb(255, 0, 0));
}

#[test]
fn test_non_matching_rule_is_ignored() {
    let sheet = parse_css("span { color: red; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.color, Color::black());
}

#[test]
fn test_class_and_id_selectors_match_attributes() {
    let sheet = parse_css(".note { color: green; } #main { background-color: yellow; }");
    let element = div_with(&[("class", "note plain"), ("id", "main")]);
    let style = style_for_element(&element, None, &sheet);
    assert_eq!(style.color, Color::rgb(0, 128, 0));
    assert_eq!(style.background_color, Some(Color::rgb(255, 255, 0)));
}

#[test]
fn test_higher_specificity_wins_over_order() {
    let sheet = parse_css("#main { color: blue; } div { color: red; }");
    let element = div_with(&[("id", "main")]);
    let style = style_for_element(&element, None, &sheet);
    assert_eq!(style.color, Color::rgb(0, 0, 255));
}

#[test]
fn test_equal_specificity_last_rule_wins() {
    let sheet = parse_css("div { color: red; } div { color: blue; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.color, Color::rgb(0, 0, 255));
}

#[test]
fn test_inline_style_wins_over_sheet_rules() {
    let sheet = parse_css("div { color: red; }");
    let element = div_with(&[("style", "color: green")]);
    let style = style_for_element(&element, None, &sheet);
    assert_eq!(style.color, Color::rgb(0, 128, 0));
}

#[test]
fn test_inline_style_wins_over_id_selector() {
    let sheet = parse_css("#main { color: red; }");
    let element = div_with(&[("id", "main"), ("style", "color: blue")]);
    let style = style_for_element(&element, None, &sheet);
    assert_eq!(style.color, Color::rgb(0, 0, 255));
}

#[test]
fn test_color_and_font_size_inherit() {
    let sheet = parse_css("");
    let mut parent = ComputedStyle::initial();
    parent.color = Color::rgb(10, 20, 30);
    parent.font_size = 20.0;
    parent.line_height = 24.0;

    let style = style_for_element(&div_with(&[]), Some(&parent), &sheet);
    assert_eq!(style.color, Color::rgb(10, 20, 30));
    assert_eq!(style.font_size, 20.0);
    assert_eq!(style.line_height, 24.0);
}

#[test]
fn test_box_properties_do_not_inherit() {
    let sheet = parse_css("");
    let mut parent = ComputedStyle::initial();
    parent.padding.left = 10.0;
    parent.background_color = Some(Color::rgb(1, 2, 3));

    let style = style_for_element(&div_with(&[]), Some(&parent), &sheet);
    assert_eq!(style.padding.left, 0.0);
    assert_eq!(style.background_color, None);
}

#[test]
fn test_display_none_parses() {
    let sheet = parse_css("div { display: none; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.display, Display::None);
}

#[test]
fn test_default_display_depends_on_tag() {
    let sheet = parse_css("");
    assert_eq!(
        style_for_element(&Element::new("span"), None, &sheet).display,
        Display::Inline
    );
    assert_eq!(
        style_for_element(&Element::new("div"), None, &sheet).display,
        Display::Block
    );
    assert_eq!(
        style_for_element(&Element::new("style"), None, &sheet).display,
        Display::None
    );
}

#[test]
fn test_padding_shorthand_and_longhand() {
    let sheet = parse_css("div { padding: 5px; padding-left: 9px; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.padding.top, 5.0);
    assert_eq!(style.padding.left, 9.0);
}

#[test]
fn test_border_shorthand_sets_width_and_color() {
    let sheet = parse_css("div { border: 2px solid red; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.border_width.top, 2.0);
    assert_eq!(style.border_color, Color::rgb(255, 0, 0));
}

#[test]
fn test_font_size_updates_line_height() {
    let sheet = parse_css("div { font-size: 20px; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.font_size, 20.0);
    assert_eq!(style.line_height, 24.0);
}

#[test]
fn test_line_height_factor_and_px() {
    let sheet = parse_css("div { font-size: 10px; line-height: 2; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.line_height, 20.0);

    let sheet = parse_css("div { line-height: 18px; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.line_height, 18.0);
}

#[test]
fn test_hex_colors() {
    let sheet = parse_css("div { color: #ff0000; background-color: #0f0; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.color, Color::rgb(255, 0, 0));
    assert_eq!(style.background_color, Some(Color::rgb(0, 255, 0)));
}

#[test]
fn test_unknown_values_fall_back_to_defaults() {
    let sheet = parse_css("div { color: blurple; width: 10em; }");
    let style = style_for_element(&div_with(&[]), None, &sheet);
    assert_eq!(style.color, Color::black());
    assert_eq!(style.width, None);
}

#[test]
fn test_matches_selector_conjunction() {
    let selector = css::parse_selector("div.note#main").unwrap();
    let matching = div_with(&[("class", "note"), ("id", "main")]);
    let wrong_class = div_with(&[("class", "other"), ("id", "main")]);
    assert!(matches_selector(&matching, &selector));
    assert!(!matches_selector(&wrong_class, &selector));
}
