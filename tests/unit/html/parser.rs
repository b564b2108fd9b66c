/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use dom::{serialize, NodeData};
use html::parse_html;

#[test]
fn test_well_formed_input_parses_without_warnings() {
    let result = parse_html("<div id=\"main\"><p>Hello</p></div>");
    assert!(result.warnings.is_empty());
    assert_eq!(serialize(&result.document), "<div id=\"main\"><p>Hello</p></div>");
}

#[test]
fn test_parse_is_deterministic() {
    let input = "<div><p>Hi<span>Bye</div><em>tail<!-- note";
    let first = parse_html(input);
    let second = parse_html(input);
    assert_eq!(serialize(&first.document), serialize(&second.document));
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_unclosed_tags_at_eof_are_implicitly_closed() {
    let result = parse_html("<div><p>text");
    assert_eq!(serialize(&result.document), "<div><p>text</p></div>");
    assert_eq!(
        result.warnings,
        vec![
            "Unclosed tag <p> implicitly closed".to_owned(),
            "Unclosed tag <div> implicitly closed".to_owned(),
        ]
    );
}

#[test]
fn test_mismatched_end_tag_closes_intervening_elements() {
    let result = parse_html("<div><p>Hi<span>Bye</div>");
    assert_eq!(
        serialize(&result.document),
        "<div><p>Hi<span>Bye</span></p></div>"
    );
    assert!(result.warnings.len() >= 1);
    assert!(result
        .warnings
        .iter()
        .all(|warning| warning.contains("implicitly closed")));
    assert!(result.warnings[0].contains("<span>"));
    assert!(result.warnings[1].contains("<p>"));
}

#[test]
fn test_orphan_end_tag_is_discarded() {
    let result = parse_html("<div>ok</div></p>");
    assert_eq!(serialize(&result.document), "<div>ok</div>");
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("Orphan end tag"));
}

#[test]
fn test_bare_angle_bracket_is_text() {
    let result = parse_html("<p>1 < 2</p>");
    assert_eq!(serialize(&result.document), "<p>1 < 2</p>");
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("treated as text"));
}

#[test]
fn test_unclosed_comment_runs_to_eof() {
    let result = parse_html("<p>ok</p><!-- dangling");
    assert_eq!(serialize(&result.document), "<p>ok</p><!-- dangling-->");
    assert_eq!(result.warnings, vec!["Unclosed HTML comment".to_owned()]);
}

#[test]
fn test_comments_and_doctype_are_preserved() {
    let result = parse_html("<!DOCTYPE html><!-- hi --><p>x</p>");
    assert!(result.warnings.is_empty());
    assert_eq!(
        serialize(&result.document),
        "<!DOCTYPE html><!-- hi --><p>x</p>"
    );
}

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    let result = parse_html("<DIV ID=\"a\" Class=b>x</DIV>");
    assert_eq!(serialize(&result.document), "<div id=\"a\" class=\"b\">x</div>");
}

#[test]
fn test_first_duplicate_attribute_wins() {
    let result = parse_html("<div id=\"first\" id=\"second\">x</div>");
    let element = result.document.children[0].as_element().unwrap().clone();
    assert_eq!(element.id(), Some("first"));
    assert_eq!(element.attributes().len(), 1);
}

#[test]
fn test_void_elements_do_not_nest_content() {
    let result = parse_html("<div><br>text<img src=\"x.png\">more</div>");
    assert!(result.warnings.is_empty());
    assert_eq!(
        serialize(&result.document),
        "<div><br>text<img src=\"x.png\">more</div>"
    );
}

#[test]
fn test_self_closing_tag_has_no_children() {
    let result = parse_html("<div><span/>after</div>");
    assert_eq!(serialize(&result.document), "<div><span></span>after</div>");
}

#[test]
fn test_style_content_is_raw_text() {
    let result = parse_html("<style>p > a { color: red; }</style>");
    assert!(result.warnings.is_empty());
    let style = &result.document.children[0];
    assert_eq!(style.text_content(), "p > a { color: red; }");
}

#[test]
fn test_script_content_is_raw_text() {
    let result = parse_html("<script>if (a < b) { f(); }</script><p>x</p>");
    assert!(result.warnings.is_empty());
    let script = &result.document.children[0];
    assert_eq!(script.text_content(), "if (a < b) { f(); }");
}

#[test]
fn test_unclosed_style_swallows_to_eof() {
    let result = parse_html("<style>p { color: red; }");
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("implicitly closed"));
    assert_eq!(result.document.children[0].text_content(), "p { color: red; }");
}

#[test]
fn test_adjacent_text_tokens_merge() {
    let result = parse_html("<p>1 < 2 < 3</p>");
    let paragraph = &result.document.children[0];
    assert_eq!(paragraph.children.len(), 1);
    match paragraph.children[0].data {
        NodeData::Text(ref text) => assert_eq!(text, "1 < 2 < 3"),
        ref other => panic!("expected a text node, got {:?}", other),
    }
}

#[test]
fn test_empty_input_parses_to_empty_document() {
    let result = parse_html("");
    assert!(result.warnings.is_empty());
    assert!(result.document.children.is_empty());
}

#[test]
fn test_attribute_quoting_styles() {
    let result = parse_html("<div a=\"1\" b='2' c=3 d>x</div>");
    let element = result.document.children[0].as_element().unwrap().clone();
    assert_eq!(element.get_attribute("a"), Some("1"));
    assert_eq!(element.get_attribute("b"), Some("2"));
    assert_eq!(element.get_attribute("c"), Some("3"));
    assert_eq!(element.get_attribute("d"), Some(""));
}
