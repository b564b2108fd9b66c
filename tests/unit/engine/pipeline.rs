/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use css::parse_css;
use engine::{RenderDamage, RenderPipeline};

const PAGE: &str = "<div id=\"main\" class=\"box\"><span id=\"msg\">hello</span></div>";

fn pipeline() -> RenderPipeline {
    let (pipeline, warnings) =
        RenderPipeline::from_html(PAGE, parse_css("div { padding: 5px; }"), 200, 100);
    assert!(warnings.is_empty());
    pipeline
}

#[test]
fn test_construction_renders_once() {
    let pipeline = pipeline();
    assert_eq!(pipeline.render_count(), 1);
    assert_eq!(pipeline.canvas().width, 200);
    assert_eq!(pipeline.canvas().height, 100);
    assert!(!pipeline.layout_dump().is_empty());
}

#[test]
fn test_rerender_increments_by_exactly_one() {
    let mut pipeline = pipeline();
    pipeline.rerender();
    assert_eq!(pipeline.render_count(), 2);

    // Any number of mutations still costs one frame.
    assert!(pipeline.set_style_by_id("main", "background-color", "red"));
    assert!(pipeline.set_text_by_id("msg", "changed"));
    assert!(pipeline.set_attribute_by_id("main", "class", "other"));
    pipeline.rerender();
    assert_eq!(pipeline.render_count(), 3);
}

#[test]
fn test_mutations_record_damage_and_rerender_clears_it() {
    let mut pipeline = pipeline();
    assert_eq!(pipeline.damage(), RenderDamage::empty());
    pipeline.set_style_by_id("main", "color", "red");
    assert!(pipeline.damage().contains(RenderDamage::RESTYLE));
    pipeline.rerender();
    assert_eq!(pipeline.damage(), RenderDamage::empty());
}

#[test]
fn test_set_style_changes_the_rendered_canvas() {
    let mut pipeline = pipeline();
    let before = pipeline.canvas().pixels().to_vec();
    assert!(pipeline.set_style_by_id("main", "background-color", "red"));
    pipeline.rerender();
    assert_ne!(pipeline.canvas().pixels(), before.as_slice());
}

#[test]
fn test_set_style_merges_into_existing_inline_style() {
    let (mut pipeline, _) = RenderPipeline::from_html(
        "<div id=\"a\" style=\"color: red\">x</div>",
        parse_css(""),
        100,
        100,
    );
    assert!(pipeline.set_style_by_id("a", "width", "50px"));
    assert!(pipeline.set_style_by_id("a", "color", "blue"));
    let summary = pipeline.query_by_id("a").unwrap();
    let style_attr = summary
        .attributes
        .iter()
        .find(|(name, _)| name == "style")
        .map(|(_, value)| value.as_str())
        .unwrap();
    assert_eq!(style_attr, "color: blue; width: 50px");
}

#[test]
fn test_bridge_operations_on_missing_ids_return_false() {
    let mut pipeline = pipeline();
    assert!(!pipeline.set_style_by_id("ghost", "color", "red"));
    assert!(!pipeline.set_text_by_id("ghost", "x"));
    assert!(!pipeline.set_attribute_by_id("ghost", "a", "b"));
    assert!(pipeline.query_by_id("ghost").is_none());
}

#[test]
fn test_query_by_id_returns_a_summary() {
    let pipeline = pipeline();
    let summary = pipeline.query_by_id("msg").unwrap();
    assert_eq!(summary.tag_name, "span");
    assert_eq!(summary.id.as_deref(), Some("msg"));
    assert_eq!(summary.text, "hello");
}

#[test]
fn test_query_selector_finds_first_match_in_document_order() {
    let (pipeline, _) = RenderPipeline::from_html(
        "<p class=\"x\" id=\"first\">a</p><p class=\"x\" id=\"second\">b</p>",
        parse_css(""),
        100,
        100,
    );
    let first = pipeline.query_selector(".x").unwrap();
    assert_eq!(first.id.as_deref(), Some("first"));
    assert_eq!(pipeline.query_selector_all(".x").len(), 2);
    assert_eq!(pipeline.query_selector_all("p").len(), 2);
    assert!(pipeline.query_selector("#nope").is_none());
}

#[test]
fn test_set_text_replaces_children() {
    let mut pipeline = pipeline();
    pipeline.set_text_by_id("main", "plain");
    let summary = pipeline.query_by_id("main").unwrap();
    assert_eq!(summary.text, "plain");
    assert!(pipeline.query_by_id("msg").is_none());
}

#[test]
fn test_identical_pipelines_with_identical_mutations_render_identically() {
    let sheet = "div { padding: 5px; } span { font-size: 14px; }";
    let mutate = |pipeline: &mut RenderPipeline| {
        pipeline.set_style_by_id("main", "background-color", "teal");
        pipeline.set_text_by_id("msg", "updated");
        pipeline.rerender();
        pipeline.set_attribute_by_id("main", "class", "wide");
        pipeline.rerender();
    };

    let (mut a, _) = RenderPipeline::from_html(PAGE, parse_css(sheet), 320, 240);
    let (mut b, _) = RenderPipeline::from_html(PAGE, parse_css(sheet), 320, 240);
    mutate(&mut a);
    mutate(&mut b);

    assert_eq!(a.render_count(), b.render_count());
    assert_eq!(a.layout_dump(), b.layout_dump());
    assert_eq!(a.canvas().pixels(), b.canvas().pixels());
}

#[test]
fn test_layout_dump_reflects_the_current_frame() {
    let mut pipeline = pipeline();
    let before = pipeline.layout_dump().to_owned();
    pipeline.set_text_by_id("msg", "a considerably longer text run");
    pipeline.rerender();
    assert_ne!(pipeline.layout_dump(), before);
}
