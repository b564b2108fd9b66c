/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The render pipeline and the scripting bridge.

use bitflags::bitflags;
use canvas::{render_to_canvas, render_to_canvas_traced, Canvas, RenderTrace};
use css::{parse_selector, Stylesheet};
use dom::{Document, Node};
use html::parse_html;
use layout::{build_layout_tree, serialize_layout};
use log::debug;
use style::matches_selector;

bitflags! {
    /// What a bridge mutation dirtied. `rerender` recomputes the whole
    /// tail regardless; the flags record that a render is owed at all.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct RenderDamage: u8 {
        const RESTYLE = 1 << 0;
        const REFLOW = 1 << 1;
        const REPAINT = 1 << 2;
    }
}

/// A read-only summary of an element, as handed across the bridge.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSummary {
    pub tag_name: String,
    pub id: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub text: String,
}

impl ElementSummary {
    fn of(node: &Node) -> Option<ElementSummary> {
        let element = node.as_element()?;
        Some(ElementSummary {
            tag_name: element.name.clone(),
            id: element.id().map(str::to_owned),
            attributes: element.attributes().to_vec(),
            text: node.text_content(),
        })
    }
}

/// Owns a document, its stylesheet and the rendered products.
///
/// Construction runs one full cascade/layout/paint pass. Every `rerender`
/// rebuilds the per-frame state (layout tree, canvas) from scratch and
/// bumps the frame counter by exactly one, however many mutations happened
/// since the last frame. Two pipelines fed identical inputs and identical
/// ordered mutations produce byte-identical canvases.
pub struct RenderPipeline {
    dom: Document,
    stylesheet: Stylesheet,
    viewport_width: u32,
    viewport_height: u32,
    canvas: Canvas,
    layout_dump: String,
    render_count: u64,
    damage: RenderDamage,
}

impl RenderPipeline {
    pub fn new(
        dom: Document,
        stylesheet: Stylesheet,
        viewport_width: u32,
        viewport_height: u32,
    ) -> RenderPipeline {
        let mut pipeline = RenderPipeline {
            dom,
            stylesheet,
            viewport_width,
            viewport_height,
            canvas: Canvas::new(0, 0),
            layout_dump: String::new(),
            render_count: 0,
            damage: RenderDamage::empty(),
        };
        pipeline.render_pass(None);
        pipeline.render_count = 1;
        pipeline
    }

    /// Parse HTML and build a pipeline in one step. The parser's recovery
    /// warnings are returned alongside.
    pub fn from_html(
        html_source: &str,
        stylesheet: Stylesheet,
        viewport_width: u32,
        viewport_height: u32,
    ) -> (RenderPipeline, Vec<String>) {
        let parsed = parse_html(html_source);
        let pipeline =
            RenderPipeline::new(parsed.document, stylesheet, viewport_width, viewport_height);
        (pipeline, parsed.warnings)
    }

    fn render_pass(&mut self, trace: Option<&mut RenderTrace>) {
        let layout = build_layout_tree(
            &self.dom,
            &self.stylesheet,
            self.viewport_width as f32,
        );
        self.layout_dump = serialize_layout(&layout);
        let (w, h) = (self.viewport_width as usize, self.viewport_height as usize);
        self.canvas = match trace {
            Some(trace) => render_to_canvas_traced(&layout, w, h, trace),
            None => render_to_canvas(&layout, w, h),
        };
        self.damage = RenderDamage::empty();
    }

    /// Recompute cascade, layout and paint from the current document and
    /// stylesheet.
    pub fn rerender(&mut self) {
        self.render_pass(None);
        self.render_count += 1;
    }

    /// Like [`rerender`](Self::rerender), recording stage timings.
    pub fn rerender_traced(&mut self, trace: &mut RenderTrace) {
        self.render_pass(Some(trace));
        self.render_count += 1;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// The canonical dump of the last frame's layout tree.
    pub fn layout_dump(&self) -> &str {
        &self.layout_dump
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn damage(&self) -> RenderDamage {
        self.damage
    }

    pub fn dom(&self) -> &Document {
        &self.dom
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.viewport_width, self.viewport_height)
    }

    /// Mutable access for event dispatch. Handlers mutate the document;
    /// the owed render is recorded wholesale.
    pub fn dom_mut_for_dispatch(&mut self) -> &mut Document {
        self.damage |= RenderDamage::RESTYLE | RenderDamage::REFLOW | RenderDamage::REPAINT;
        &mut self.dom
    }

    /// Merge one declaration into an element's inline `style` attribute.
    pub fn set_style_by_id(&mut self, id: &str, property: &str, value: &str) -> bool {
        let Some(node) = self.dom.find_by_id_mut(id) else {
            debug!("set_style_by_id: no element with id {:?}", id);
            return false;
        };
        let Some(element) = node.as_element_mut() else {
            return false;
        };
        let merged = merge_inline_style(element.get_attribute("style"), property, value);
        element.set_attribute("style", &merged);
        self.damage |= RenderDamage::RESTYLE | RenderDamage::REFLOW | RenderDamage::REPAINT;
        true
    }

    /// Replace an element's children with a single text node.
    pub fn set_text_by_id(&mut self, id: &str, text: &str) -> bool {
        let Some(node) = self.dom.find_by_id_mut(id) else {
            debug!("set_text_by_id: no element with id {:?}", id);
            return false;
        };
        if node.as_element().is_none() {
            return false;
        }
        node.children = vec![Node::new_text(text)];
        self.damage |= RenderDamage::REFLOW | RenderDamage::REPAINT;
        true
    }

    pub fn set_attribute_by_id(&mut self, id: &str, name: &str, value: &str) -> bool {
        let Some(node) = self.dom.find_by_id_mut(id) else {
            debug!("set_attribute_by_id: no element with id {:?}", id);
            return false;
        };
        let Some(element) = node.as_element_mut() else {
            return false;
        };
        element.set_attribute(name, value);
        // Class and id changes re-match selectors; take the full tail.
        self.damage |= RenderDamage::RESTYLE | RenderDamage::REFLOW | RenderDamage::REPAINT;
        true
    }

    pub fn query_by_id(&self, id: &str) -> Option<ElementSummary> {
        self.dom.find_by_id(id).and_then(ElementSummary::of)
    }

    /// The first element matching a compound selector, in document order.
    pub fn query_selector(&self, selector_text: &str) -> Option<ElementSummary> {
        self.query_selector_all(selector_text).into_iter().next()
    }

    /// Every element matching a compound selector, in document order.
    pub fn query_selector_all(&self, selector_text: &str) -> Vec<ElementSummary> {
        let Some(selector) = parse_selector(selector_text.trim()) else {
            debug!("query_selector: unsupported selector {:?}", selector_text);
            return Vec::new();
        };
        let mut matches = Vec::new();
        self.dom.for_each_node(|node| {
            if let Some(element) = node.as_element() {
                if matches_selector(element, &selector) {
                    if let Some(summary) = ElementSummary::of(node) {
                        matches.push(summary);
                    }
                }
            }
        });
        matches
    }
}

/// Rewrite an inline style attribute with one property set to a new value,
/// preserving the order of the others.
fn merge_inline_style(existing: Option<&str>, property: &str, value: &str) -> String {
    let mut declarations = match existing {
        Some(text) => css::parse_declarations(text),
        None => Vec::new(),
    };
    let property_lower = property.to_ascii_lowercase();
    match declarations
        .iter_mut()
        .find(|d| d.property == property_lower)
    {
        Some(declaration) => declaration.value = value.to_owned(),
        None => declarations.push(css::Declaration {
            property: property_lower,
            value: value.to_owned(),
        }),
    }
    declarations
        .iter()
        .map(|d| format!("{}: {}", d.property, d.value))
        .collect::<Vec<_>>()
        .join("; ")
}
