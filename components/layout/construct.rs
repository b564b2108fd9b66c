/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Building the layout tree from a styled document.
//!
//! Each element styles itself against the sheet (inheriting from its
//! parent), then becomes a box or contributes inline content; an element
//! with `display:none` disappears along with its whole subtree. Containers
//! mixing block and inline children get anonymous block wrappers around the
//! inline content, so every block container's children are uniform.

use app_units::Au;
use css::Stylesheet;
use dom::{Document, Node, NodeData};
use euclid::{Point2D, Rect, Size2D};
use log::debug;
use style::{style_for_element, ComputedStyle, Display};

use crate::block::layout_block;
use crate::{BoxType, InlineItem, LayoutBox};

/// Build and lay out the box tree for a document.
///
/// The returned root is an anonymous viewport box whose content width is
/// `viewport_width` CSS pixels; its height is the content height of the
/// document.
pub fn build_layout_tree(
    document: &Document,
    sheet: &Stylesheet,
    viewport_width: f32,
) -> LayoutBox {
    let root_style = ComputedStyle::initial();
    let mut root = LayoutBox::new(BoxType::Anonymous, root_style.clone());

    let mut builder = Container::new(&root_style);
    for node in &document.children {
        builder.add_node(node, &root_style, sheet);
    }
    root.children = builder.finish();

    let viewport = Rect::new(
        Point2D::new(Au(0), Au(0)),
        Size2D::new(Au::from_f32_px(viewport_width), Au(0)),
    );
    layout_block(&mut root, viewport, Au(0));
    root
}

/// Accumulates the children of one block container, wrapping runs of inline
/// content as needed.
struct Container<'a> {
    parent_style: &'a ComputedStyle,
    children: Vec<LayoutBox>,
    pending_inline: Vec<InlineItem>,
    has_block: bool,
}

impl<'a> Container<'a> {
    fn new(parent_style: &'a ComputedStyle) -> Container<'a> {
        Container {
            parent_style,
            children: Vec::new(),
            pending_inline: Vec::new(),
            has_block: false,
        }
    }

    fn add_node(&mut self, node: &Node, parent_style: &ComputedStyle, sheet: &Stylesheet) {
        match node.data {
            NodeData::Text(ref text) => {
                if !text.trim().is_empty() {
                    self.pending_inline.push(InlineItem {
                        text: collapse_whitespace(text),
                        style: parent_style.clone(),
                    });
                }
            },
            NodeData::Element(ref element) => {
                let style = style_for_element(element, Some(parent_style), sheet);
                match style.display {
                    Display::None => {
                        debug!("<{}> pruned from layout", element.name);
                    },
                    Display::Inline => self.add_inline_element(node, &style, sheet),
                    Display::Block => {
                        self.flush_inline();
                        self.has_block = true;
                        self.children.push(build_block_box(node, style, sheet));
                    },
                }
            },
            NodeData::Comment(_) | NodeData::Doctype(_) => {},
        }
    }

    /// Inline elements contribute their text, styled by themselves, to the
    /// enclosing container's inline run. A block box nested inside inline
    /// content is unsupported and participates as inline content instead.
    fn add_inline_element(&mut self, node: &Node, style: &ComputedStyle, sheet: &Stylesheet) {
        for child in &node.children {
            match child.data {
                NodeData::Text(ref text) => {
                    if !text.trim().is_empty() {
                        self.pending_inline.push(InlineItem {
                            text: collapse_whitespace(text),
                            style: style.clone(),
                        });
                    }
                },
                NodeData::Element(ref element) => {
                    let child_style = style_for_element(element, Some(style), sheet);
                    if child_style.display != Display::None {
                        self.add_inline_element(child, &child_style, sheet);
                    }
                },
                NodeData::Comment(_) | NodeData::Doctype(_) => {},
            }
        }
    }

    fn flush_inline(&mut self) {
        if self.pending_inline.is_empty() {
            return;
        }
        let mut anonymous =
            LayoutBox::new(BoxType::Anonymous, anonymous_style(self.parent_style));
        anonymous.inline_items = std::mem::take(&mut self.pending_inline);
        self.children.push(anonymous);
    }

    fn finish(mut self) -> Vec<LayoutBox> {
        if !self.has_block && !self.pending_inline.is_empty() {
            // Pure inline content: one inline box, no anonymous wrapper.
            let mut inline_box =
                LayoutBox::new(BoxType::Inline, anonymous_style(self.parent_style));
            inline_box.inline_items = std::mem::take(&mut self.pending_inline);
            self.children.push(inline_box);
            return self.children;
        }
        self.flush_inline();
        self.children
    }
}

fn build_block_box(node: &Node, style: ComputedStyle, sheet: &Stylesheet) -> LayoutBox {
    let mut layout_box = LayoutBox::new(BoxType::Block, style.clone());
    if let Some(element) = node.as_element() {
        layout_box.tag_name = Some(element.name.clone());
        layout_box.element_id = element.id().map(str::to_owned);
    }

    let mut builder = Container::new(&style);
    for child in &node.children {
        builder.add_node(child, &style, sheet);
    }
    layout_box.children = builder.finish();
    layout_box
}

/// Wrapper boxes inherit for their text runs but never size or paint
/// themselves.
fn anonymous_style(parent: &ComputedStyle) -> ComputedStyle {
    let mut style = ComputedStyle::initial();
    style.color = parent.color;
    style.font_size = parent.font_size;
    style.line_height = parent.line_height;
    style
}

/// Collapse runs of whitespace to single spaces, trimming the ends.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = true;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            out.push(c);
            in_space = false;
        }
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}
