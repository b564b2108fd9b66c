/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Canonical textual serialization of a document.
//!
//! The output is stable for a given tree: attributes in parse order, a fixed
//! void-element set, comments and doctypes always delimited. Equality of two
//! serializations is equality of the trees, which is what the parser's
//! determinism tests rely on.

use itertools::Itertools;

use crate::{is_void_element, Document, Element, Node, NodeData};

/// Serialize a whole document.
pub fn serialize(document: &Document) -> String {
    let mut out = String::new();
    for child in &document.children {
        serialize_node(child, &mut out);
    }
    out
}

fn serialize_node(node: &Node, out: &mut String) {
    match node.data {
        NodeData::Element(ref element) => serialize_element(element, &node.children, out),
        NodeData::Text(ref data) => out.push_str(data),
        NodeData::Comment(ref data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        },
        NodeData::Doctype(ref name) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(name);
            out.push('>');
        },
    }
}

fn serialize_element(element: &Element, children: &[Node], out: &mut String) {
    out.push('<');
    out.push_str(&element.name);
    if !element.attributes().is_empty() {
        out.push(' ');
        let rendered = element
            .attributes()
            .iter()
            .map(|(name, value)| format!("{}=\"{}\"", name, value))
            .join(" ");
        out.push_str(&rendered);
    }
    out.push('>');
    if is_void_element(&element.name) {
        return;
    }
    for child in children {
        serialize_node(child, out);
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
}
