/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The document tree.
//!
//! Nodes are a closed tagged variant; there is no class hierarchy to extend.
//! The render pipeline owns its document exclusively. Layout and paint read
//! it through shared borrows; event handlers get a mutable borrow for the
//! duration of a dispatch.

mod serialize;

pub use serialize::serialize;

/// An element: lowercase tag name plus attributes in parse order.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: &str) -> Element {
        Element {
            name: name.to_ascii_lowercase(),
            attributes: Vec::new(),
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value for the name. Names
    /// are lowercased; each name appears at most once.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(entry) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value.to_owned();
        } else {
            self.attributes.push((name, value.to_owned()));
        }
    }

    /// Add an attribute only if the name is not already present. Returns
    /// whether the attribute was added. The parser uses this so that the
    /// first occurrence of a duplicated attribute wins.
    pub fn add_attribute_if_absent(&mut self, name: &str, value: &str) -> bool {
        let name = name.to_ascii_lowercase();
        if self.attributes.iter().any(|(n, _)| *n == name) {
            return false;
        }
        self.attributes.push((name, value.to_owned()));
        true
    }

    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.get_attribute("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }
}

/// The node variants.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
    Element(Element),
    Text(String),
    Comment(String),
    Doctype(String),
}

/// One tree node. Sibling order is parse order.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub data: NodeData,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(data: NodeData) -> Node {
        Node {
            data,
            children: Vec::new(),
        }
    }

    pub fn new_element(name: &str) -> Node {
        Node::new(NodeData::Element(Element::new(name)))
    }

    pub fn new_text(data: &str) -> Node {
        Node::new(NodeData::Text(data.to_owned()))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self.data {
            NodeData::Element(ref element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self.data {
            NodeData::Element(ref mut element) => Some(element),
            _ => None,
        }
    }

    /// Concatenated text of this subtree, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let NodeData::Text(ref data) = self.data {
            out.push_str(data);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// A parsed document: an ordered forest of top-level nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new() -> Document {
        Document {
            children: Vec::new(),
        }
    }

    /// Depth-first pre-order visit of every node.
    pub fn for_each_node<F>(&self, mut visit: F)
    where
        F: FnMut(&Node),
    {
        fn walk<F: FnMut(&Node)>(node: &Node, visit: &mut F) {
            visit(node);
            for child in &node.children {
                walk(child, visit);
            }
        }
        for child in &self.children {
            walk(child, &mut visit);
        }
    }

    /// The first element with the given `id`, in document order.
    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        fn walk<'a>(node: &'a Node, id: &str) -> Option<&'a Node> {
            if node.as_element().and_then(Element::id) == Some(id) {
                return Some(node);
            }
            node.children.iter().find_map(|child| walk(child, id))
        }
        self.children.iter().find_map(|child| walk(child, id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Node> {
        fn walk<'a>(node: &'a mut Node, id: &str) -> Option<&'a mut Node> {
            if node.as_element().and_then(Element::id) == Some(id) {
                return Some(node);
            }
            node.children
                .iter_mut()
                .find_map(|child| walk(child, id))
        }
        self.children
            .iter_mut()
            .find_map(|child| walk(child, id))
    }
}

/// Tags that never have children and never appear on the open-element stack.
pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area" |
            "base" |
            "br" |
            "col" |
            "embed" |
            "hr" |
            "img" |
            "input" |
            "link" |
            "meta" |
            "source" |
            "track" |
            "wbr"
    )
}
