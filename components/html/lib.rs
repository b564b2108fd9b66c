/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Fault-tolerant HTML parsing.
//!
//! The parser is a tokenizer feeding a tree builder that keeps an
//! open-element stack. It never fails: malformed input produces the closest
//! sensible tree plus an ordered warning stream. For any byte sequence the
//! same document and the same warnings come out, in the same order.

mod tokenizer;

pub use tokenizer::{Token, Tokenizer};

use dom::{is_void_element, Document, Node, NodeData};
use log::debug;

/// The outcome of a parse: a document and the recovery warnings, in the
/// order they were produced. Well-formed input parses with zero warnings.
#[derive(Clone, Debug)]
pub struct HtmlParseResult {
    pub document: Document,
    pub warnings: Vec<String>,
}

/// Parse an HTML string into a document.
pub fn parse_html(input: &str) -> HtmlParseResult {
    let (tokens, mut warnings) = Tokenizer::new(input).run();
    let mut builder = TreeBuilder::new();
    for token in tokens {
        builder.process(token, &mut warnings);
    }
    let document = builder.finish(&mut warnings);
    HtmlParseResult { document, warnings }
}

struct TreeBuilder {
    document: Document,
    /// Open elements, outermost first. Children accumulate on the nodes
    /// while they are open; closing pops and attaches.
    stack: Vec<Node>,
}

impl TreeBuilder {
    fn new() -> TreeBuilder {
        TreeBuilder {
            document: Document::new(),
            stack: Vec::new(),
        }
    }

    fn process(&mut self, token: Token, warnings: &mut Vec<String>) {
        match token {
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => self.insert_element(&name, attributes, self_closing),
            Token::EndTag { name } => self.close_element(&name, warnings),
            Token::Text(data) => self.append_text(&data),
            Token::Comment(data) => self.append(Node::new(NodeData::Comment(data))),
            Token::Doctype(name) => self.append(Node::new(NodeData::Doctype(name))),
        }
    }

    fn insert_element(
        &mut self,
        name: &str,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    ) {
        let mut node = Node::new_element(name);
        if let Some(element) = node.as_element_mut() {
            for (attr_name, value) in attributes {
                // First occurrence wins; the tokenizer already dropped exact
                // duplicates, this also catches case variants.
                element.add_attribute_if_absent(&attr_name, &value);
            }
        }
        if self_closing || is_void_element(name) {
            self.append(node);
        } else {
            self.stack.push(node);
        }
    }

    fn close_element(&mut self, name: &str, warnings: &mut Vec<String>) {
        let Some(open_index) = self
            .stack
            .iter()
            .rposition(|node| node.as_element().map(|e| e.name.as_str()) == Some(name))
        else {
            warnings.push(format!("Orphan end tag </{}>", name));
            debug!("discarded end tag </{}> with no open element", name);
            return;
        };

        // Anything opened after the matching element is implicitly closed.
        while self.stack.len() > open_index + 1 {
            let closed = self.pop_and_attach();
            warnings.push(format!("<{}> implicitly closed", closed));
        }
        self.pop_and_attach();
    }

    fn append_text(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        // Adjacent text tokens collapse into one node.
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.document.children,
        };
        if let Some(Node {
            data: NodeData::Text(ref mut existing),
            ..
        }) = siblings.last_mut()
        {
            existing.push_str(data);
            return;
        }
        siblings.push(Node::new_text(data));
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.document.children.push(node),
        }
    }

    /// Pop the innermost open element, attach it to its parent, and return
    /// its tag name.
    fn pop_and_attach(&mut self) -> String {
        let node = match self.stack.pop() {
            Some(node) => node,
            None => return String::new(),
        };
        let name = node
            .as_element()
            .map(|e| e.name.clone())
            .unwrap_or_default();
        self.append(node);
        name
    }

    fn finish(mut self, warnings: &mut Vec<String>) -> Document {
        while !self.stack.is_empty() {
            let closed = self.pop_and_attach();
            warnings.push(format!("Unclosed tag <{}> implicitly closed", closed));
        }
        self.document
    }
}
