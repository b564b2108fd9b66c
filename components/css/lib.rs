/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! CSS parsing into an ordered ruleset.
//!
//! The supported grammar is the subset the cascade consumes: rules with
//! selector lists of simple-selector conjunctions (`*`, `tag`, `#id`,
//! `.class`), declaration blocks of `property: value;` pairs, `/* */`
//! comments and skipped at-rules. Malformed constructs are dropped, never
//! fatal, and rule order is source order.

mod link;

pub use link::{extract_linked_css, load_linked_css, CssLoader, LinkedCssResult, StylesheetRef};

use log::debug;

/// One simple selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Type(String),
    Id(String),
    Class(String),
}

/// A conjunction of simple selectors, e.g. `div.note#main`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    pub parts: Vec<SimpleSelector>,
}

impl Selector {
    /// `(id, class, type)` counts, compared lexicographically.
    pub fn specificity(&self) -> (u32, u32, u32) {
        let mut ids = 0;
        let mut classes = 0;
        let mut types = 0;
        for part in &self.parts {
            match *part {
                SimpleSelector::Id(_) => ids += 1,
                SimpleSelector::Class(_) => classes += 1,
                SimpleSelector::Type(_) => types += 1,
                SimpleSelector::Universal => {},
            }
        }
        (ids, classes, types)
    }
}

/// One `property: value` pair. Property names are lowercase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// One rule: a selector list and its declarations, both in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

/// An ordered list of rules. Order is cascade order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

impl Stylesheet {
    pub fn new() -> Stylesheet {
        Stylesheet { rules: Vec::new() }
    }

    /// Append another sheet's rules after this one's.
    pub fn append(&mut self, other: Stylesheet) {
        self.rules.extend(other.rules);
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Parse a stylesheet. Unknown at-rules are skipped wholesale; rules whose
/// selectors are all unsupported are dropped.
pub fn parse_css(text: &str) -> Stylesheet {
    let text = strip_comments(text);
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
    };
    let mut sheet = Stylesheet::new();
    while let Some(rule) = parser.parse_rule() {
        if let Some(rule) = rule {
            sheet.rules.push(rule);
        }
    }
    sheet
}

/// Parse a bare declaration list, as found in a `style` attribute.
pub fn parse_declarations(text: &str) -> Vec<Declaration> {
    let text = strip_comments(text);
    parse_declaration_list(&text)
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        out.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// `None` when the input is exhausted; `Some(None)` for a skipped
    /// construct.
    fn parse_rule(&mut self) -> Option<Option<Rule>> {
        self.skip_whitespace();
        self.peek()?;
        if self.peek() == Some('@') {
            self.skip_at_rule();
            return Some(None);
        }

        let selector_start = self.pos;
        while self.peek().map_or(false, |c| c != '{') {
            self.pos += 1;
        }
        if self.peek().is_none() {
            debug!("trailing selector text without a declaration block");
            return None;
        }
        let selector_text: String = self.chars[selector_start..self.pos].iter().collect();
        self.pos += 1; // '{'

        let block_start = self.pos;
        while self.peek().map_or(false, |c| c != '}') {
            self.pos += 1;
        }
        let block_text: String = self.chars[block_start..self.pos].iter().collect();
        if self.peek() == Some('}') {
            self.pos += 1;
        }

        let selectors = parse_selector_list(&selector_text);
        if selectors.is_empty() {
            debug!("rule dropped, no supported selector in {:?}", selector_text.trim());
            return Some(None);
        }
        Some(Some(Rule {
            selectors,
            declarations: parse_declaration_list(&block_text),
        }))
    }

    /// Skip `@name ... ;` or `@name ... { balanced }`.
    fn skip_at_rule(&mut self) {
        while let Some(c) = self.peek() {
            self.pos += 1;
            match c {
                ';' => return,
                '{' => {
                    let mut depth = 1;
                    while let Some(c) = self.peek() {
                        self.pos += 1;
                        match c {
                            '{' => depth += 1,
                            '}' => {
                                depth -= 1;
                                if depth == 0 {
                                    return;
                                }
                            },
                            _ => {},
                        }
                    }
                    return;
                },
                _ => {},
            }
        }
    }
}

fn parse_selector_list(text: &str) -> Vec<Selector> {
    text.split(',')
        .filter_map(|part| parse_selector(part.trim()))
        .collect()
}

/// Parse one compound selector. Selectors with combinators (whitespace
/// between parts) are unsupported and dropped.
pub fn parse_selector(text: &str) -> Option<Selector> {
    if text.is_empty() || text.chars().any(char::is_whitespace) {
        if !text.is_empty() {
            debug!("unsupported combinator selector {:?} dropped", text);
        }
        return None;
    }

    let mut parts = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;
    while pos < chars.len() {
        match chars[pos] {
            '*' => {
                parts.push(SimpleSelector::Universal);
                pos += 1;
            },
            '#' => {
                let (name, next) = consume_identifier(&chars, pos + 1);
                if name.is_empty() {
                    return None;
                }
                parts.push(SimpleSelector::Id(name));
                pos = next;
            },
            '.' => {
                let (name, next) = consume_identifier(&chars, pos + 1);
                if name.is_empty() {
                    return None;
                }
                parts.push(SimpleSelector::Class(name));
                pos = next;
            },
            c if c.is_ascii_alphabetic() => {
                let (name, next) = consume_identifier(&chars, pos);
                parts.push(SimpleSelector::Type(name.to_ascii_lowercase()));
                pos = next;
            },
            _ => {
                debug!("unsupported selector {:?} dropped", text);
                return None;
            },
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(Selector { parts })
}

fn consume_identifier(chars: &[char], mut pos: usize) -> (String, usize) {
    let start = pos;
    while pos < chars.len() &&
        (chars[pos].is_ascii_alphanumeric() || chars[pos] == '-' || chars[pos] == '_')
    {
        pos += 1;
    }
    (chars[start..pos].iter().collect(), pos)
}

fn parse_declaration_list(text: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for piece in text.split(';') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }
        let Some(colon) = piece.find(':') else {
            debug!("declaration without a colon dropped: {:?}", piece);
            continue;
        };
        let property = piece[..colon].trim().to_ascii_lowercase();
        let value = piece[colon + 1..].trim().to_owned();
        if property.is_empty() || value.is_empty() {
            continue;
        }
        declarations.push(Declaration { property, value });
    }
    declarations
}
