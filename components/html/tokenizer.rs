/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The HTML tokenizer.
//!
//! Deterministic and tolerant: malformed input never aborts tokenization,
//! it produces a warning and the closest sensible token stream instead.

use log::debug;

/// One token out of the stream.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    StartTag {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    Text(String),
    Comment(String),
    Doctype(String),
}

/// Elements whose content is raw text up to the matching end tag.
fn is_raw_text_element(name: &str) -> bool {
    matches!(name, "script" | "style")
}

pub struct Tokenizer<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
    /// When set, the content of the named raw-text element is pending.
    raw_text_for: Option<String>,
    pub warnings: Vec<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Tokenizer<'a> {
        Tokenizer {
            input,
            chars: input.chars().collect(),
            pos: 0,
            raw_text_for: None,
            warnings: Vec::new(),
        }
    }

    /// Tokenize the whole input.
    pub fn run(mut self) -> (Vec<Token>, Vec<String>) {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        (tokens, self.warnings)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    fn starts_with_ignore_case(&self, prefix: &str) -> bool {
        prefix
            .chars()
            .enumerate()
            .all(|(i, c)| {
                self.peek_at(i).map(|p| p.to_ascii_lowercase()) == Some(c.to_ascii_lowercase())
            })
    }

    fn next_token(&mut self) -> Option<Token> {
        if let Some(element) = self.raw_text_for.take() {
            return Some(self.consume_raw_text(&element));
        }
        if self.pos >= self.chars.len() {
            return None;
        }
        if self.peek() == Some('<') {
            return self.consume_markup();
        }
        Some(self.consume_text())
    }

    fn consume_text(&mut self) -> Token {
        let start = self.pos;
        while self.pos < self.chars.len() && self.peek() != Some('<') {
            self.pos += 1;
        }
        Token::Text(self.chars[start..self.pos].iter().collect())
    }

    /// Raw text runs to the matching case-insensitive end tag, or to EOF.
    fn consume_raw_text(&mut self, element: &str) -> Token {
        let close = format!("</{}", element);
        let start = self.pos;
        while self.pos < self.chars.len() {
            if self.peek() == Some('<') && self.starts_with_ignore_case(&close) {
                break;
            }
            self.pos += 1;
        }
        Token::Text(self.chars[start..self.pos].iter().collect())
    }

    fn consume_markup(&mut self) -> Option<Token> {
        if self.starts_with("<!--") {
            return Some(self.consume_comment());
        }
        if self.starts_with_ignore_case("<!doctype") {
            return Some(self.consume_doctype());
        }
        if self.starts_with("</") {
            if self.peek_at(2).map_or(false, |c| c.is_ascii_alphabetic()) {
                return Some(self.consume_end_tag());
            }
            return Some(self.consume_stray_lt());
        }
        if self.peek_at(1).map_or(false, |c| c.is_ascii_alphabetic()) {
            return self.consume_start_tag();
        }
        Some(self.consume_stray_lt())
    }

    /// A `<` that does not open markup is literal text.
    fn consume_stray_lt(&mut self) -> Token {
        self.warnings
            .push("Stray '<' treated as text".to_owned());
        debug!("stray '<' at offset {} of {} chars", self.pos, self.input.len());
        self.pos += 1;
        Token::Text("<".to_owned())
    }

    fn consume_comment(&mut self) -> Token {
        self.pos += 4; // "<!--"
        let start = self.pos;
        while self.pos < self.chars.len() {
            if self.starts_with("-->") {
                let data: String = self.chars[start..self.pos].iter().collect();
                self.pos += 3;
                return Token::Comment(data);
            }
            self.pos += 1;
        }
        self.warnings.push("Unclosed HTML comment".to_owned());
        Token::Comment(self.chars[start..].iter().collect())
    }

    fn consume_doctype(&mut self) -> Token {
        self.pos += 2; // "<!"
        let start = self.pos;
        while self.pos < self.chars.len() && self.peek() != Some('>') {
            self.pos += 1;
        }
        let raw: String = self.chars[start..self.pos].iter().collect();
        if self.pos < self.chars.len() {
            self.pos += 1;
        } else {
            self.warnings.push("Unclosed doctype".to_owned());
        }
        // Strip the "doctype" keyword, keep the name.
        let name = raw
            .get("doctype".len()..)
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();
        Token::Doctype(name)
    }

    fn consume_end_tag(&mut self) -> Token {
        self.pos += 2; // "</"
        let name = self.consume_tag_name();
        while self.pos < self.chars.len() && self.peek() != Some('>') {
            self.pos += 1;
        }
        if self.pos < self.chars.len() {
            self.pos += 1;
        }
        Token::EndTag { name }
    }

    fn consume_start_tag(&mut self) -> Option<Token> {
        let tag_start = self.pos;
        self.pos += 1; // "<"
        let name = self.consume_tag_name();
        let mut attributes: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;

        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    // EOF inside the tag: nothing sensible to emit.
                    self.warnings
                        .push(format!("Unterminated tag <{}> dropped at end of input", name));
                    debug!("dropped unterminated tag starting at offset {}", tag_start);
                    return None;
                },
                Some('>') => {
                    self.pos += 1;
                    break;
                },
                Some('/') => {
                    self.pos += 1;
                    if self.peek() == Some('>') {
                        self.pos += 1;
                        self_closing = true;
                        break;
                    }
                },
                Some(_) => {
                    if let Some((attr_name, value)) = self.consume_attribute() {
                        if attributes.iter().any(|(n, _)| *n == attr_name) {
                            debug!("duplicate attribute '{}' on <{}> ignored", attr_name, name);
                        } else {
                            attributes.push((attr_name, value));
                        }
                    }
                },
            }
        }

        if !self_closing && is_raw_text_element(&name) {
            self.raw_text_for = Some(name.clone());
        }
        Some(Token::StartTag {
            name,
            attributes,
            self_closing,
        })
    }

    fn consume_tag_name(&mut self) -> String {
        let start = self.pos;
        while self
            .peek()
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == '-')
        {
            self.pos += 1;
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().map_or(false, |c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn consume_attribute(&mut self) -> Option<(String, String)> {
        let start = self.pos;
        while self.peek().map_or(false, |c| {
            !c.is_whitespace() && c != '=' && c != '>' && c != '/'
        }) {
            self.pos += 1;
        }
        if self.pos == start {
            // Not a name character; step over it so the loop advances.
            self.pos += 1;
            return None;
        }
        let name: String = self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase();

        self.skip_whitespace();
        if self.peek() != Some('=') {
            return Some((name, String::new()));
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let value_start = self.pos;
                while self.pos < self.chars.len() && self.peek() != Some(quote) {
                    self.pos += 1;
                }
                let value: String = self.chars[value_start..self.pos].iter().collect();
                if self.pos < self.chars.len() {
                    self.pos += 1;
                }
                value
            },
            _ => {
                let value_start = self.pos;
                while self
                    .peek()
                    .map_or(false, |c| !c.is_whitespace() && c != '>')
                {
                    self.pos += 1;
                }
                self.chars[value_start..self.pos].iter().collect()
            },
        };
        Some((name, value))
    }
}
