/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! URL parsing and origin canonicalization.
//!
//! This crate is the only place in the engine that understands URL grammar.
//! Everything downstream (the request policy gates, CSP source matching, the
//! CORS response gate, linked stylesheet resolution) compares hosts and
//! origins through the canonical forms produced here. Malformed input is
//! rejected, never coerced.

use std::fmt;

mod host;
mod origin;

pub use host::{parse_host, Host};
pub use origin::{
    canonical_origin, canonical_origin_str, default_port, http_origin, same_origin,
};

/// A parsed URL.
///
/// `scheme` is lowercase ASCII. `host` is present iff the URL had an
/// authority component (`scheme://...`). `path` is normalized: `.` and `..`
/// segments are resolved after percent-decoding unreserved bytes, so
/// `%2e%2e` is a traversal and can never escape the root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Url {
    pub scheme: String,
    pub host: Option<Host>,
    pub port: Option<u16>,
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Url {
    /// Whether this URL carries an authority component.
    pub fn has_authority(&self) -> bool {
        self.host.is_some()
    }

    /// The explicit port, or the scheme's default port if one is defined.
    pub fn effective_port(&self) -> Option<u16> {
        self.port.or_else(|| default_port(&self.scheme))
    }

    /// The canonical origin serialization of this URL, if it has one.
    pub fn origin(&self) -> Option<String> {
        canonical_origin(self)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if let Some(ref host) = self.host {
            write!(f, "//{}", host)?;
            if let Some(port) = self.port {
                write!(f, ":{}", port)?;
            }
        }
        write!(f, "{}", self.path)?;
        if let Some(ref query) = self.query {
            write!(f, "?{}", query)?;
        }
        if let Some(ref fragment) = self.fragment {
            write!(f, "#{}", fragment)?;
        }
        Ok(())
    }
}

/// Why an input failed to parse as a URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrlParseError {
    EmptyUrl,
    EmptyScheme,
    InvalidScheme,
    ControlCharacter,
    NonAsciiInAuthority,
    BackslashInAuthority,
    PercentEscapeInAuthority,
    UserInfoInAuthority,
    EmptyHost,
    InvalidDomain,
    InvalidIpv4,
    InvalidIpv6,
    EmptyPort,
    InvalidPort,
}

impl fmt::Display for UrlParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match *self {
            UrlParseError::EmptyUrl => "empty url",
            UrlParseError::EmptyScheme => "empty scheme",
            UrlParseError::InvalidScheme => "invalid scheme",
            UrlParseError::ControlCharacter => "control character in url",
            UrlParseError::NonAsciiInAuthority => "non-ascii byte in authority",
            UrlParseError::BackslashInAuthority => "backslash in authority",
            UrlParseError::PercentEscapeInAuthority => "percent escape in authority",
            UrlParseError::UserInfoInAuthority => "userinfo in authority",
            UrlParseError::EmptyHost => "empty host",
            UrlParseError::InvalidDomain => "invalid domain label",
            UrlParseError::InvalidIpv4 => "invalid ipv4 literal",
            UrlParseError::InvalidIpv6 => "invalid ipv6 literal",
            UrlParseError::EmptyPort => "empty port",
            UrlParseError::InvalidPort => "port out of range",
        };
        f.write_str(reason)
    }
}

impl std::error::Error for UrlParseError {}

/// Parse a URL string.
///
/// The grammar is deliberately strict. Anything the authority section cannot
/// represent canonically (percent escapes, backslashes, userinfo, non-ASCII
/// bytes, empty or out-of-range ports, leading-zero IPv4 octets, overlong or
/// empty domain labels) is an error.
pub fn parse_url(raw: &str) -> Result<Url, UrlParseError> {
    if raw.is_empty() {
        return Err(UrlParseError::EmptyUrl);
    }
    if raw
        .bytes()
        .any(|b| b < 0x20 || b == 0x7f)
    {
        return Err(UrlParseError::ControlCharacter);
    }

    let colon = raw.find(':').ok_or(UrlParseError::InvalidScheme)?;
    let scheme_raw = &raw[..colon];
    if scheme_raw.is_empty() {
        return Err(UrlParseError::EmptyScheme);
    }
    if !scheme_raw.chars().next().map_or(false, |c| c.is_ascii_alphabetic()) ||
        !scheme_raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
    {
        return Err(UrlParseError::InvalidScheme);
    }
    let scheme = scheme_raw.to_ascii_lowercase();

    let rest = &raw[colon + 1..];

    // Fragment and query are split off before the authority is inspected so
    // that '@' or '%' after the path never poisons host parsing.
    let (rest, fragment) = match rest.find('#') {
        Some(idx) => (&rest[..idx], Some(rest[idx + 1..].to_owned())),
        None => (rest, None),
    };
    let (rest, query) = match rest.find('?') {
        Some(idx) => (&rest[..idx], Some(rest[idx + 1..].to_owned())),
        None => (rest, None),
    };

    if let Some(after_slashes) = rest.strip_prefix("//") {
        let authority_end = after_slashes
            .find('/')
            .unwrap_or(after_slashes.len());
        let authority = &after_slashes[..authority_end];
        let path_raw = &after_slashes[authority_end..];

        let (host, port) = parse_authority(&scheme, authority)?;
        Ok(Url {
            scheme,
            host,
            port,
            path: normalize_path(path_raw),
            query,
            fragment,
        })
    } else {
        // Opaque form (data:, javascript:, mailto:, ...). The remainder is
        // kept verbatim; such URLs have no origin.
        Ok(Url {
            scheme,
            host: None,
            port: None,
            path: rest.to_owned(),
            query,
            fragment,
        })
    }
}

fn parse_authority(
    scheme: &str,
    authority: &str,
) -> Result<(Option<Host>, Option<u16>), UrlParseError> {
    if !authority.is_ascii() {
        return Err(UrlParseError::NonAsciiInAuthority);
    }
    if authority.contains('\\') {
        return Err(UrlParseError::BackslashInAuthority);
    }
    if authority.contains('%') {
        return Err(UrlParseError::PercentEscapeInAuthority);
    }
    if authority.contains('@') {
        return Err(UrlParseError::UserInfoInAuthority);
    }

    if authority.is_empty() {
        // file:///some/path has a legitimately empty authority.
        if scheme == "file" {
            return Ok((None, None));
        }
        return Err(UrlParseError::EmptyHost);
    }

    let (host_raw, port_raw) = split_host_port(authority)?;
    let host = parse_host(host_raw)?;
    let port = match port_raw {
        None => None,
        Some("") => return Err(UrlParseError::EmptyPort),
        Some(digits) => Some(parse_port(digits)?),
    };
    Ok((Some(host), port))
}

fn split_host_port(authority: &str) -> Result<(&str, Option<&str>), UrlParseError> {
    if authority.starts_with('[') {
        let close = authority
            .find(']')
            .ok_or(UrlParseError::InvalidIpv6)?;
        let host = &authority[..close + 1];
        let rest = &authority[close + 1..];
        if rest.is_empty() {
            return Ok((host, None));
        }
        match rest.strip_prefix(':') {
            Some(port) => Ok((host, Some(port))),
            None => Err(UrlParseError::InvalidIpv6),
        }
    } else {
        match authority.find(':') {
            Some(idx) => {
                let port = &authority[idx + 1..];
                if port.contains(':') {
                    return Err(UrlParseError::InvalidPort);
                }
                Ok((&authority[..idx], Some(port)))
            },
            None => Ok((authority, None)),
        }
    }
}

fn parse_port(digits: &str) -> Result<u16, UrlParseError> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UrlParseError::InvalidPort);
    }
    let value: u32 = digits.parse().map_err(|_| UrlParseError::InvalidPort)?;
    if value == 0 || value > u16::MAX as u32 {
        return Err(UrlParseError::InvalidPort);
    }
    Ok(value as u16)
}

/// Normalize a URL path: percent-decode unreserved bytes, then resolve `.`
/// and `..` segments without ever escaping the root.
///
/// Decoding happens first, so an encoded traversal (`%2e%2e`) resolves
/// exactly like a literal one. This is the comparison form used by the CSP
/// path matcher.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    let decoded = percent_decode_unreserved(path);
    if !decoded.starts_with('/') {
        return decoded;
    }

    let mut out: Vec<&str> = Vec::new();
    let mut trailing_slash = decoded.ends_with('/');
    for segment in decoded[1..].split('/') {
        match segment {
            "" => {},
            "." => trailing_slash = true,
            ".." => {
                out.pop();
                trailing_slash = true;
            },
            seg => {
                out.push(seg);
                trailing_slash = decoded.ends_with('/');
            },
        }
    }

    let mut result = String::with_capacity(decoded.len());
    for seg in &out {
        result.push('/');
        result.push_str(seg);
    }
    if result.is_empty() {
        return "/".to_owned();
    }
    if trailing_slash {
        result.push('/');
    }
    result
}

/// Resolve a reference against a base URL, returning an absolute URL
/// string. Covers the forms a document links with: absolute references,
/// scheme-relative (`//host/...`), root-relative (`/path`) and
/// path-relative references. Returns `None` when the base does not parse
/// or the reference is empty.
pub fn resolve_reference(base: &str, reference: &str) -> Option<String> {
    if reference.is_empty() {
        return None;
    }
    if parse_url(reference).is_ok() {
        return Some(reference.to_owned());
    }
    let base = parse_url(base).ok()?;

    if let Some(rest) = reference.strip_prefix("//") {
        let candidate = format!("{}://{}", base.scheme, rest);
        return parse_url(&candidate).ok().map(|_| candidate);
    }

    let authority = match base.host {
        Some(ref host) => {
            let mut authority = host.to_string();
            if let Some(port) = base.port {
                authority.push_str(&format!(":{}", port));
            }
            authority
        },
        None if base.scheme == "file" => String::new(),
        None => return None,
    };

    let path = if reference.starts_with('/') {
        normalize_path(reference)
    } else {
        let directory = match base.path.rfind('/') {
            Some(idx) => &base.path[..idx + 1],
            None => "/",
        };
        normalize_path(&format!("{}{}", directory, reference))
    };

    let candidate = format!("{}://{}{}", base.scheme, authority, path);
    parse_url(&candidate).ok().map(|_| candidate)
}

/// Decode `%XX` escapes whose decoded byte is unreserved (ALPHA / DIGIT /
/// `-` / `.` / `_` / `~`). Every other escape is left untouched.
fn percent_decode_unreserved(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '%' {
            let escape = input.get(i + 1..i + 3);
            if let Some(hex) = escape {
                if let Ok(decoded) = u8::from_str_radix(hex, 16) {
                    if decoded.is_ascii_alphanumeric() ||
                        matches!(decoded, b'-' | b'.' | b'_' | b'~')
                    {
                        out.push(decoded as char);
                        chars.next();
                        chars.next();
                        continue;
                    }
                }
            }
        }
        out.push(c);
    }
    out
}
