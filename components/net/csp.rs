/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! CSP source expressions: parsing and matching.
//!
//! Each source string parses once into a small AST; matching runs against
//! parsed URLs. Any token the grammar does not recognize parses to `None`
//! and therefore matches nothing. URL paths compare in their normalized
//! form, so encoded traversals cannot slip past a path prefix.

use log::debug;
use quill_url::{
    canonical_origin, canonical_origin_str, default_port, normalize_path, parse_host, Host, Url,
};

/// A parsed CSP source expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CspSource {
    /// `'none'`: matches nothing, and poisons the whole list.
    NoneKeyword,
    /// `'self'`: the policy origin itself.
    SelfOrigin,
    /// `*`: any URL with an authority.
    Wildcard,
    /// `<scheme>:`
    Scheme(String),
    /// `scheme://host[:port][/path]`, with optional wildcard subdomain and
    /// optional inherited scheme.
    Host(HostSource),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostSource {
    /// `None` inherits the scheme of the policy origin.
    scheme: Option<String>,
    host: HostPattern,
    port: PortPattern,
    /// Normalized path, when the source carries one.
    path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum HostPattern {
    /// Literal host equality, bracketed IPv6 included.
    Exact(Host),
    /// `*.suffix`: any strict subdomain of `suffix`, never the apex.
    WildcardSubdomain(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PortPattern {
    /// No explicit port: the URL must sit on its scheme's default port.
    Default,
    Exact(u16),
    /// `:*`
    Any,
}

/// Parse one source expression. Malformed sources return `None` and are
/// treated as matching nothing.
pub fn parse_csp_source(raw: &str) -> Option<CspSource> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.to_ascii_lowercase().as_str() {
        "'none'" => return Some(CspSource::NoneKeyword),
        "'self'" => return Some(CspSource::SelfOrigin),
        "*" => return Some(CspSource::Wildcard),
        _ => {},
    }
    if raw.starts_with('\'') {
        // Unrecognized keyword source.
        debug!("unsupported CSP keyword source {:?}", raw);
        return None;
    }

    // A bare scheme source: "<scheme>:".
    if let Some(scheme) = raw.strip_suffix(':') {
        if is_valid_scheme(scheme) && !scheme.contains('/') {
            return Some(CspSource::Scheme(scheme.to_ascii_lowercase()));
        }
    }

    parse_host_source(raw).map(CspSource::Host)
}

fn is_valid_scheme(scheme: &str) -> bool {
    !scheme.is_empty() &&
        scheme.chars().next().map_or(false, |c| c.is_ascii_alphabetic()) &&
        scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

fn parse_host_source(raw: &str) -> Option<HostSource> {
    let (scheme, rest) = match raw.find("://") {
        Some(idx) => {
            let scheme = &raw[..idx];
            if !is_valid_scheme(scheme) {
                return None;
            }
            (Some(scheme.to_ascii_lowercase()), &raw[idx + 3..])
        },
        None => (None, raw),
    };
    if rest.is_empty() {
        return None;
    }

    let (host_port, path) = match rest.find('/') {
        Some(idx) => (&rest[..idx], Some(normalize_path(&rest[idx..]))),
        None => (rest, None),
    };

    let (host_raw, port_raw) = split_host_port(host_port)?;
    let port = match port_raw {
        None => PortPattern::Default,
        Some("*") => PortPattern::Any,
        Some(digits) => {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let value: u32 = digits.parse().ok()?;
            // An explicit zero or out-of-range port invalidates the source.
            if value == 0 || value > u16::MAX as u32 {
                return None;
            }
            PortPattern::Exact(value as u16)
        },
    };

    let host = if let Some(suffix) = host_raw.strip_prefix("*.") {
        match parse_host(suffix).ok()? {
            Host::Domain(domain) => HostPattern::WildcardSubdomain(domain),
            // A wildcard of an IP literal is meaningless.
            _ => return None,
        }
    } else {
        HostPattern::Exact(parse_host(host_raw).ok()?)
    };

    Some(HostSource {
        scheme,
        host,
        port,
        path,
    })
}

fn split_host_port(host_port: &str) -> Option<(&str, Option<&str>)> {
    if host_port.starts_with('[') {
        let close = host_port.find(']')?;
        let host = &host_port[..close + 1];
        let rest = &host_port[close + 1..];
        if rest.is_empty() {
            return Some((host, None));
        }
        rest.strip_prefix(':').map(|port| (host, Some(port)))
    } else {
        match host_port.find(':') {
            Some(idx) => {
                let port = &host_port[idx + 1..];
                if port.contains(':') {
                    return None;
                }
                Some((&host_port[..idx], Some(port)))
            },
            None => Some((host_port, None)),
        }
    }
}

/// Whether a parsed source matches a URL under the given policy origin.
///
/// `policy_origin` is the raw policy origin string; sources that depend on
/// it (`'self'`, scheme-less host sources) match nothing when it is
/// malformed or absent.
pub fn source_matches(source: &CspSource, url: &Url, policy_origin: &str) -> bool {
    match *source {
        CspSource::NoneKeyword => false,
        CspSource::Wildcard => url.has_authority(),
        CspSource::SelfOrigin => match (canonical_origin(url), canonical_origin_str(policy_origin)) {
            (Some(url_origin), Some(self_origin)) => url_origin == self_origin,
            _ => false,
        },
        CspSource::Scheme(ref scheme) => url.scheme == *scheme,
        CspSource::Host(ref host_source) => host_source_matches(host_source, url, policy_origin),
    }
}

fn host_source_matches(source: &HostSource, url: &Url, policy_origin: &str) -> bool {
    let scheme_matches = match source.scheme {
        Some(ref scheme) => url.scheme == *scheme,
        None => match policy_origin_scheme(policy_origin) {
            Some(scheme) => url.scheme == scheme,
            None => return false,
        },
    };
    if !scheme_matches {
        return false;
    }

    let Some(ref url_host) = url.host else {
        return false;
    };
    let host_matches = match source.host {
        HostPattern::Exact(ref host) => url_host == host,
        HostPattern::WildcardSubdomain(ref suffix) => match *url_host {
            Host::Domain(ref domain) => {
                domain.len() > suffix.len() + 1 &&
                    domain.ends_with(suffix) &&
                    domain.as_bytes()[domain.len() - suffix.len() - 1] == b'.'
            },
            _ => false,
        },
    };
    if !host_matches {
        return false;
    }

    let port_matches = match source.port {
        PortPattern::Any => true,
        PortPattern::Exact(port) => url.effective_port() == Some(port),
        PortPattern::Default => match (default_port(&url.scheme), url.port) {
            (_, None) => true,
            (Some(default), Some(port)) => port == default,
            (None, Some(_)) => false,
        },
    };
    if !port_matches {
        return false;
    }

    match source.path {
        None => true,
        Some(ref source_path) if source_path.is_empty() || source_path == "/" => true,
        Some(ref source_path) => {
            let url_path = if url.path.is_empty() { "/" } else { &url.path };
            if source_path.ends_with('/') {
                url_path.starts_with(source_path.as_str())
            } else {
                url_path == source_path
            }
        },
    }
}

/// The scheme of the policy origin, for scheme-less host sources.
fn policy_origin_scheme(policy_origin: &str) -> Option<String> {
    let origin = canonical_origin_str(policy_origin)?;
    origin.split("://").next().map(str::to_owned)
}
