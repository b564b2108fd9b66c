/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Canonical origin serialization and comparison.
//!
//! An origin serializes as `scheme://host[:port]`, with the port omitted iff
//! it is the scheme's default. Origins are compared by byte equality of that
//! serialization. The sentinel `"null"` is a distinct origin owned by the
//! callers; it never reaches the parser.

use crate::{parse_url, Url};

/// The default port for the schemes that have one.
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

/// Serialize the canonical origin of a parsed URL.
///
/// Returns `None` for URLs without an authority host (opaque schemes such
/// as `data:` and `javascript:`, and `file:` URLs with an empty authority).
pub fn canonical_origin(url: &Url) -> Option<String> {
    let host = url.host.as_ref()?;
    let mut origin = format!("{}://{}", url.scheme, host);
    if let Some(port) = url.port {
        if default_port(&url.scheme) != Some(port) {
            origin.push_str(&format!(":{}", port));
        }
    }
    Some(origin)
}

/// Parse a raw string and serialize its canonical origin.
///
/// `canonical_origin_str` is idempotent over its own output: feeding a
/// returned origin back in yields the same origin.
pub fn canonical_origin_str(raw: &str) -> Option<String> {
    canonical_origin(&parse_url(raw).ok()?)
}

/// The strict origin form used for the `Origin` request header and for
/// validating `Access-Control-Allow-Origin` values.
///
/// Only `http` and `https` qualify, and the input must already be a bare
/// origin: no userinfo, no path or query or fragment, no whitespace, no
/// percent escapes, nothing non-ASCII. Everything the general parser
/// rejects (backslashes, empty ports, malformed labels, non-canonical IPv4
/// literals, overlong labels) stays rejected here.
pub fn http_origin(raw: &str) -> Option<String> {
    if raw.is_empty() || !raw.is_ascii() {
        return None;
    }
    if raw.bytes().any(|b| b.is_ascii_whitespace()) {
        return None;
    }
    let url = parse_url(raw).ok()?;
    if url.scheme != "http" && url.scheme != "https" {
        return None;
    }
    if !url.path.is_empty() || url.query.is_some() || url.fragment.is_some() {
        return None;
    }
    canonical_origin(&url)
}

/// Whether two raw URL strings share a canonical origin. Both sides must
/// canonicalize; an unparsable side is never same-origin with anything.
pub fn same_origin(a: &str, b: &str) -> bool {
    match (canonical_origin_str(a), canonical_origin_str(b)) {
        (Some(origin_a), Some(origin_b)) => origin_a == origin_b,
        _ => false,
    }
}
