/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The request policy and its gates.

use log::debug;
use quill_url::{canonical_origin, canonical_origin_str, http_origin, parse_url, same_origin};
use strum::{AsRefStr, Display};

use crate::csp::{parse_csp_source, source_matches, CspSource};
use crate::Headers;

/// What a request is allowed to do. The default policy allows `http`,
/// `https` and `file`, permits cross-origin requests (the CORS response
/// gate is the cross-origin control then), and enforces nothing else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestPolicy {
    pub allowed_schemes: Vec<String>,
    pub allow_cross_origin: bool,
    /// The requesting origin. Empty disables the cross-origin gate; the
    /// sentinel `"null"` is a distinct opaque origin.
    pub origin: String,
    pub enforce_connect_src: bool,
    pub connect_src_sources: Vec<String>,
    pub default_src_sources: Vec<String>,
    pub credentials_mode_include: bool,
    pub require_acac_for_credentialed_cors: bool,
}

impl Default for RequestPolicy {
    fn default() -> RequestPolicy {
        RequestPolicy {
            allowed_schemes: vec!["http".to_owned(), "https".to_owned(), "file".to_owned()],
            allow_cross_origin: true,
            origin: String::new(),
            enforce_connect_src: false,
            connect_src_sources: Vec::new(),
            default_src_sources: Vec::new(),
            credentials_mode_include: false,
            require_acac_for_credentialed_cors: true,
        }
    }
}

/// Why a request or response was blocked. The variant names are part of the
/// public contract.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum PolicyViolation {
    TooManyRedirects,
    CrossOriginBlocked,
    CorsResponseBlocked,
    CspConnectSrcBlocked,
    UnsupportedScheme,
    EmptyUrl,
}

/// The outcome of a policy gate. Violations are returned, never thrown.
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyDecision {
    pub allowed: bool,
    pub violation: Option<PolicyViolation>,
    pub message: String,
}

impl PolicyDecision {
    pub fn allowed() -> PolicyDecision {
        PolicyDecision {
            allowed: true,
            violation: None,
            message: String::new(),
        }
    }

    pub fn blocked(violation: PolicyViolation, message: &str) -> PolicyDecision {
        PolicyDecision {
            allowed: false,
            violation: Some(violation),
            message: message.to_owned(),
        }
    }
}

/// Evaluate the request gates in order; the first failure wins.
///
/// Order: empty URL, URL parse (fail closed as `UnsupportedScheme`), the
/// scheme allow-list, the cross-origin gate, then CSP connect-src.
pub fn check_request_policy(url: &str, policy: &RequestPolicy) -> PolicyDecision {
    if url.is_empty() {
        return PolicyDecision::blocked(PolicyViolation::EmptyUrl, "request url is empty");
    }

    let parsed = match parse_url(url) {
        Ok(parsed) => parsed,
        Err(error) => {
            return PolicyDecision::blocked(
                PolicyViolation::UnsupportedScheme,
                &format!("url does not parse: {}", error),
            );
        },
    };

    if !policy
        .allowed_schemes
        .iter()
        .any(|scheme| *scheme == parsed.scheme)
    {
        return PolicyDecision::blocked(
            PolicyViolation::UnsupportedScheme,
            &format!("scheme '{}' is not allowed", parsed.scheme),
        );
    }

    if !policy.allow_cross_origin && !policy.origin.is_empty() {
        let Some(policy_origin) = canonical_origin_str(&policy.origin) else {
            return PolicyDecision::blocked(
                PolicyViolation::CrossOriginBlocked,
                "policy origin does not canonicalize",
            );
        };
        if canonical_origin(&parsed).as_deref() != Some(policy_origin.as_str()) {
            return PolicyDecision::blocked(
                PolicyViolation::CrossOriginBlocked,
                &format!("cross-origin request from {} blocked", policy_origin),
            );
        }
    }

    if policy.enforce_connect_src {
        let raw_sources = if !policy.connect_src_sources.is_empty() {
            &policy.connect_src_sources
        } else {
            &policy.default_src_sources
        };
        let sources: Vec<Option<CspSource>> =
            raw_sources.iter().map(|s| parse_csp_source(s)).collect();

        // 'none' anywhere makes the whole list match nothing.
        let has_none = sources
            .iter()
            .any(|s| *s == Some(CspSource::NoneKeyword));
        let matched = !has_none &&
            sources.iter().flatten().any(|source| {
                source_matches(source, &parsed, &policy.origin)
            });
        if !matched {
            debug!("no connect-src source matched {}", url);
            return PolicyDecision::blocked(
                PolicyViolation::CspConnectSrcBlocked,
                &format!("no connect-src source matches {}", url),
            );
        }
    }

    PolicyDecision::allowed()
}

/// Build the request headers the policy calls for.
///
/// An `Origin` header is emitted only when the policy origin is a strict
/// HTTP(S) origin, the target URL has an origin of its own, and the two
/// differ. Anything less emits nothing.
pub fn build_request_headers_for_policy(url: &str, policy: &RequestPolicy) -> Headers {
    let mut headers = Headers::new();
    let Some(origin) = http_origin(&policy.origin) else {
        return headers;
    };
    if canonical_origin_str(url).is_none() {
        return headers;
    }
    if same_origin(&policy.origin, url) {
        return headers;
    }
    headers.append("Origin", &origin);
    headers
}
