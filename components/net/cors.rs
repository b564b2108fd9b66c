/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The CORS response gate.
//!
//! A cross-origin response passes only on the say-so of its
//! `Access-Control-Allow-Origin` header: present exactly once (case
//! variants counted together), byte-exact in value, and never `*` when
//! credentials are included. `Access-Control-Allow-Credentials` must be the
//! literal lowercase `true` when it is consulted at all. Everything
//! ambiguous is rejected.

use quill_url::{canonical_origin_str, http_origin};

use crate::{PolicyDecision, PolicyViolation, RequestPolicy, Response};

const ACAO: &str = "access-control-allow-origin";
const ACAC: &str = "access-control-allow-credentials";

/// The sentinel opaque origin.
const NULL_ORIGIN: &str = "null";

/// Gate a response fetched from `effective_url` (the URL after redirects)
/// against the policy origin.
pub fn check_cors_response_policy(
    effective_url: &str,
    response: &Response,
    policy: &RequestPolicy,
) -> PolicyDecision {
    let Some(url_origin) = canonical_origin_str(effective_url) else {
        return PolicyDecision::blocked(
            PolicyViolation::CorsResponseBlocked,
            "effective url has no canonical origin",
        );
    };

    // Same-origin responses need no ACAO. A malformed policy origin cannot
    // take this path.
    if let Some(policy_origin) = http_origin(&policy.origin) {
        if policy_origin == url_origin {
            return PolicyDecision::allowed();
        }
    }

    let acao_count = response.headers.count(ACAO);
    if acao_count == 0 {
        return PolicyDecision::blocked(
            PolicyViolation::CorsResponseBlocked,
            "response carries no Access-Control-Allow-Origin header",
        );
    }
    if acao_count > 1 {
        return PolicyDecision::blocked(
            PolicyViolation::CorsResponseBlocked,
            "response carries multiple Access-Control-Allow-Origin headers",
        );
    }

    let raw = response.headers.get(ACAO).unwrap_or("");
    if let Some(reason) = reject_header_value(raw) {
        return PolicyDecision::blocked(PolicyViolation::CorsResponseBlocked, reason);
    }

    let value_allows_origin = if raw == "*" {
        if policy.credentials_mode_include {
            return PolicyDecision::blocked(
                PolicyViolation::CorsResponseBlocked,
                "wildcard Access-Control-Allow-Origin is forbidden with credentials",
            );
        }
        true
    } else if raw == NULL_ORIGIN {
        // The null sentinel only matches the null policy origin, and never
        // with credentials included.
        policy.origin == NULL_ORIGIN && !policy.credentials_mode_include
    } else {
        match http_origin(&policy.origin) {
            // Byte equality against the canonical policy origin; anything
            // non-canonical in the header (paths, escapes, odd case, bad
            // labels) fails this comparison.
            Some(policy_origin) => raw == policy_origin,
            None => false,
        }
    };
    if !value_allows_origin {
        return PolicyDecision::blocked(
            PolicyViolation::CorsResponseBlocked,
            &format!("Access-Control-Allow-Origin {:?} does not allow this origin", raw),
        );
    }

    if policy.credentials_mode_include {
        if let Some(decision) = check_credentials_header(response, policy) {
            return decision;
        }
    }

    PolicyDecision::allowed()
}

/// Returns a blocked decision if the ACAC header disqualifies the response,
/// `None` if it passes.
fn check_credentials_header(
    response: &Response,
    policy: &RequestPolicy,
) -> Option<PolicyDecision> {
    let count = response.headers.count(ACAC);
    if count == 0 {
        if policy.require_acac_for_credentialed_cors {
            return Some(PolicyDecision::blocked(
                PolicyViolation::CorsResponseBlocked,
                "credentialed response lacks Access-Control-Allow-Credentials",
            ));
        }
        return None;
    }
    if count > 1 {
        return Some(PolicyDecision::blocked(
            PolicyViolation::CorsResponseBlocked,
            "response carries multiple Access-Control-Allow-Credentials headers",
        ));
    }
    let raw = response.headers.get(ACAC).unwrap_or("");
    // Strictly the literal lowercase token: no padding, no case variants,
    // no lists, nothing non-ASCII.
    if raw != "true" {
        return Some(PolicyDecision::blocked(
            PolicyViolation::CorsResponseBlocked,
            &format!("Access-Control-Allow-Credentials {:?} is not the literal 'true'", raw),
        ));
    }
    None
}

/// Generic rejection of an ACAO value's shape, before interpretation.
fn reject_header_value(raw: &str) -> Option<&'static str> {
    if raw.is_empty() {
        return Some("header value is empty");
    }
    if raw != raw.trim() {
        return Some("header value has surrounding whitespace");
    }
    if raw.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Some("header value contains control characters");
    }
    if !raw.is_ascii() {
        return Some("header value contains non-ascii bytes");
    }
    if raw.contains(',') {
        return Some("header value is multi-valued");
    }
    None
}
