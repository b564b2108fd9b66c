/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use net::{
    check_request_policy, parse_csp_source, source_matches, CspSource, PolicyViolation,
    RequestPolicy,
};
use quill_url::parse_url;

fn connect_policy(sources: &[&str]) -> RequestPolicy {
    RequestPolicy {
        enforce_connect_src: true,
        connect_src_sources: sources.iter().map(|s| (*s).to_owned()).collect(),
        origin: "https://app.example.com".to_owned(),
        ..RequestPolicy::default()
    }
}

fn matches(source: &str, url: &str) -> bool {
    let source = match parse_csp_source(source) {
        Some(source) => source,
        None => return false,
    };
    let url = parse_url(url).expect("test url must parse");
    source_matches(&source, &url, "https://app.example.com")
}

#[test]
fn test_keyword_sources_parse() {
    assert_eq!(parse_csp_source("'none'"), Some(CspSource::NoneKeyword));
    assert_eq!(parse_csp_source("'self'"), Some(CspSource::SelfOrigin));
    assert_eq!(parse_csp_source("*"), Some(CspSource::Wildcard));
    assert_eq!(
        parse_csp_source("https:"),
        Some(CspSource::Scheme("https".to_owned()))
    );
}

#[test]
fn test_malformed_sources_parse_to_nothing() {
    for source in [
        "",
        "'nonsense'",
        "https://",
        "https://exa mple.com",
        "https://example.com:0",
        "https://example.com:70000",
        "https://example.com:",
        "https://*",
        "*.",
        "https://ex%61mple.com",
    ] {
        assert_eq!(parse_csp_source(source), None, "source {:?} should be malformed", source);
    }
}

#[test]
fn test_self_matches_the_policy_origin_only() {
    assert!(matches("'self'", "https://app.example.com/anything"));
    assert!(!matches("'self'", "https://other.example.com/"));
    assert!(!matches("'self'", "http://app.example.com/"));
}

#[test]
fn test_self_fails_closed_on_malformed_policy_origin() {
    let source = parse_csp_source("'self'").unwrap();
    let url = parse_url("https://app.example.com/").unwrap();
    assert!(!source_matches(&source, &url, "not a url"));
    assert!(!source_matches(&source, &url, ""));
}

#[test]
fn test_scheme_source_matches_scheme_only() {
    assert!(matches("https:", "https://anything.example/x"));
    assert!(!matches("https:", "http://anything.example/x"));
    assert!(matches("wss:", "wss://socket.example/"));
}

#[test]
fn test_wildcard_matches_authority_bearing_urls() {
    assert!(matches("*", "https://a.example/"));
    assert!(matches("*", "http://[::1]:8080/x"));
    assert!(!matches("*", "data:text/plain,x"));
}

#[test]
fn test_host_source_literal_equality() {
    assert!(matches("https://api.example.com", "https://api.example.com/v2"));
    assert!(!matches("https://api.example.com", "https://api2.example.com/"));
    assert!(!matches("https://api.example.com", "http://api.example.com/"));
}

#[test]
fn test_host_source_ipv6_literal() {
    assert!(matches("http://[::1]", "http://[::1]/x"));
    assert!(!matches("http://[::1]", "http://[::2]/x"));
}

#[test]
fn test_wildcard_subdomain_excludes_the_apex() {
    assert!(matches("https://*.example.com", "https://cdn.example.com/"));
    assert!(matches("https://*.example.com", "https://a.b.example.com/"));
    assert!(!matches("https://*.example.com", "https://example.com/"));
    assert!(!matches("https://*.example.com", "https://notexample.com/"));
}

#[test]
fn test_default_port_requires_the_scheme_default() {
    assert!(matches("https://api.example.com", "https://api.example.com/"));
    assert!(matches("https://api.example.com", "https://api.example.com:443/"));
    assert!(!matches("https://api.example.com", "https://api.example.com:8443/"));
}

#[test]
fn test_explicit_port_requires_exact_match() {
    assert!(matches("https://api.example.com:8443", "https://api.example.com:8443/"));
    assert!(!matches("https://api.example.com:8443", "https://api.example.com/"));
    assert!(matches("https://api.example.com:443", "https://api.example.com/"));
}

#[test]
fn test_port_wildcard_matches_any_port() {
    assert!(matches("https://api.example.com:*", "https://api.example.com:1234/"));
    assert!(matches("https://api.example.com:*", "https://api.example.com/"));
}

#[test]
fn test_schemeless_source_inherits_the_policy_origin_scheme() {
    let source = parse_csp_source("api.example.com").unwrap();
    let https_url = parse_url("https://api.example.com/").unwrap();
    let http_url = parse_url("http://api.example.com/").unwrap();
    assert!(source_matches(&source, &https_url, "https://app.example.com"));
    assert!(!source_matches(&source, &http_url, "https://app.example.com"));
    // Malformed policy origin: the source matches nothing.
    assert!(!source_matches(&source, &https_url, "no scheme here"));
}

#[test]
fn test_path_prefix_requires_trailing_slash_semantics() {
    assert!(matches("https://api.example.com/v1/", "https://api.example.com/v1/users"));
    assert!(!matches("https://api.example.com/v1/", "https://api.example.com/v2/users"));
    assert!(matches("https://api.example.com/v1", "https://api.example.com/v1"));
    assert!(!matches("https://api.example.com/v1", "https://api.example.com/v1/users"));
    assert!(matches("https://api.example.com/", "https://api.example.com/anything"));
}

#[test]
fn test_csp_path_traversal_is_blocked() {
    let policy = connect_policy(&["https://api.example.com/v1/"]);
    let decision = check_request_policy("https://api.example.com/v1/../admin", &policy);
    assert!(!decision.allowed);
    assert_eq!(decision.violation, Some(PolicyViolation::CspConnectSrcBlocked));
}

#[test]
fn test_csp_encoded_path_traversal_is_blocked() {
    let policy = connect_policy(&["https://api.example.com/v1/"]);
    let decision = check_request_policy("https://api.example.com/v1/%2e%2e/admin", &policy);
    assert!(!decision.allowed);
    assert_eq!(decision.violation, Some(PolicyViolation::CspConnectSrcBlocked));
}

#[test]
fn test_csp_path_within_prefix_is_allowed() {
    let policy = connect_policy(&["https://api.example.com/v1/"]);
    assert!(check_request_policy("https://api.example.com/v1/users", &policy).allowed);
    assert!(check_request_policy("https://api.example.com/v1/a/./b", &policy).allowed);
}

#[test]
fn test_csp_wildcard_apex_scenario() {
    let policy = connect_policy(&["*.example.com"]);
    let apex = check_request_policy("https://example.com/", &policy);
    assert_eq!(apex.violation, Some(PolicyViolation::CspConnectSrcBlocked));
    assert!(check_request_policy("https://cdn.example.com/", &policy).allowed);
}

#[test]
fn test_none_poisons_the_whole_list() {
    let policy = connect_policy(&["https://api.example.com", "'none'"]);
    let decision = check_request_policy("https://api.example.com/", &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CspConnectSrcBlocked));
}

#[test]
fn test_default_src_is_the_fallback_list() {
    let policy = RequestPolicy {
        enforce_connect_src: true,
        connect_src_sources: Vec::new(),
        default_src_sources: vec!["https://cdn.example.com".to_owned()],
        origin: "https://app.example.com".to_owned(),
        ..RequestPolicy::default()
    };
    assert!(check_request_policy("https://cdn.example.com/lib.js", &policy).allowed);
    assert!(!check_request_policy("https://api.example.com/", &policy).allowed);
}

#[test]
fn test_connect_src_overrides_default_src() {
    let policy = RequestPolicy {
        enforce_connect_src: true,
        connect_src_sources: vec!["https://api.example.com".to_owned()],
        default_src_sources: vec!["https://cdn.example.com".to_owned()],
        origin: "https://app.example.com".to_owned(),
        ..RequestPolicy::default()
    };
    assert!(check_request_policy("https://api.example.com/", &policy).allowed);
    assert!(!check_request_policy("https://cdn.example.com/", &policy).allowed);
}

#[test]
fn test_empty_lists_match_nothing() {
    let policy = RequestPolicy {
        enforce_connect_src: true,
        origin: "https://app.example.com".to_owned(),
        ..RequestPolicy::default()
    };
    let decision = check_request_policy("https://api.example.com/", &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CspConnectSrcBlocked));
}

#[test]
fn test_malformed_source_in_list_fails_closed_for_that_source() {
    let policy = connect_policy(&["https://example.com:0", "https://api.example.com"]);
    assert!(check_request_policy("https://api.example.com/", &policy).allowed);
    let decision = check_request_policy("https://example.com/", &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CspConnectSrcBlocked));
}
