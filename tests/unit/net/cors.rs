/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use net::{check_cors_response_policy, PolicyViolation, RequestPolicy, Response};

fn policy_for(origin: &str) -> RequestPolicy {
    RequestPolicy {
        origin: origin.to_owned(),
        ..RequestPolicy::default()
    }
}

fn response_with_acao(value: &str) -> Response {
    let mut response = Response::ok(b"{}");
    response.headers.append("Access-Control-Allow-Origin", value);
    response
}

const CROSS_URL: &str = "https://api.example.com/data";

#[test]
fn test_same_origin_response_needs_no_acao() {
    let policy = policy_for("https://app.example.com");
    let response = Response::ok(b"{}");
    let decision =
        check_cors_response_policy("https://app.example.com/data", &response, &policy);
    assert!(decision.allowed);
}

#[test]
fn test_cross_origin_response_without_acao_is_blocked() {
    let policy = policy_for("https://app.example.com");
    let response = Response::ok(b"{}");
    let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CorsResponseBlocked));
}

#[test]
fn test_wildcard_acao_allows_uncredentialed_requests() {
    let policy = policy_for("https://app.example.com");
    let response = response_with_acao("*");
    assert!(check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
}

#[test]
fn test_exact_origin_acao_allows() {
    let policy = policy_for("https://app.example.com");
    let response = response_with_acao("https://app.example.com");
    assert!(check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
}

#[test]
fn test_acao_must_be_byte_equal_to_the_canonical_origin() {
    let policy = policy_for("https://app.example.com");
    for value in [
        "https://APP.EXAMPLE.COM",
        "https://app.example.com/",
        "https://app.example.com:443",
        "https://other.example.com",
        "http://app.example.com",
    ] {
        let response = response_with_acao(value);
        let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
        assert!(!decision.allowed, "ACAO {:?} must be rejected", value);
    }
}

#[test]
fn test_malformed_acao_values_are_rejected() {
    let policy = policy_for("https://app.example.com");
    for value in [
        " https://app.example.com",
        "https://app.example.com ",
        "https://app.example.com\t",
        "https://user@app.example.com",
        "https://app.example.com/path",
        "https://ex%61mple.com",
        "https://app.example.com\\x",
        "https://app.example.com:",
        "https://bad..example.com",
        "https://127.0.0.01",
        "",
    ] {
        let response = response_with_acao(value);
        let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
        assert!(!decision.allowed, "ACAO {:?} must be rejected", value);
    }
}

#[test]
fn test_multi_valued_acao_is_rejected() {
    let policy = policy_for("https://app.example.com");
    for value in [
        "https://app.example.com, https://other.example.com",
        "https://app.example.com,",
        "*,",
    ] {
        let response = response_with_acao(value);
        assert!(!check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
    }
}

#[test]
fn test_duplicate_acao_headers_are_rejected() {
    let policy = policy_for("https://app.example.com");
    let mut response = Response::ok(b"{}");
    response
        .headers
        .append("Access-Control-Allow-Origin", "https://app.example.com");
    response
        .headers
        .append("ACCESS-CONTROL-ALLOW-ORIGIN", "https://app.example.com");
    let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CorsResponseBlocked));
}

#[test]
fn test_acao_header_name_is_case_insensitive() {
    let policy = policy_for("https://app.example.com");
    let mut response = Response::ok(b"{}");
    response
        .headers
        .append("access-control-allow-origin", "https://app.example.com");
    assert!(check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
}

#[test]
fn test_credentialed_wildcard_is_blocked() {
    let mut policy = policy_for("https://app.example.com");
    policy.credentials_mode_include = true;
    let mut response = response_with_acao("*");
    response
        .headers
        .append("Access-Control-Allow-Credentials", "true");
    let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CorsResponseBlocked));
}

#[test]
fn test_credentialed_request_requires_acac() {
    let mut policy = policy_for("https://app.example.com");
    policy.credentials_mode_include = true;
    let response = response_with_acao("https://app.example.com");
    let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
    assert!(!decision.allowed);
}

#[test]
fn test_credentialed_request_with_literal_true_acac_is_allowed() {
    let mut policy = policy_for("https://app.example.com");
    policy.credentials_mode_include = true;
    let mut response = response_with_acao("https://app.example.com");
    response
        .headers
        .append("Access-Control-Allow-Credentials", "true");
    assert!(check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
}

#[test]
fn test_non_literal_acac_values_are_rejected() {
    for value in ["TRUE", "True", " true", "true ", "true, true", "yes", "1", "trüe"] {
        let mut policy = policy_for("https://app.example.com");
        policy.credentials_mode_include = true;
        let mut response = response_with_acao("https://app.example.com");
        response
            .headers
            .append("Access-Control-Allow-Credentials", value);
        let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
        assert!(!decision.allowed, "ACAC {:?} must be rejected", value);
    }
}

#[test]
fn test_duplicate_acac_headers_are_rejected() {
    let mut policy = policy_for("https://app.example.com");
    policy.credentials_mode_include = true;
    let mut response = response_with_acao("https://app.example.com");
    response
        .headers
        .append("Access-Control-Allow-Credentials", "true");
    response
        .headers
        .append("access-control-allow-credentials", "true");
    assert!(!check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
}

#[test]
fn test_optional_acac_mode_still_requires_literal_true_when_present() {
    let mut policy = policy_for("https://app.example.com");
    policy.credentials_mode_include = true;
    policy.require_acac_for_credentialed_cors = false;

    // Absent: fine.
    let response = response_with_acao("https://app.example.com");
    assert!(check_cors_response_policy(CROSS_URL, &response, &policy).allowed);

    // Present but not literal: rejected.
    let mut response = response_with_acao("https://app.example.com");
    response
        .headers
        .append("Access-Control-Allow-Credentials", "True");
    assert!(!check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
}

#[test]
fn test_null_acao_allows_only_the_null_policy_origin() {
    let policy = policy_for("null");
    let response = response_with_acao("null");
    assert!(check_cors_response_policy(CROSS_URL, &response, &policy).allowed);

    let policy = policy_for("https://app.example.com");
    let response = response_with_acao("null");
    let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CorsResponseBlocked));
}

#[test]
fn test_credentialed_null_acao_is_blocked() {
    let mut policy = policy_for("null");
    policy.credentials_mode_include = true;
    let mut response = response_with_acao("null");
    response
        .headers
        .append("Access-Control-Allow-Credentials", "true");
    assert!(!check_cors_response_policy(CROSS_URL, &response, &policy).allowed);
}

#[test]
fn test_unparsable_effective_url_fails_closed() {
    let policy = policy_for("https://app.example.com");
    let response = response_with_acao("*");
    let decision = check_cors_response_policy("http://bad..url/", &response, &policy);
    assert_eq!(decision.violation, Some(PolicyViolation::CorsResponseBlocked));
}

#[test]
fn test_malformed_policy_origin_cannot_take_the_same_origin_path() {
    let policy = policy_for("https://app..example.com");
    let response = Response::ok(b"{}");
    let decision = check_cors_response_policy(CROSS_URL, &response, &policy);
    assert!(!decision.allowed);
}
