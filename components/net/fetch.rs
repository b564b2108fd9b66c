/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The policed fetch path.
//!
//! [`fetch_with_policy`] strings the gates together around the byte-fetcher
//! collaborator: request policy, Origin header emission, cache lookup, the
//! fetch itself, the CORS response gate, and the cache store. Each
//! transaction stage emits a diagnostic.

use diagnostics::{modules, DiagnosticEmitter, Severity};
use log::debug;
use quill_url::parse_url;
use strum::{AsRefStr, Display};

use crate::cors::check_cors_response_policy;
use crate::{
    build_request_headers_for_policy, check_request_policy, Headers, PolicyDecision,
    RequestPolicy, Response, ResponseCache,
};

/// The byte transport collaborator. Synchronous; a failed transport returns
/// an error response rather than diverging.
pub trait Fetcher {
    fn fetch(&mut self, url: &str, headers: &Headers) -> Response;
}

/// Request methods the engine issues.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RequestMethod {
    Get,
    Head,
}

/// The transaction stages, emitted as diagnostics along the fetch path.
#[derive(AsRefStr, Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RequestStage {
    Created,
    Dispatched,
    Received,
    Complete,
    Error,
}

/// Run one policed fetch. Returns the response, or the policy decision that
/// blocked it.
pub fn fetch_with_policy(
    fetcher: &mut dyn Fetcher,
    cache: &mut ResponseCache,
    policy: &RequestPolicy,
    url: &str,
    emitter: &mut DiagnosticEmitter,
) -> Result<Response, PolicyDecision> {
    emit_stage(emitter, RequestStage::Created, url);

    let decision = check_request_policy(url, policy);
    if !decision.allowed {
        emitter.emit(
            Severity::Warning,
            modules::POLICY,
            RequestStage::Error.as_ref(),
            &decision.message,
        );
        return Err(decision);
    }

    if let Some(cached) = cache.lookup(url) {
        debug!("cache hit for {}", url);
        emitter.emit(
            Severity::Info,
            modules::CACHE,
            RequestStage::Complete.as_ref(),
            &format!("cache hit for {}", url),
        );
        return Ok(cached);
    }

    let headers = build_request_headers_for_policy(url, policy);
    emit_stage(emitter, RequestStage::Dispatched, url);
    let response = fetcher.fetch(url, &headers);

    if response.is_error() {
        emitter.emit(
            Severity::Error,
            modules::NETWORK,
            RequestStage::Error.as_ref(),
            response.error.as_deref().unwrap_or("transport failure"),
        );
        return Ok(response);
    }
    emit_stage(emitter, RequestStage::Received, url);

    if cors_gate_applies(url, policy) {
        let decision = check_cors_response_policy(url, &response, policy);
        if !decision.allowed {
            emitter.emit(
                Severity::Warning,
                modules::POLICY,
                RequestStage::Error.as_ref(),
                &decision.message,
            );
            return Err(decision);
        }
    }

    cache.store(url, response.clone());
    emit_stage(emitter, RequestStage::Complete, url);
    Ok(response)
}

/// The CORS response gate is consulted for HTTP(S) responses fetched on
/// behalf of a concrete requesting origin. With no policy origin there is
/// no origin to authorize against.
fn cors_gate_applies(url: &str, policy: &RequestPolicy) -> bool {
    if policy.origin.is_empty() {
        return false;
    }
    match parse_url(url) {
        Ok(parsed) => parsed.scheme == "http" || parsed.scheme == "https",
        Err(_) => false,
    }
}

fn emit_stage(emitter: &mut DiagnosticEmitter, stage: RequestStage, url: &str) {
    emitter.emit(
        Severity::Info,
        modules::NETWORK,
        stage.as_ref(),
        &format!("{} {}", RequestMethod::Get, url),
    );
}
