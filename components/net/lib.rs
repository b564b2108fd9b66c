/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Request policy enforcement and response handling.
//!
//! Everything in this crate is pure and fail-closed: the policy gates
//! ([`check_request_policy`], [`check_cors_response_policy`]) are functions
//! of their inputs, malformed input always denies, and violations are
//! returned as data, never thrown. The [`Fetcher`] collaborator does the
//! actual byte transport; [`fetch_with_policy`] wires the gates, the cache
//! and the transaction diagnostics around it.

mod cache;
mod cors;
mod csp;
mod fetch;
mod headers;
mod policy;
mod response;

pub use cache::{CachePolicy, ResponseCache};
pub use cors::check_cors_response_policy;
pub use csp::{parse_csp_source, source_matches, CspSource};
pub use fetch::{fetch_with_policy, Fetcher, RequestMethod, RequestStage};
pub use headers::Headers;
pub use policy::{
    build_request_headers_for_policy, check_request_policy, PolicyDecision, PolicyViolation,
    RequestPolicy,
};
pub use response::Response;
