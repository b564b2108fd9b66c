/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The response cache.
//!
//! A `(url → response)` map behind a pluggable policy. `NoCache` turns
//! `store` into a no-op and hides whatever is already present; swapping the
//! policy back re-exposes the entries. Error responses never enter the
//! cache. Entries are independent: storing one URL never disturbs another.

use log::debug;
use rustc_hash::FxHashMap;

use crate::Response;

/// Cache behavior.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CachePolicy {
    NoCache,
    CacheAll,
}

/// A URL-keyed response cache. Keys are the canonicalized URL strings that
/// already passed the request policy's parser.
pub struct ResponseCache {
    policy: CachePolicy,
    entries: FxHashMap<String, Response>,
}

impl ResponseCache {
    pub fn new(policy: CachePolicy) -> ResponseCache {
        ResponseCache {
            policy,
            entries: FxHashMap::default(),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Change the policy. Entries are not evicted; `NoCache` merely hides
    /// them until the policy swaps back.
    pub fn set_policy(&mut self, policy: CachePolicy) {
        self.policy = policy;
    }

    /// Insert or overwrite. No-op under `NoCache` and for error responses.
    pub fn store(&mut self, url: &str, response: Response) {
        if self.policy == CachePolicy::NoCache {
            return;
        }
        if response.is_error() {
            debug!("error response for {} not cached", url);
            return;
        }
        self.entries.insert(url.to_owned(), response);
    }

    /// Look up a response. Misses under `NoCache` regardless of contents.
    pub fn lookup(&self, url: &str) -> Option<Response> {
        if self.policy == CachePolicy::NoCache {
            return None;
        }
        self.entries.get(url).cloned()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The number of stored entries, the hidden ones included.
    pub fn size(&self) -> usize {
        self.entries.len()
    }
}
