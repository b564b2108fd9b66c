/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The response model handed back by the byte-fetcher collaborator.

use crate::Headers;

/// A fetched response, or the record of a transport failure.
///
/// A response is an error iff `error` is set or the status code is zero.
/// Error responses are never cached and carry no usable body.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
    pub error: Option<String>,
}

impl Response {
    pub fn new(status_code: u16) -> Response {
        Response {
            status_code,
            headers: Headers::new(),
            body: Vec::new(),
            error: None,
        }
    }

    /// A 200 response with a body.
    pub fn ok(body: &[u8]) -> Response {
        Response {
            status_code: 200,
            headers: Headers::new(),
            body: body.to_vec(),
            error: None,
        }
    }

    /// The record of a transport failure.
    pub fn network_error(message: &str) -> Response {
        Response {
            status_code: 0,
            headers: Headers::new(),
            body: Vec::new(),
            error: Some(message.to_owned()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some() || self.status_code == 0
    }

    /// The body decoded as text, lossily.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
