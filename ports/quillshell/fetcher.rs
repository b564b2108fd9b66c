/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! The shell's byte-fetcher: serves `file:` URLs from disk and fails
//! closed for everything else. Network transport is not part of the shell.

use std::fs;

use log::debug;
use net::{Fetcher, Headers, Response};
use quill_url::parse_url;

pub struct FileFetcher;

impl Fetcher for FileFetcher {
    fn fetch(&mut self, url: &str, _headers: &Headers) -> Response {
        let parsed = match parse_url(url) {
            Ok(parsed) => parsed,
            Err(error) => {
                return Response::network_error(&format!("unfetchable url {:?}: {}", url, error));
            },
        };
        if parsed.scheme != "file" {
            return Response::network_error(&format!(
                "no transport for scheme '{}'",
                parsed.scheme
            ));
        }

        let path = parsed.path.clone();
        debug!("reading {}", path);
        match fs::read(&path) {
            Ok(body) => {
                let mut response = Response::ok(&body);
                response
                    .headers
                    .append("Content-Type", content_type_for(&path));
                response
            },
            Err(error) => Response::network_error(&format!("{}: {}", path, error)),
        }
    }
}

fn content_type_for(path: &str) -> &'static str {
    if path.ends_with(".css") {
        "text/css"
    } else {
        "text/html"
    }
}
