/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! User preferences, loaded from a JSON file.

use std::fs;

use serde::Deserialize;

/// Preferences with defaults for every field, so a partial file works.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prefs {
    pub viewport_width: Option<u32>,
    pub viewport_height: Option<u32>,
    /// Minimum diagnostic severity: "info", "warning" or "error".
    pub min_severity: String,
    /// Cache policy: "cache-all" or "no-cache".
    pub cache_policy: String,
    /// Schemes requests may use.
    pub allowed_schemes: Option<Vec<String>>,
}

impl Default for Prefs {
    fn default() -> Prefs {
        Prefs {
            viewport_width: None,
            viewport_height: None,
            min_severity: "info".to_owned(),
            cache_policy: "cache-all".to_owned(),
            allowed_schemes: None,
        }
    }
}

/// Read prefs from a JSON file. A missing or malformed file is an error;
/// callers decide whether that is fatal.
pub fn read_prefs(path: &str) -> Result<Prefs, String> {
    let text = fs::read_to_string(path)
        .map_err(|error| format!("failed to read prefs {}: {}", path, error))?;
    serde_json::from_str(&text)
        .map_err(|error| format!("failed to parse prefs {}: {}", path, error))
}
