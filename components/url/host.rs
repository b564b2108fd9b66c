/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Host forms: domains, IPv4 dotted quads, and bracketed IPv6 literals.

use std::fmt;

use crate::UrlParseError;

/// A validated host in canonical textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Host {
    /// A lowercase dot-separated domain.
    Domain(String),
    /// A canonical dotted-quad IPv4 literal.
    Ipv4(String),
    /// An IPv6 literal, stored without its brackets, hex lowercased.
    Ipv6(String),
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Host::Domain(ref d) => f.write_str(d),
            Host::Ipv4(ref v4) => f.write_str(v4),
            Host::Ipv6(ref v6) => write!(f, "[{}]", v6),
        }
    }
}

const MAX_LABEL_LEN: usize = 63;
const MAX_IPV6_LEN: usize = 45;

/// Parse and validate one host. `raw` is the authority's host section,
/// brackets included for IPv6.
pub fn parse_host(raw: &str) -> Result<Host, UrlParseError> {
    if raw.is_empty() {
        return Err(UrlParseError::EmptyHost);
    }
    if raw.starts_with('[') {
        return parse_ipv6(raw);
    }

    let lower = raw.to_ascii_lowercase();
    let labels: Vec<&str> = lower.split('.').collect();

    // A final all-digit label forces the IPv4 interpretation: either the
    // whole host is a canonical dotted quad, or it is rejected. This also
    // closes off legacy single-integer hosts like `http://1234567/`.
    if labels.last().map_or(false, |l| is_all_digits(l)) {
        return parse_ipv4(&labels);
    }

    for label in &labels {
        if label.is_empty() || label.len() > MAX_LABEL_LEN {
            return Err(UrlParseError::InvalidDomain);
        }
        if !label
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(UrlParseError::InvalidDomain);
        }
    }
    Ok(Host::Domain(lower))
}

fn is_all_digits(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|b| b.is_ascii_digit())
}

fn parse_ipv4(labels: &[&str]) -> Result<Host, UrlParseError> {
    if labels.len() != 4 || !labels.iter().all(|l| is_all_digits(l)) {
        return Err(UrlParseError::InvalidIpv4);
    }
    for octet in labels {
        if octet.len() > 1 && octet.starts_with('0') {
            return Err(UrlParseError::InvalidIpv4);
        }
        let value: u32 = octet.parse().map_err(|_| UrlParseError::InvalidIpv4)?;
        if value > 255 {
            return Err(UrlParseError::InvalidIpv4);
        }
    }
    Ok(Host::Ipv4(labels.join(".")))
}

fn parse_ipv6(raw: &str) -> Result<Host, UrlParseError> {
    let inner = raw
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .ok_or(UrlParseError::InvalidIpv6)?;
    if inner.is_empty() || inner.len() > MAX_IPV6_LEN {
        return Err(UrlParseError::InvalidIpv6);
    }
    if !inner.contains(':') || inner.contains(":::") {
        return Err(UrlParseError::InvalidIpv6);
    }
    // Dots are admitted for the IPv4-mapped tail form.
    if !inner
        .bytes()
        .all(|b| b.is_ascii_hexdigit() || b == b':' || b == b'.')
    {
        return Err(UrlParseError::InvalidIpv6);
    }
    Ok(Host::Ipv6(inner.to_ascii_lowercase()))
}
