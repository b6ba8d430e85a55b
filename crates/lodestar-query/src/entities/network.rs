//! CIDR, IPv4 and IPv6 detection.
//!
//! No `\b` anchors: queries mix CJK and ASCII without spaces, so boundaries
//! are checked by hand against the neighbouring characters.

use std::net::Ipv6Addr;
use std::sync::LazyLock;

use lodestar_core::models::{AddressKind, NetworkAddress};
use regex::Regex;

use super::MaskedText;

static CIDR_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d{1,3}(?:\.\d{1,3}){3})/(\d+)").ok());

static IPV4_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d{1,3}(?:\.\d{1,3}){3}").ok());

static IPV6_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[0-9a-f]{0,4}:){2,7}[0-9a-f]{0,4}(?:/(\d{1,3}))?").ok()
});

/// Extract addresses in precedence order, consuming each match from `masked`.
pub fn extract(query: &str, masked: &mut MaskedText) -> Vec<NetworkAddress> {
    let mut out = Vec::new();
    extract_cidr(query, masked, &mut out);
    extract_ipv4(query, masked, &mut out);
    extract_ipv6(query, masked, &mut out);
    out
}

fn extract_cidr(query: &str, masked: &mut MaskedText, out: &mut Vec<NetworkAddress>) {
    let Some(re) = CIDR_RE.as_ref() else { return };
    let snapshot = masked.as_str().to_string();
    for caps in re.captures_iter(&snapshot) {
        let (Some(whole), Some(ip), Some(prefix)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        if !clear_before(&snapshot, whole.start()) || followed_by_digit(&snapshot, whole.end()) {
            continue;
        }
        let Ok(prefix_len) = prefix.as_str().parse::<u8>() else {
            continue;
        };
        if prefix_len > 32 || !valid_octets(ip.as_str()) || !masked.is_intact(query, whole.range()) {
            continue;
        }
        out.push(NetworkAddress {
            address: whole.as_str().to_string(),
            kind: AddressKind::Cidr,
            mask: Some(prefix_len.to_string()),
        });
        masked.consume(whole.range());
    }
}

fn extract_ipv4(query: &str, masked: &mut MaskedText, out: &mut Vec<NetworkAddress>) {
    let Some(re) = IPV4_RE.as_ref() else { return };
    let snapshot = masked.as_str().to_string();
    for m in re.find_iter(&snapshot) {
        if !clear_before(&snapshot, m.start()) || !clear_after_ipv4(&snapshot, m.end()) {
            continue;
        }
        if !valid_octets(m.as_str()) || !masked.is_intact(query, m.range()) {
            continue;
        }
        out.push(NetworkAddress {
            address: m.as_str().to_string(),
            kind: AddressKind::Ipv4,
            mask: None,
        });
        masked.consume(m.range());
    }
}

fn extract_ipv6(query: &str, masked: &mut MaskedText, out: &mut Vec<NetworkAddress>) {
    let Some(re) = IPV6_RE.as_ref() else { return };
    let snapshot = masked.as_str().to_string();
    for caps in re.captures_iter(&snapshot) {
        let Some(whole) = caps.get(0) else { continue };
        let before_ok = snapshot[..whole.start()]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric() && c != ':');
        let after_ok = snapshot[whole.end()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        if !before_ok || !after_ok || !masked.is_intact(query, whole.range()) {
            continue;
        }

        let text = whole.as_str();
        let (addr, prefix) = match text.split_once('/') {
            Some((addr, prefix)) => (addr, Some(prefix)),
            None => (text, None),
        };
        if !addr.chars().any(|c| c.is_ascii_hexdigit()) || addr.parse::<Ipv6Addr>().is_err() {
            continue;
        }
        if prefix.is_some_and(|p| p.parse::<u8>().map_or(true, |n| n > 128)) {
            continue;
        }
        out.push(NetworkAddress {
            address: text.to_ascii_lowercase(),
            kind: AddressKind::Ipv6,
            mask: prefix.map(str::to_string),
        });
        masked.consume(whole.range());
    }
}

fn valid_octets(ip: &str) -> bool {
    let octets: Vec<&str> = ip.split('.').collect();
    octets.len() == 4
        && octets
            .iter()
            .all(|o| o.parse::<u8>().is_ok() && (o.len() == 1 || !o.starts_with('0')))
}

/// Not glued to a preceding number or dotted sequence.
fn clear_before(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .map_or(true, |c| !c.is_ascii_digit() && c != '.')
}

fn followed_by_digit(text: &str, end: usize) -> bool {
    text[end..].chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// A bare IPv4 must not continue as a longer dotted number or as a CIDR.
fn clear_after_ipv4(text: &str, end: usize) -> bool {
    let mut rest = text[end..].chars();
    match rest.next() {
        None => true,
        Some(c) if c.is_ascii_digit() => false,
        Some('.') | Some('/') => !rest.next().is_some_and(|c| c.is_ascii_digit()),
        Some(_) => true,
    }
}
