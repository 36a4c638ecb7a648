//! Request traffic classification for visit analytics.
//!
//! Pure functions extracting client IP, device class, language and referrer
//! source from request metadata. Classification feeds both the visit record
//! and the per-device destination choice on redirect.

use std::fmt;

/// Sentinel recorded when a dimension could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Sentinel recorded when a visit has no detectable referrer.
pub const DIRECT: &str = "direct";

/// Device class derived from the User-Agent header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Ios,
    Android,
    Desktop,
    Unknown,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Ios => "ios",
            DeviceClass::Android => "android",
            DeviceClass::Desktop => "desktop",
            DeviceClass::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the device from a User-Agent header.
///
/// Checks are independent substring tests on the lower-cased value;
/// the first matching rule wins.
pub fn detect_device(user_agent: Option<&str>) -> DeviceClass {
    let Some(ua) = user_agent else {
        return DeviceClass::Unknown;
    };
    let ua = ua.to_lowercase();

    if ua.contains("iphone") || ua.contains("ipad") {
        DeviceClass::Ios
    } else if ua.contains("android") {
        DeviceClass::Android
    } else if ua.contains("macintosh") || ua.contains("mac os") || ua.contains("windows") {
        DeviceClass::Desktop
    } else {
        DeviceClass::Unknown
    }
}

/// Resolves the client IP, preferring a forwarded-for style header.
///
/// A non-empty header contributes its first comma-separated token, trimmed;
/// otherwise the direct peer address is used.
pub fn client_ip(forwarded_for: Option<&str>, peer_addr: &str) -> String {
    match forwarded_for {
        Some(header) if !header.is_empty() => header
            .split(',')
            .next()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| peer_addr.to_string()),
        _ => peer_addr.to_string(),
    }
}

/// Extracts the language code from an Accept-Language header.
///
/// Takes the first two characters, lower-cased. No weighted-list parsing
/// beyond the leading token. Absent header yields the `unknown` sentinel.
pub fn detect_language(accept_language: Option<&str>) -> String {
    match accept_language {
        Some(value) => value.chars().take(2).collect::<String>().to_lowercase(),
        None => UNKNOWN.to_string(),
    }
}

/// Determines the referrer source from the raw query string and Referer header.
///
/// A `utm_source` query parameter wins, lower-cased. The query string is split
/// naively on `&` and `=`; only pairs with exactly one `=` are considered, so
/// a value containing `=` is silently skipped. Without `utm_source`, a present
/// Referer header is used lower-cased; otherwise the `direct` sentinel.
pub fn referrer_source(query: Option<&str>, referer: Option<&str>) -> String {
    if let Some(query) = query {
        for param in query.split('&') {
            let parts: Vec<&str> = param.split('=').collect();
            if parts.len() == 2 && parts[0] == "utm_source" {
                return parts[1].to_lowercase();
            }
        }
    }

    match referer {
        Some(r) => r.to_lowercase(),
        None => DIRECT.to_string(),
    }
}
