//! # Probe Target Model
//!
//! Defines the endpoint a readiness probe is aimed at.
//!
//! This module handles parsing and representing targets, which can be:
//! * A bare host (e.g., `qbittorrent`), using the default port and path.
//! * A host with a port (e.g., `127.0.0.1:8080`).
//! * A host, port and health path (e.g., `127.0.0.1:8080/api/v2/app/version`).
//! * A full URL (e.g., `http://127.0.0.1:8080/api/v2/app/version`).

use std::fmt;
use std::str::FromStr;

/// Port the reference deployment exposes its Web API on.
pub const DEFAULT_PORT: u16 = 8080;

/// Health path of the reference deployment (qBittorrent's version endpoint,
/// the cheapest call that proves the Web API is up).
pub const DEFAULT_HEALTH_PATH: &str = "/api/v2/app/version";

/// The endpoint queried by each poll attempt.
///
/// Immutable configuration: supplied once at startup, no lifecycle of its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl ProbeTarget {
    pub fn new(host: impl Into<String>, port: u16, path: &str) -> Self {
        Self {
            host: host.into(),
            port,
            path: normalize_path(path),
        }
    }

    /// The URL a probe attempt issues its GET against.
    pub fn url(&self) -> String {
        if self.host.contains(':') {
            // Bare IPv6 hosts need brackets in URL position.
            format!("http://[{}]:{}{}", self.host, self.port, self.path)
        } else {
            format!("http://{}:{}{}", self.host, self.port, self.path)
        }
    }
}

impl Default for ProbeTarget {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_PORT, DEFAULT_HEALTH_PATH)
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url())
    }
}

impl FromStr for ProbeTarget {
    type Err = String;

    /// Parses a string into a `ProbeTarget`.
    ///
    /// Supported formats:
    /// * **Host**: `qbittorrent` (default port and path apply).
    /// * **Host and port**: `127.0.0.1:9090`.
    /// * **Host, port and path**: `127.0.0.1:9090/healthz`.
    /// * **URL**: `http://127.0.0.1:9090/healthz` (plain HTTP only).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("probe target cannot be empty".to_string());
        }
        if let Some(rest) = s.strip_prefix("https://") {
            return Err(format!("https targets are not supported: {rest}"));
        }
        let s = s.strip_prefix("http://").unwrap_or(s);

        let (authority, path) = split_authority(s);
        let (host, port) = parse_authority(authority)?;

        Ok(Self {
            host,
            port,
            path: path.map(normalize_path).unwrap_or_else(|| DEFAULT_HEALTH_PATH.to_string()),
        })
    }
}

/// Splits `host[:port][/path]` at the first slash.
fn split_authority(s: &str) -> (&str, Option<&str>) {
    match s.split_once('/') {
        Some((authority, path)) => (authority, Some(path)),
        None => (s, None),
    }
}

/// Parses the `host[:port]` part, handling bracketed IPv6 (`[::1]:8080`).
fn parse_authority(authority: &str) -> Result<(String, u16), String> {
    if authority.is_empty() {
        return Err("probe target has no host".to_string());
    }

    if let Some(rest) = authority.strip_prefix('[') {
        let Some((host, after)) = rest.split_once(']') else {
            return Err(format!("unclosed IPv6 bracket in '{authority}'"));
        };
        let port = match after.strip_prefix(':') {
            Some(port_str) => parse_port(port_str)?,
            None if after.is_empty() => DEFAULT_PORT,
            None => return Err(format!("unexpected trailing characters in '{authority}'")),
        };
        return Ok((host.to_string(), port));
    }

    // An unbracketed value with more than one colon is a bare IPv6 address.
    if authority.matches(':').count() > 1 {
        return Ok((authority.to_string(), DEFAULT_PORT));
    }

    match authority.split_once(':') {
        Some((host, port_str)) => {
            if host.is_empty() {
                return Err(format!("probe target has no host: '{authority}'"));
            }
            Ok((host.to_string(), parse_port(port_str)?))
        }
        None => Ok((authority.to_string(), DEFAULT_PORT)),
    }
}

fn parse_port(port_str: &str) -> Result<u16, String> {
    port_str
        .parse::<u16>()
        .map_err(|e| format!("invalid port '{port_str}': {e}"))
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_defaults() {
        let target = ProbeTarget::from_str("qbittorrent").unwrap();
        assert_eq!(target.host, "qbittorrent");
        assert_eq!(target.port, DEFAULT_PORT);
        assert_eq!(target.path, DEFAULT_HEALTH_PATH);
    }

    #[test]
    fn test_host_and_port() {
        let target = ProbeTarget::from_str("127.0.0.1:9090").unwrap();
        assert_eq!(target.host, "127.0.0.1");
        assert_eq!(target.port, 9090);
        assert_eq!(target.path, DEFAULT_HEALTH_PATH);
    }

    #[test]
    fn test_host_port_and_path() {
        let target = ProbeTarget::from_str("127.0.0.1:9090/healthz").unwrap();
        assert_eq!(target.path, "/healthz");
        assert_eq!(target.url(), "http://127.0.0.1:9090/healthz");
    }

    #[test]
    fn test_url_form_is_normalized() {
        let target = ProbeTarget::from_str("http://localhost:8081/api/v2/app/version").unwrap();
        assert_eq!(target.host, "localhost");
        assert_eq!(target.port, 8081);
        assert_eq!(target.path, "/api/v2/app/version");
    }

    #[test]
    fn test_ipv6_forms() {
        let bracketed = ProbeTarget::from_str("[::1]:8080/health").unwrap();
        assert_eq!(bracketed.host, "::1");
        assert_eq!(bracketed.port, 8080);
        assert_eq!(bracketed.url(), "http://[::1]:8080/health");

        let bare = ProbeTarget::from_str("fe80::1").unwrap();
        assert_eq!(bare.host, "fe80::1");
        assert_eq!(bare.port, DEFAULT_PORT);
    }

    #[test]
    fn test_invalid_targets() {
        assert!(ProbeTarget::from_str("").is_err());
        assert!(ProbeTarget::from_str("https://secure:443").is_err());
        assert!(ProbeTarget::from_str("host:notaport").is_err());
        assert!(ProbeTarget::from_str("host:70000").is_err());
        assert!(ProbeTarget::from_str(":8080").is_err());
        assert!(ProbeTarget::from_str("[::1:8080").is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        let target = ProbeTarget::new("10.0.0.5", 9090, "healthz");
        let reparsed = ProbeTarget::from_str(&target.to_string()).unwrap();
        assert_eq!(target, reparsed);
    }
}
