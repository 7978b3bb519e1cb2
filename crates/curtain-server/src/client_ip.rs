//! Caller IP resolution.
//!
//! Precedence, highest first:
//!
//! 1. the first (left-most) address in `X-Forwarded-For`
//! 2. `X-Real-IP`
//! 3. the TCP peer address
//!
//! This lets a reverse proxy report the real visitor address. Both headers
//! are client-controlled: when the server is reachable without a proxy that
//! overwrites them, any visitor can claim a whitelisted address. Set
//! `CURTAIN_TRUST_PROXY_HEADERS=false` in that case so only the peer address
//! is used.
//!
//! Header values are trimmed but otherwise taken verbatim, since whitelist
//! matching is exact string equality.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::HeaderMap;
use axum::http::request::Parts;

use crate::state::AppState;

/// Forwarded-for header name.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Real-IP header name.
pub const X_REAL_IP: &str = "x-real-ip";

/// The resolved caller address, `None` when nothing could be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl FromRequestParts<Arc<AppState>> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let peer = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|ConnectInfo(addr)| addr);

        Ok(Self(resolve(
            &parts.headers,
            peer,
            state.trust_proxy_headers,
        )))
    }
}

/// Apply the precedence policy to a request's headers and peer address.
#[must_use]
pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>, trust_headers: bool) -> Option<String> {
    if trust_headers {
        let forwarded = header_str(headers, X_FORWARDED_FOR)
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(ip) = forwarded {
            return Some(ip.to_owned());
        }

        if let Some(ip) = header_str(headers, X_REAL_IP).map(str::trim).filter(|v| !v.is_empty()) {
            return Some(ip.to_owned());
        }
    }

    peer.map(|addr| addr.ip().to_canonical().to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_static(value));
        }
        map
    }

    fn peer() -> Option<SocketAddr> {
        Some("192.168.1.20:51234".parse().unwrap())
    }

    #[test]
    fn forwarded_for_wins() {
        let h = headers(&[
            (X_FORWARDED_FOR, "203.0.113.7, 10.0.0.1"),
            (X_REAL_IP, "198.51.100.2"),
        ]);
        assert_eq!(resolve(&h, peer(), true).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn real_ip_is_second() {
        let h = headers(&[(X_REAL_IP, " 198.51.100.2 ")]);
        assert_eq!(resolve(&h, peer(), true).as_deref(), Some("198.51.100.2"));
    }

    #[test]
    fn empty_forwarded_for_falls_through() {
        let h = headers(&[(X_FORWARDED_FOR, " , 10.0.0.1"), (X_REAL_IP, "198.51.100.2")]);
        assert_eq!(resolve(&h, peer(), true).as_deref(), Some("198.51.100.2"));
    }

    #[test]
    fn peer_address_is_last_resort() {
        assert_eq!(
            resolve(&HeaderMap::new(), peer(), true).as_deref(),
            Some("192.168.1.20")
        );
        assert_eq!(resolve(&HeaderMap::new(), None, true), None);
    }

    #[test]
    fn untrusted_headers_are_ignored() {
        let h = headers(&[(X_FORWARDED_FOR, "203.0.113.7"), (X_REAL_IP, "198.51.100.2")]);
        assert_eq!(resolve(&h, peer(), false).as_deref(), Some("192.168.1.20"));
    }

    #[test]
    fn ipv4_mapped_peer_is_canonicalized() {
        let mapped: SocketAddr = "[::ffff:10.1.2.3]:443".parse().unwrap();
        assert_eq!(
            resolve(&HeaderMap::new(), Some(mapped), true).as_deref(),
            Some("10.1.2.3")
        );
    }
}
