use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::{core::app_state::AppState, error_handler::AppError};

/// Identity used when neither headers nor the socket reveal the caller.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Enforces the per-client audit allowance before the audit handler runs.
///
/// Every request that reaches this layer consumes one audit, whatever its
/// outcome. Rejected requests never reach the handler.
pub async fn enforce_audit_quota(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let client = client_identity(request.headers(), peer, state.config.trust_forwarded_for);

    if !state.quota.try_acquire(&client) {
        warn!(%client, limit = state.quota.limit(), "audit limit exceeded");
        return AppError::QuotaExceeded.into_response();
    }
    debug!(%client, used = state.quota.used(&client), "audit allowance consumed");

    next.run(request).await
}

/// Resolves the caller's identity.
///
/// With `trust_forwarded_for`, the first `X-Forwarded-For` entry wins, then
/// `X-Real-IP`. Otherwise only the socket peer counts, since those headers are
/// set by the client unless a proxy overwrites them.
pub fn client_identity(headers: &HeaderMap, peer: Option<IpAddr>, trust_forwarded_for: bool) -> String {
    let forwarded = trust_forwarded_for
        .then(|| {
            headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split(',').next())
                .and_then(|s| s.trim().parse::<IpAddr>().ok())
                .or_else(|| {
                    headers
                        .get("x-real-ip")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<IpAddr>().ok())
                })
        })
        .flatten();

    forwarded
        .or(peer)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (k, v) in pairs {
            map.insert(*k, HeaderValue::from_static(*v));
        }
        map
    }

    #[test]
    fn uses_socket_peer_by_default() {
        let peer: IpAddr = "192.0.2.7".parse().unwrap();
        let h = headers(&[("x-forwarded-for", "203.0.113.9")]);
        assert_eq!(client_identity(&h, Some(peer), false), "192.0.2.7");
    }

    #[test]
    fn trusted_proxy_headers_take_precedence() {
        let peer: IpAddr = "10.0.0.2".parse().unwrap();

        let h = headers(&[("x-forwarded-for", "203.0.113.9, 10.0.0.1")]);
        assert_eq!(client_identity(&h, Some(peer), true), "203.0.113.9");

        let h = headers(&[("x-real-ip", "198.51.100.4")]);
        assert_eq!(client_identity(&h, Some(peer), true), "198.51.100.4");

        let h = headers(&[("x-forwarded-for", "garbage")]);
        assert_eq!(client_identity(&h, Some(peer), true), "10.0.0.2");
    }

    #[test]
    fn falls_back_to_unknown() {
        assert_eq!(client_identity(&HeaderMap::new(), None, false), UNKNOWN_CLIENT);
        assert_eq!(client_identity(&HeaderMap::new(), None, true), UNKNOWN_CLIENT);
    }
}
