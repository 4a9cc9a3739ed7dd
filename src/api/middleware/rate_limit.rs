//! Per-IP rate limiting using the token bucket algorithm.

use axum::Router;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

use crate::state::AppState;

/// Token bucket parameters.
///
/// `replenish_secs` is the interval in seconds after which one spent request
/// is given back; `burst` is the bucket size.
#[derive(Debug, Clone, Copy)]
pub struct Quota {
    pub replenish_secs: u64,
    pub burst: u32,
}

/// Login and registration: 10 requests, then one per second.
pub const STRICT: Quota = Quota {
    replenish_secs: 1,
    burst: 10,
};

/// Everything else under `/api`: 100 requests, then one every two seconds.
pub const RELAXED: Quota = Quota {
    replenish_secs: 2,
    burst: 100,
};

/// Wraps `router` in a per-IP rate limiter.
///
/// Without a proxy the key is the socket peer address, which requires the
/// server to be started with `into_make_service_with_connect_info`. With
/// `behind_proxy` the client IP is read from `X-Forwarded-For`, `X-Real-IP`
/// or `Forwarded`; enable it only behind a trusted reverse proxy.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
pub fn limit(router: Router<AppState>, quota: Quota, behind_proxy: bool) -> Router<AppState> {
    if behind_proxy {
        let config = GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_second(quota.replenish_secs)
            .burst_size(quota.burst)
            .finish()
            .expect("rate limit quota must be non-zero");

        router.layer(GovernorLayer::new(Arc::new(config)))
    } else {
        let config = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(quota.replenish_secs)
            .burst_size(quota.burst)
            .finish()
            .expect("rate limit quota must be non-zero");

        router.layer(GovernorLayer::new(Arc::new(config)))
    }
}
