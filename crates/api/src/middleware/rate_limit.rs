//! Per-IP throttling for the public quote form.
//!
//! Backed by a keyed GCRA limiter: each client gets a burst equal to the
//! hourly allowance, after which one more submission is released every
//! `3600 / limit` seconds.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::error::AppError;
use crate::state::AppState;

/// Keyed limiter for `POST /api/quotes`.
pub struct QuoteRateLimiter {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    clock: DefaultClock,
    per_hour: u32,
}

impl QuoteRateLimiter {
    /// Allow `max` submissions per client per hour. Zero is treated as one.
    pub fn per_hour(max: u32) -> Self {
        let per_hour = NonZeroU32::new(max).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_hour(per_hour)),
            clock: DefaultClock::default(),
            per_hour: per_hour.get(),
        }
    }

    /// Configured hourly allowance.
    pub fn limit(&self) -> u32 {
        self.per_hour
    }

    /// Consume one submission for `ip`.
    ///
    /// Returns the number of seconds to wait when the allowance is spent.
    pub fn check(&self, ip: IpAddr) -> Result<(), u64> {
        self.limiter.check_key(&ip).map_err(|not_until| {
            let wait = not_until.wait_time_from(self.clock.now());
            wait.as_secs().max(1)
        })
    }

    /// Drop state for clients whose allowance has fully replenished.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Resolve the client address: socket peer first, then the first
/// `X-Forwarded-For` hop, then the unspecified address as a shared bucket.
pub fn client_ip(connect_info: Option<&ConnectInfo<SocketAddr>>, headers: &HeaderMap) -> IpAddr {
    connect_info
        .map(|ConnectInfo(addr)| addr.ip())
        .or_else(|| forwarded_for(headers))
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// Reject quote submissions beyond the per-IP hourly allowance with 429.
pub async fn limit_quote_submissions(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(
        request.extensions().get::<ConnectInfo<SocketAddr>>(),
        request.headers(),
    );

    match state.quote_limiter.check(ip) {
        Ok(()) => {
            let mut response = next.run(request).await;
            response.headers_mut().insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(state.quote_limiter.limit()),
            );
            Ok(response)
        }
        Err(retry_after_secs) => {
            tracing::warn!(ip = %ip, retry_after_secs, "Quote rate limit exceeded");
            Err(AppError::RateLimited { retry_after_secs })
        }
    }
}
