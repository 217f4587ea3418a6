//! Rolling-window request rate limiting.
//!
//! Generation calls cost real money, so the service enforces a maximum
//! request count per client over a rolling one-hour window.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

/// Default maximum requests per client per window.
pub const DEFAULT_HOURLY_LIMIT: u32 = 10;

/// The rolling window length.
const WINDOW: Duration = Duration::from_secs(60 * 60);

/// Per-client rolling-window rate limiter.
///
/// Tracks request timestamps per client and prunes entries older than the
/// window on each check.
#[derive(Debug)]
pub struct HourlyRateLimiter {
    max_requests: u32,
    window: Duration,
    clients: Mutex<HashMap<String, VecDeque<Instant>>>,
}

impl Default for HourlyRateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_HOURLY_LIMIT)
    }
}

impl HourlyRateLimiter {
    /// Create a limiter allowing `max_requests` per client per hour.
    pub fn new(max_requests: u32) -> Self {
        Self {
            max_requests,
            window: WINDOW,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// The configured per-client limit.
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Record a request for `client` and report whether it is allowed.
    ///
    /// Returns `false` once the client has exhausted its window; the
    /// request is not counted in that case.
    pub fn try_acquire(&self, client: &str) -> bool {
        self.try_acquire_at(client, Instant::now())
    }

    fn try_acquire_at(&self, client: &str, now: Instant) -> bool {
        let mut clients = self.clients.lock();
        let requests = clients.entry(client.to_string()).or_default();

        while let Some(&oldest) = requests.front() {
            if now.duration_since(oldest) >= self.window {
                requests.pop_front();
            } else {
                break;
            }
        }

        if requests.len() as u32 >= self.max_requests {
            debug!(client, "Rate limit exhausted");
            return false;
        }

        requests.push_back(now);
        true
    }
}
