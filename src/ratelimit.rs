use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::http::HeaderMap;
use parking_lot::Mutex;
use tracing::debug;

/// Ceiling and window for the fixed-window admission counter.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window: Duration::from_millis(60_000),
        }
    }
}

#[derive(Debug)]
struct WindowEntry {
    count: u32,
    window_reset_at: Instant,
}

/// In-memory fixed-window request counter keyed by client address.
///
/// The first request for a key (or the first after its window elapsed)
/// starts a fresh window with count 1. At the ceiling further requests are
/// rejected without incrementing the counter. A periodic [`sweep`] drops
/// entries whose window has elapsed so abandoned keys do not accumulate.
///
/// The map is guarded by a mutex held for the whole check-and-increment, so
/// admission checks and the sweep never interleave.
///
/// [`sweep`]: RateLimiter::sweep
pub struct RateLimiter {
    config: RateLimitConfig,
    entries: Mutex<HashMap<String, WindowEntry>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns true when the request is admitted, recording it against the
    /// key's current window.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut entries = self.entries.lock();
        match entries.get_mut(key) {
            Some(entry) if now <= entry.window_reset_at => {
                if entry.count >= self.config.max_requests {
                    return false;
                }
                entry.count += 1;
                true
            }
            _ => {
                entries.insert(
                    key.to_string(),
                    WindowEntry {
                        count: 1,
                        window_reset_at: now + self.config.window,
                    },
                );
                true
            }
        }
    }

    /// Removes entries whose window has already elapsed.
    pub fn sweep(&self) {
        self.sweep_at(Instant::now());
    }

    pub fn sweep_at(&self, now: Instant) {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.window_reset_at);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, tracked = entries.len(), "swept expired rate limit entries");
        }
    }

    #[allow(dead_code)]
    pub fn tracked_keys(&self) -> usize {
        self.entries.lock().len()
    }
}

/// Derives the admission key for a request: first hop of `x-forwarded-for`,
/// then `x-real-ip`, then a shared "unknown" bucket. Address-less clients
/// intentionally share one budget.
pub fn client_key(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(address) = forwarded {
        return address.to_string();
    }

    headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window_ms: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window: Duration::from_millis(window_ms),
        })
    }

    #[test]
    fn admits_up_to_ceiling_then_blocks() {
        let limiter = limiter(5, 60_000);
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("1.2.3.4", now));
        }
        assert!(!limiter.check_at("1.2.3.4", now));
        assert!(!limiter.check_at("1.2.3.4", now + Duration::from_secs(10)));
    }

    #[test]
    fn new_window_resets_the_counter() {
        let limiter = limiter(5, 60_000);
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("1.2.3.4", now));
        }
        assert!(!limiter.check_at("1.2.3.4", now));

        let later = now + Duration::from_millis(60_001);
        assert!(limiter.check_at("1.2.3.4", later));
        // Counter restarted at 1, so four more fit in the new window.
        for _ in 0..4 {
            assert!(limiter.check_at("1.2.3.4", later));
        }
        assert!(!limiter.check_at("1.2.3.4", later));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let limiter = limiter(2, 60_000);
        let now = Instant::now();

        assert!(limiter.check_at("1.2.3.4", now));
        assert!(limiter.check_at("1.2.3.4", now));
        assert!(!limiter.check_at("1.2.3.4", now));

        assert!(limiter.check_at("5.6.7.8", now));
    }

    #[test]
    fn blocked_requests_do_not_inflate_the_counter() {
        let limiter = limiter(3, 60_000);
        let now = Instant::now();

        for _ in 0..3 {
            assert!(limiter.check_at("k", now));
        }
        for _ in 0..10 {
            assert!(!limiter.check_at("k", now));
        }

        // A fresh window admits again; the rejected burst left no residue.
        assert!(limiter.check_at("k", now + Duration::from_millis(60_001)));
    }

    #[test]
    fn sweep_drops_expired_entries_only() {
        let limiter = limiter(5, 60_000);
        let now = Instant::now();

        assert!(limiter.check_at("old", now));
        assert!(limiter.check_at("fresh", now + Duration::from_millis(50_000)));
        assert_eq!(limiter.tracked_keys(), 2);

        limiter.sweep_at(now + Duration::from_millis(60_001));
        assert_eq!(limiter.tracked_keys(), 1);

        limiter.sweep_at(now + Duration::from_millis(120_000));
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn client_key_prefers_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "1.2.3.4, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "9.9.9.9".parse().unwrap());
        assert_eq!(client_key(&headers), "1.2.3.4");
    }

    #[test]
    fn client_key_falls_back_to_real_ip() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "9.9.9.9".parse().unwrap());
        assert_eq!(client_key(&headers), "9.9.9.9");
    }

    #[test]
    fn client_key_uses_shared_unknown_bucket() {
        assert_eq!(client_key(&HeaderMap::new()), "unknown");
    }
}
