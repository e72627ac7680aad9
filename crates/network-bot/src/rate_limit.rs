//! Per-owner sliding-window admission control.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sliding-window rate limiter keyed by owner id.
///
/// Windows live in process memory only; a restart resets them, which merely
/// relaxes the limit for one window. The map is guarded by a mutex so
/// concurrent dispatch serializes access to each owner's window.
pub struct RateLimiter {
    windows: Mutex<HashMap<i64, Vec<Instant>>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }

    /// Admit or reject a request from `owner_id` at the current instant.
    pub fn admit(&self, owner_id: i64) -> bool {
        self.admit_at(owner_id, Instant::now())
    }

    /// Admission check against an explicit instant. A rejected request is
    /// not recorded.
    pub fn admit_at(&self, owner_id: i64, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        let timestamps = windows.entry(owner_id).or_default();

        timestamps.retain(|ts| now.duration_since(*ts) < self.window);

        if timestamps.len() >= self.limit {
            return false;
        }

        timestamps.push(now);
        true
    }
}
