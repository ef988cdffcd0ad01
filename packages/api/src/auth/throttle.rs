//! Failed sign-in counter, keyed by normalised email.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    started: Instant,
    failures: u32,
}

/// Blocks an email after `max_failures` failed sign-ins inside one window.
#[derive(Debug)]
pub struct LoginThrottle {
    max_failures: u32,
    window: Duration,
    attempts: Mutex<HashMap<String, Window>>,
}

impl LoginThrottle {
    pub fn new(max_failures: u32, window: Duration) -> Self {
        Self {
            max_failures,
            window,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Count a sign-in attempt for `email`, returning `false` when the email
    /// is locked out. The attempt stays counted unless it later succeeds.
    pub fn admit(&self, email: &str) -> bool {
        self.admit_at(email, Instant::now())
    }

    /// A successful sign-in forgets earlier failures.
    pub fn record_success(&self, email: &str) {
        self.lock().remove(email);
    }

    fn admit_at(&self, email: &str, now: Instant) -> bool {
        let mut attempts = self.lock();
        attempts.retain(|_, w| now.duration_since(w.started) < self.window);

        let entry = attempts.entry(email.to_string()).or_insert(Window {
            started: now,
            failures: 0,
        });
        if entry.failures >= self.max_failures {
            return false;
        }
        entry.failures += 1;
        if entry.failures == self.max_failures {
            tracing::warn!(email, "sign-in locked after repeated failures");
        }
        true
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Window>> {
        self.attempts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locks_after_max_failures() {
        let throttle = LoginThrottle::new(3, Duration::from_secs(60));
        let t0 = Instant::now();
        for _ in 0..3 {
            assert!(throttle.admit_at("a@b.co", t0));
        }
        assert!(!throttle.admit_at("a@b.co", t0));
        assert!(throttle.admit_at("other@b.co", t0));
    }

    #[test]
    fn test_window_expiry_unlocks() {
        let throttle = LoginThrottle::new(1, Duration::from_secs(60));
        let t0 = Instant::now();
        assert!(throttle.admit_at("a@b.co", t0));
        assert!(!throttle.admit_at("a@b.co", t0 + Duration::from_secs(59)));
        assert!(throttle.admit_at("a@b.co", t0 + Duration::from_secs(60)));
    }

    #[test]
    fn test_success_clears_failures() {
        let throttle = LoginThrottle::new(2, Duration::from_secs(60));
        assert!(throttle.admit("a@b.co"));
        throttle.record_success("a@b.co");
        assert!(throttle.admit("a@b.co"));
        assert!(throttle.admit("a@b.co"));
        assert!(!throttle.admit("a@b.co"));
    }

    #[test]
    fn test_expired_windows_are_evicted() {
        let throttle = LoginThrottle::new(5, Duration::from_secs(60));
        let t0 = Instant::now();
        for n in 0..100 {
            throttle.admit_at(&format!("user{n}@b.co"), t0);
        }
        assert_eq!(throttle.tracked(), 100);

        throttle.admit_at("late@b.co", t0 + Duration::from_secs(60));
        assert_eq!(throttle.tracked(), 1);
    }

    #[test]
    fn test_overlapping_attempts_share_the_budget() {
        let throttle = LoginThrottle::new(2, Duration::from_secs(60));
        let t0 = Instant::now();
        // Attempts are counted on admission, before any credential check
        // resolves, so in-flight sign-ins cannot exceed the limit.
        let admitted = (0..10).filter(|_| throttle.admit_at("a@b.co", t0)).count();
        assert_eq!(admitted, 2);
    }
}
