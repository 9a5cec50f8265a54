//! Freshness policies for cached entries.
//!
//! Each cache kind carries its own [`CachePolicy`]. The defaults reproduce the
//! behavior the catalog has always had: trending lists go stale after an hour,
//! movie details never do.

use chrono::{DateTime, TimeDelta, Utc};
use std::time::Duration;

/// Freshness window for the trending list.
pub const TRENDING_TTL: Duration = Duration::from_secs(60 * 60);

/// How long a cached entry may be served before it is re-fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachePolicy {
    ttl: Option<Duration>,
}

impl CachePolicy {
    /// Entries stay fresh for `ttl`.
    #[must_use]
    pub const fn expiring(ttl: Duration) -> Self {
        Self { ttl: Some(ttl) }
    }

    /// Entries never go stale once written.
    #[must_use]
    pub const fn never_expires() -> Self {
        Self { ttl: None }
    }

    /// Default policy for the trending snapshot: one hour.
    #[must_use]
    pub const fn trending() -> Self {
        Self::expiring(TRENDING_TTL)
    }

    /// Default policy for per-movie details: no expiry.
    #[must_use]
    pub const fn details() -> Self {
        Self::never_expires()
    }

    /// The freshness window, if any.
    #[must_use]
    pub const fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Returns true if an entry fetched at `fetched_at` may still be served at `now`.
    ///
    /// The window is exclusive: an entry exactly `ttl` old is stale.
    #[must_use]
    pub fn is_fresh(&self, fetched_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.ttl {
            None => true,
            Some(ttl) => {
                let age = now.signed_duration_since(fetched_at);
                age < TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trending_boundary_is_exclusive() {
        let policy = CachePolicy::trending();
        let now = Utc::now();

        assert!(policy.is_fresh(now, now));
        assert!(policy.is_fresh(now - TimeDelta::minutes(59), now));
        assert!(policy.is_fresh(now - TimeDelta::hours(1) + TimeDelta::milliseconds(1), now));
        assert!(!policy.is_fresh(now - TimeDelta::hours(1), now));
        assert!(!policy.is_fresh(now - TimeDelta::minutes(61), now));
    }

    #[test]
    fn test_details_never_expires() {
        let policy = CachePolicy::details();
        let now = Utc::now();
        assert!(policy.is_fresh(now - TimeDelta::days(3650), now));
        assert_eq!(policy.ttl(), None);
    }

    #[test]
    fn test_custom_ttl() {
        let policy = CachePolicy::expiring(Duration::from_secs(30));
        let now = Utc::now();
        assert!(policy.is_fresh(now - TimeDelta::seconds(29), now));
        assert!(!policy.is_fresh(now - TimeDelta::seconds(30), now));
    }
}
