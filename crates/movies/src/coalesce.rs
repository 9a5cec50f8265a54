//! Request coalescing for cache misses.
//!
//! When several callers miss the cache for the same key at once, only one of
//! them (the leader) goes to the remote source. The others (followers) wait for
//! the leader to finish and then read the cache it populated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use movies_core::MovieId;
use tokio::sync::watch;

/// Identifies one cacheable fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchKey {
    /// The trending snapshot.
    Trending,
    /// Details for one movie.
    Details(MovieId),
}

/// Tracks in-flight fetches and deduplicates concurrent ones for the same key.
#[derive(Debug, Clone, Default)]
pub struct RequestCoalescer {
    /// key -> completion signal; the leader flips it to `true` when done
    in_flight: Arc<Mutex<HashMap<FetchKey, watch::Sender<bool>>>>,
}

impl RequestCoalescer {
    /// Create a new request coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<FetchKey, watch::Sender<bool>>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire a coalescing slot for a fetch.
    ///
    /// Returns [`CoalescingSlot::Leader`] if no fetch for `key` is in flight. The
    /// leader should fetch, write the cache, then drop the guard.
    ///
    /// Returns [`CoalescingSlot::Follower`] after waiting for the current leader
    /// to finish, successfully or not. The follower should re-read the cache.
    pub async fn acquire(&self, key: FetchKey) -> CoalescingSlot {
        let mut receiver = {
            let mut in_flight = self.lock();
            match in_flight.get(&key) {
                Some(sender) => sender.subscribe(),
                None => {
                    let (sender, _) = watch::channel(false);
                    in_flight.insert(key, sender);
                    return CoalescingSlot::Leader(LeaderGuard {
                        key,
                        coalescer: self.clone(),
                    });
                }
            }
        };

        // Err means the leader went away without signalling; either way it is done.
        let _ = receiver.wait_for(|&completed| completed).await;
        CoalescingSlot::Follower
    }

    /// Number of fetches currently in flight.
    #[must_use]
    pub fn in_flight_count(&self) -> usize {
        self.lock().len()
    }

    fn complete(&self, key: FetchKey) {
        let sender = self.lock().remove(&key);
        if let Some(sender) = sender {
            let _ = sender.send(true);
        }
    }
}

/// Result of acquiring a coalescing slot.
#[derive(Debug)]
pub enum CoalescingSlot {
    /// First caller for the key: fetch and populate the cache.
    /// Followers are released when the guard is dropped.
    Leader(LeaderGuard),

    /// Another caller was fetching and has now finished.
    Follower,
}

impl CoalescingSlot {
    /// Check if this is the leader.
    #[must_use]
    pub const fn is_leader(&self) -> bool {
        matches!(self, Self::Leader(_))
    }

    /// Check if this is a follower.
    #[must_use]
    pub const fn is_follower(&self) -> bool {
        matches!(self, Self::Follower)
    }
}

/// Guard held by the leader. Dropping it releases all waiting followers,
/// including when the leader's future is cancelled mid-fetch.
#[derive(Debug)]
pub struct LeaderGuard {
    key: FetchKey,
    coalescer: RequestCoalescer,
}

impl Drop for LeaderGuard {
    fn drop(&mut self) {
        self.coalescer.complete(self.key);
    }
}
