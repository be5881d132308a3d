//! Per-match mutual exclusion.
//!
//! Every write follows "replace previous state, then recompute", so two
//! requests for the same match must not interleave. Requests for different
//! matches proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::MatchId;

type Registry = HashMap<MatchId, Arc<Mutex<()>>>;

/// Registry of one async mutex per match.
///
/// Entries exist only while a request holds or waits for the match; the
/// last guard released removes the entry.
#[derive(Debug, Default)]
pub struct MatchLocks {
    // Never held across an await point.
    locks: Arc<StdMutex<Registry>>,
}

impl MatchLocks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a match.
    ///
    /// Access is held until the returned guard is dropped.
    pub async fn acquire(&self, match_id: &MatchId) -> MatchGuard {
        let lock = Arc::clone(lock_registry(&self.locks).entry(*match_id).or_default());
        let guard = lock.lock_owned().await;

        MatchGuard {
            match_id: *match_id,
            guard: Some(guard),
            registry: Arc::clone(&self.locks),
        }
    }

    /// Returns the number of matches currently locked or awaited.
    pub fn tracked(&self) -> usize {
        lock_registry(&self.locks).len()
    }
}

/// Exclusive access to one match.
#[derive(Debug)]
pub struct MatchGuard {
    match_id: MatchId,
    guard: Option<OwnedMutexGuard<()>>,
    registry: Arc<StdMutex<Registry>>,
}

impl MatchGuard {
    /// Returns the match this guard locks.
    pub fn match_id(&self) -> MatchId {
        self.match_id
    }
}

impl Drop for MatchGuard {
    fn drop(&mut self) {
        let mut locks = lock_registry(&self.registry);
        drop(self.guard.take());

        // Waiters hold their own clone, so a count of one means nobody else wants it.
        if locks
            .get(&self.match_id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.match_id);
        }
    }
}

fn lock_registry(registry: &StdMutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_match_is_exclusive() {
        let locks = Arc::new(MatchLocks::new());
        let match_id = MatchId::new();

        let guard = locks.acquire(&match_id).await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(&match_id).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn different_matches_do_not_block() {
        let locks = MatchLocks::new();
        let first = MatchId::new();
        let second = MatchId::new();

        let _first_guard = locks.acquire(&first).await;
        let acquired =
            tokio::time::timeout(Duration::from_millis(100), locks.acquire(&second)).await;

        assert!(acquired.is_ok());
        assert_eq!(locks.tracked(), 2);
    }

    #[tokio::test]
    async fn released_matches_are_forgotten() {
        let locks = MatchLocks::new();

        for _ in 0..1000 {
            let match_id = MatchId::new();
            let guard = locks.acquire(&match_id).await;
            assert_eq!(guard.match_id(), match_id);
        }

        assert_eq!(locks.tracked(), 0);
    }

    #[tokio::test]
    async fn entry_survives_while_a_waiter_is_queued() {
        let locks = Arc::new(MatchLocks::new());
        let match_id = MatchId::new();

        let guard = locks.acquire(&match_id).await;
        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.acquire(&match_id).await;
                locks.tracked()
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert_eq!(waiter.await.unwrap(), 1);
        assert_eq!(locks.tracked(), 0);
    }
}
