use accounts::{FollowCounts, Result, follow};
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// Follower/following counts per user id.
///
/// Every follow-graph write bumps `generation` before evicting entries. A
/// reader that stored counts while the generation moved evicts them again, so
/// counts read before a concurrent write never stay cached after it.
#[derive(Clone, Debug)]
pub struct FollowCountsCache {
    counts: Cache<i32, FollowCounts>,
    generation: Arc<AtomicU64>,
}

impl FollowCountsCache {
    pub fn new(max_capacity: u64, time_to_live: Duration) -> Self {
        Self {
            counts: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(time_to_live)
                .build(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Cached counts for `user_id`, computed with `load` on a miss.
    pub async fn get_or_load<F, Fut>(&self, user_id: i32, load: F) -> Result<FollowCounts>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<FollowCounts>>,
    {
        if let Some(counts) = self.counts.get(&user_id).await {
            trace!("Follow counts cache hit for user {}", user_id);
            return Ok(counts);
        }

        let seen = self.generation.load(Ordering::SeqCst);
        let counts = load().await?;
        self.counts.insert(user_id, counts).await;

        if self.generation.load(Ordering::SeqCst) != seen {
            debug!("Follow graph changed while loading counts for user {}", user_id);
            self.counts.invalidate(&user_id).await;
        } else {
            debug!(
                "Cached follow counts for user {}: {} followers, {} following",
                user_id, counts.followers, counts.following
            );
        }
        Ok(counts)
    }

    pub async fn counts_for(&self, db: &DatabaseConnection, user_id: i32) -> Result<FollowCounts> {
        self.get_or_load(user_id, || follow::follow_counts(db, user_id))
            .await
    }

    /// Call after a follow-graph write that touched `user_ids`.
    pub async fn invalidate(&self, user_ids: &[i32]) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        for user_id in user_ids {
            self.counts.invalidate(user_id).await;
        }
    }

    /// Call after a write whose affected users are unknown (e.g. a cascading delete).
    pub fn invalidate_all(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.counts.invalidate_all();
    }
}
