//! Commit manager contract

use crate::types::{CommittedOffsets, TopicPartition};
use crate::Result;
use futures::future::BoxFuture;
use std::collections::HashSet;

/// Drives the offset-commit protocol for a consumer group.
///
/// Only present when a group id is configured. All futures resolve on the
/// manager's own schedule; the dispatcher never awaits them inline.
pub trait CommitManager: Send + Sync {
    /// Start an asynchronous commit of the given offsets
    fn commit_async(&self, offsets: CommittedOffsets) -> BoxFuture<'static, Result<()>>;

    /// Start a commit of the given offsets that the caller intends to wait
    /// on, bounded by `deadline_ms`
    fn commit_sync(
        &self,
        offsets: CommittedOffsets,
        deadline_ms: u64,
    ) -> BoxFuture<'static, Result<()>>;

    /// Fetch the committed offsets for the given partitions, bounded by
    /// `deadline_ms`
    fn fetch_offsets(
        &self,
        partitions: HashSet<TopicPartition>,
        deadline_ms: u64,
    ) -> BoxFuture<'static, Result<CommittedOffsets>>;

    /// Advance the auto-commit timer to `now_ms`
    fn update_auto_commit_timer(&self, now_ms: u64);

    /// Trigger an auto-commit of consumed positions if the interval elapsed.
    /// Best effort: a failed commit is not retried.
    fn maybe_auto_commit_async(&self);

    /// Signal the manager to flush outstanding commits before shutdown
    fn signal_close(&self);
}
