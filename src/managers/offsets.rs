//! Offsets manager contract

use crate::types::{ResolvedOffsets, TopicPartition};
use crate::Result;
use futures::future::BoxFuture;
use std::collections::HashMap;

/// Resolves offsets for timestamps and manages fetch positions. Always
/// present.
pub trait OffsetsManager: Send + Sync {
    /// Resolve the offset at or after each partition's target timestamp.
    /// With `require_timestamps` set, every entry in the result carries the
    /// matched record timestamp.
    fn fetch_offsets(
        &self,
        timestamps: HashMap<TopicPartition, i64>,
        require_timestamps: bool,
    ) -> BoxFuture<'static, Result<ResolvedOffsets>>;

    /// Reset fetch positions for partitions that need one, per the configured
    /// reset strategy
    fn reset_positions_if_needed(&self) -> BoxFuture<'static, Result<()>>;

    /// Validate fetch positions against the current leader epochs for
    /// partitions that need it
    fn validate_positions_if_needed(&self) -> BoxFuture<'static, Result<()>>;
}
