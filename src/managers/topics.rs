//! Topic metadata manager contract

use crate::types::{TopicMetadataMap, TopicName};
use crate::Result;
use futures::future::BoxFuture;

/// Serves topic metadata lookups. Always present.
pub trait TopicMetadataManager: Send + Sync {
    /// Request the partition layout of a single topic, bounded by
    /// `deadline_ms`
    fn request_topic_metadata(
        &self,
        topic: TopicName,
        deadline_ms: u64,
    ) -> BoxFuture<'static, Result<TopicMetadataMap>>;

    /// Request the partition layout of every topic in the cluster, bounded
    /// by `deadline_ms`
    fn request_all_topics_metadata(
        &self,
        deadline_ms: u64,
    ) -> BoxFuture<'static, Result<TopicMetadataMap>>;
}
