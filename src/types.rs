//! Core data types shared between commands and backend managers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type TopicName = String;
pub type PartitionId = u32;

/// Committed offsets keyed by partition
pub type CommittedOffsets = HashMap<TopicPartition, OffsetAndMetadata>;

/// Offsets resolved from a timestamp lookup, keyed by partition
pub type ResolvedOffsets = HashMap<TopicPartition, OffsetAndTimestamp>;

/// Partition layout per topic, as returned by metadata lookups
pub type TopicMetadataMap = HashMap<TopicName, Vec<PartitionInfo>>;

/// Topic and partition combination
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicPartition {
    pub topic: TopicName,
    pub partition: PartitionId,
}

impl TopicPartition {
    pub fn new(topic: impl Into<String>, partition: PartitionId) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

impl fmt::Display for TopicPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.topic, self.partition)
    }
}

/// A committed consumer position plus opaque caller metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetAndMetadata {
    pub offset: i64,
    pub metadata: Option<String>,
}

impl OffsetAndMetadata {
    pub fn new(offset: i64) -> Self {
        Self {
            offset,
            metadata: None,
        }
    }

    pub fn with_metadata(offset: i64, metadata: impl Into<String>) -> Self {
        Self {
            offset,
            metadata: Some(metadata.into()),
        }
    }
}

/// An offset resolved for a timestamp lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetAndTimestamp {
    pub offset: i64,
    pub timestamp: i64,
    pub leader_epoch: Option<i32>,
}

impl OffsetAndTimestamp {
    pub fn new(offset: i64, timestamp: i64) -> Self {
        Self {
            offset,
            timestamp,
            leader_epoch: None,
        }
    }
}

/// Cluster metadata for a single partition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionInfo {
    pub topic: TopicName,
    pub partition: PartitionId,
    pub leader: Option<i32>,
    pub replicas: Vec<i32>,
    pub in_sync_replicas: Vec<i32>,
}
