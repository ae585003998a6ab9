//! Backend manager contracts and the registry handed to the dispatcher
//!
//! Each manager owns one slice of the client protocol (commits, group
//! membership, offset resolution, metadata). The dispatcher only ever sees
//! the narrow trait contracts defined in this module tree; production
//! implementations drive the network layer, test implementations record
//! calls in memory.
//!
//! Async operations return `BoxFuture<'static, Result<T>>` rather than using
//! `async fn`: the dispatcher must start the operation synchronously inside
//! `dispatch` and chain the returned future without awaiting it, so the
//! future must not borrow from the manager.

mod commit;
mod membership;
mod metadata;
mod offsets;
mod topics;

pub use commit::CommitManager;
pub use membership::{
    HeartbeatManager, MembershipManager, RebalanceCallbackCompleted, RebalanceCallbackKind,
};
pub use metadata::MetadataClient;
pub use offsets::OffsetsManager;
pub use topics::TopicMetadataManager;

use crate::error::ConsumerError;
use crate::Result;
use std::sync::Arc;

/// The managers available to the dispatcher for the lifetime of the client
/// session.
///
/// Presence of the optional managers is fixed at construction: the commit and
/// heartbeat managers only exist when group functionality is configured
/// (a group id was supplied), while offset resolution and metadata lookups
/// are always available. The registry is never mutated after `build()`.
#[derive(Clone)]
pub struct ManagerRegistry {
    pub commit: Option<Arc<dyn CommitManager>>,
    pub heartbeat: Option<Arc<dyn HeartbeatManager>>,
    pub offsets: Arc<dyn OffsetsManager>,
    pub topic_metadata: Arc<dyn TopicMetadataManager>,
    pub metadata: Arc<dyn MetadataClient>,
}

impl ManagerRegistry {
    /// Create a registry builder
    pub fn builder() -> ManagerRegistryBuilder {
        ManagerRegistryBuilder::default()
    }
}

/// Builder for [`ManagerRegistry`]
#[derive(Default)]
pub struct ManagerRegistryBuilder {
    commit: Option<Arc<dyn CommitManager>>,
    heartbeat: Option<Arc<dyn HeartbeatManager>>,
    offsets: Option<Arc<dyn OffsetsManager>>,
    topic_metadata: Option<Arc<dyn TopicMetadataManager>>,
    metadata: Option<Arc<dyn MetadataClient>>,
}

impl ManagerRegistryBuilder {
    /// Enable commit management (requires a configured group id)
    pub fn commit(mut self, manager: Arc<dyn CommitManager>) -> Self {
        self.commit = Some(manager);
        self
    }

    /// Enable heartbeat and group membership management
    pub fn heartbeat(mut self, manager: Arc<dyn HeartbeatManager>) -> Self {
        self.heartbeat = Some(manager);
        self
    }

    /// Set the offsets manager (required)
    pub fn offsets(mut self, manager: Arc<dyn OffsetsManager>) -> Self {
        self.offsets = Some(manager);
        self
    }

    /// Set the topic metadata manager (required)
    pub fn topic_metadata(mut self, manager: Arc<dyn TopicMetadataManager>) -> Self {
        self.topic_metadata = Some(manager);
        self
    }

    /// Set the cluster metadata client (required)
    pub fn metadata(mut self, client: Arc<dyn MetadataClient>) -> Self {
        self.metadata = Some(client);
        self
    }

    /// Build the registry, failing if a required manager is missing
    pub fn build(self) -> Result<ManagerRegistry> {
        let offsets = self
            .offsets
            .ok_or_else(|| ConsumerError::invalid_config("offsets manager is required"))?;
        let topic_metadata = self.topic_metadata.ok_or_else(|| {
            ConsumerError::invalid_config("topic metadata manager is required")
        })?;
        let metadata = self
            .metadata
            .ok_or_else(|| ConsumerError::invalid_config("metadata client is required"))?;

        Ok(ManagerRegistry {
            commit: self.commit,
            heartbeat: self.heartbeat,
            offsets,
            topic_metadata,
            metadata,
        })
    }
}
