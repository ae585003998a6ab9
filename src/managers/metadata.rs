//! Cluster metadata client contract

/// Tracks the client's view of the cluster. Always present.
pub trait MetadataClient: Send + Sync {
    /// Request a metadata refresh covering topics seen for the first time
    fn request_update_for_new_topics(&self);
}
