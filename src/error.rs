//! Error types for the DriftMQ consumer core

/// Main error type for consumer command processing
#[derive(Debug, thiserror::Error)]
pub enum ConsumerError {
    /// A required client subsystem is disabled by configuration
    #[error("{subsystem} manager is not available: {message}")]
    SubsystemUnavailable {
        subsystem: String,
        message: String,
    },

    /// Commit protocol failure reported by the commit manager
    #[error("Commit error: {message}")]
    Commit { message: String },

    /// Offset resolution or position management failure
    #[error("Offset error: {message}")]
    Offset { message: String },

    /// Cluster or topic metadata failure
    #[error("Metadata error: {message}")]
    Metadata { message: String },

    /// Group membership failure
    #[error("Group membership error: {message}")]
    Group { message: String },

    /// Operation deadline expired inside a manager
    #[error("Operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The command worker is no longer running
    #[error("consumer command worker has shut down")]
    Shutdown,

    /// Internal client error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ConsumerError {
    /// Create an error for a command whose target subsystem is disabled
    pub fn subsystem_unavailable<S: Into<String>, M: Into<String>>(
        subsystem: S,
        message: M,
    ) -> Self {
        Self::SubsystemUnavailable {
            subsystem: subsystem.into(),
            message: message.into(),
        }
    }

    /// Create a new commit error
    pub fn commit<S: Into<String>>(message: S) -> Self {
        Self::Commit {
            message: message.into(),
        }
    }

    /// Create a new offset error
    pub fn offset<S: Into<String>>(message: S) -> Self {
        Self::Offset {
            message: message.into(),
        }
    }

    /// Create a new metadata error
    pub fn metadata<S: Into<String>>(message: S) -> Self {
        Self::Metadata {
            message: message.into(),
        }
    }

    /// Create a new group membership error
    pub fn group<S: Into<String>>(message: S) -> Self {
        Self::Group {
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(timeout_ms: u64) -> Self {
        Self::Timeout { timeout_ms }
    }

    /// Create a new invalid config error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error reports a disabled subsystem rather than a
    /// failure inside one
    pub fn is_subsystem_unavailable(&self) -> bool {
        matches!(self, Self::SubsystemUnavailable { .. })
    }

    /// Check if this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Check if this error is a configuration problem
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::SubsystemUnavailable { .. } | Self::InvalidConfig { .. }
        )
    }
}
