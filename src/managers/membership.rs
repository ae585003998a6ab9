//! Heartbeat and group membership contracts

use crate::error::ConsumerError;
use crate::Result;
use futures::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Keeps the member alive in its group and owns the membership state machine.
///
/// Only present when group functionality is configured.
pub trait HeartbeatManager: Send + Sync {
    /// The membership manager driven by this heartbeat manager
    fn membership(&self) -> Arc<dyn MembershipManager>;

    /// Reset the poll-liveness timer to `poll_time_ms`, marking the consumer
    /// as actively polling
    fn reset_poll_timer(&self, poll_time_ms: u64);
}

/// Group membership state machine, driven by subscription changes and
/// rebalance listener callbacks.
pub trait MembershipManager: Send + Sync {
    /// The subscription set changed: join the group if not yet a member, or
    /// send the updated subscription if already joined
    fn on_subscription_updated(&self);

    /// Release the assignment and leave the group
    fn leave_group(&self) -> BoxFuture<'static, Result<()>>;

    /// A rebalance listener callback invoked on the application thread has
    /// finished; resume the interrupted reconciliation
    fn rebalance_callback_completed(&self, notice: RebalanceCallbackCompleted);
}

/// Which rebalance listener callback ran on the application thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebalanceCallbackKind {
    PartitionsAssigned,
    PartitionsRevoked,
    PartitionsLost,
}

impl fmt::Display for RebalanceCallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PartitionsAssigned => "partitions-assigned",
            Self::PartitionsRevoked => "partitions-revoked",
            Self::PartitionsLost => "partitions-lost",
        };
        f.write_str(name)
    }
}

/// Notification that a rebalance listener callback finished, successfully or
/// not
#[derive(Debug)]
pub struct RebalanceCallbackCompleted {
    pub callback: RebalanceCallbackKind,
    pub error: Option<ConsumerError>,
}

impl RebalanceCallbackCompleted {
    pub fn success(callback: RebalanceCallbackKind) -> Self {
        Self {
            callback,
            error: None,
        }
    }

    pub fn failed(callback: RebalanceCallbackKind, error: ConsumerError) -> Self {
        Self {
            callback,
            error: Some(error),
        }
    }
}
