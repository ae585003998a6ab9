//! # DriftMQ Consumer Core
//!
//! The command-dispatch core of the DriftMQ pull-based consumer client.
//!
//! Application threads describe what they want done (commit these offsets,
//! fetch topic metadata, leave the group) as typed [`ConsumerCommand`]
//! values and hand them to a single background worker over the command
//! queue. The worker routes each command to the backend manager that owns
//! that slice of the protocol and bridges the manager's asynchronous result
//! back into a completion future the caller is awaiting, exactly once.
//!
//! ## Features
//!
//! - **Non-blocking dispatch**: the worker never awaits backend I/O; manager
//!   futures resolve on their own tasks
//! - **Exactly-once completion**: completion handles are consumed on first
//!   use, and a dropped handle surfaces as an error instead of a hang
//! - **Feature-gated managers**: commit and group membership managers are
//!   optional; routing treats absence as a first-class branch
//! - **Fault containment**: a panicking handler is logged and counted, and
//!   the worker keeps serving subsequent commands
//! - **Observability**: `tracing` diagnostics plus lock-free dispatch
//!   counters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use driftmq_consumer::command_channel;
//!
//! let (sender, receiver) = command_channel();
//! // Wire `receiver` into a CommandWorker built over your ManagerRegistry,
//! // then submit commands from any thread:
//! sender.poll(1_000)?;
//! let committed = sender.commit_async(Default::default())?;
//! // `committed` resolves once the commit manager reports the outcome.
//! # Ok::<(), driftmq_consumer::ConsumerError>(())
//! ```
//!
//! ## Architecture Overview
//!
//! - [`command`] - command definitions, completion handles, submission API
//! - [`dispatch`] - per-variant routing and completion bridging
//! - [`worker`] - the background task consuming the command queue
//! - [`managers`] - backend manager contracts and the immutable registry
//! - [`metrics`] - dispatch outcome counters

pub mod command;
pub mod dispatch;
pub mod error;
pub mod managers;
pub mod metrics;
pub mod types;
pub mod worker;


pub use command::{
    command_channel, completion, CommandReceiver, CommandSender, Completion, CompletionHandle,
    ConsumerCommand,
};
pub use dispatch::CommandDispatcher;
pub use error::ConsumerError;
pub use managers::{
    CommitManager, HeartbeatManager, ManagerRegistry, ManagerRegistryBuilder, MembershipManager,
    MetadataClient, OffsetsManager, RebalanceCallbackCompleted, RebalanceCallbackKind,
    TopicMetadataManager,
};
pub use metrics::{DispatchMetrics, DispatchMetricsSnapshot};
pub use types::{
    CommittedOffsets, OffsetAndMetadata, OffsetAndTimestamp, PartitionId, PartitionInfo,
    ResolvedOffsets, TopicMetadataMap, TopicName, TopicPartition,
};
pub use worker::CommandWorker;

/// Client library result type
pub type Result<T> = std::result::Result<T, ConsumerError>;

/// Client library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
