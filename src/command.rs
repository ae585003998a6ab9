//! Commands submitted to the consumer's background worker
//!
//! A [`ConsumerCommand`] describes one operation the application thread wants
//! performed against a backend manager. Commands that produce a result carry
//! a [`CompletionHandle`]; the submitting side keeps the matching
//! [`Completion`] future. The handle is consumed on first use, so a command's
//! outcome can be delivered at most once by construction.

use crate::error::ConsumerError;
use crate::managers::RebalanceCallbackCompleted;
use crate::types::{CommittedOffsets, ResolvedOffsets, TopicMetadataMap, TopicName, TopicPartition};
use crate::Result;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::{mpsc, oneshot};

/// Receiving half of the command queue, owned by the worker
pub type CommandReceiver = mpsc::UnboundedReceiver<ConsumerCommand>;

/// Create the command queue connecting application threads to the worker
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CommandSender { tx }, rx)
}

/// Create a linked completion pair for one command.
///
/// The [`CompletionHandle`] goes into the command; the [`Completion`] future
/// stays with the caller.
pub fn completion<T>() -> (CompletionHandle<T>, Completion<T>) {
    let (tx, rx) = oneshot::channel();
    (CompletionHandle { tx }, Completion { rx })
}

/// Single-assignment writer half of a command's completion.
///
/// Every method takes `self` by value: a handle fulfilled once cannot be
/// fulfilled again. Dropping an unfulfilled handle resolves the paired
/// [`Completion`] with an internal error, so callers never hang on a command
/// the core let go of.
pub struct CompletionHandle<T> {
    tx: oneshot::Sender<Result<T>>,
}

impl<T> CompletionHandle<T> {
    /// Fulfill the completion with a success value
    pub fn succeed(self, value: T) {
        let _ = self.tx.send(Ok(value));
    }

    /// Fail the completion with an error
    pub fn fail(self, error: ConsumerError) {
        let _ = self.tx.send(Err(error));
    }

    /// Fulfill the completion with an already-formed result
    pub fn complete(self, result: Result<T>) {
        let _ = self.tx.send(result);
    }
}

impl<T> fmt::Debug for CompletionHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompletionHandle")
    }
}

/// Caller-side future for one command's outcome
pub struct Completion<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T> Future for Completion<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(ConsumerError::internal(
                "command was dropped before completion",
            ))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Completion")
    }
}

/// One operation submitted by an application thread.
///
/// The set is closed: routing in the dispatcher is an exhaustive `match`, so
/// adding a variant fails compilation until every handler site covers it.
#[derive(Debug)]
pub enum ConsumerCommand {
    /// The application called poll; advance liveness and auto-commit timers
    Poll { poll_time_ms: u64 },

    /// Commit the given offsets without waiting for the outcome here
    CommitAsync {
        offsets: CommittedOffsets,
        completion: CompletionHandle<()>,
    },

    /// Commit the given offsets; the caller waits, bounded by `deadline_ms`
    CommitSync {
        offsets: CommittedOffsets,
        deadline_ms: u64,
        completion: CompletionHandle<()>,
    },

    /// Fetch the committed offsets for the given partitions
    FetchCommittedOffsets {
        partitions: HashSet<TopicPartition>,
        deadline_ms: u64,
        completion: CompletionHandle<CommittedOffsets>,
    },

    /// Newly seen topics need a metadata refresh
    NewTopicsMetadataUpdate,

    /// The assignment changed; refresh the auto-commit timer and commit
    /// consumed positions best-effort
    AssignmentChange { current_time_ms: u64 },

    /// Fetch the partition layout of one topic
    TopicMetadata {
        topic: TopicName,
        deadline_ms: u64,
        completion: CompletionHandle<TopicMetadataMap>,
    },

    /// Fetch the partition layout of every topic
    AllTopicsMetadata {
        deadline_ms: u64,
        completion: CompletionHandle<TopicMetadataMap>,
    },

    /// Resolve offsets for the given per-partition target timestamps
    ListOffsets {
        timestamps: HashMap<TopicPartition, i64>,
        require_timestamps: bool,
        completion: CompletionHandle<ResolvedOffsets>,
    },

    /// Reset fetch positions where a reset is pending
    ResetPositions { completion: CompletionHandle<()> },

    /// Validate fetch positions where validation is pending
    ValidatePositions { completion: CompletionHandle<()> },

    /// The subscription set changed; join or update the group
    SubscriptionChange,

    /// Leave the group and release the assignment
    Unsubscribe { completion: CompletionHandle<()> },

    /// A rebalance listener callback finished on the application thread
    RebalanceCallbackCompleted { notice: RebalanceCallbackCompleted },

    /// The consumer is closing; flush outstanding commits
    CommitOnClose,
}

impl ConsumerCommand {
    /// Short name of the command variant, for diagnostics and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Poll { .. } => "poll",
            Self::CommitAsync { .. } => "commit_async",
            Self::CommitSync { .. } => "commit_sync",
            Self::FetchCommittedOffsets { .. } => "fetch_committed_offsets",
            Self::NewTopicsMetadataUpdate => "new_topics_metadata_update",
            Self::AssignmentChange { .. } => "assignment_change",
            Self::TopicMetadata { .. } => "topic_metadata",
            Self::AllTopicsMetadata { .. } => "all_topics_metadata",
            Self::ListOffsets { .. } => "list_offsets",
            Self::ResetPositions { .. } => "reset_positions",
            Self::ValidatePositions { .. } => "validate_positions",
            Self::SubscriptionChange => "subscription_change",
            Self::Unsubscribe { .. } => "unsubscribe",
            Self::RebalanceCallbackCompleted { .. } => "rebalance_callback_completed",
            Self::CommitOnClose => "commit_on_close",
        }
    }
}

/// Submitting half of the command queue.
///
/// Clone freely; all clones feed the same worker. Fire-and-forget commands
/// return `Ok(())` once enqueued. Result-carrying commands return the
/// [`Completion`] future for the outcome. Every method fails with
/// [`ConsumerError::Shutdown`] once the worker is gone.
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: mpsc::UnboundedSender<ConsumerCommand>,
}

impl CommandSender {
    fn send(&self, command: ConsumerCommand) -> Result<()> {
        self.tx.send(command).map_err(|_| ConsumerError::Shutdown)
    }

    /// Record that the application called poll at `poll_time_ms`
    pub fn poll(&self, poll_time_ms: u64) -> Result<()> {
        self.send(ConsumerCommand::Poll { poll_time_ms })
    }

    /// Commit offsets asynchronously
    pub fn commit_async(&self, offsets: CommittedOffsets) -> Result<Completion<()>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::CommitAsync {
            offsets,
            completion: handle,
        })?;
        Ok(future)
    }

    /// Commit offsets, waiting up to `deadline_ms`
    pub fn commit_sync(
        &self,
        offsets: CommittedOffsets,
        deadline_ms: u64,
    ) -> Result<Completion<()>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::CommitSync {
            offsets,
            deadline_ms,
            completion: handle,
        })?;
        Ok(future)
    }

    /// Fetch committed offsets for the given partitions
    pub fn fetch_committed_offsets(
        &self,
        partitions: HashSet<TopicPartition>,
        deadline_ms: u64,
    ) -> Result<Completion<CommittedOffsets>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::FetchCommittedOffsets {
            partitions,
            deadline_ms,
            completion: handle,
        })?;
        Ok(future)
    }

    /// Request a metadata refresh for newly seen topics
    pub fn new_topics_metadata_update(&self) -> Result<()> {
        self.send(ConsumerCommand::NewTopicsMetadataUpdate)
    }

    /// Notify the worker that the assignment changed at `current_time_ms`
    pub fn assignment_change(&self, current_time_ms: u64) -> Result<()> {
        self.send(ConsumerCommand::AssignmentChange { current_time_ms })
    }

    /// Fetch the partition layout of one topic
    pub fn topic_metadata(
        &self,
        topic: impl Into<TopicName>,
        deadline_ms: u64,
    ) -> Result<Completion<TopicMetadataMap>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::TopicMetadata {
            topic: topic.into(),
            deadline_ms,
            completion: handle,
        })?;
        Ok(future)
    }

    /// Fetch the partition layout of every topic
    pub fn all_topics_metadata(&self, deadline_ms: u64) -> Result<Completion<TopicMetadataMap>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::AllTopicsMetadata {
            deadline_ms,
            completion: handle,
        })?;
        Ok(future)
    }

    /// Resolve offsets for the given per-partition target timestamps
    pub fn list_offsets(
        &self,
        timestamps: HashMap<TopicPartition, i64>,
        require_timestamps: bool,
    ) -> Result<Completion<ResolvedOffsets>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::ListOffsets {
            timestamps,
            require_timestamps,
            completion: handle,
        })?;
        Ok(future)
    }

    /// Reset fetch positions where a reset is pending
    pub fn reset_positions(&self) -> Result<Completion<()>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::ResetPositions { completion: handle })?;
        Ok(future)
    }

    /// Validate fetch positions where validation is pending
    pub fn validate_positions(&self) -> Result<Completion<()>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::ValidatePositions { completion: handle })?;
        Ok(future)
    }

    /// Notify the worker that the subscription set changed
    pub fn subscription_change(&self) -> Result<()> {
        self.send(ConsumerCommand::SubscriptionChange)
    }

    /// Leave the group and release the assignment
    pub fn unsubscribe(&self) -> Result<Completion<()>> {
        let (handle, future) = completion();
        self.send(ConsumerCommand::Unsubscribe { completion: handle })?;
        Ok(future)
    }

    /// Forward a finished rebalance listener callback to the worker
    pub fn rebalance_callback_completed(&self, notice: RebalanceCallbackCompleted) -> Result<()> {
        self.send(ConsumerCommand::RebalanceCallbackCompleted { notice })
    }

    /// Ask the commit manager to flush before the consumer closes
    pub fn commit_on_close(&self) -> Result<()> {
        self.send(ConsumerCommand::CommitOnClose)
    }
}
