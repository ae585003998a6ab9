//! Command routing on the worker task
//!
//! [`CommandDispatcher`] receives one [`ConsumerCommand`] at a time from the
//! worker, inspects its variant, and invokes exactly one handler. Handlers
//! start at most one manager operation and never await it: result-carrying
//! operations are chained into the command's completion handle through
//! [`bridge`], which resolves on a spawned task whenever the manager gets
//! around to it. Dispatch itself therefore never blocks on backend I/O.

use crate::command::{CompletionHandle, ConsumerCommand};
use crate::error::ConsumerError;
use crate::managers::{ManagerRegistry, RebalanceCallbackCompleted};
use crate::metrics::DispatchMetrics;
use crate::types::{CommittedOffsets, ResolvedOffsets, TopicMetadataMap, TopicName, TopicPartition};
use crate::Result;
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Routes commands to backend managers and wires their outcomes into
/// completion handles.
///
/// Presence of the optional managers gates every branch: commands on the
/// periodic bookkeeping path skip silently when their manager is disabled,
/// while explicit caller requests fail their completion handle with a
/// configuration error instead of leaving the caller waiting.
pub struct CommandDispatcher {
    managers: ManagerRegistry,
    metrics: Arc<DispatchMetrics>,
}

impl CommandDispatcher {
    pub fn new(managers: ManagerRegistry) -> Self {
        Self {
            managers,
            metrics: Arc::new(DispatchMetrics::default()),
        }
    }

    /// Counters shared with the worker and any observer
    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Route one command to its handler.
    ///
    /// Called only from the worker task, never reentrantly. Must run inside
    /// a tokio runtime: completion bridging spawns onto it.
    pub fn dispatch(&self, command: ConsumerCommand) {
        self.metrics.record_dispatched();
        match command {
            ConsumerCommand::Poll { poll_time_ms } => self.on_poll(poll_time_ms),
            ConsumerCommand::CommitAsync {
                offsets,
                completion,
            } => self.on_commit_async(offsets, completion),
            ConsumerCommand::CommitSync {
                offsets,
                deadline_ms,
                completion,
            } => self.on_commit_sync(offsets, deadline_ms, completion),
            ConsumerCommand::FetchCommittedOffsets {
                partitions,
                deadline_ms,
                completion,
            } => self.on_fetch_committed_offsets(partitions, deadline_ms, completion),
            ConsumerCommand::NewTopicsMetadataUpdate => self.on_new_topics_metadata_update(),
            ConsumerCommand::AssignmentChange { current_time_ms } => {
                self.on_assignment_change(current_time_ms)
            }
            ConsumerCommand::TopicMetadata {
                topic,
                deadline_ms,
                completion,
            } => self.on_topic_metadata(topic, deadline_ms, completion),
            ConsumerCommand::AllTopicsMetadata {
                deadline_ms,
                completion,
            } => self.on_all_topics_metadata(deadline_ms, completion),
            ConsumerCommand::ListOffsets {
                timestamps,
                require_timestamps,
                completion,
            } => self.on_list_offsets(timestamps, require_timestamps, completion),
            ConsumerCommand::ResetPositions { completion } => self.on_reset_positions(completion),
            ConsumerCommand::ValidatePositions { completion } => {
                self.on_validate_positions(completion)
            }
            ConsumerCommand::SubscriptionChange => self.on_subscription_change(),
            ConsumerCommand::Unsubscribe { completion } => self.on_unsubscribe(completion),
            ConsumerCommand::RebalanceCallbackCompleted { notice } => {
                self.on_rebalance_callback_completed(notice)
            }
            ConsumerCommand::CommitOnClose => self.on_commit_on_close(),
        }
    }

    fn on_poll(&self, poll_time_ms: u64) {
        // Timers are gated independently: a disabled commit manager must not
        // stop the heartbeat manager from seeing the poll.
        if let Some(commit) = &self.managers.commit {
            commit.update_auto_commit_timer(poll_time_ms);
        }
        if let Some(heartbeat) = &self.managers.heartbeat {
            heartbeat.reset_poll_timer(poll_time_ms);
        }
    }

    fn on_commit_async(
        &self,
        offsets: CommittedOffsets,
        completion: CompletionHandle<()>,
    ) {
        let Some(commit) = &self.managers.commit else {
            debug!("commit manager disabled, dropping async commit");
            self.metrics.record_soft_dropped();
            return;
        };
        bridge(commit.commit_async(offsets), completion);
    }

    fn on_commit_sync(
        &self,
        offsets: CommittedOffsets,
        deadline_ms: u64,
        completion: CompletionHandle<()>,
    ) {
        let Some(commit) = &self.managers.commit else {
            debug!("commit manager disabled, dropping sync commit");
            self.metrics.record_soft_dropped();
            return;
        };
        bridge(commit.commit_sync(offsets, deadline_ms), completion);
    }

    fn on_fetch_committed_offsets(
        &self,
        partitions: HashSet<TopicPartition>,
        deadline_ms: u64,
        completion: CompletionHandle<CommittedOffsets>,
    ) {
        let Some(commit) = &self.managers.commit else {
            self.metrics.record_unavailable_failure();
            completion.fail(ConsumerError::subsystem_unavailable(
                "commit",
                "cannot fetch committed offsets; check that a group id is configured",
            ));
            return;
        };
        bridge(commit.fetch_offsets(partitions, deadline_ms), completion);
    }

    fn on_new_topics_metadata_update(&self) {
        self.managers.metadata.request_update_for_new_topics();
    }

    /// Commits consumed positions if auto-commit is enabled. The triggered
    /// commit is asynchronous and is not retried when it fails.
    fn on_assignment_change(&self, current_time_ms: u64) {
        let Some(commit) = &self.managers.commit else {
            self.metrics.record_soft_dropped();
            return;
        };
        commit.update_auto_commit_timer(current_time_ms);
        commit.maybe_auto_commit_async();
    }

    fn on_topic_metadata(
        &self,
        topic: TopicName,
        deadline_ms: u64,
        completion: CompletionHandle<TopicMetadataMap>,
    ) {
        bridge(
            self.managers
                .topic_metadata
                .request_topic_metadata(topic, deadline_ms),
            completion,
        );
    }

    fn on_all_topics_metadata(
        &self,
        deadline_ms: u64,
        completion: CompletionHandle<TopicMetadataMap>,
    ) {
        bridge(
            self.managers
                .topic_metadata
                .request_all_topics_metadata(deadline_ms),
            completion,
        );
    }

    fn on_list_offsets(
        &self,
        timestamps: HashMap<TopicPartition, i64>,
        require_timestamps: bool,
        completion: CompletionHandle<ResolvedOffsets>,
    ) {
        bridge(
            self.managers
                .offsets
                .fetch_offsets(timestamps, require_timestamps),
            completion,
        );
    }

    fn on_reset_positions(&self, completion: CompletionHandle<()>) {
        bridge(self.managers.offsets.reset_positions_if_needed(), completion);
    }

    fn on_validate_positions(&self, completion: CompletionHandle<()>) {
        bridge(
            self.managers.offsets.validate_positions_if_needed(),
            completion,
        );
    }

    fn on_subscription_change(&self) {
        let Some(heartbeat) = &self.managers.heartbeat else {
            warn!("membership manager not present while processing a subscription change");
            self.metrics.record_soft_dropped();
            return;
        };
        heartbeat.membership().on_subscription_updated();
    }

    fn on_unsubscribe(&self, completion: CompletionHandle<()>) {
        let Some(heartbeat) = &self.managers.heartbeat else {
            self.metrics.record_unavailable_failure();
            completion.fail(ConsumerError::subsystem_unavailable(
                "group membership",
                "cannot leave a group this consumer never joined; check that a group id is configured",
            ));
            return;
        };
        bridge(heartbeat.membership().leave_group(), completion);
    }

    fn on_rebalance_callback_completed(&self, notice: RebalanceCallbackCompleted) {
        let Some(heartbeat) = &self.managers.heartbeat else {
            warn!(
                callback = %notice.callback,
                "membership manager not present, dropping rebalance callback completion"
            );
            self.metrics.record_soft_dropped();
            return;
        };
        heartbeat.membership().rebalance_callback_completed(notice);
    }

    fn on_commit_on_close(&self) {
        let Some(commit) = &self.managers.commit else {
            self.metrics.record_soft_dropped();
            return;
        };
        debug!("signalling commit manager to flush before close");
        commit.signal_close();
    }
}

/// Forward a manager future's outcome into a command's completion handle.
///
/// The single propagation point for every result-carrying handler: success
/// and failure both land in the handle through [`CompletionHandle::complete`],
/// exactly once, from whatever task the future finishes on. Nothing is
/// retained after the handle fires.
pub(crate) fn bridge<T>(future: BoxFuture<'static, Result<T>>, completion: CompletionHandle<T>)
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        completion.complete(future.await);
    });
}
