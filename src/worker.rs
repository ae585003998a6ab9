//! Background worker driving the command dispatcher
//!
//! One worker task owns the receiving half of the command queue and feeds the
//! dispatcher one command at a time, in submission order. Manager futures
//! resolve on their own spawned tasks, so a slow backend never stalls the
//! queue.

use crate::command::{CommandReceiver, ConsumerCommand};
use crate::dispatch::CommandDispatcher;
use crate::metrics::DispatchMetrics;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Single consumer of the command queue.
///
/// A defective handler must not take the worker down with it: every dispatch
/// is wrapped in `catch_unwind`, and a panicking handler is logged and
/// counted while the worker moves on to the next command. The unwound
/// handler drops whatever completion handle it held, which resolves the
/// waiting caller with an internal error instead of hanging it.
pub struct CommandWorker {
    dispatcher: CommandDispatcher,
    rx: CommandReceiver,
    metrics: Arc<DispatchMetrics>,
}

impl CommandWorker {
    pub fn new(dispatcher: CommandDispatcher, rx: CommandReceiver) -> Self {
        let metrics = dispatcher.metrics();
        Self {
            dispatcher,
            rx,
            metrics,
        }
    }

    /// Move the worker onto the runtime
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Serve commands until every sender is dropped
    pub async fn run(mut self) {
        while let Some(command) = self.rx.recv().await {
            self.handle(command);
        }
        debug!("command queue closed, worker exiting");
    }

    fn handle(&self, command: ConsumerCommand) {
        let kind = command.kind();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatcher.dispatch(command)));
        if let Err(payload) = outcome {
            self.metrics.record_handler_panic();
            error!(
                command = kind,
                panic = panic_message(payload.as_ref()),
                "command handler panicked; worker continues"
            );
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "<non-string panic payload>"
    }
}
