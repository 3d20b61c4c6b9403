use crux_core::capability::{CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use crate::model::SubmissionId;

/// One-shot timers executed by the shell.
///
/// `start` resolves exactly once, either with [`DelayOutput::Elapsed`] once
/// `millis` have passed or with [`DelayOutput::Cancelled`] if the shell
/// honoured a later `cancel` for the same id first. Shells that cannot
/// cancel may simply let the timer elapse; the core ignores completions it
/// no longer waits for.
#[derive(crux_core::macros::Capability)]
pub struct Delay<Ev> {
    context: CapabilityContext<DelayOperation, Ev>,
}

impl<Ev> Delay<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<DelayOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn start<F>(&self, id: SubmissionId, millis: u64, callback: F)
    where
        F: FnOnce(DelayOutput) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let output = ctx
                .request_from_shell(DelayOperation::Start { id, millis })
                .await;
            ctx.update_app(callback(output));
        });
    }

    pub fn cancel(&self, id: SubmissionId) {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            ctx.notify_shell(DelayOperation::Cancel { id }).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum DelayOperation {
    Start { id: SubmissionId, millis: u64 },
    Cancel { id: SubmissionId },
}

impl Operation for DelayOperation {
    type Output = DelayOutput;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DelayOutput {
    Elapsed,
    Cancelled,
}
