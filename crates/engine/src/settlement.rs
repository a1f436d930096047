//! Simulated settlement: a one-shot timer that delivers exactly one
//! [`Event::SettlementComplete`] into the event queue.

use std::time::Duration;

use tokio::{sync::mpsc::UnboundedSender, task::JoinHandle};

use crate::Event;

/// Delay used when nothing else is configured.
pub const DEFAULT_SETTLEMENT_DELAY: Duration = Duration::from_millis(1500);

/// Handle on a scheduled settlement.
#[derive(Debug)]
pub struct SettlementTask {
    reference: String,
    handle: JoinHandle<()>,
}

impl SettlementTask {
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops the timer before it fires. Used on teardown only.
    pub fn cancel(self) {
        self.handle.abort();
    }
}

/// Schedules completion of the settlement identified by `reference`.
///
/// Must be called from within a tokio runtime.
pub fn spawn_settlement(
    reference: String,
    delay: Duration,
    sink: UnboundedSender<Event>,
) -> SettlementTask {
    let event_reference = reference.clone();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        tracing::debug!(reference = %event_reference, "settlement timer fired");
        if sink
            .send(Event::SettlementComplete {
                reference: event_reference,
            })
            .is_err()
        {
            tracing::debug!("event queue closed before settlement completed");
        }
    });

    SettlementTask { reference, handle }
}
