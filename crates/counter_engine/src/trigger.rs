use std::sync::Mutex;

use counter_core::Phase;
use counter_logging::counter_info;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::{DisplayTarget, LoadSequence};

/// Identifier of the element that shows the count.
pub const TARGET_ID: &str = "visitor-count";

/// Host lookup for the display target.
pub trait TargetLocator: Send {
    type Target: DisplayTarget;

    fn locate(&mut self, id: &str) -> Option<Self::Target>;
}

/// Host side of the "document ready" signal. Fires at most once.
#[derive(Debug)]
pub struct ReadyHandle {
    tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl ReadyHandle {
    /// Returns `false` if the signal had already been fired.
    pub fn fire(&self) -> bool {
        let sender = match self.tx.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        match sender {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }
}

/// Widget side of the "document ready" signal.
#[derive(Debug)]
pub struct ReadySignal {
    rx: oneshot::Receiver<()>,
}

pub fn ready_signal() -> (ReadyHandle, ReadySignal) {
    let (tx, rx) = oneshot::channel();
    (
        ReadyHandle {
            tx: Mutex::new(Some(tx)),
        },
        ReadySignal { rx },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The page went away before it became ready.
    Abandoned,
    /// No display target; nothing was fetched or presented.
    TargetMissing,
    Completed(Phase),
}

/// Starts exactly one load sequence per page load.
pub struct Trigger {
    sequence: LoadSequence,
}

impl Trigger {
    pub fn new(sequence: LoadSequence) -> Self {
        Self { sequence }
    }

    pub async fn fire<L>(self, ready: ReadySignal, mut locator: L) -> TriggerOutcome
    where
        L: TargetLocator,
    {
        if ready.rx.await.is_err() {
            counter_info!("Page abandoned before ready; counter not started");
            return TriggerOutcome::Abandoned;
        }

        sleep(self.sequence.settings().settle_delay).await;

        let mut located = locator.locate(TARGET_ID);
        let phase = self
            .sequence
            .drive(located.as_mut().map(|target| target as &mut dyn DisplayTarget))
            .await;

        match located {
            Some(_) => TriggerOutcome::Completed(phase),
            None => TriggerOutcome::TargetMissing,
        }
    }
}
