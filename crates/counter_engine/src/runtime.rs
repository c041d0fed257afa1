use std::io;
use std::sync::mpsc;
use std::thread;

use counter_logging::counter_debug;

use crate::{ready_signal, LoadSequence, ReadyHandle, TargetLocator, Trigger, TriggerOutcome};

/// Runs one widget on a background tokio runtime for the host.
pub struct WidgetRuntime {
    ready: ReadyHandle,
    outcome_rx: mpsc::Receiver<TriggerOutcome>,
}

impl WidgetRuntime {
    pub fn start<L>(sequence: LoadSequence, locator: L) -> io::Result<Self>
    where
        L: TargetLocator + 'static,
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_time()
            .enable_io()
            .build()?;
        let (ready, signal) = ready_signal();
        let (outcome_tx, outcome_rx) = mpsc::channel();

        thread::Builder::new()
            .name("counter-widget".into())
            .spawn(move || {
                let outcome = runtime.block_on(Trigger::new(sequence).fire(signal, locator));
                if outcome_tx.send(outcome).is_err() {
                    counter_debug!("Counter widget host went away before the outcome arrived");
                }
            })?;

        Ok(Self { ready, outcome_rx })
    }

    /// Tell the widget the page is ready. Later calls are ignored.
    pub fn document_ready(&self) -> bool {
        self.ready.fire()
    }

    /// Block until the widget has finished its single load sequence.
    ///
    /// Dropping the runtime without firing [`WidgetRuntime::document_ready`]
    /// abandons the sequence.
    pub fn wait(self) -> TriggerOutcome {
        let Self { ready, outcome_rx } = self;
        // Never-fired signal: release the trigger so it can report the abandon.
        drop(ready);
        outcome_rx.recv().unwrap_or(TriggerOutcome::Abandoned)
    }
}
