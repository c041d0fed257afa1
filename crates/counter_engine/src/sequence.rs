use std::sync::Arc;
use std::time::Duration;

use counter_core::{update, Effect, Msg, Phase, RaceOutcome, WidgetState};
use counter_logging::{counter_debug, counter_info, counter_warn};

use crate::{present, run_race, CounterFetcher, DisplayTarget, TARGET_ID};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceSettings {
    /// Shortest time the loading view stays up, on success and on failure.
    pub minimum_display: Duration,
    /// Pause between the ready signal and looking for the display target.
    pub settle_delay: Duration,
}

impl Default for SequenceSettings {
    fn default() -> Self {
        Self {
            minimum_display: Duration::from_millis(400),
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// Drives one widget from `Idle` to a terminal phase against a display target.
#[derive(Clone)]
pub struct LoadSequence {
    fetcher: Arc<dyn CounterFetcher>,
    settings: SequenceSettings,
}

impl LoadSequence {
    pub fn new(fetcher: Arc<dyn CounterFetcher>, settings: SequenceSettings) -> Self {
        Self { fetcher, settings }
    }

    pub fn settings(&self) -> SequenceSettings {
        self.settings
    }

    /// Present loading, race the fetch against the minimum display time,
    /// then present exactly one terminal view. Never fails.
    pub async fn run(&self, target: &mut dyn DisplayTarget) -> Phase {
        self.drive(Some(target)).await
    }

    /// Same as [`LoadSequence::run`], but a missing target ends the sequence in `Idle`.
    pub(crate) async fn drive(&self, mut target: Option<&mut dyn DisplayTarget>) -> Phase {
        let first = if target.is_some() {
            Msg::TargetLocated
        } else {
            Msg::TargetMissing
        };
        let mut pending = vec![first];
        let mut state = WidgetState::new();

        while let Some(msg) = pending.pop() {
            let (next, effects) = update(state, msg);
            state = next;
            for effect in effects {
                match effect {
                    Effect::Present(view) => {
                        if let Some(target) = target.as_deref_mut() {
                            present(target, &view);
                        }
                    }
                    Effect::StartRace => {
                        counter_info!(
                            "Loading state active; minimum display {}ms",
                            self.settings.minimum_display.as_millis()
                        );
                        let report =
                            run_race(self.fetcher.as_ref(), self.settings.minimum_display).await;
                        let outcome = match report.outcome {
                            Ok(result) => {
                                counter_debug!(
                                    "Count {} observed at {}",
                                    result.value,
                                    result.observed_at.to_rfc3339()
                                );
                                RaceOutcome::Counted(result.value)
                            }
                            Err(_) => RaceOutcome::Failed,
                        };
                        pending.push(Msg::RaceSettled(outcome));
                    }
                    Effect::Abort => {
                        counter_warn!("Visitor counter element {:?} not found", TARGET_ID);
                    }
                }
            }
        }

        state.phase()
    }
}
