use crate::{Effect, Msg, Phase, RaceOutcome, WidgetState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Transitions only move forward (`Idle -> Loading -> Loaded | Error`); a
/// message that does not fit the current phase leaves the state untouched.
pub fn update(mut state: WidgetState, msg: Msg) -> (WidgetState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (Phase::Idle, Msg::TargetLocated) => {
            let view = state.begin_loading();
            vec![Effect::Present(view), Effect::StartRace]
        }
        (Phase::Idle, Msg::TargetMissing) => vec![Effect::Abort],
        (Phase::Loading, Msg::RaceSettled(outcome)) => {
            let view = match outcome {
                RaceOutcome::Counted(value) => state.settle_loaded(value),
                RaceOutcome::Failed => state.settle_error(),
            };
            vec![Effect::Present(view)]
        }
        _ => Vec::new(),
    };

    (state, effects)
}
