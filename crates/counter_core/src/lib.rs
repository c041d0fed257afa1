//! Counter core: pure load-sequence state machine and view-model helpers.
mod count;
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use count::Count;
pub use effect::Effect;
pub use msg::{Msg, RaceOutcome};
pub use state::{Phase, WidgetState, MAX_PRESENTATIONS};
pub use update::update;
pub use view_model::{DisplayView, StyleTag, PLACEHOLDER_TEXT};
