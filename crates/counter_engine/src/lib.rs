//! Counter engine: fetching, timing and presentation for the visitor counter widget.
mod endpoint;
mod extract;
mod fetch;
mod presenter;
mod race;
mod runtime;
mod sequence;
mod trigger;
mod types;

pub use endpoint::{EndpointConfig, EndpointError, Environment, SiteParams, ENVIRONMENT_VAR};
pub use extract::{extract_count, COUNT_FIELDS};
pub use fetch::{CounterFetcher, FetchSettings, ReqwestFetcher, SimulatedFetcher};
pub use presenter::{present, present_error, present_loaded, present_loading, DisplayTarget};
pub use race::{run_race, RaceReport};
pub use runtime::WidgetRuntime;
pub use sequence::{LoadSequence, SequenceSettings};
pub use trigger::{
    ready_signal, ReadyHandle, ReadySignal, TargetLocator, Trigger, TriggerOutcome, TARGET_ID,
};
pub use types::{CounterResult, FailureCategory, FailureKind, FetchError};
