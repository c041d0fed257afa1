#![deny(missing_docs)]
//! Shared logging utilities for the counter widget workspace.
//!
//! Every crate logs through the `counter_*` macros so that call sites do not
//! need their own dependency on the `log` facade. State transitions of the
//! widget go through [`counter_transition!`] so hosts can filter them by
//! target.

#[doc(hidden)]
pub use log as __log;

/// Log target used for widget state transitions.
pub const TRANSITION_TARGET: &str = "counter::transition";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! counter_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! counter_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! counter_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! counter_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! counter_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Logs a widget state transition at info level under [`TRANSITION_TARGET`].
#[macro_export]
macro_rules! counter_transition {
    ($($arg:tt)*) => {{
        $crate::__log::info!(target: $crate::TRANSITION_TARGET, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Debug level in debug builds so transition hooks show up in test output.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
