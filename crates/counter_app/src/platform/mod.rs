//! Host side of the widget: configuration, logging and a terminal "page".
mod app;
mod config;
mod logging;
mod page;

pub use app::run_app;
