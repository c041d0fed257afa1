use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use counter_engine::{
    CounterFetcher, EndpointConfig, Environment, FailureKind, FetchError, FetchSettings,
    LoadSequence, ReqwestFetcher, SimulatedFetcher, WidgetRuntime, ENVIRONMENT_VAR,
};
use counter_logging::{counter_error, counter_info, counter_warn};

use super::config::{load_config, FetchMode, WidgetConfig, DEFAULT_CONFIG_FILE};
use super::logging;
use super::page::TerminalPage;

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = load_config(&config_path)?;

    logging::initialize(&config.log);
    counter_info!("Loaded widget config from {:?}", config_path);

    let sequence = LoadSequence::new(build_fetcher(&config), config.sequence_settings());
    let runtime = WidgetRuntime::start(sequence, TerminalPage::new(config.page_has_counter))?;

    runtime.document_ready();
    let outcome = runtime.wait();
    counter_info!("Counter widget finished: {:?}", outcome);
    Ok(())
}

fn build_fetcher(config: &WidgetConfig) -> Arc<dyn CounterFetcher> {
    match config.fetch_mode {
        FetchMode::Simulated { delay_ms, count } => {
            counter_info!("Using simulated counter ({}ms, count {})", delay_ms, count);
            Arc::new(SimulatedFetcher::new(Duration::from_millis(delay_ms), count))
        }
        FetchMode::Jittered {
            max_delay_ms,
            count,
        } => {
            counter_info!(
                "Using simulated counter (up to {}ms, count {})",
                max_delay_ms,
                count
            );
            Arc::new(SimulatedFetcher::jittered(
                Duration::from_millis(max_delay_ms),
                count,
            ))
        }
        FetchMode::Live => {
            let environment = Environment::from_build_env().unwrap_or_else(|err| {
                counter_warn!("{}: {}; using {}", ENVIRONMENT_VAR, err, Environment::default());
                Environment::default()
            });
            match EndpointConfig::resolve(&config.site, environment) {
                Ok(endpoint) => Arc::new(ReqwestFetcher::new(endpoint, FetchSettings::default())),
                Err(err) => {
                    // Same outcome as calling a broken URL: the widget shows its error view.
                    counter_error!("No usable counter endpoint for {}: {}", environment, err);
                    Arc::new(SimulatedFetcher::failing(
                        Duration::ZERO,
                        FetchError::new(FailureKind::InvalidUrl, err.to_string()),
                    ))
                }
            }
        }
    }
}
