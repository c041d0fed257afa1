use std::time::Duration;

use counter_logging::{counter_info, counter_warn};
use tokio::time::{sleep, Instant};

use crate::{CounterFetcher, CounterResult, FetchError};

/// Result of one fetch-versus-minimum-duration race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceReport {
    pub outcome: Result<CounterResult, FetchError>,
    /// Time from the start of the race until it was allowed to settle.
    pub elapsed: Duration,
}

/// Run the fetch alongside a `minimum` timer and settle only once both are done.
///
/// A failed fetch short-circuits the join, so the remainder of `minimum` is
/// waited out explicitly before the failure is reported.
pub async fn run_race(fetcher: &dyn CounterFetcher, minimum: Duration) -> RaceReport {
    let started = Instant::now();

    let joined = tokio::try_join!(fetcher.fetch(), async {
        sleep(minimum).await;
        Ok::<(), FetchError>(())
    });

    match joined {
        Ok((result, ())) => {
            let elapsed = started.elapsed();
            counter_info!(
                "Loading completed in {}ms (minimum: {}ms)",
                elapsed.as_millis(),
                minimum.as_millis()
            );
            RaceReport {
                outcome: Ok(result),
                elapsed,
            }
        }
        Err(err) => {
            counter_warn!("Counter fetch failed ({:?}): {}", err.category(), err);
            let so_far = started.elapsed();
            if so_far < minimum {
                sleep(minimum - so_far).await;
            }
            RaceReport {
                outcome: Err(err),
                elapsed: started.elapsed(),
            }
        }
    }
}
