use std::time::Duration;

use counter_core::Count;
use counter_logging::{counter_debug, counter_info, counter_warn};
use futures_util::StreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};

use crate::{extract_count, CounterResult, EndpointConfig, FailureKind, FetchError};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// `None` leaves connection setup to the transport's own limits.
    pub connect_timeout: Option<Duration>,
    /// `None` leaves the whole request to the transport's own limits.
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 64 * 1024,
        }
    }
}

/// One attempt at reading the visitor count.
#[async_trait::async_trait]
pub trait CounterFetcher: Send + Sync {
    async fn fetch(&self) -> Result<CounterResult, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    endpoint: EndpointConfig,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(endpoint: EndpointConfig, settings: FetchSettings) -> Self {
        Self { endpoint, settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl CounterFetcher for ReqwestFetcher {
    async fn fetch(&self) -> Result<CounterResult, FetchError> {
        let url = self.endpoint.counter_url();
        counter_info!(
            "Requesting count from {} environment: {}",
            self.endpoint.environment(),
            url
        );
        let client = self.build_client()?;

        // The service has always been called with this header, body or not.
        let response = client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        counter_debug!("Counter response status: {}", status);
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        let payload: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::InvalidJson, err.to_string()))?;
        counter_debug!("Counter response payload: {}", payload);

        let value = extract_count(&payload)?;
        Ok(CounterResult::observed_now(value))
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}

/// How long the simulated counting service takes to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SimulatedLatency {
    Fixed(Duration),
    /// Uniformly drawn from `0..=max` on every call.
    UpTo(Duration),
}

impl SimulatedLatency {
    fn sample(self) -> Duration {
        match self {
            SimulatedLatency::Fixed(delay) => delay,
            SimulatedLatency::UpTo(max) => {
                let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
                Duration::from_millis(fastrand::u64(0..=max_ms))
            }
        }
    }
}

/// Stand-in for the counting service: answers after a fixed or random delay.
#[derive(Debug, Clone)]
pub struct SimulatedFetcher {
    latency: SimulatedLatency,
    result: Result<u64, FetchError>,
}

impl SimulatedFetcher {
    pub fn new(delay: Duration, count: u64) -> Self {
        Self {
            latency: SimulatedLatency::Fixed(delay),
            result: Ok(count),
        }
    }

    /// Answers with `count` after a random delay of at most `max_delay`.
    pub fn jittered(max_delay: Duration, count: u64) -> Self {
        Self {
            latency: SimulatedLatency::UpTo(max_delay),
            result: Ok(count),
        }
    }

    pub fn failing(delay: Duration, error: FetchError) -> Self {
        Self {
            latency: SimulatedLatency::Fixed(delay),
            result: Err(error),
        }
    }
}

#[async_trait::async_trait]
impl CounterFetcher for SimulatedFetcher {
    async fn fetch(&self) -> Result<CounterResult, FetchError> {
        let delay = self.latency.sample();
        tokio::time::sleep(delay).await;
        match &self.result {
            Ok(value) => {
                counter_info!("Simulated counter call completed in {}ms", delay.as_millis());
                Ok(CounterResult::observed_now(Count::from(*value)))
            }
            Err(err) => {
                counter_warn!("Simulated counter call failed: {}", err);
                Err(err.clone())
            }
        }
    }
}
