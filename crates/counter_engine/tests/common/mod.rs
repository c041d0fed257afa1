#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use counter_core::{Count, StyleTag};
use counter_engine::{
    CounterFetcher, CounterResult, DisplayTarget, FailureKind, FetchError, TargetLocator,
};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Style(StyleTag),
    Text(String),
}

/// In-memory display target that records every write with its timestamp.
#[derive(Debug, Clone, Default)]
pub struct RecordingTarget {
    writes: Arc<Mutex<Vec<(Instant, Write)>>>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(_, write)| write.clone())
            .collect()
    }

    /// Style changes in order, with the instant each one happened.
    pub fn styles(&self) -> Vec<(Instant, StyleTag)> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter_map(|(at, write)| match write {
                Write::Style(style) => Some((*at, *style)),
                Write::Text(_) => None,
            })
            .collect()
    }

    /// Time between the loading view and the terminal view.
    pub fn loading_duration(&self) -> Duration {
        let styles = self.styles();
        assert_eq!(styles.len(), 2, "expected loading + terminal, got {styles:?}");
        assert_eq!(styles[0].1, StyleTag::Loading);
        styles[1].0 - styles[0].0
    }
}

impl DisplayTarget for RecordingTarget {
    fn set_style(&mut self, style: StyleTag) {
        self.writes
            .lock()
            .unwrap()
            .push((Instant::now(), Write::Style(style)));
    }

    fn set_text(&mut self, text: &str) {
        self.writes
            .lock()
            .unwrap()
            .push((Instant::now(), Write::Text(text.to_string())));
    }
}

/// Locator over a page that may or may not carry the counter element.
pub struct PageLocator {
    target: Option<RecordingTarget>,
    pub lookups: Arc<Mutex<Vec<String>>>,
}

impl PageLocator {
    pub fn with_target(target: RecordingTarget) -> Self {
        Self {
            target: Some(target),
            lookups: Arc::default(),
        }
    }

    pub fn empty() -> Self {
        Self {
            target: None,
            lookups: Arc::default(),
        }
    }
}

impl TargetLocator for PageLocator {
    type Target = RecordingTarget;

    fn locate(&mut self, id: &str) -> Option<RecordingTarget> {
        self.lookups.lock().unwrap().push(id.to_string());
        self.target.clone()
    }
}

/// Fetcher that answers after a fixed latency and counts its invocations.
#[derive(Debug, Clone)]
pub struct ScriptedFetcher {
    latency: Duration,
    result: Result<u64, FetchError>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub fn succeeding(latency: Duration, value: u64) -> Self {
        Self {
            latency,
            result: Ok(value),
            calls: Arc::default(),
        }
    }

    pub fn failing(latency: Duration) -> Self {
        Self {
            latency,
            result: Err(FetchError::new(FailureKind::Network, "connection refused")),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CounterFetcher for ScriptedFetcher {
    async fn fetch(&self) -> Result<CounterResult, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        self.result
            .clone()
            .map(|value| CounterResult::observed_now(Count::from(value)))
    }
}
