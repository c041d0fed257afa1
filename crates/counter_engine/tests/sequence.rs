mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{RecordingTarget, ScriptedFetcher, Write};
use counter_core::{Phase, StyleTag};
use counter_engine::{LoadSequence, SequenceSettings};
use pretty_assertions::assert_eq;

fn init_logging() {
    counter_logging::initialize_for_tests();
}

fn sequence(fetcher: &ScriptedFetcher) -> LoadSequence {
    LoadSequence::new(Arc::new(fetcher.clone()), SequenceSettings::default())
}

#[tokio::test(start_paused = true)]
async fn success_presents_loading_then_value() {
    init_logging();
    let fetcher = ScriptedFetcher::succeeding(Duration::from_millis(50), 17);
    let mut target = RecordingTarget::new();

    let phase = sequence(&fetcher).run(&mut target).await;

    assert_eq!(phase, Phase::Loaded);
    assert_eq!(
        target.writes(),
        vec![
            Write::Style(StyleTag::Loading),
            Write::Text("--".into()),
            Write::Style(StyleTag::Loaded),
            Write::Text("17".into()),
        ]
    );
    assert!(target.loading_duration() >= Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn failure_presents_loading_then_error() {
    init_logging();
    let fetcher = ScriptedFetcher::failing(Duration::ZERO);
    let mut target = RecordingTarget::new();

    let phase = sequence(&fetcher).run(&mut target).await;

    assert_eq!(phase, Phase::Error);
    assert_eq!(
        target.writes(),
        vec![
            Write::Style(StyleTag::Loading),
            Write::Text("--".into()),
            Write::Style(StyleTag::Error),
            Write::Text("--".into()),
        ]
    );
    assert!(target.loading_duration() >= Duration::from_millis(400));
}

#[tokio::test(start_paused = true)]
async fn loading_is_visible_for_the_minimum_at_every_latency() {
    let minimum = SequenceSettings::default().minimum_display;
    for latency_ms in [0, 10, 50, 399, 400, 401, 1_200] {
        let latency = Duration::from_millis(latency_ms);
        for fetcher in [
            ScriptedFetcher::succeeding(latency, 42),
            ScriptedFetcher::failing(latency),
        ] {
            let mut target = RecordingTarget::new();
            sequence(&fetcher).run(&mut target).await;

            let shown = target.loading_duration();
            assert!(
                shown >= minimum,
                "latency {latency_ms}ms showed loading for {shown:?}"
            );
            assert!(shown >= latency);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn exactly_one_terminal_view_per_sequence() {
    for fetcher in [
        ScriptedFetcher::succeeding(Duration::from_millis(5), 9),
        ScriptedFetcher::failing(Duration::from_millis(5)),
    ] {
        let mut target = RecordingTarget::new();
        sequence(&fetcher).run(&mut target).await;

        let terminal: Vec<_> = target
            .styles()
            .into_iter()
            .map(|(_, style)| style)
            .filter(|style| *style != StyleTag::Loading)
            .collect();
        assert_eq!(terminal.len(), 1, "terminal views: {terminal:?}");
        assert_eq!(fetcher.calls(), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn custom_minimum_is_honoured() {
    let fetcher = ScriptedFetcher::succeeding(Duration::ZERO, 2);
    let settings = SequenceSettings {
        minimum_display: Duration::from_millis(1_000),
        ..SequenceSettings::default()
    };
    let mut target = RecordingTarget::new();

    LoadSequence::new(Arc::new(fetcher), settings)
        .run(&mut target)
        .await;

    assert!(target.loading_duration() >= Duration::from_millis(1_000));
}
