//! End-to-end scenarios over in-memory adapters: link lifecycle and the
//! click aggregation pipeline.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use tokio_util::sync::CancellationToken;

use linkshort::application::click_consumer::{ClickConsumer, ClickMessage};
use linkshort::application::services::{AnalyticsService, ShortenerService};
use linkshort::domain::entities::ClickEvent;
use linkshort::error::AppError;
use linkshort::metrics::Metrics;
use linkshort::utils::code_generator::RandomCodeGenerator;

use common::{
    InMemoryAnalyticsRepository, InMemoryLinkCache, InMemoryLinkRepository, ScriptedClickSource,
};

const BASE_URL: &str = "http://sho.rt";

fn shortener(
    repo: Arc<InMemoryLinkRepository>,
) -> ShortenerService<InMemoryLinkRepository, RandomCodeGenerator> {
    ShortenerService::new(
        repo,
        Arc::new(InMemoryLinkCache::new()),
        Arc::new(RandomCodeGenerator::new(8)),
        BASE_URL.to_string(),
        Arc::new(Metrics::new()),
    )
}

fn click_message(event: &ClickEvent, offset: i64) -> ClickMessage {
    ClickMessage {
        payload: serde_json::to_vec(event).unwrap(),
        partition: 0,
        offset,
    }
}

fn event_at(link_id: i64, clicked_at: &str) -> ClickEvent {
    let clicked_at = clicked_at.parse::<DateTime<Utc>>().unwrap();
    ClickEvent::new(link_id, "abc12345".to_string(), None, None, None, clicked_at)
}

/// Runs the consumer over a scripted source until the expected number of
/// offsets has been committed, then cancels it.
async fn drain_consumer(
    source: Arc<ScriptedClickSource>,
    repo: Arc<InMemoryAnalyticsRepository>,
    expected_commits: usize,
) {
    let analytics = Arc::new(AnalyticsService::new(Arc::clone(&repo)));
    let consumer = ClickConsumer::new(Arc::clone(&source), analytics, Arc::new(Metrics::new()));

    let shutdown = CancellationToken::new();
    let worker_shutdown = shutdown.clone();
    let worker = tokio::spawn(async move { consumer.run(worker_shutdown).await });

    tokio::time::timeout(Duration::from_secs(5), async {
        while source.committed_offsets().len() < expected_commits {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("consumer did not commit all offsets in time");

    shutdown.cancel();
    worker.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_created_link_resolves_to_original_url() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = shortener(Arc::clone(&repo));

    let link = service
        .create_short_link(1, "https://example.com/some/long/path".to_string())
        .await
        .unwrap();

    let resolved = service
        .resolve_link(BASE_URL, &link.short_code)
        .await
        .unwrap();
    assert_eq!(resolved.original_url, "https://example.com/some/long/path");
    assert_eq!(resolved.id, link.id);

    // Second resolution is served from the cache and must agree.
    let cached = service
        .resolve_link(BASE_URL, &link.short_code)
        .await
        .unwrap();
    assert_eq!(cached.original_url, resolved.original_url);
}

#[tokio::test]
async fn test_concurrent_resolutions_return_the_same_link() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = Arc::new(shortener(Arc::clone(&repo)));

    let link = service
        .create_short_link(1, "https://example.com".to_string())
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let service = Arc::clone(&service);
        let code = link.short_code.clone();
        handles.push(tokio::spawn(async move {
            service.resolve_link(BASE_URL, &code).await.unwrap()
        }));
    }

    for handle in handles {
        let resolved = handle.await.unwrap();
        assert_eq!(resolved, link);
    }
}

#[tokio::test]
async fn test_unknown_code_stays_not_found() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = shortener(repo);

    for _ in 0..2 {
        let err = service.resolve_link(BASE_URL, "nope1234").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}

#[tokio::test]
async fn test_short_url_uses_base_url_and_code() {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let service = shortener(repo);

    let link = service
        .create_short_link(1, "https://example.com".to_string())
        .await
        .unwrap();
    let short_url = service.build_short_url(&link);
    assert_eq!(short_url, format!("{BASE_URL}/{}", link.short_code));
}

#[tokio::test]
async fn test_two_clicks_same_day_aggregate_into_one_counter() {
    let repo = Arc::new(InMemoryAnalyticsRepository::new());
    let source = Arc::new(ScriptedClickSource::new(vec![
        click_message(&event_at(42, "2024-03-05T10:00:00Z"), 0),
        click_message(&event_at(42, "2024-03-05T23:59:00Z"), 1),
    ]));

    drain_consumer(Arc::clone(&source), Arc::clone(&repo), 2).await;

    let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(repo.count_for(42, day), 2);
    assert_eq!(source.committed_offsets(), vec![0, 1]);
}

#[tokio::test]
async fn test_clicks_split_across_utc_midnight() {
    let repo = Arc::new(InMemoryAnalyticsRepository::new());
    let source = Arc::new(ScriptedClickSource::new(vec![
        click_message(&event_at(42, "2024-03-05T23:59:59Z"), 0),
        click_message(&event_at(42, "2024-03-06T00:00:01Z"), 1),
    ]));

    drain_consumer(Arc::clone(&source), Arc::clone(&repo), 2).await;

    assert_eq!(repo.count_for(42, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()), 1);
    assert_eq!(repo.count_for(42, NaiveDate::from_ymd_opt(2024, 3, 6).unwrap()), 1);
}

#[tokio::test]
async fn test_malformed_payload_skipped_and_committed() {
    let repo = Arc::new(InMemoryAnalyticsRepository::new());
    let source = Arc::new(ScriptedClickSource::new(vec![
        ClickMessage {
            payload: b"{definitely not json".to_vec(),
            partition: 0,
            offset: 0,
        },
        click_message(&event_at(42, "2024-03-05T10:00:00Z"), 1),
    ]));

    drain_consumer(Arc::clone(&source), Arc::clone(&repo), 2).await;

    let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(repo.count_for(42, day), 1);
    assert_eq!(source.committed_offsets(), vec![0, 1]);
}

#[tokio::test]
async fn test_redelivered_event_does_not_double_count() {
    let repo = Arc::new(InMemoryAnalyticsRepository::new());
    let event = event_at(42, "2024-03-05T10:00:00Z");
    let source = Arc::new(ScriptedClickSource::new(vec![
        click_message(&event, 0),
        click_message(&event, 0),
    ]));

    drain_consumer(Arc::clone(&source), Arc::clone(&repo), 2).await;

    let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    assert_eq!(repo.count_for(42, day), 1);
}

#[tokio::test]
async fn test_stats_query_covers_aggregated_days() {
    let repo = Arc::new(InMemoryAnalyticsRepository::new());
    let source = Arc::new(ScriptedClickSource::new(vec![
        click_message(&event_at(42, "2024-03-05T10:00:00Z"), 0),
        click_message(&event_at(42, "2024-03-05T12:00:00Z"), 1),
        click_message(&event_at(42, "2024-03-07T09:00:00Z"), 2),
        click_message(&event_at(99, "2024-03-05T10:00:00Z"), 3),
    ]));

    drain_consumer(Arc::clone(&source), Arc::clone(&repo), 4).await;

    let analytics = AnalyticsService::new(Arc::clone(&repo));
    let from = "2024-03-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let to = "2024-03-31T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let stats = analytics.get_daily_stats(42, from, to).await.unwrap();

    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    assert_eq!(stats[0].count, 2);
    assert_eq!(stats[1].date, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    assert_eq!(stats[1].count, 1);
}

#[tokio::test]
async fn test_cancellation_stops_idle_consumer() {
    let repo = Arc::new(InMemoryAnalyticsRepository::new());
    let source = Arc::new(ScriptedClickSource::new(Vec::new()));
    let analytics = Arc::new(AnalyticsService::new(repo));
    let consumer = ClickConsumer::new(source, analytics, Arc::new(Metrics::new()));

    let shutdown = CancellationToken::new();
    let worker_shutdown = shutdown.clone();
    let worker = tokio::spawn(async move { consumer.run(worker_shutdown).await });

    shutdown.cancel();
    let result = tokio::time::timeout(Duration::from_secs(5), worker)
        .await
        .expect("consumer did not stop after cancellation")
        .unwrap();
    assert!(result.is_ok());
}
