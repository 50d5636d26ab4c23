//! Click analytics consumer binary.
//!
//! Reads click events from Kafka and folds them into the daily counters.
//! Runs until SIGINT, finishing the in-flight message before exiting.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::info;

use linkshort::application::click_consumer::ClickConsumer;
use linkshort::application::services::AnalyticsService;
use linkshort::config::Config;
use linkshort::infrastructure::kafka::KafkaClickSource;
use linkshort::infrastructure::persistence::PgAnalyticsRepository;
use linkshort::logging;
use linkshort::metrics::Metrics;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    config.validate()?;

    logging::init(&config.log_level, &config.log_format);

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.postgres_dsn)
        .await
        .context("connect to postgres")?;
    let pool = Arc::new(pool);

    sqlx::migrate!("./migrations")
        .run(pool.as_ref())
        .await
        .context("run migrations")?;

    let metrics = Arc::new(Metrics::new());
    let analytics = Arc::new(AnalyticsService::new(Arc::new(PgAnalyticsRepository::new(
        pool,
    ))));

    let source = KafkaClickSource::new(
        &config.kafka_brokers,
        &config.kafka_consumer_group,
        &config.kafka_clicks_topic,
    )
    .context("create kafka consumer")?;

    let consumer = ClickConsumer::new(source, analytics, metrics)
        .with_process_timeout(Duration::from_secs(config.process_timeout_seconds));

    let shutdown = CancellationToken::new();
    let worker_shutdown = shutdown.clone();
    let mut worker = tokio::spawn(async move { consumer.run(worker_shutdown).await });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            shutdown.cancel();
            worker.await.context("join consumer task")??;
        }
        result = &mut worker => {
            result.context("join consumer task")??;
        }
    }

    info!("analytics consumer stopped");
    Ok(())
}
