//! API server assembly and startup.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

use crate::api::routes::app_router;
use crate::application::services::{AnalyticsService, ShortenerService};
use crate::config::Config;
use crate::infrastructure::cache::{LinkCache, NullCache, RedisLinkCache};
use crate::infrastructure::kafka::KafkaClickProducer;
use crate::infrastructure::persistence::{PgAnalyticsRepository, PgLinkRepository};
use crate::metrics::Metrics;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

/// Connects the adapters, runs migrations and serves the API until the
/// process receives SIGINT.
pub async fn run(config: Config) -> Result<()> {
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

    let cache: Arc<dyn LinkCache> = match &config.redis_url {
        Some(url) => match RedisLinkCache::connect(url).await {
            Ok(cache) => {
                info!("redis cache connected");
                Arc::new(cache)
            }
            Err(e) => {
                warn!(error = %e, "redis unavailable, continuing without cache");
                Arc::new(NullCache::new())
            }
        },
        None => {
            info!("REDIS_URL not set, link caching disabled");
            Arc::new(NullCache::new())
        }
    };

    let clicks = Arc::new(
        KafkaClickProducer::new(&config.kafka_brokers, &config.kafka_clicks_topic, Arc::clone(&metrics))
            .context("create kafka producer")?,
    );

    let shortener = Arc::new(
        ShortenerService::new(
            Arc::new(PgLinkRepository::new(Arc::clone(&pool))),
            cache,
            Arc::new(RandomCodeGenerator::new(config.short_code_length)),
            config.base_url.clone(),
            Arc::clone(&metrics),
        )
        .with_ttls(
            Duration::from_secs(config.cache_ttl_seconds),
            Duration::from_secs(config.negative_cache_ttl_seconds),
        ),
    );

    let analytics = Arc::new(AnalyticsService::new(Arc::new(PgAnalyticsRepository::new(
        Arc::clone(&pool),
    ))));

    let state = AppState {
        shortener,
        analytics,
        clicks,
    };

    let app = app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.http_addr)
        .await
        .with_context(|| format!("bind {}", config.http_addr))?;
    info!(addr = %config.http_addr, "api server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        info!("shutdown signal received");
    })
    .await
    .context("serve http")?;

    Ok(())
}
