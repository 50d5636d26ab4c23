//! PostgreSQL implementation of the durable link store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};

/// PostgreSQL repository for link storage and retrieval.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: i64,
    owner_id: i64,
    domain: String,
    short_code: String,
    original_url: String,
    expires_at: Option<DateTime<Utc>>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            owner_id: row.owner_id,
            domain: row.domain,
            short_code: row.short_code,
            original_url: row.original_url,
            expires_at: row.expires_at,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (owner_id, domain, short_code, original_url, expires_at, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, owner_id, domain, short_code, original_url, expires_at, is_active, created_at
            "#,
        )
        .bind(new_link.owner_id)
        .bind(&new_link.domain)
        .bind(&new_link.short_code)
        .bind(&new_link.original_url)
        .bind(new_link.expires_at)
        .bind(new_link.is_active)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn get_by_code(&self, domain: &str, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, owner_id, domain, short_code, original_url, expires_at, is_active, created_at
            FROM links
            WHERE domain = $1 AND short_code = $2
            "#,
        )
        .bind(domain)
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Link::from))
    }
}
