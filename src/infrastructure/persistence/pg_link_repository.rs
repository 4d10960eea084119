//! PostgreSQL implementation of the link store.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::domain::entities::LinkRecord;
use crate::domain::errors::LinkError;
use crate::domain::repositories::LinkRepository;
use crate::utils::clock::epoch_now;
use crate::utils::db_error::is_unique_violation;

/// Row layout of the `links` table.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    path: String,
    canonical_name: String,
    target_url: String,
    enabled: bool,
    created_time: i64,
    last_modified: i64,
    last_modified_by: String,
}

impl From<LinkRow> for LinkRecord {
    fn from(row: LinkRow) -> Self {
        Self {
            path: row.path,
            canonical_name: row.canonical_name,
            target_url: row.target_url,
            enabled: row.enabled,
            created_time: row.created_time,
            last_modified: row.last_modified,
            last_modified_by: row.last_modified_by,
        }
    }
}

/// PostgreSQL repository for link records.
///
/// Conditional writes are expressed in SQL: the primary key on `path` rejects
/// duplicate inserts, and `UPDATE`/`DELETE` report zero affected rows when the
/// path is gone. No statement reads before it writes except
/// [`LinkRepository::update_link`], which needs the comparison.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Writes the mutable fields of `record`, provided the row still exists.
    async fn conditional_update(&self, record: &LinkRecord) -> Result<(), LinkError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET canonical_name = $2,
                target_url = $3,
                enabled = $4,
                last_modified = GREATEST($5, last_modified + 1),
                last_modified_by = $6
            WHERE path = $1
            "#,
        )
        .bind(&record.path)
        .bind(&record.canonical_name)
        .bind(&record.target_url)
        .bind(record.enabled)
        .bind(epoch_now())
        .bind(&record.last_modified_by)
        .execute(self.pool.as_ref())
        .await
        .map_err(|e| internal("update", &record.path, e))?;

        if result.rows_affected() == 0 {
            // Deleted between the read and the write.
            debug!(path = %record.path, "Conditional update found no row");
            return Err(LinkError::NotFound);
        }

        Ok(())
    }
}

/// Logs a provider failure and collapses it into [`LinkError::Internal`].
fn internal(operation: &'static str, path: &str, e: sqlx::Error) -> LinkError {
    error!(operation, path, error = %e, "PostgreSQL link store failure");
    LinkError::Internal
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn init_database(&self) -> Result<(), LinkError> {
        sqlx::migrate!("./migrations")
            .run(self.pool.as_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to apply link store migrations");
                LinkError::Internal
            })?;

        info!("Link store schema ready");
        Ok(())
    }

    async fn get_link_details(&self, path: &str) -> Result<LinkRecord, LinkError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT path, canonical_name, target_url, enabled,
                   created_time, last_modified, last_modified_by
            FROM links
            WHERE path = $1
            "#,
        )
        .bind(path)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| internal("get", path, e))?;

        match row {
            Some(row) if !row.path.is_empty() => Ok(row.into()),
            _ => Err(LinkError::NotFound),
        }
    }

    async fn create_link(&self, record: LinkRecord) -> Result<(), LinkError> {
        if record.path.is_empty() {
            return Err(LinkError::MissingPath);
        }

        let now = epoch_now();

        let result = sqlx::query(
            r#"
            INSERT INTO links (path, canonical_name, target_url, enabled,
                               created_time, last_modified, last_modified_by)
            VALUES ($1, $2, $3, $4, $5, $5, $6)
            "#,
        )
        .bind(&record.path)
        .bind(&record.canonical_name)
        .bind(&record.target_url)
        .bind(record.enabled)
        .bind(now)
        .bind(&record.last_modified_by)
        .execute(self.pool.as_ref())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => {
                debug!(path = %record.path, "Link path already taken");
                Err(LinkError::AlreadyExists)
            }
            Err(e) => Err(internal("create", &record.path, e)),
        }
    }

    async fn update_link(&self, record: LinkRecord) -> Result<(), LinkError> {
        let existing = self.get_link_details(&record.path).await?;

        if existing.content_eq(&record) {
            return Err(LinkError::NoChange);
        }

        self.conditional_update(&record).await
    }

    async fn delete_link(&self, path: &str) -> Result<(), LinkError> {
        let result = sqlx::query("DELETE FROM links WHERE path = $1")
            .bind(path)
            .execute(self.pool.as_ref())
            .await
            .map_err(|e| internal("delete", path, e))?;

        if result.rows_affected() == 0 {
            return Err(LinkError::NotFound);
        }

        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn go_link() -> LinkRecord {
        LinkRecord::new("go", "Go Link", "https://example.com", true, "alice")
    }

    #[sqlx::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_conditional_update_after_concurrent_delete_is_not_found(pool: PgPool) {
        let repo = PgLinkRepository::new(Arc::new(pool));
        repo.create_link(go_link()).await.unwrap();

        // The read half of update_link saw the row; a delete lands before the write.
        let mut changed = repo.get_link_details("go").await.unwrap();
        changed.target_url = "https://example.org".to_string();
        repo.delete_link("go").await.unwrap();

        assert_eq!(
            repo.conditional_update(&changed).await,
            Err(LinkError::NotFound)
        );
        assert_eq!(repo.get_link_details("go").await, Err(LinkError::NotFound));
    }
}
