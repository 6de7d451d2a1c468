//! Postgres-backed store.
//!
//! Documents live in a single `tasks` table. Writes run in a transaction
//! that ends with `pg_notify`, so the change notification only fires on
//! commit. Subscriptions pair a `PgListener` with a poll-interval fallback
//! and re-read the full ordered set on every wake.

use std::time::Duration;

use opentelemetry::KeyValue;
use sqlx::PgPool;
use sqlx::postgres::{PgListener, PgPoolOptions};
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{TaskDocument, TaskId};
use crate::telemetry::metrics;

use super::{FieldWrite, SnapshotEvent, Store, Subscription};

const CHANNEL: &str = "tasks_changed";

/// Postgres store handle. Owns the connection pool; cloning shares it.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    poll_interval: Duration,
}

impl PgStore {
    /// Connect to Postgres and create a connection pool.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(url)
            .await?;
        Ok(Self {
            pool,
            poll_interval: Duration::from_secs(5),
        })
    }

    /// Override the poll fallback used when no NOTIFY arrives.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Run all pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Other(format!("migration failed: {e}")))?;
        Ok(())
    }

    /// Simple health check. Runs a SELECT 1.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Read the complete task collection in id order.
///
/// Rows whose stored shape cannot be decoded are logged and excluded, the
/// same policy the engine applies to schema-invalid documents.
async fn read_all(pool: &PgPool) -> Result<Vec<TaskDocument>> {
    let rows: Vec<TaskRow> = sqlx::query_as(
        "SELECT id, category, title, is_completed, is_urgent, note, sub_items
         FROM tasks ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    let mut docs = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id.clone();
        match row.try_into_document() {
            Ok(doc) => docs.push(doc),
            Err(e) => warn!(id = %id, error = %e, "excluding undecodable task row"),
        }
    }
    Ok(docs)
}

impl Store for PgStore {
    async fn subscribe(&self) -> Result<Subscription> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(CHANNEL).await?;

        let (tx, rx) = mpsc::channel::<SnapshotEvent>(8);
        let pool = self.pool.clone();
        let poll_interval = self.poll_interval;

        tokio::spawn(async move {
            loop {
                // Emit on open and after every wake. A wake without a real
                // change re-emits an unchanged set, which consumers must
                // treat as a no-op.
                match read_all(&pool).await {
                    Ok(docs) => {
                        if tx.send(Ok(docs)).await.is_err() {
                            return; // subscription dropped
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                }

                tokio::select! {
                    notif = listener.recv() => {
                        if let Err(e) = notif {
                            let _ = tx
                                .send(Err(Error::Unavailable(format!("listener error: {e}"))))
                                .await;
                            return;
                        }
                    }
                    _ = tokio::time::sleep(poll_interval) => {}
                }
            }
        });

        metrics::store_operations().add(1, &[KeyValue::new("operation", "subscribe")]);
        Ok(Subscription::new(rx))
    }

    async fn batch_write(&self, docs: &[TaskDocument]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for doc in docs {
            sqlx::query(
                "INSERT INTO tasks (id, category, title, is_completed, is_urgent, note, sub_items)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 ON CONFLICT (id) DO UPDATE SET
                    category = EXCLUDED.category,
                    title = EXCLUDED.title,
                    is_completed = EXCLUDED.is_completed,
                    is_urgent = EXCLUDED.is_urgent,
                    note = EXCLUDED.note,
                    sub_items = EXCLUDED.sub_items",
            )
            .bind(doc.id.as_str())
            .bind(&doc.category)
            .bind(&doc.title)
            .bind(doc.is_completed)
            .bind(doc.is_urgent)
            .bind(&doc.note)
            .bind(serde_json::to_value(&doc.sub_items).unwrap_or_default())
            .execute(&mut *tx)
            .await?;
        }

        // NOTIFY is transactional and only fires on commit.
        sqlx::query("SELECT pg_notify($1, 'batch')")
            .bind(CHANNEL)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        metrics::store_operations().add(1, &[KeyValue::new("operation", "batch_write")]);
        Ok(())
    }

    async fn update_field(&self, id: &TaskId, write: FieldWrite) -> Result<()> {
        let field = write.field_name();
        let mut tx = self.pool.begin().await?;

        let rows_affected = match write {
            FieldWrite::Completed(value) => {
                sqlx::query("UPDATE tasks SET is_completed = $1 WHERE id = $2")
                    .bind(value)
                    .bind(id.as_str())
                    .execute(&mut *tx)
                    .await?
                    .rows_affected()
            }
            FieldWrite::Note(note) => {
                sqlx::query("UPDATE tasks SET note = $1 WHERE id = $2")
                    .bind(note)
                    .bind(id.as_str())
                    .execute(&mut *tx)
                    .await?
                    .rows_affected()
            }
        };

        if rows_affected == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(CHANNEL)
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        metrics::store_operations().add(
            1,
            &[
                KeyValue::new("operation", "update_field"),
                KeyValue::new("field", field),
            ],
        );
        Ok(())
    }
}

/// Internal row type for sqlx::FromRow.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    category: String,
    title: String,
    is_completed: bool,
    is_urgent: bool,
    note: String,
    sub_items: serde_json::Value,
}

impl TaskRow {
    fn try_into_document(self) -> Result<TaskDocument> {
        let sub_items: Vec<String> = serde_json::from_value(self.sub_items)
            .map_err(|e| Error::DataIntegrity(format!("bad sub_items: {e}")))?;
        Ok(TaskDocument {
            id: TaskId(self.id),
            category: self.category,
            title: self.title,
            is_completed: self.is_completed,
            is_urgent: self.is_urgent,
            note: self.note,
            sub_items,
        })
    }
}
