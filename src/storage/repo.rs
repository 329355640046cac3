//! Request repository: persistence and queries for processed requests.
//!
//! The write side is a single `insert` used once per successful call. The read
//! side mirrors the analytics finders of the original intake tooling: per-team,
//! per-type, per-urgency and time-window lookups plus two aggregates.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::storage::models::ProcessedRequest;
use crate::storage::pool::StorePool;

#[derive(Clone)]
pub struct RequestRepository {
    pool: StorePool,
}

impl RequestRepository {
    /// Open (and if necessary create) the store at the given path.
    pub async fn new(database_path: &str) -> Result<Self, sqlx::Error> {
        let pool = StorePool::connect(database_path).await?;
        let repo = Self { pool };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating request table if not exists");

        let pool = self.pool.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS platform_requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                request_id TEXT NOT NULL UNIQUE,
                team TEXT NOT NULL,
                type TEXT NOT NULL,
                urgency TEXT NOT NULL,
                title TEXT,
                description TEXT,
                platform_response TEXT NOT NULL,
                time_to_response_ms INTEGER NOT NULL,
                comment TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        let indexes = [
            "CREATE INDEX IF NOT EXISTS idx_platform_requests_team ON platform_requests(team)",
            "CREATE INDEX IF NOT EXISTS idx_platform_requests_type ON platform_requests(type)",
            "CREATE INDEX IF NOT EXISTS idx_platform_requests_urgency ON platform_requests(urgency)",
            "CREATE INDEX IF NOT EXISTS idx_platform_requests_created_at ON platform_requests(created_at)",
        ];
        for index in indexes {
            sqlx::query(index).execute(pool).await?;
        }

        Ok(())
    }

    /// Insert one processed request; returns the store-assigned row id.
    ///
    /// `request_id` is UNIQUE: a generated collision fails the insert, and the
    /// caller surfaces that as an internal error.
    pub async fn insert(&self, record: &ProcessedRequest) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO platform_requests
                (request_id, team, type, urgency, title, description,
                 platform_response, time_to_response_ms, comment, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.request_id)
        .bind(&record.team)
        .bind(&record.request_type)
        .bind(&record.urgency)
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.platform_response)
        .bind(record.time_to_response_ms)
        .bind(&record.comment)
        .bind(record.created_at)
        .execute(self.pool.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn find_by_team(&self, team: &str) -> Result<Vec<ProcessedRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM platform_requests WHERE team = ? ORDER BY id")
            .bind(team)
            .fetch_all(self.pool.pool())
            .await
    }

    pub async fn find_by_type(
        &self,
        request_type: &str,
    ) -> Result<Vec<ProcessedRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM platform_requests WHERE type = ? ORDER BY id")
            .bind(request_type)
            .fetch_all(self.pool.pool())
            .await
    }

    pub async fn find_by_urgency(
        &self,
        urgency: &str,
    ) -> Result<Vec<ProcessedRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM platform_requests WHERE urgency = ? ORDER BY id")
            .bind(urgency)
            .fetch_all(self.pool.pool())
            .await
    }

    pub async fn find_by_response(
        &self,
        platform_response: &str,
    ) -> Result<Vec<ProcessedRequest>, sqlx::Error> {
        sqlx::query_as("SELECT * FROM platform_requests WHERE platform_response = ? ORDER BY id")
            .bind(platform_response)
            .fetch_all(self.pool.pool())
            .await
    }

    pub async fn find_created_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ProcessedRequest>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM platform_requests WHERE created_at BETWEEN ? AND ? ORDER BY id",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool.pool())
        .await
    }

    /// Total number of persisted requests.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM platform_requests")
            .fetch_one(self.pool.pool())
            .await?;
        Ok(row.0)
    }

    pub async fn count_by_team(&self, team: &str) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM platform_requests WHERE team = ?")
            .bind(team)
            .fetch_one(self.pool.pool())
            .await?;
        Ok(row.0)
    }

    /// Average simulated latency for a request type; None when no rows match.
    pub async fn average_response_time_by_type(
        &self,
        request_type: &str,
    ) -> Result<Option<f64>, sqlx::Error> {
        let row: (Option<f64>,) = sqlx::query_as(
            "SELECT AVG(time_to_response_ms) FROM platform_requests WHERE type = ?",
        )
        .bind(request_type)
        .fetch_one(self.pool.pool())
        .await?;
        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scratch_repo() -> (RequestRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.db");
        let repo = RequestRepository::new(path.to_str().unwrap()).await.unwrap();
        (repo, dir)
    }

    fn sample(request_id: &str, team: &str, request_type: &str, latency: i64) -> ProcessedRequest {
        ProcessedRequest::new(
            request_id.to_string(),
            team.to_string(),
            request_type.to_string(),
            "high".to_string(),
            "Platform request".to_string(),
            "Request description".to_string(),
            "received".to_string(),
            latency,
            "We'll pretend this never happened.".to_string(),
        )
    }

    #[tokio::test]
    async fn insert_assigns_row_ids() {
        let (repo, _dir) = scratch_repo().await;

        let first = repo
            .insert(&sample("rq-00001", "payments", "dashboard", 100))
            .await
            .unwrap();
        let second = repo
            .insert(&sample("rq-00002", "search", "debug_help", 200))
            .await
            .unwrap();

        assert!(first > 0);
        assert!(second > first);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_request_id_is_rejected() {
        let (repo, _dir) = scratch_repo().await;

        repo.insert(&sample("rq-00042", "payments", "dashboard", 100))
            .await
            .unwrap();
        let err = repo
            .insert(&sample("rq-00042", "devops", "debug_help", 200))
            .await
            .unwrap_err();

        assert!(matches!(err, sqlx::Error::Database(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn finders_filter_by_column() {
        let (repo, _dir) = scratch_repo().await;
        repo.insert(&sample("rq-00010", "payments", "dashboard", 100)).await.unwrap();
        repo.insert(&sample("rq-00011", "payments", "debug_help", 300)).await.unwrap();
        repo.insert(&sample("rq-00012", "devops", "dashboard", 500)).await.unwrap();

        let payments = repo.find_by_team("payments").await.unwrap();
        assert_eq!(payments.len(), 2);
        assert!(payments.iter().all(|r| r.team == "payments"));

        let dashboards = repo.find_by_type("dashboard").await.unwrap();
        assert_eq!(dashboards.len(), 2);

        assert_eq!(repo.count_by_team("devops").await.unwrap(), 1);
        assert_eq!(repo.find_by_urgency("low").await.unwrap().len(), 0);
        assert_eq!(repo.find_by_response("received").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn rows_round_trip_timestamps() {
        let (repo, _dir) = scratch_repo().await;
        let record = sample("rq-00042", "search", "new_environment", 42);
        repo.insert(&record).await.unwrap();

        let window = repo
            .find_created_between(
                record.created_at - chrono::Duration::minutes(1),
                record.created_at + chrono::Duration::minutes(1),
            )
            .await
            .unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].request_id, "rq-00042");
    }

    #[tokio::test]
    async fn average_latency_by_type() {
        let (repo, _dir) = scratch_repo().await;
        assert_eq!(repo.average_response_time_by_type("dashboard").await.unwrap(), None);

        repo.insert(&sample("rq-00020", "payments", "dashboard", 100)).await.unwrap();
        repo.insert(&sample("rq-00021", "devops", "dashboard", 300)).await.unwrap();

        let avg = repo.average_response_time_by_type("dashboard").await.unwrap();
        assert_eq!(avg, Some(200.0));
    }
}
