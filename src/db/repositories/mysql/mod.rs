//! MySQL repository implementation using Diesel.
//!
//! Implements [`StatusRepository`] against the MySQL database the status
//! poller writes into (`store_status`, `timezones`, `business_hours`).
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `MYSQL_DATABASE_URL`: Connection string (required)
//! - `MYSQL_POOL_MAX`: Maximum pool size (default: 10)
//! - `MYSQL_POOL_MIN`: Minimum pool size (default: 1)
//! - `MYSQL_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `MYSQL_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `MYSQL_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `MYSQL_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::mysql::MysqlConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tokio::task;

use crate::api::StoreId;
use crate::db::repository::{
    ErrorContext, RepositoryError, RepositoryResult, StatusRepository, BOUNDARY_FORMAT,
};
use crate::models::observation::{BusinessHoursRow, LookbackMode, ObservationRow};

mod models;
mod schema;

use models::{BusinessHoursRecord, StoreStatusRecord};

type MysqlPool = Pool<ConnectionManager<MysqlConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/mysql/migrations");

/// Configuration for connecting to MySQL.
#[derive(Debug, Clone)]
pub struct MysqlConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

impl MysqlConfig {
    /// Create configuration from environment variables.
    ///
    /// See the module docs for the variable list.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("MYSQL_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or MYSQL_DATABASE_URL must be set".to_string())?;

        let max_pool_size = std::env::var("MYSQL_POOL_MAX")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let min_pool_size = std::env::var("MYSQL_POOL_MIN")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1);

        let connection_timeout_sec = std::env::var("MYSQL_CONN_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30);

        let idle_timeout_sec = std::env::var("MYSQL_IDLE_TIMEOUT_SEC")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        let max_retries = std::env::var("MYSQL_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let retry_delay_ms = std::env::var("MYSQL_RETRY_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(100);

        Ok(Self {
            database_url,
            max_pool_size,
            min_pool_size,
            connection_timeout_sec,
            idle_timeout_sec,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Number of connections currently in use
    pub connections_in_use: u32,
    /// Number of idle connections
    pub idle_connections: u32,
    /// Total number of connections in the pool
    pub total_connections: u32,
    /// Maximum pool size
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    /// Total failed queries
    pub failed_queries: u64,
    /// Total retried operations
    pub retried_operations: u64,
}

/// Diesel-backed repository for MySQL.
#[derive(Clone, Debug)]
pub struct MysqlRepository {
    pool: MysqlPool,
    config: MysqlConfig,
    // Metrics counters
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl MysqlRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: MysqlConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<MysqlConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true) // Validate connections before use
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        // Run migrations once during initialization
        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Run pending database migrations.
    fn run_migrations(conn: &mut MysqlConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient
    /// failures (connection errors, timeouts, serialization failures).
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut MysqlConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2; // Exponential backoff
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1))
                                .retryable(),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Get pool health statistics.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }

    /// Check if the database connection is healthy.
    pub async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }
}

#[async_trait]
impl StatusRepository for MysqlRepository {
    async fn fetch_store_ids(&self) -> RepositoryResult<Vec<StoreId>> {
        let ids: Vec<i64> = self
            .with_conn(move |conn| {
                use schema::store_status::dsl as ss;
                ss::store_status
                    .select(ss::store_id)
                    .distinct()
                    .load::<i64>(conn)
                    .map_err(RepositoryError::from)
            })
            .await
            .map_err(|e| e.with_operation("fetch_store_ids"))?;

        Ok(ids.into_iter().map(StoreId::new).collect())
    }

    async fn fetch_observations(
        &self,
        store_id: StoreId,
        week_boundary_utc: DateTime<Utc>,
        lookback: LookbackMode,
    ) -> RepositoryResult<Vec<ObservationRow>> {
        let boundary = week_boundary_utc.format(BOUNDARY_FORMAT).to_string();
        let id = store_id.value();

        let records: Vec<StoreStatusRecord> = self
            .with_conn(move |conn| {
                use schema::store_status::dsl as ss;
                let mut query = ss::store_status
                    .into_boxed::<diesel::mysql::Mysql>()
                    .filter(ss::store_id.eq(id));
                // Text comparison: the zero-padded layout sorts
                // chronologically, like the original SQL.
                query = match lookback {
                    LookbackMode::WithinLastWeek => {
                        query.filter(ss::timestamp_utc.ge(boundary.clone()))
                    }
                    LookbackMode::OlderThanLastWeek => {
                        query.filter(ss::timestamp_utc.le(boundary.clone()))
                    }
                };
                query
                    .order(ss::timestamp_utc.asc())
                    .load::<StoreStatusRecord>(conn)
                    .map_err(RepositoryError::from)
            })
            .await
            .map_err(|e| e.with_operation("fetch_observations"))?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn fetch_timezone(&self, store_id: StoreId) -> RepositoryResult<Option<String>> {
        let id = store_id.value();
        self.with_conn(move |conn| {
            use schema::timezones::dsl as tzs;
            tzs::timezones
                .filter(tzs::store_id.eq(id))
                .select(tzs::timezone_str)
                .first::<String>(conn)
                .optional()
                .map_err(RepositoryError::from)
        })
        .await
        .map_err(|e| e.with_operation("fetch_timezone"))
    }

    async fn fetch_business_hours(
        &self,
        store_id: StoreId,
        day_of_week: u8,
    ) -> RepositoryResult<Option<BusinessHoursRow>> {
        let id = store_id.value();
        let day = day_of_week as i8;

        let record: Option<BusinessHoursRecord> = self
            .with_conn(move |conn| {
                use schema::business_hours::dsl as bh;
                bh::business_hours
                    .filter(bh::store_id.eq(id))
                    .filter(bh::day.eq(day))
                    .select((bh::day, bh::start_time_local, bh::end_time_local))
                    .first::<BusinessHoursRecord>(conn)
                    .optional()
                    .map_err(RepositoryError::from)
            })
            .await
            .map_err(|e| e.with_operation("fetch_business_hours"))?;

        record.map(|r| r.into_rule(store_id)).transpose()
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(move |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map_err(RepositoryError::from)
        })
        .await
        .map_err(|e| e.with_operation("health_check"))?;

        Ok(true)
    }
}
