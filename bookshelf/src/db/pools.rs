//! Connection pool for the catalog store.
//!
//! [`DbPool`] wraps a SQLx [`PgPool`] configured from [`DatabaseConfig`]:
//!
//! - `max_connections` bounds open connections; acquirers queue for up to
//!   `acquire_timeout_secs` before failing.
//! - `max_idle_connections` bounds how many released connections are kept. A connection
//!   released while the idle set is full is closed instead of returned.
//! - `max_lifetime_secs` and `idle_timeout_secs` recycle old and unused connections.
//! - Every new connection gets `statement_timeout`, so a runaway query is cancelled by the
//!   server and its connection goes back to the pool.
//!
//! `DbPool` implements `Deref<Target = PgPool>`, so `state.db.acquire()` works directly.
//! Pooled connections are returned on drop, which covers early returns and `?` paths.

use crate::config::{DatabaseConfig, SslMode};
use anyhow::Context;
use sqlx::{
    Connection, Executor, PgPool,
    postgres::{PgConnectOptions, PgPoolOptions, PgSslMode},
};
use std::{
    ops::Deref,
    str::FromStr,
    sync::{Arc, OnceLock},
    time::Duration,
};
use tracing::{info, instrument, warn};

/// Outcome of a liveness probe against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolHealth {
    Healthy,
    Unreachable,
}

#[derive(Clone, Debug)]
pub struct DbPool {
    pool: PgPool,
}

impl DbPool {
    /// Wrap an existing pool (used by tests, which receive theirs from `#[sqlx::test]`).
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool and verify the store is reachable.
    ///
    /// Fails if the first connection cannot be established or does not answer a ping.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let options = connect_options(config)?;
        Self::connect_with(config, options).await
    }

    pub(crate) async fn connect_with(config: &DatabaseConfig, options: PgConnectOptions) -> anyhow::Result<Self> {
        let handle = Arc::new(OnceLock::new());
        let pool = pool_options(config, handle.clone())
            .connect_with(options)
            .await
            .context("Failed to connect to database")?;

        let mut conn = pool.acquire().await.context("Failed to acquire initial connection")?;
        conn.ping().await.context("Database did not answer ping")?;
        drop(conn);

        // Only ever set here, so the result can be ignored
        let _ = handle.set(pool.clone());

        info!(
            max_connections = config.pool.max_connections,
            max_idle_connections = config.pool.max_idle_connections,
            "Connected to database"
        );

        Ok(Self { pool })
    }

    /// Check whether a connection can be acquired and answers a ping.
    #[instrument(skip(self))]
    pub async fn probe(&self) -> PoolHealth {
        let mut conn = match self.pool.acquire().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!(error = %e, "Health probe could not acquire a connection");
                return PoolHealth::Unreachable;
            }
        };

        match conn.ping().await {
            Ok(()) => PoolHealth::Healthy,
            Err(e) => {
                warn!(error = %e, "Health probe ping failed");
                PoolHealth::Unreachable
            }
        }
    }

    /// Close all connections. Pending and future acquires fail.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl Deref for DbPool {
    type Target = PgPool;

    fn deref(&self) -> &Self::Target {
        &self.pool
    }
}

fn connect_options(config: &DatabaseConfig) -> anyhow::Result<PgConnectOptions> {
    if let Some(url) = &config.url {
        return PgConnectOptions::from_str(url).context("Invalid database URL");
    }

    Ok(PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .ssl_mode(pg_ssl_mode(config.ssl_mode)))
}

fn pg_ssl_mode(mode: SslMode) -> PgSslMode {
    match mode {
        SslMode::Disable => PgSslMode::Disable,
        SslMode::Prefer => PgSslMode::Prefer,
        SslMode::Require => PgSslMode::Require,
    }
}

fn pool_options(config: &DatabaseConfig, handle: Arc<OnceLock<PgPool>>) -> PgPoolOptions {
    let settings = &config.pool;
    let statement_timeout_ms = config.statement_timeout.as_millis();
    let max_idle = settings.max_idle_connections as usize;

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(Duration::from_secs(settings.acquire_timeout_secs))
        .idle_timeout(non_zero_secs(settings.idle_timeout_secs))
        .max_lifetime(non_zero_secs(settings.max_lifetime_secs))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                let sql = format!("SET statement_timeout = {statement_timeout_ms}");
                conn.execute(sql.as_str()).await?;
                Ok(())
            })
        })
        .after_release(move |_conn, _meta| {
            // Before the pool is registered every connection is kept
            let keep = handle.get().is_none_or(|pool| pool.num_idle() < max_idle);
            Box::pin(async move { Ok(keep) })
        })
}

/// Zero means "never" for the idle and lifetime limits.
fn non_zero_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}


#[cfg(all(test, feature = "postgres-tests"))]
mod store_tests {
    use super::*;
    use crate::config::PoolSettings;

    fn options_of(pool: &PgPool) -> PgConnectOptions {
        pool.connect_options().as_ref().clone()
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_probe_reports_health(pool: PgPool) {
        let db = DbPool::new(pool);
        assert_eq!(db.probe().await, PoolHealth::Healthy);

        db.close().await;
        assert_eq!(db.probe().await, PoolHealth::Unreachable);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_statement_timeout_is_set_on_new_connections(pool: PgPool) {
        let config = DatabaseConfig {
            statement_timeout: Duration::from_millis(1500),
            ..Default::default()
        };
        let db = DbPool::connect_with(&config, options_of(&pool)).await.unwrap();

        let (timeout,): (String,) = sqlx::query_as("SELECT current_setting('statement_timeout')")
            .fetch_one(&*db)
            .await
            .unwrap();
        assert_eq!(timeout, "1500ms");

        db.close().await;
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_released_connections_beyond_idle_limit_are_closed(pool: PgPool) {
        let config = DatabaseConfig {
            pool: PoolSettings {
                max_connections: 4,
                max_idle_connections: 1,
                ..Default::default()
            },
            ..Default::default()
        };
        let db = DbPool::connect_with(&config, options_of(&pool)).await.unwrap();

        let held = vec![
            db.acquire().await.unwrap(),
            db.acquire().await.unwrap(),
            db.acquire().await.unwrap(),
        ];

        // Release happens on a spawned task, so give each one time to land
        for conn in held {
            drop(conn);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        assert!(db.num_idle() <= 1, "idle connections: {}", db.num_idle());
        assert!(db.size() <= 1);

        db.close().await;
    }
}
