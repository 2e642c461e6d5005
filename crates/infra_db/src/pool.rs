//! Database connection pool management
//!
//! One PostgreSQL pool serves the whole process. The binary builds it at
//! startup from configuration and hands clones to the port adapters, which
//! keeps pool sizing in one place.

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Alias for the PostgreSQL pool handed to repositories and adapters
pub type DatabasePool = PgPool;

/// Tuning knobs for the connection pool
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_db::DatabaseConfig;
///
/// let config = DatabaseConfig::new("postgres://localhost/studio_portal")
///     .max_connections(20)
///     .acquire_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    /// Upper bound on open connections (default: 10)
    pub max_connections: u32,
    /// Connections kept warm when idle (default: 2)
    pub min_connections: u32,
    /// How long to wait for a free connection (default: 30s)
    pub acquire_timeout: Duration,
    /// Connections are recycled after this age (default: 30 min)
    pub max_lifetime: Duration,
    /// Idle connections are closed after this long (default: 10 min)
    pub idle_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates a configuration with defaults suited to a single API process
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }

    /// Sets the upper bound on open connections
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the number of connections kept warm when idle
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets how long a caller waits for a free connection
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Sets the age at which connections are recycled
    pub fn max_lifetime(mut self, lifetime: Duration) -> Self {
        self.max_lifetime = lifetime;
        self
    }

    /// Sets how long an idle connection is kept before closing
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::new("postgres://localhost/studio_portal")
    }
}

/// Creates a database connection pool with the given configuration
///
/// Connections identify themselves to the server as `studio-portal-billing`
/// so they can be told apart in `pg_stat_activity`.
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` when the URL does not parse or
/// the pool cannot reach the server.
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let options = PgConnectOptions::from_str(&config.url)
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?
        .application_name("studio-portal-billing");

    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Connecting to PostgreSQL"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .connect_with(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Database pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = DatabaseConfig::new("postgres://test")
            .max_connections(50)
            .min_connections(10)
            .acquire_timeout(Duration::from_secs(60));

        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_config_defaults() {
        let config = DatabaseConfig::default();

        assert_eq!(config.url, "postgres://localhost/studio_portal");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.idle_timeout, Duration::from_secs(600));
    }

    #[tokio::test]
    async fn test_create_pool_rejects_malformed_url() {
        let result = create_pool(DatabaseConfig::new("not-a-postgres-url")).await;
        assert!(matches!(result, Err(DatabaseError::ConnectionFailed(_))));
    }
}
