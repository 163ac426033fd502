use retroboard_core::draglock::{DEFAULT_LOCK_TTL_SECS, DEFAULT_REAPER_INTERVAL_SECS};

/// Which backend holds the drag leases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockBackend {
    /// In-process store with native TTL. Single-server deployments only.
    Memory,
    /// Shared `drag_locks` table; required when several server processes
    /// serve the same boards.
    Postgres,
}

/// Drag-lock tuning, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct LockConfig {
    pub backend: LockBackend,
    /// Lease TTL in seconds.
    pub ttl_secs: i64,
    /// Sweep interval for the expired-lease reaper (Postgres backend only).
    pub reaper_interval_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Drag-lock backend and lease tuning.
    pub lock: LockConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`     | `30`                       |
    /// | `LOCK_BACKEND`              | `postgres`                 |
    /// | `LOCK_TTL_SECS`             | `30`                       |
    /// | `LOCK_REAPER_INTERVAL_SECS` | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let backend = match std::env::var("LOCK_BACKEND")
            .unwrap_or_else(|_| "postgres".into())
            .to_lowercase()
            .as_str()
        {
            "memory" => LockBackend::Memory,
            "postgres" => LockBackend::Postgres,
            other => panic!("LOCK_BACKEND must be 'memory' or 'postgres', got '{other}'"),
        };

        let ttl_secs: i64 = std::env::var("LOCK_TTL_SECS")
            .unwrap_or_else(|_| DEFAULT_LOCK_TTL_SECS.to_string())
            .parse()
            .expect("LOCK_TTL_SECS must be a valid i64");

        let reaper_interval_secs: u64 = std::env::var("LOCK_REAPER_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_REAPER_INTERVAL_SECS.to_string())
            .parse()
            .expect("LOCK_REAPER_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            lock: LockConfig {
                backend,
                ttl_secs,
                reaper_interval_secs,
            },
        }
    }
}
