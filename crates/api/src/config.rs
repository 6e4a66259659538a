use crate::auth::jwt::JwtConfig;

/// Default name of the salesperson who exclusively receives reserved-program
/// leads.
const DEFAULT_SPECIALIST_NAME: &str = "Nat";

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
    /// Roster member name that receives every reserved-program lead.
    pub specialist_name: String,
    /// Interval for the automatic idle-lead sweep, in seconds.
    /// `None` (env var unset) disables the background sweep; the manual
    /// endpoint stays available either way.
    pub idle_sweep_interval_secs: Option<u64>,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                       |
    /// | `SPECIALIST_NAME`          | `Nat`                      |
    /// | `IDLE_SWEEP_INTERVAL_SECS` | unset (sweep disabled)     |
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

        let specialist_name = std::env::var("SPECIALIST_NAME")
            .unwrap_or_else(|_| DEFAULT_SPECIALIST_NAME.into());

        let idle_sweep_interval_secs: Option<u64> = std::env::var("IDLE_SWEEP_INTERVAL_SECS")
            .ok()
            .map(|v| {
                v.parse()
                    .expect("IDLE_SWEEP_INTERVAL_SECS must be a valid u64")
            });

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            specialist_name,
            idle_sweep_interval_secs,
            jwt,
        }
    }
}
