use thiserror::Error;

const DEFAULT_DATABASE: &str = "sqlite://portico.db?mode=rwc";
const DEFAULT_SECRET: &str = "defaultSecret";
const DEFAULT_KEY: &str = "defaultKey";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8192;
const DEFAULT_PUBLIC_DIR: &str = "public";
const DEFAULT_MAX_BODY_SIZE: usize = 1_048_576;

/// Application configuration, constructed once at startup and passed by
/// reference to every component that needs it.
///
/// Development fills in defaults (each logged as a warning); any other
/// environment must set `DATABASE`, `SECRET`, and `KEY` explicitly and
/// fails startup on the insecure development values.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection string for the session store.
    pub database: String,

    /// Session cookie signing secret.
    pub secret: String,

    /// Session cookie name.
    pub key: String,

    /// Bind address (default: 0.0.0.0).
    pub host: String,

    /// Listen port (default: 8192).
    pub port: u16,

    /// Environment: development, production, test.
    pub environment: String,

    /// Directory served read-only as static assets.
    pub public_dir: String,

    /// Request body cap in bytes.
    pub max_body_size: usize,
}

/// Startup configuration failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} is set to its insecure development default; set a real value")]
    InsecureDefault(&'static str),
}

impl Config {
    /// Load configuration from environment variables (with .env support).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if missing)
        let _ = dotenvy::dotenv();

        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// `from_env` is a thin wrapper over this; tests pass a closure over a
    /// fixed map instead of mutating process environment.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let is_dev = environment == "development";

        let database = required(lookup("DATABASE"), "DATABASE", DEFAULT_DATABASE, is_dev)?;
        let secret = required(lookup("SECRET"), "SECRET", DEFAULT_SECRET, is_dev)?;
        let key = required(lookup("KEY"), "KEY", DEFAULT_KEY, is_dev)?;

        if !is_dev {
            if secret == DEFAULT_SECRET {
                return Err(ConfigError::InsecureDefault("SECRET"));
            }
            if key == DEFAULT_KEY {
                return Err(ConfigError::InsecureDefault("KEY"));
            }
        }

        // Malformed numerics fail in every environment; no silent substitution.
        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
                reason: "expected a port number".to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let max_body_size = match lookup("MAX_BODY_SIZE") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "MAX_BODY_SIZE",
                value,
                reason: "expected a size in bytes".to_string(),
            })?,
            None => DEFAULT_MAX_BODY_SIZE,
        };

        Ok(Config {
            database,
            secret,
            key,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            environment,
            public_dir: lookup("PUBLIC_DIR").unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string()),
            max_body_size,
        })
    }

    /// Check if running in development mode.
    pub fn is_dev(&self) -> bool {
        self.environment == "development"
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required(
    value: Option<String>,
    name: &'static str,
    default: &str,
    is_dev: bool,
) -> Result<String, ConfigError> {
    match value {
        Some(value) => Ok(value),
        None if is_dev => {
            tracing::warn!("{} not set, using development default", name);
            Ok(default.to_string())
        }
        None => Err(ConfigError::Missing(name)),
    }
}
