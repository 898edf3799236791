use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub classifier: ClassifierConfig,
    pub statistics: StatisticsConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url = env::var("ML_API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let base_url = validate_url(base_url)?;
        let request_timeout = timeout_from_env("ML_API_TIMEOUT_MS", 5_000)?;
        let health_timeout = timeout_from_env("ML_HEALTH_TIMEOUT_MS", 2_000)?;

        let data_path = env::var("CBS_DATA_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let default_year = env::var("CBS_DEFAULT_YEAR").unwrap_or_else(|_| "2024-01".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            classifier: ClassifierConfig {
                base_url,
                request_timeout,
                health_timeout,
            },
            statistics: StatisticsConfig {
                data_path,
                default_year,
            },
        })
    }
}

fn timeout_from_env(key: &'static str, default_ms: u64) -> Result<Duration, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidTimeout { key }),
        Err(_) => Ok(Duration::from_millis(default_ms)),
    }
}

fn validate_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidUrl { value: raw })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the external classification service.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_millis(5_000),
            health_timeout: Duration::from_millis(2_000),
        }
    }
}

/// Location of the CBS characteristics export and the default reporting period.
#[derive(Debug, Clone)]
pub struct StatisticsConfig {
    pub data_path: Option<PathBuf>,
    pub default_year: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout { key: &'static str },
    InvalidUrl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout { key } => {
                write!(f, "{key} must be a whole number of milliseconds")
            }
            ConfigError::InvalidUrl { value } => {
                write!(f, "ML_API_URL '{value}' must start with http:// or https://")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidTimeout { .. }
            | ConfigError::InvalidUrl { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "ML_API_URL",
            "ML_API_TIMEOUT_MS",
            "ML_HEALTH_TIMEOUT_MS",
            "CBS_DATA_PATH",
            "CBS_DEFAULT_YEAR",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.classifier.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.classifier.request_timeout, Duration::from_secs(5));
        assert_eq!(config.classifier.health_timeout, Duration::from_secs(2));
        assert!(config.statistics.data_path.is_none());
        assert_eq!(config.statistics.default_year, "2024-01");
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3001));
        reset_env();
    }

    #[test]
    fn classifier_settings_are_read_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ML_API_URL", "http://ml.internal:9000/");
        env::set_var("ML_API_TIMEOUT_MS", "750");
        env::set_var("CBS_DATA_PATH", "/data/kenmerken.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.classifier.base_url, "http://ml.internal:9000");
        assert_eq!(config.classifier.request_timeout, Duration::from_millis(750));
        assert_eq!(
            config.statistics.data_path,
            Some(PathBuf::from("/data/kenmerken.csv"))
        );
        reset_env();
    }

    #[test]
    fn rejects_malformed_timeout_and_url() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ML_API_TIMEOUT_MS", "soon");
        match AppConfig::load() {
            Err(ConfigError::InvalidTimeout { key }) => assert_eq!(key, "ML_API_TIMEOUT_MS"),
            other => panic!("expected timeout error, got {other:?}"),
        }

        reset_env();
        env::set_var("ML_API_URL", "ml.internal:9000");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidUrl { .. })
        ));
        reset_env();
    }
}
