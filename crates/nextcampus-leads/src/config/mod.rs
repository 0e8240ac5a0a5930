use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
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
    pub outbound: OutboundConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            outbound: OutboundConfig::from_env()?,
        })
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

/// Credential read from the environment. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Connection details for the HTML-to-PDF rendering service.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub base_url: String,
    pub user_id: Option<Secret>,
    pub api_key: Option<Secret>,
}

/// Connection details and addressing for the transactional email service.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub base_url: String,
    pub api_key: Option<Secret>,
    pub from: String,
    pub to: String,
}

/// Bounded retry settings shared by both outbound adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_millis(250),
            max_backoff: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

/// Everything the pipeline needs to reach its two external services.
#[derive(Debug, Clone)]
pub struct OutboundConfig {
    pub converter: ConverterConfig,
    pub mailer: MailerConfig,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl OutboundConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = parse_var("OUTBOUND_TIMEOUT_SECS", 30u64)?;
        let max_attempts = parse_var("OUTBOUND_MAX_ATTEMPTS", 1u32)?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "OUTBOUND_MAX_ATTEMPTS",
            });
        }
        let backoff_ms = parse_var("OUTBOUND_BACKOFF_MS", 250u64)?;

        Ok(Self {
            converter: ConverterConfig {
                base_url: env::var("CONVERTER_BASE_URL")
                    .unwrap_or_else(|_| "https://api.htmlcsstoimage.com".to_string()),
                user_id: secret_var("CONVERTER_USER_ID"),
                api_key: secret_var("CONVERTER_API_KEY"),
            },
            mailer: MailerConfig {
                base_url: env::var("MAILER_BASE_URL")
                    .unwrap_or_else(|_| "https://api.resend.com".to_string()),
                api_key: secret_var("MAILER_API_KEY"),
                from: env::var("LEADS_MAIL_FROM")
                    .unwrap_or_else(|_| "leads@nextcampus.uk".to_string()),
                to: env::var("LEADS_MAIL_TO")
                    .unwrap_or_else(|_| "nextcampus.info@gmail.com".to_string()),
            },
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryConfig {
                max_attempts,
                initial_backoff: Duration::from_millis(backoff_ms),
                ..RetryConfig::default()
            },
        })
    }
}

fn secret_var(name: &str) -> Option<Secret> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(Secret)
}

fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
    MissingSecret { var: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a positive whole number")
            }
            ConfigError::MissingSecret { var } => write!(f, "{var} must be set"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::MissingSecret { .. } => None,
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
        for var in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "CONVERTER_BASE_URL",
            "CONVERTER_USER_ID",
            "CONVERTER_API_KEY",
            "MAILER_BASE_URL",
            "MAILER_API_KEY",
            "LEADS_MAIL_FROM",
            "LEADS_MAIL_TO",
            "OUTBOUND_TIMEOUT_SECS",
            "OUTBOUND_MAX_ATTEMPTS",
            "OUTBOUND_BACKOFF_MS",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.outbound.mailer.to, "nextcampus.info@gmail.com");
        assert_eq!(config.outbound.timeout, Duration::from_secs(30));
        assert_eq!(config.outbound.retry.max_attempts, 1);
        assert!(config.outbound.mailer.api_key.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn blank_secrets_are_treated_as_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("MAILER_API_KEY", "   ");
        env::set_var("CONVERTER_API_KEY", "hcti-key");
        let config = AppConfig::load().expect("config loads");
        assert!(config.outbound.mailer.api_key.is_none());
        assert_eq!(
            config
                .outbound
                .converter
                .api_key
                .as_ref()
                .map(Secret::expose),
            Some("hcti-key")
        );
        env::remove_var("MAILER_API_KEY");
        env::remove_var("CONVERTER_API_KEY");
    }

    #[test]
    fn rejects_zero_attempts() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("OUTBOUND_MAX_ATTEMPTS", "0");
        let err = AppConfig::load().expect_err("zero attempts rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                var: "OUTBOUND_MAX_ATTEMPTS"
            }
        ));
        env::remove_var("OUTBOUND_MAX_ATTEMPTS");
    }

    #[test]
    fn secret_debug_is_redacted() {
        let secret = Secret::new("re_live_123");
        assert_eq!(format!("{secret:?}"), "Secret(***)");
    }
}
