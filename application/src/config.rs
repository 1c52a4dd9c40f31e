//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use common::pagination;
use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::domain::user;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Service configuration.
    pub service: Service,

    /// Photo storage configuration.
    pub storage: Storage,

    /// Geo lookup configuration.
    pub geo: Geo,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Service configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Service {
    /// [JWT] secret.
    ///
    /// [JWT]: https://wikipedia.org/wiki/JSON_Web_Token
    #[default("secret".to_owned())]
    pub jwt_secret: String,

    /// Time-to-live of an admin session.
    #[default(time::Duration::from_secs(12 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub session_ttl: time::Duration,

    /// Number of listings on a page.
    #[default(pagination::Size::DEFAULT.get())]
    pub page_size: usize,

    /// Administrator credentials.
    pub admin: Admin,

    /// Contact block shown along the listings.
    pub contact: Contact,
}

/// Administrator credentials.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Admin {
    /// Login of the administrator.
    #[default(default_login())]
    pub login: user::Login,

    /// Password of the administrator.
    #[default("admin".to_owned())]
    pub password: String,
}

/// Returns the default administrator [`user::Login`].
fn default_login() -> user::Login {
    // SAFETY: `admin` is a valid `user::Login`.
    #[expect(unsafe_code, reason = "invariants are preserved")]
    unsafe {
        user::Login::new_unchecked("admin")
    }
}

/// Contact block of the agency.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Phone number.
    pub phone: Option<String>,

    /// Email address.
    pub email: Option<String>,

    /// Postal address.
    pub address: Option<String>,
}

/// Photo storage configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Storage {
    /// Directory to store uploaded photos in.
    #[default(PathBuf::from("photos"))]
    pub dir: PathBuf,

    /// Public base URL the stored photos are served under.
    #[default("http://localhost:8080/photos".to_owned())]
    pub base_url: String,

    /// Maximum size of an uploaded photo, in bytes.
    #[default(10 * 1024 * 1024)]
    pub max_size: usize,
}

impl From<Storage> for service::infra::storage::Filesystem {
    fn from(value: Storage) -> Self {
        let Storage {
            dir,
            base_url,
            max_size: _,
        } = value;
        Self::new(dir, service::infra::storage::BaseUrl::new(base_url))
    }
}

/// Geo lookup configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Geo {
    /// Base URL of the upstream geo API.
    #[default("https://turkiyeapi.dev/api/v1".to_owned())]
    pub base_url: String,

    /// How long the looked up divisions are cached.
    #[default(time::Duration::from_secs(24 * 60 * 60))]
    #[serde(with = "humantime_serde")]
    pub cache_ttl: time::Duration,

    /// Timeout of a single upstream request.
    #[default(time::Duration::from_secs(10))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Geo> for service::infra::geo::Config {
    fn from(value: Geo) -> Self {
        let Geo {
            base_url,
            cache_ttl,
            timeout,
        } = value;
        Self {
            base_url,
            cache_ttl,
            timeout,
        }
    }
}

/// Builds a [`service::Config`] out of the [`Service`] and [`Storage`]
/// sections.
///
/// # Errors
///
/// If the configured page size or administrator password is invalid.
pub fn service_config(
    service: Service,
    storage: &Storage,
) -> Result<service::Config, &'static str> {
    let Service {
        jwt_secret,
        session_ttl,
        page_size,
        admin: Admin { login, password },
        contact: _,
    } = service;

    let password = user::Password::new(password)
        .ok_or("invalid `service.admin.password`")?;
    Ok(service::Config {
        jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
            jwt_secret.as_bytes(),
        ),
        jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
            jwt_secret.as_bytes(),
        ),
        session_ttl,
        admin_login: login,
        admin_password_hash: user::PasswordHash::new(&password),
        page_size: pagination::Size::new(page_size)
            .ok_or("`service.page_size` must be positive")?,
        max_upload_size: storage.max_size,
    })
}

/// Postgres configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    #[default("postgres".to_owned())]
    pub user: String,

    /// Password to connect with.
    #[default("postgres".to_owned())]
    pub password: String,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl From<Postgres> for service::infra::postgres::Config {
    fn from(value: Postgres) -> Self {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password),
            dbname: Some(dbname),
            ..Self::default()
        }
    }
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{service_config, Config, Storage};

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();

        let service = service_config(config.service, &config.storage)
            .expect("valid defaults");

        assert_eq!(service.admin_login.to_string(), "admin");
        assert_eq!(service.page_size.get(), 12);
        assert_eq!(service.max_upload_size, 10 * 1024 * 1024);
    }

    #[test]
    fn rejects_zero_page_size() {
        let mut config = Config::default();
        config.service.page_size = 0;

        assert!(service_config(config.service, &Storage::default()).is_err());
    }
}
