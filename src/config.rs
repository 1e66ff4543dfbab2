use std::time::Duration;

use anyhow::Context;
use config::{Config, ConfigError, Environment as EnvSource, File};
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

use crate::domain::ContactEmail;
use crate::email_client::{EmailClient, RetryPolicy};

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(serde::Deserialize, Clone)]
pub struct DatabaseSettings {
    pub backend: StorageBackend,
    pub database_name: String,
    pub username: String,
    pub password: Secret<String>,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    #[serde(default)]
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn connection_with_host(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }

    pub fn connection_with_db(&self) -> PgConnectOptions {
        self.connection_with_host().database(&self.database_name)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    /// Left unset, the service still starts and every send fails.
    #[serde(default)]
    pub authorization_token: Option<Secret<String>>,
    pub contact_mailbox: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub max_retries: u32,
    #[serde(default, deserialize_with = "deserialize_number_from_string")]
    pub retry_backoff_milliseconds: u64,
}

impl EmailClientSettings {
    pub fn sender(&self) -> Result<ContactEmail, anyhow::Error> {
        ContactEmail::parse(self.sender_email.clone())
            .map_err(|err| anyhow::anyhow!("invalid sender email: {}", err))
    }

    pub fn contact_mailbox(&self) -> Result<ContactEmail, anyhow::Error> {
        ContactEmail::parse(self.contact_mailbox.clone())
            .map_err(|err| anyhow::anyhow!("invalid contact mailbox: {}", err))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            backoff: Duration::from_millis(self.retry_backoff_milliseconds),
        }
    }

    pub fn client(&self) -> Result<EmailClient, anyhow::Error> {
        let base_url = url::Url::parse(&self.base_url)?;
        let client = EmailClient::new(
            base_url,
            self.sender()?,
            self.authorization_token.clone(),
            self.timeout(),
            self.retry_policy(),
        )
        .context("Failed to build the mail provider HTTP client")?;
        Ok(client)
    }
}

/// The runtime environment, selected with `APP_ENVIRONMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

/// Reads `configuration/base.yaml`, the environment file on top of it, then
/// `APP_`-prefixed variables, e.g. `APP_EMAIL_CLIENT__AUTHORIZATION_TOKEN`.
pub fn settings() -> Result<Settings, ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|err| ConfigError::Message(format!("cannot read current directory: {}", err)))?;
    let config_dir = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(ConfigError::Message)?;

    Config::builder()
        .add_source(File::from(config_dir.join("base.yaml")))
        .add_source(File::from(
            config_dir.join(format!("{}.yaml", environment.as_str())),
        ))
        .add_source(
            EnvSource::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
