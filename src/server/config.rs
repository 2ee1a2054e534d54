/**
 * Server Configuration
 *
 * Loads the process configuration from environment variables and validates
 * it before anything else starts: every required value must be a non-empty
 * string, the port must parse, and the environment name must be one of the
 * known choices. A bad configuration fails startup instead of surfacing
 * later as a confusing runtime fault.
 *
 * # Variables
 *
 * - `APP_ENV`       - `development` or `production`
 * - `DATABASE_URL`  - Postgres connection string
 * - `SERVER_PORT`   - listen port
 * - `JWT_SECRET`    - token signing secret
 * - `MAILING_URL` / `MAILING_TOKEN` - optional, set together to enable the
 *   mailing-list integration
 */

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "development" => Ok(Self::Development),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "expected 'development' or 'production', got '{other}'"
            )),
        }
    }
}

/// Credentials for the external mailing-list service.
#[derive(Debug, Clone)]
pub struct MailingConfig {
    pub base_url: String,
    pub token: String,
}

/// Validated process-wide configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database_url: String,
    pub port: u16,
    pub token_secret: String,
    pub mailing: Option<MailingConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = require("APP_ENV")?
            .parse()
            .map_err(|reason| ConfigError::Invalid {
                name: "APP_ENV",
                reason,
            })?;

        let database_url = require("DATABASE_URL")?;
        let token_secret = require("JWT_SECRET")?;

        let port_raw = require("SERVER_PORT")?;
        let port: u16 = port_raw.parse().map_err(|_| ConfigError::Invalid {
            name: "SERVER_PORT",
            reason: format!("'{port_raw}' is not a valid port"),
        })?;
        if port == 0 {
            return Err(ConfigError::Invalid {
                name: "SERVER_PORT",
                reason: "port must be non-zero".to_string(),
            });
        }

        let mailing = match (optional("MAILING_URL"), optional("MAILING_TOKEN")) {
            (Some(base_url), Some(token)) => Some(MailingConfig { base_url, token }),
            (None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    name: "MAILING_URL",
                    reason: "MAILING_URL and MAILING_TOKEN must be set together".to_string(),
                })
            }
        };

        Ok(Self {
            environment,
            database_url,
            port,
            token_secret,
            mailing,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

fn optional(name: &'static str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
