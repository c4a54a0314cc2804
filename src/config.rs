use clap::Parser;
use std::net::IpAddr;
use thiserror::Error;

use crate::newrelic::DEFAULT_GRAPHQL_URL;

/// Fatal startup configuration problems
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Values the upstream client cannot run without
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub api_key: String,
    pub account_id: String,
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// New Relic user API key sent with every NerdGraph request
    #[arg(long, env = "NEW_RELIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Account queried when a request does not name one
    #[arg(long, env = "NEW_RELIC_ACCOUNT_ID")]
    account_id: Option<String>,

    /// NerdGraph endpoint
    #[arg(long, env = "NEW_RELIC_GRAPHQL_URL", default_value = DEFAULT_GRAPHQL_URL)]
    pub graphql_url: String,

    /// Interface the HTTP server binds to
    #[arg(long, env = "LISTEN_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port the HTTP server listens on
    #[arg(short, long, env = "PORT", default_value_t = 6000)]
    pub port: u16,

    /// Runtime environment; "development" turns on debug logging
    #[arg(long, env = "ENVIRONMENT")]
    environment: Option<String>,
}

impl Config {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|v| !v.is_empty())
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_development(&self) -> bool {
        self.environment
            .as_deref()
            .is_some_and(|env| env.eq_ignore_ascii_case("development"))
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.is_development() {
            "nrql_sse_agent=debug,warp=debug"
        } else {
            "nrql_sse_agent=info,warp=info"
        }
    }

    /// Check that the required settings are present
    pub fn validate(&self) -> Result<Credentials, ConfigError> {
        let api_key = self
            .api_key()
            .ok_or(ConfigError::Missing("NEW_RELIC_API_KEY"))?;
        let account_id = self
            .account_id()
            .ok_or(ConfigError::Missing("NEW_RELIC_ACCOUNT_ID"))?;

        Ok(Credentials {
            api_key: api_key.to_string(),
            account_id: account_id.to_string(),
        })
    }
}
