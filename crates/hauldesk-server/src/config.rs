//! Environment-driven server configuration.

use std::env;
use std::fs;

use hauldesk_auth::config::AuthConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("cannot read {path}: {source}")]
    UnreadableFile {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Full server configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:8080`.
    pub bind_addr: String,
    pub auth: AuthConfig,
    /// Userinfo endpoint of the external identity provider, when the
    /// deployment accepts that scheme.
    pub idp_userinfo_url: Option<String>,
    /// How often the expired-pair sweep runs.
    pub sweep_interval_secs: u64,
    /// Populate the store with demo data on startup.
    pub seed: bool,
    /// Password for the seeded accounts.
    pub seed_password: String,
}

fn var_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var: name, value }),
        Err(_) => Ok(default),
    }
}

fn read_pem(var: &'static str) -> Result<String, ConfigError> {
    let path = env::var(var).map_err(|_| ConfigError::MissingVar(var))?;
    fs::read_to_string(&path).map_err(|source| ConfigError::UnreadableFile { path, source })
}

impl ServerConfig {
    /// Resolve configuration from the environment.
    ///
    /// The JWT signing keys are mandatory (paths to PEM files); there is
    /// no built-in development key pair.
    pub fn from_env() -> Result<Self, ConfigError> {
        let auth = AuthConfig {
            jwt_private_key_pem: read_pem("HAULDESK_JWT_PRIVATE_KEY_FILE")?,
            jwt_public_key_pem: read_pem("HAULDESK_JWT_PUBLIC_KEY_FILE")?,
            access_token_lifetime_secs: var_u64("HAULDESK_ACCESS_TOKEN_TTL_SECS", 900)?,
            refresh_token_lifetime_secs: var_u64("HAULDESK_REFRESH_TOKEN_TTL_SECS", 2_592_000)?,
            jwt_issuer: env::var("HAULDESK_JWT_ISSUER").unwrap_or_else(|_| "hauldesk".into()),
            pepper: env::var("HAULDESK_PASSWORD_PEPPER").ok(),
            min_password_length: var_u64("HAULDESK_MIN_PASSWORD_LENGTH", 12)? as usize,
        };

        Ok(Self {
            bind_addr: env::var("HAULDESK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            auth,
            idp_userinfo_url: env::var("HAULDESK_IDP_USERINFO_URL").ok(),
            sweep_interval_secs: var_u64("HAULDESK_SWEEP_INTERVAL_SECS", 300)?,
            seed: env::var("HAULDESK_SEED").is_ok_and(|v| v == "1" || v == "true"),
            seed_password: env::var("HAULDESK_SEED_PASSWORD")
                .unwrap_or_else(|_| "change-me-immediately".into()),
        })
    }
}
