use crate::utils::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Settings used when issuing and checking login tokens
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub secret_key: String,
    pub token_ttl_secs: i64,
    /// When set, mutations demand a valid bearer token
    pub required: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub datastore_url: String,
    pub index_alias: String,
    pub public_dir: PathBuf,
    pub search_size: usize,
    pub auth: AuthSettings,
}

impl Config {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 4000)?,
            datastore_url: required("DATASTORE_URL")?
                .trim_end_matches('/')
                .to_string(),
            index_alias: lookup("INDEX_ALIAS").unwrap_or_else(|| "users".to_string()),
            public_dir: PathBuf::from(lookup("PUBLIC_DIR").unwrap_or_else(|| "public".to_string())),
            search_size: parse_or(&lookup, "SEARCH_SIZE", 10_000)?,
            auth: AuthSettings {
                secret_key: required("SECRET_KEY")?,
                token_ttl_secs: parse_or(&lookup, "TOKEN_TTL_SECS", 3600)?,
                required: parse_or(&lookup, "AUTH_REQUIRED", false)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}
