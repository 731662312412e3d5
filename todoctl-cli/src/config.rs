//! Environment configuration
//!
//! Settings come from flags, then the process environment, then `.env`
//! files. dotenvy never overwrites a variable that is already set, so
//! values exported in the shell always win over files.

use std::path::PathBuf;

use anyhow::{bail, Result};
use tracing::{debug, info};

/// Primary connection string variable
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Older connection string variable, still honored in `.env` files
pub const LEGACY_URI_VAR: &str = "uri";

/// Get the todoctl config directory path (~/.todoctl)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todoctl"))
}

/// Load environment variables from .env files.
///
/// Priority order (highest to lowest):
/// 1. Variables already set in the environment
/// 2. Current directory .env
/// 3. ~/.todoctl/.env
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
        loaded_from.push(path.display().to_string());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from ~/.todoctl: {}", env_file.display());
                    loaded_from.push(env_file.display().to_string());
                }
                Err(e) => {
                    debug!("Failed to load {}: {}", env_file.display(), e);
                }
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("Using environment variables only (no .env file found)");
    } else {
        info!("Loaded configuration from: {}", loaded_from.join(", "));
    }
}

/// Resolve the database connection string.
///
/// `explicit` is the `--database-url` flag (clap also fills it from
/// DATABASE_URL). `lookup` reads an environment variable.
pub fn resolve_database_url(
    explicit: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String> {
    let url = explicit
        .or_else(|| lookup(DATABASE_URL_VAR))
        .or_else(|| lookup(LEGACY_URI_VAR))
        .filter(|url| !url.trim().is_empty());

    match url {
        Some(url) => Ok(url),
        None => bail!(
            "database URL not set. Set via --database-url, {} or {} (env or .env file)",
            DATABASE_URL_VAR,
            LEGACY_URI_VAR
        ),
    }
}

/// Resolve the database URL from the process environment.
pub fn database_url(explicit: Option<String>) -> Result<String> {
    resolve_database_url(explicit, |key| std::env::var(key).ok())
}
