//! Layered CLI configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file (`bookshelf.toml` or `$BOOKSHELF_CONFIG`), then `BOOKSHELF_*`
//! environment variables.

use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_PATH_ENV: &str = "BOOKSHELF_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "bookshelf.toml";
const ENV_PREFIX: &str = "BOOKSHELF";
const DEFAULT_DATABASE_PATH: &str = "bookshelf.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite file holding the catalog.
    pub database_path: PathBuf,
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<String>,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        let config_file =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());

        let cfg = config::Config::builder()
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("log_level", bookshelf_core::default_log_level())?
            .add_source(config::File::with_name(&config_file).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("failed to read configuration from `{config_file}`"))?;

        cfg.try_deserialize()
            .context("configuration does not match the expected settings shape")
    }
}
