//! Store configuration
//!
//! Values come from `~/.vecstore/config.toml` when present and can be
//! overridden by environment variables. A config is fixed for the lifetime
//! of the store built from it.

use anyhow::{Context, Result as AnyhowResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::env::store as env_vars;
use crate::error::{Result, StoreError};

/// Sentinel connection string for an ephemeral in-memory database
pub const IN_MEMORY: &str = ":memory:";

pub const DEFAULT_EMBED_DIM: usize = 1536;

/// Upper bound on `float[N]` columns accepted by `vec0`
pub const MAX_EMBED_DIM: usize = 8192;

/// Where the store's database lives
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConnectionTarget {
    #[default]
    InMemory,
    File(PathBuf),
}

impl ConnectionTarget {
    pub fn is_in_memory(&self) -> bool {
        matches!(self, ConnectionTarget::InMemory)
    }
}

impl From<&str> for ConnectionTarget {
    fn from(value: &str) -> Self {
        if value == IN_MEMORY {
            ConnectionTarget::InMemory
        } else {
            ConnectionTarget::File(PathBuf::from(value))
        }
    }
}

impl From<String> for ConnectionTarget {
    fn from(value: String) -> Self {
        ConnectionTarget::from(value.as_str())
    }
}

impl From<ConnectionTarget> for String {
    fn from(value: ConnectionTarget) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionTarget::InMemory => f.write_str(IN_MEMORY),
            ConnectionTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How `add` commits its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertMode {
    /// Each row is committed on its own; a failure leaves earlier rows in place
    #[default]
    PerRow,
    /// The whole call runs in one transaction
    Batch,
}

impl InsertMode {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "per_row" | "per-row" | "row" => Some(InsertMode::PerRow),
            "batch" => Some(InsertMode::Batch),
            _ => None,
        }
    }
}

/// Configuration for a vector store instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// `":memory:"` or a database file path
    #[serde(rename = "connection_string")]
    pub connection: ConnectionTarget,

    /// Number of components in every embedding stored
    pub embed_dim: usize,

    pub insert_mode: InsertMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionTarget::InMemory,
            embed_dim: DEFAULT_EMBED_DIM,
            insert_mode: InsertMode::PerRow,
        }
    }
}

impl StoreConfig {
    pub fn new(connection: impl Into<ConnectionTarget>, embed_dim: usize) -> Self {
        Self {
            connection: connection.into(),
            embed_dim,
            ..Self::default()
        }
    }

    /// In-memory store with the given dimension
    pub fn in_memory(embed_dim: usize) -> Self {
        Self::new(ConnectionTarget::InMemory, embed_dim)
    }

    pub fn with_insert_mode(mut self, mode: InsertMode) -> Self {
        self.insert_mode = mode;
        self
    }

    /// Check the values a store cannot be built from
    pub fn validate(&self) -> Result<()> {
        if self.embed_dim == 0 {
            return Err(StoreError::invalid_config("embed_dim must be positive"));
        }
        if self.embed_dim > MAX_EMBED_DIM {
            return Err(StoreError::invalid_config(format!(
                "embed_dim {} exceeds the maximum of {MAX_EMBED_DIM}",
                self.embed_dim
            )));
        }
        if let ConnectionTarget::File(path) = &self.connection {
            if path.as_os_str().is_empty() {
                return Err(StoreError::invalid_config("database path is empty"));
            }
        }
        Ok(())
    }

    /// Apply environment overrides on top of `self`
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(target) = std::env::var(env_vars::DB) {
            self.connection = ConnectionTarget::from(target);
        }

        if let Ok(dim) = std::env::var(env_vars::EMBED_DIM) {
            self.embed_dim = dim.trim().parse().map_err(|_| {
                StoreError::invalid_config(format!(
                    "{} is not a valid dimension: {dim}",
                    env_vars::EMBED_DIM
                ))
            })?;
        }

        if let Ok(mode) = std::env::var(env_vars::INSERT_MODE) {
            self.insert_mode = InsertMode::parse(&mode).ok_or_else(|| {
                StoreError::invalid_config(format!(
                    "{} must be 'per_row' or 'batch', got '{mode}'",
                    env_vars::INSERT_MODE
                ))
            })?;
        }

        Ok(self)
    }

    /// Defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Get the config file path (~/.vecstore/config.toml)
    pub fn default_config_path() -> AnyhowResult<PathBuf> {
        let home_dir = dirs::home_dir().context("Could not find home directory")?;
        Ok(home_dir.join(".vecstore").join("config.toml"))
    }

    /// Load configuration from the default file, then apply environment overrides.
    /// Returns defaults if the file doesn't exist.
    pub fn load() -> AnyhowResult<Self> {
        let config = Self::load_from(Self::default_config_path()?)?;
        Ok(config.apply_env()?)
    }

    /// Load configuration from a TOML file.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: impl AsRef<Path>) -> AnyhowResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: StoreConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to(&self, path: impl AsRef<Path>) -> AnyhowResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
