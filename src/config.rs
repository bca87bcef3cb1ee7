//! Configuration Management
//!
//! Handles the persistent key/value store that backs default identifiers
//! and the API token. The file is a flat JSON object; it is read once per
//! invocation and handed around as a [`ConfigStore`].
//!
//! Writes are plain read-modify-write without locking. Two invocations
//! updating the same file at the same time can lose an update.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default config file name, stored in the user's home directory
pub const CONFIG_FILE_NAME: &str = ".cliclirc";

/// Keys accepted by the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ConfigKey {
    SpaceId,
    TeamId,
    WorkspaceId,
    User,
    FolderId,
    ApiKey,
}

impl ConfigKey {
    /// Name of the key as written in the config file
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::SpaceId => "space-id",
            ConfigKey::TeamId => "team-id",
            ConfigKey::WorkspaceId => "workspace-id",
            ConfigKey::User => "user",
            ConfigKey::FolderId => "folder-id",
            ConfigKey::ApiKey => "api-key",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted configuration values
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// `None` for stores that live only in memory
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl ConfigStore {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            return home.join(CONFIG_FILE_NAME);
        }
        if let Some(config_dir) = dirs::config_dir() {
            return config_dir.join("clicli").join("config.json");
        }
        PathBuf::from(CONFIG_FILE_NAME)
    }

    /// Load configuration from disk, creating an empty file when missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, "{}")
                .with_context(|| format!("Failed to create config file {}", path.display()))?;
            eprintln!("Created config file");
            tracing::info!("Created config file at {:?}", path);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let values = parse_values(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;

        Ok(Self {
            path: Some(path),
            values,
        })
    }

    /// Build a store that is never written back to disk; `set` and
    /// `remove` only change the in-memory values.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            values: Map::new(),
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Look up a value. Numbers are returned in their decimal form.
    pub fn get(&self, key: ConfigKey) -> Option<String> {
        match self.values.get(key.as_str())? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Set a value and save
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        self.values
            .insert(key.as_str().to_string(), Value::String(value.to_string()));
        self.save()
    }

    /// Remove a value; the file is only rewritten when the key was present
    pub fn remove(&mut self, key: ConfigKey) -> Result<bool> {
        if self.values.remove(key.as_str()).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Raw file contents, as shown by `config show`
    pub fn contents(&self) -> Result<String> {
        match &self.path {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display())),
            None => crate::output::to_pretty_json(&Value::Object(self.values.clone())),
        }
    }

    /// Save configuration to disk; a no-op for in-memory stores
    pub fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let content = crate::output::to_pretty_json(&Value::Object(self.values.clone()))?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Insert a value without touching the disk
    pub fn insert(&mut self, key: ConfigKey, value: &str) {
        self.values
            .insert(key.as_str().to_string(), Value::String(value.to_string()));
    }
}

fn parse_values(content: &str) -> Result<Map<String, Value>> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(content)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow::anyhow!(
            "expected a JSON object, found {}",
            json_kind(&other)
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
