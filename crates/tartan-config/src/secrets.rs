//! Secret store backing the `!secret` tag
//!
//! Alarm passcodes usually live here rather than in the snapshot file itself.

use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Secrets loaded from `secrets.yaml`
///
/// `Debug` output lists keys only, so passcodes never reach a log line.
#[derive(Clone)]
pub struct Secrets {
    values: HashMap<String, String>,
    path: PathBuf,
}

impl Secrets {
    /// Load `secrets.yaml` from `config_dir`
    ///
    /// A missing file yields an empty store.
    pub fn load(config_dir: &Path) -> ConfigResult<Self> {
        let path = config_dir.join("secrets.yaml");

        if !path.exists() {
            debug!(path = %path.display(), "No secrets file, using empty secrets");
            return Ok(Self {
                values: HashMap::new(),
                path,
            });
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;

        let parsed: HashMap<String, serde_yaml::Value> =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseYaml {
                path: path.clone(),
                source: e,
            })?;

        // Passcodes written as bare numbers keep their digits
        let values = parsed
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    serde_yaml::Value::Null => String::new(),
                    other => serde_yaml::to_string(&other)
                        .unwrap_or_default()
                        .trim()
                        .to_string(),
                };
                (key, value)
            })
            .collect::<HashMap<_, _>>();

        debug!(count = values.len(), path = %path.display(), "Loaded secrets");

        Ok(Self { values, path })
    }

    /// Build a store from in-memory values
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values,
            path: PathBuf::from("secrets.yaml"),
        }
    }

    /// Get a secret by key
    pub fn get(&self, key: &str) -> ConfigResult<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::SecretNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Path the secrets were (or would have been) loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Default for Secrets {
    fn default() -> Self {
        Self::from_map(HashMap::new())
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.values.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("Secrets")
            .field("keys", &keys)
            .field("path", &self.path)
            .finish()
    }
}
