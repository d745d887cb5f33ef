//! Snapshot loader with custom tag support
//!
//! Supported tags:
//! - `!secret key` - Substitute from secrets.yaml
//! - `!env_var VAR` - Environment variable substitution
//! - `!include path` - Include another YAML file

use crate::error::{ConfigError, ConfigResult};
use crate::secrets::Secrets;
use serde_yaml::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tartan_core::RawSnapshot;
use tracing::{debug, trace};

/// Loads raw snapshots from YAML files
pub struct SnapshotLoader {
    /// Base directory for resolving relative paths
    config_dir: PathBuf,
    secrets: Secrets,
    /// Files currently being loaded, to detect circular includes
    include_stack: HashSet<PathBuf>,
}

impl SnapshotLoader {
    /// Create a loader for `config_dir`, reading its `secrets.yaml` if present
    pub fn new(config_dir: impl Into<PathBuf>) -> ConfigResult<Self> {
        let config_dir = config_dir.into();
        let secrets = Secrets::load(&config_dir)?;

        Ok(Self::with_secrets(config_dir, secrets))
    }

    /// Create a loader with pre-loaded secrets
    pub fn with_secrets(config_dir: impl Into<PathBuf>, secrets: Secrets) -> Self {
        Self {
            config_dir: config_dir.into(),
            secrets,
            include_stack: HashSet::new(),
        }
    }

    /// Load a snapshot file
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<RawSnapshot> {
        let path = self.resolve_path(path.as_ref());
        let value = self.load_value(&path)?;
        to_raw_snapshot(value, &path)
    }

    /// Load a snapshot from a YAML string
    ///
    /// `source_path` is used for error messages and for resolving includes.
    pub fn load_string(&mut self, content: &str, source_path: &Path) -> ConfigResult<RawSnapshot> {
        let value = self.parse(content, source_path)?;
        to_raw_snapshot(value, source_path)
    }

    fn load_value(&mut self, path: &Path) -> ConfigResult<Value> {
        debug!(path = %path.display(), "Loading snapshot file");

        if self.include_stack.contains(path) {
            return Err(ConfigError::CircularInclude {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.include_stack.insert(path.to_path_buf());
        let result = self.parse(&content, path);
        self.include_stack.remove(path);

        result
    }

    fn parse(&mut self, content: &str, source_path: &Path) -> ConfigResult<Value> {
        let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::ParseYaml {
            path: source_path.to_path_buf(),
            source: e,
        })?;

        self.process_value(value, source_path)
    }

    fn process_value(&mut self, value: Value, source_path: &Path) -> ConfigResult<Value> {
        match value {
            Value::Tagged(tagged) => self.process_tagged(*tagged, source_path),
            Value::Mapping(map) => {
                let mut result = serde_yaml::Mapping::new();
                for (k, v) in map {
                    result.insert(k, self.process_value(v, source_path)?);
                }
                Ok(Value::Mapping(result))
            }
            Value::Sequence(seq) => seq
                .into_iter()
                .map(|v| self.process_value(v, source_path))
                .collect::<ConfigResult<Vec<_>>>()
                .map(Value::Sequence),
            _ => Ok(value),
        }
    }

    fn process_tagged(
        &mut self,
        tagged: serde_yaml::value::TaggedValue,
        source_path: &Path,
    ) -> ConfigResult<Value> {
        let tag = tagged.tag.to_string();
        trace!(tag = %tag, value = ?tagged.value, "Processing tag");

        match tag.as_str() {
            "!secret" => self.process_secret(tagged.value),
            "!env_var" => process_env_var(tagged.value),
            "!include" => self.process_include(tagged.value, source_path),
            _ => Err(ConfigError::InvalidValue {
                key: tag.clone(),
                reason: "unsupported tag".to_string(),
            }),
        }
    }

    fn process_secret(&self, value: Value) -> ConfigResult<Value> {
        let key = tag_argument("!secret", value)?;
        let secret = self.secrets.get(&key)?;
        debug!(key = %key, "Substituted secret");
        Ok(Value::String(secret.to_string()))
    }

    fn process_include(&mut self, value: Value, source_path: &Path) -> ConfigResult<Value> {
        let relative = tag_argument("!include", value)?;
        let base_dir = source_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(self.config_dir.as_path());
        let path = if Path::new(&relative).is_absolute() {
            PathBuf::from(&relative)
        } else {
            base_dir.join(&relative)
        };

        if !path.exists() {
            return Err(ConfigError::IncludeNotFound { path });
        }

        debug!(path = %path.display(), "Including file");
        self.load_value(&path)
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        }
    }
}

fn process_env_var(value: Value) -> ConfigResult<Value> {
    let var = tag_argument("!env_var", value)?;
    let env_value =
        std::env::var(&var).map_err(|_| ConfigError::EnvVarNotFound { var: var.clone() })?;
    debug!(var = %var, "Substituted env var");
    Ok(Value::String(env_value))
}

fn tag_argument(tag: &str, value: Value) -> ConfigResult<String> {
    match value {
        Value::String(s) => Ok(s),
        _ => Err(ConfigError::InvalidValue {
            key: tag.to_string(),
            reason: "argument must be a string".to_string(),
        }),
    }
}

fn to_raw_snapshot(value: Value, path: &Path) -> ConfigResult<RawSnapshot> {
    if !value.is_mapping() {
        return Err(ConfigError::NotAMapping {
            path: path.to_path_buf(),
        });
    }

    serde_json::to_value(&value)
        .and_then(serde_json::from_value::<RawSnapshot>)
        .map_err(|e| ConfigError::Convert {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Load a snapshot file with full tag processing
pub fn load_snapshot(
    config_dir: impl Into<PathBuf>,
    file: impl AsRef<Path>,
) -> ConfigResult<RawSnapshot> {
    let mut loader = SnapshotLoader::new(config_dir)?;
    loader.load_file(file)
}

/// Load a snapshot from a YAML string with tag processing
pub fn load_snapshot_string(
    config_dir: impl Into<PathBuf>,
    content: &str,
    source_name: &str,
) -> ConfigResult<RawSnapshot> {
    let mut loader = SnapshotLoader::new(config_dir)?;
    loader.load_string(content, Path::new(source_name))
}
