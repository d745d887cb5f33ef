//! Snapshot file loading for the Tartan evaluator
//!
//! Snapshots are plain YAML mappings (JSON files load too) keyed by field
//! name. Three custom tags are supported:
//!
//! - `!secret key` - Substitute from `secrets.yaml` in the config directory
//! - `!env_var VAR` - Environment variable substitution
//! - `!include path` - Include another YAML file, relative to the including file
//!
//! Loading only checks that the file is a mapping. Field values are checked
//! later by the evaluator's validation guard, which substitutes defaults
//! rather than failing.
//!
//! # Example
//!
//! ```ignore
//! use tartan_config::{load_snapshot, SnapshotLoader};
//!
//! // Load a snapshot file
//! let raw = load_snapshot("/etc/tartan", "house.yaml")?;
//!
//! // Or use the loader directly for more control
//! let mut loader = SnapshotLoader::new("/etc/tartan")?;
//! let raw = loader.load_file("house.yaml")?;
//! ```

mod error;
mod loader;
mod secrets;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_snapshot, load_snapshot_string, SnapshotLoader};
pub use secrets::Secrets;
