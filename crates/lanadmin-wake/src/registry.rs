//! JSON-backed machine registry.
//!
//! Maps a human-friendly machine name to its MAC address, IP, and
//! description.  The file lives next to the executable by default
//! (`machines.json`) and is meant to be hand-edited:
//!
//! ```json
//! {
//!   "pc1": {
//!     "mac": "AA:BB:CC:DD:EE:01",
//!     "ip": "192.168.1.101",
//!     "description": "Workstation 1"
//!   }
//! }
//! ```
//!
//! An absent registry is a normal first-run condition and loads as an
//! empty mapping.  A present-but-unparsable registry is reported and then
//! degraded to an empty mapping by [`MachineRegistry::load_or_empty`], so
//! a stray edit never makes the wake commands unusable.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// File name of the registry, resolved next to the executable.
pub const REGISTRY_FILE_NAME: &str = "machines.json";

/// Error type for registry file operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing registry at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry file exists but is not valid JSON.
    #[error("failed to parse registry JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One configured machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRecord {
    /// Hardware address in any accepted textual form.
    pub mac: String,
    /// Last known IP address; informational only.
    pub ip: String,
    /// Free-form description shown in listings.
    pub description: String,
}

/// The set of configured machines, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MachineRegistry {
    machines: BTreeMap<String, MachineRecord>,
}

impl MachineRegistry {
    /// Loads the registry from `path`.
    ///
    /// An absent file yields an empty registry; that is the normal state
    /// before `--init` has been run.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] for file-system errors other than
    /// "not found" and [`RegistryError::Parse`] for malformed JSON.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let machines: BTreeMap<String, MachineRecord> = serde_json::from_str(&content)?;
                Ok(Self { machines })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(RegistryError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Loads the registry, degrading any failure to an empty registry
    /// after reporting it.
    ///
    /// Wake commands must stay usable with a broken registry file, so
    /// this is what the command layer calls.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(registry) => registry,
            Err(e) => {
                warn!("ignoring unusable registry at {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Persists the registry to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Io`] on write failure or
    /// [`RegistryError::Parse`] if serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let content = serde_json::to_string_pretty(&self.machines)?;
        std::fs::write(path, content).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Looks up a machine by its configured name.
    pub fn lookup(&self, name: &str) -> Option<&MachineRecord> {
        self.machines.get(name)
    }

    /// Adds or replaces a machine entry.
    pub fn insert(&mut self, name: impl Into<String>, record: MachineRecord) {
        self.machines.insert(name.into(), record);
    }

    /// Iterates over `(name, record)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MachineRecord)> {
        self.machines.iter()
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// A two-entry starter registry written by `--init`.
    pub fn sample() -> Self {
        let mut registry = Self::default();
        registry.insert(
            "pc1",
            MachineRecord {
                mac: "AA:BB:CC:DD:EE:01".to_string(),
                ip: "192.168.1.101".to_string(),
                description: "Workstation 1".to_string(),
            },
        );
        registry.insert(
            "pc2",
            MachineRecord {
                mac: "AA:BB:CC:DD:EE:02".to_string(),
                ip: "192.168.1.102".to_string(),
                description: "Workstation 2".to_string(),
            },
        );
        registry
    }
}

/// Resolves the default registry path: `machines.json` next to the
/// executable, falling back to the working directory when the executable
/// path cannot be determined.
pub fn default_registry_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(REGISTRY_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(REGISTRY_FILE_NAME))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
