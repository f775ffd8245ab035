use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ExportError;
use crate::registry::{FunctionInfo, InMemoryRegistry};

/// On-disk registry snapshot. Each `[[function]]` table is one entry, in order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryManifest {
    #[serde(default, rename = "function")]
    pub functions: Vec<FunctionInfo>,
}

impl RegistryManifest {
    pub fn parse(raw: &str, path: &Path) -> Result<Self, ExportError> {
        toml::from_str(raw).map_err(|source| ExportError::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, ExportError> {
        let raw = fs::read_to_string(path).map_err(|source| ExportError::ManifestIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    pub fn into_registry(self) -> InMemoryRegistry {
        self.functions.into_iter().collect()
    }
}

pub fn load_registry(path: &Path) -> Result<InMemoryRegistry, ExportError> {
    let manifest = RegistryManifest::read(path)?;
    tracing::debug!(
        "loaded {} functions from {}",
        manifest.functions.len(),
        path.display()
    );
    Ok(manifest.into_registry())
}
