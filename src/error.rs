use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// `export` was called before a registry scope was bound.
    #[error("exporter has no registry scope bound; call bind_scope or install first")]
    NotInitialized,

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "argument metadata length mismatch: {names} names, {type_infos} types, {descriptions} descriptions"
    )]
    ArgumentMismatch {
        names: usize,
        type_infos: usize,
        descriptions: usize,
    },

    #[error("cannot read registry manifest {}: {source}", path.display())]
    ManifestIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry manifest {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
