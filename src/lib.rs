//! Generates the roxygen documentation file for the MXNet R package from a
//! snapshot of the binding's function registry.

pub mod error;
pub mod export;
pub mod model;
pub mod registry;

pub use error::ExportError;
pub use export::{ExportSummary, Exporter};
pub use model::config::ExportConfig;
pub use registry::{ArgInfo, FunctionInfo, FunctionRegistry, InMemoryRegistry};
