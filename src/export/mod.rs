pub mod docstring;
pub mod exporter;
pub mod filter;
pub mod render;

pub use exporter::{ExportSummary, Exporter};
