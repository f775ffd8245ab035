use std::fs;
use std::path::Path;

use crate::error::ExportError;
use crate::export::filter::{Decision, ExportFilter, ExportKind, SkipReason};
use crate::export::render;
use crate::model::config::ExportConfig;
use crate::registry::{ArgInfo, FunctionInfo, FunctionRegistry, InMemoryRegistry};

/// Name under which the export entry point is registered by [`Exporter::install`].
pub const ENTRY_POINT: &str = "mx.internal.export";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFunction {
    pub name: String,
    pub kind: ExportKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub exported: Vec<ExportedFunction>,
    pub skipped_internal: usize,
    pub skipped_denylisted: usize,
    pub skipped_unmarked: usize,
}

impl ExportSummary {
    pub fn skipped(&self) -> usize {
        self.skipped_internal + self.skipped_denylisted + self.skipped_unmarked
    }

    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Internal => self.skipped_internal += 1,
            SkipReason::Denylisted => self.skipped_denylisted += 1,
            SkipReason::NotMarked => self.skipped_unmarked += 1,
        }
    }
}

/// Writes the generated R file for whatever registry scope it is bound to.
///
/// An exporter starts unbound; `export` and `render` fail with
/// [`ExportError::NotInitialized`] until `bind_scope` or `install` is called.
pub struct Exporter {
    config: ExportConfig,
    scope: Option<Box<dyn FunctionRegistry>>,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            scope: None,
        }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn is_bound(&self) -> bool {
        self.scope.is_some()
    }

    pub fn bind_scope(&mut self, scope: Box<dyn FunctionRegistry>) {
        self.scope = Some(scope);
    }

    /// Register the export entry point into `registry`, then bind it as the scope.
    pub fn install(&mut self, mut registry: InMemoryRegistry) {
        registry.register(entry_point());
        self.bind_scope(Box::new(registry));
    }

    /// Run the export pass without touching the file system.
    pub fn render(&self) -> Result<(String, ExportSummary), ExportError> {
        let scope = self.scope.as_ref().ok_or(ExportError::NotInitialized)?;
        let filter = ExportFilter::new(&self.config.filter, &self.config.variadic);
        let remove_dup = self.config.docstring.remove_duplicate_args;

        let mut out = String::from(render::HEADER);
        let mut summary = ExportSummary::default();

        for info in scope.snapshot() {
            let kind = match filter.classify(&info) {
                Decision::Skip(reason) => {
                    tracing::debug!("skipping {} ({reason:?})", info.name);
                    summary.record_skip(reason);
                    continue;
                }
                Decision::Export(kind) => kind,
            };

            let doc = render::documentation(&info, remove_dup);
            match &kind {
                ExportKind::Normal => {
                    render::normal_function(&mut out, &info.name, &doc);
                    tracing::info!("Exporting {} docstring", info.name);
                }
                ExportKind::Variadic { public_name } => {
                    render::variadic_function(&mut out, &info.name, public_name, &doc);
                    tracing::info!("Exporting {} as {public_name}", info.name);
                }
            }

            summary.exported.push(ExportedFunction {
                name: info.name,
                kind,
            });
        }

        Ok((out, summary))
    }

    /// Generate the R file under `root`, overwriting any previous output.
    pub fn export(&self, root: &Path) -> Result<ExportSummary, ExportError> {
        if !self.is_bound() {
            return Err(ExportError::NotInitialized);
        }

        let path = self.config.output_path(root);
        tracing::info!("Start to generate {} ...", root.display());

        let (content, summary) = self.render()?;
        self.write_output(&path, &content)?;

        tracing::info!(
            "All generation finished on {} ({} exported, {} skipped)",
            root.display(),
            summary.exported.len(),
            summary.skipped()
        );
        Ok(summary)
    }

    fn write_output(&self, path: &Path, content: &str) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        };

        if self.config.output.create_dirs {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        fs::write(path, content).map_err(io_err)
    }
}

fn entry_point() -> FunctionInfo {
    FunctionInfo::new(
        ENTRY_POINT,
        "Internal function of mxnet, used to export generated functions file.",
    )
    .with_arg(ArgInfo::new(
        "path",
        "string",
        "Root directory of the R package.",
    ))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn package_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("R")).unwrap();
        dir
    }

    fn bound_exporter(functions: Vec<FunctionInfo>) -> Exporter {
        let mut exporter = Exporter::new(ExportConfig::default());
        exporter.install(functions.into_iter().collect());
        exporter
    }

    #[test]
    fn export_before_binding_is_not_initialized() {
        let exporter = Exporter::new(ExportConfig::default());
        let dir = package_root();

        assert!(!exporter.is_bound());
        assert!(matches!(
            exporter.export(dir.path()),
            Err(ExportError::NotInitialized)
        ));
        assert!(matches!(exporter.render(), Err(ExportError::NotInitialized)));
        assert!(!dir.path().join("R/mxnet_generated.R").exists());
    }

    #[test]
    fn end_to_end_normal_function() {
        let exporter = bound_exporter(vec![
            FunctionInfo::new("mx.ndarray.add", "Adds two arrays. @export")
                .with_arg(ArgInfo::new("x", "NDArray", "first"))
                .with_arg(ArgInfo::new("y", "NDArray", "second")),
        ]);
        let dir = package_root();

        let summary = exporter.export(dir.path()).unwrap();
        let content = fs::read_to_string(dir.path().join("R/mxnet_generated.R")).unwrap();

        assert_eq!(
            content,
            indoc! {"
                ######
                # Generated by mxnet.export, do not edit by hand.
                ######

                #' Adds two arrays. @export
                #' @param x  NDArray
                #'     first
                #' @param y  NDArray
                #'     second
                #' @name mx.ndarray.add
                NULL
            "}
        );
        assert!(!content.contains("function(...)"));
        assert_eq!(
            summary.exported,
            vec![ExportedFunction {
                name: "mx.ndarray.add".to_string(),
                kind: ExportKind::Normal,
            }]
        );
        // The installed entry point is internal and never exported.
        assert_eq!(summary.skipped_internal, 1);
    }

    #[test]
    fn variadic_function_gets_forwarding_wrapper() {
        let exporter = bound_exporter(vec![FunctionInfo::new(
            "mx.varg.symbol.Foo",
            "Foo op. @export",
        )]);

        let (content, summary) = exporter.render().unwrap();

        assert!(content.ends_with(indoc! {"
            #' Foo op. @export
            mx.symbol.Foo <- function(...) {
              mx.varg.symbol.Foo(list(...))
            }
        "}));
        assert!(!content.contains("@name"));
        assert_eq!(
            summary.exported[0].kind,
            ExportKind::Variadic {
                public_name: "mx.symbol.Foo".to_string()
            }
        );
    }

    #[test]
    fn filtered_functions_are_counted_not_emitted() {
        let exporter = bound_exporter(vec![
            FunctionInfo::new("internal.foo", "@export"),
            FunctionInfo::new("mx.varg.symbol.concat", "@export"),
            FunctionInfo::new("mx.ndarray.hidden", "No marker here."),
            FunctionInfo::new("mx.ndarray.shown", "Shown. @export"),
        ]);

        let (content, summary) = exporter.render().unwrap();

        assert!(!content.contains("internal.foo"));
        assert!(!content.contains("concat"));
        assert!(!content.contains("hidden"));
        assert!(content.contains("#' @name mx.ndarray.shown"));
        assert_eq!(summary.skipped_internal, 2);
        assert_eq!(summary.skipped_denylisted, 1);
        assert_eq!(summary.skipped_unmarked, 1);
        assert_eq!(summary.skipped(), 4);
    }

    #[test]
    fn blocks_follow_registry_order() {
        let exporter = bound_exporter(vec![
            FunctionInfo::new("mx.z", "@export"),
            FunctionInfo::new("mx.a", "@export"),
        ]);

        let (content, _) = exporter.render().unwrap();

        let z = content.find("@name mx.z").unwrap();
        let a = content.find("@name mx.a").unwrap();
        assert!(z < a);
    }

    #[test]
    fn empty_registry_writes_header_only() {
        let mut exporter = Exporter::new(ExportConfig::default());
        exporter.bind_scope(Box::new(InMemoryRegistry::new()));
        let dir = package_root();

        let summary = exporter.export(dir.path()).unwrap();

        let content = fs::read_to_string(dir.path().join("R/mxnet_generated.R")).unwrap();
        assert_eq!(content, render::HEADER);
        assert_eq!(summary, ExportSummary::default());
    }

    #[test]
    fn export_is_idempotent_and_overwrites() {
        let exporter = bound_exporter(vec![
            FunctionInfo::new("mx.ndarray.add", "Adds. @export")
                .with_arg(ArgInfo::new("lhs_arr", "NDArray", "left")),
            FunctionInfo::new("mx.varg.symbol.Group", "Groups. @export"),
        ]);
        let dir = package_root();
        let output = dir.path().join("R/mxnet_generated.R");
        fs::write(&output, "stale content that is much longer than the header\n").unwrap();

        exporter.export(dir.path()).unwrap();
        let first = fs::read(&output).unwrap();
        exporter.export(dir.path()).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
        assert!(!String::from_utf8(first).unwrap().contains("stale"));
    }

    #[test]
    fn missing_output_directory_is_io_error() {
        let exporter = bound_exporter(Vec::new());
        let dir = tempfile::tempdir().unwrap();

        let err = exporter.export(dir.path()).unwrap_err();

        match err {
            ExportError::Io { path, .. } => {
                assert_eq!(path, dir.path().join("R/mxnet_generated.R"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn create_dirs_creates_missing_parent() {
        let mut config = ExportConfig::default();
        config.output.create_dirs = true;
        let mut exporter = Exporter::new(config);
        exporter.install(InMemoryRegistry::new());
        let dir = tempfile::tempdir().unwrap();

        exporter.export(dir.path()).unwrap();

        assert!(dir.path().join("R/mxnet_generated.R").is_file());
    }

    #[test]
    fn exporters_are_isolated() {
        let first = bound_exporter(vec![FunctionInfo::new("mx.one", "@export")]);
        let second = bound_exporter(vec![FunctionInfo::new("mx.two", "@export")]);

        let (one, _) = first.render().unwrap();
        let (two, _) = second.render().unwrap();

        assert!(one.contains("mx.one") && !one.contains("mx.two"));
        assert!(two.contains("mx.two") && !two.contains("mx.one"));
    }

    #[test]
    fn install_registers_entry_point() {
        let mut exporter = Exporter::new(ExportConfig::default());
        exporter.install(InMemoryRegistry::new());

        let (content, summary) = exporter.render().unwrap();

        assert!(!content.contains(ENTRY_POINT));
        assert_eq!(summary.skipped_internal, 1);
        assert_eq!(
            entry_point().args,
            vec![ArgInfo::new(
                "path",
                "string",
                "Root directory of the R package."
            )]
        );
    }
}
