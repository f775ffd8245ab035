use crate::model::config::{FilterConfig, VariadicConfig};
use crate::registry::FunctionInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Internal,
    Denylisted,
    NotMarked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportKind {
    /// Documentation block bound to the existing name with `@name`.
    Normal,
    /// Forwarding `function(...)` published under `public_name`.
    Variadic { public_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Skip(SkipReason),
    Export(ExportKind),
}

/// Decides whether and how a registered function is exported.
#[derive(Debug, Clone, Copy)]
pub struct ExportFilter<'a> {
    filter: &'a FilterConfig,
    variadic: &'a VariadicConfig,
}

impl<'a> ExportFilter<'a> {
    pub fn new(filter: &'a FilterConfig, variadic: &'a VariadicConfig) -> Self {
        Self { filter, variadic }
    }

    pub fn classify(&self, info: &FunctionInfo) -> Decision {
        let name = info.name.as_str();

        let marker = &self.filter.internal_marker;
        if !marker.is_empty() && name.contains(marker.as_str()) {
            return Decision::Skip(SkipReason::Internal);
        }

        if self.filter.denylist.iter().any(|denied| denied == name) {
            return Decision::Skip(SkipReason::Denylisted);
        }

        if !info.docstring.contains(&self.filter.export_marker) {
            return Decision::Skip(SkipReason::NotMarked);
        }

        match self.public_variadic_name(name) {
            Some(public_name) => Decision::Export(ExportKind::Variadic { public_name }),
            None => Decision::Export(ExportKind::Normal),
        }
    }

    /// `mx.varg.symbol.Foo` → `mx.symbol.Foo`. An empty prefix disables the rewrite.
    pub fn public_variadic_name(&self, name: &str) -> Option<String> {
        if self.variadic.prefix.is_empty() {
            return None;
        }

        name.strip_prefix(&self.variadic.prefix)
            .map(|rest| format!("{}{rest}", self.variadic.public_prefix))
    }
}
