pub mod manifest;

use serde::Deserialize;

/// One documented argument of a registered function.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArgInfo {
    pub name: String,
    #[serde(default)]
    pub type_info: String,
    #[serde(default)]
    pub description: String,
}

impl ArgInfo {
    pub fn new(
        name: impl Into<String>,
        type_info: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            type_info: type_info.into(),
            description: description.into(),
        }
    }
}

/// Metadata for a single registered function.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    #[serde(default)]
    pub args: Vec<ArgInfo>,
    #[serde(default)]
    pub docstring: String,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>, docstring: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            docstring: docstring.into(),
        }
    }

    pub fn with_arg(mut self, arg: ArgInfo) -> Self {
        self.args.push(arg);
        self
    }
}

/// Read-only view of the functions currently registered with the binding.
///
/// `snapshot` returns entries in registry order. The exporter never re-sorts
/// them, so the order here is the order of blocks in the generated file.
pub trait FunctionRegistry {
    fn snapshot(&self) -> Vec<FunctionInfo>;

    fn lookup(&self, name: &str) -> Option<FunctionInfo> {
        self.snapshot().into_iter().find(|info| info.name == name)
    }
}

/// Ordered registry with unique names.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    functions: Vec<FunctionInfo>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `info`, replacing an existing entry of the same name in place.
    pub fn register(&mut self, info: FunctionInfo) {
        match self
            .functions
            .iter_mut()
            .find(|existing| existing.name == info.name)
        {
            Some(existing) => *existing = info,
            None => self.functions.push(info),
        }
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FromIterator<FunctionInfo> for InMemoryRegistry {
    fn from_iter<I: IntoIterator<Item = FunctionInfo>>(iter: I) -> Self {
        let mut registry = Self::new();
        for info in iter {
            registry.register(info);
        }
        registry
    }
}

impl FunctionRegistry for InMemoryRegistry {
    fn snapshot(&self) -> Vec<FunctionInfo> {
        self.functions.clone()
    }

    fn lookup(&self, name: &str) -> Option<FunctionInfo> {
        self.functions.iter().find(|info| info.name == name).cloned()
    }
}
