use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULTS: &str = include_str!("../../config/default.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExportConfig {
    pub filter: FilterConfig,
    pub variadic: VariadicConfig,
    pub docstring: DocstringConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterConfig {
    pub internal_marker: String,
    pub export_marker: String,
    pub denylist: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariadicConfig {
    pub prefix: String,
    pub public_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocstringConfig {
    pub remove_duplicate_args: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    pub relative_path: PathBuf,
    pub create_dirs: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig {
                internal_marker: "internal.".to_string(),
                export_marker: "@export".to_string(),
                denylist: [
                    "mx.varg.symbol.Concat",
                    "mx.varg.symbol.concat",
                    "mx.varg.symbol.min_axis",
                    "mx.varg.symbol.min",
                ]
                .into_iter()
                .map(String::from)
                .collect(),
            },
            variadic: VariadicConfig {
                prefix: "mx.varg.".to_string(),
                public_prefix: "mx.".to_string(),
            },
            docstring: DocstringConfig {
                remove_duplicate_args: true,
            },
            output: OutputConfig {
                relative_path: PathBuf::from("R/mxnet_generated.R"),
                create_dirs: false,
            },
        }
    }
}

impl ExportConfig {
    /// Load configuration with layering: defaults → user config → explicit file.
    ///
    /// Layers are merged table by table, so an override only needs the keys it
    /// changes.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut layers = Vec::new();

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "mxexport") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                layers.push(read_layer(&config_path)?);
            }
        }

        if let Some(path) = explicit {
            layers.push(read_layer(path)?);
        }

        Self::from_layers(&layers)
    }

    pub fn from_layers(layers: &[String]) -> Result<Self> {
        let mut merged: toml::Table = toml::from_str(DEFAULTS).context("embedded defaults")?;

        for layer in layers {
            let overlay: toml::Table = toml::from_str(layer)?;
            merge_tables(&mut merged, overlay);
        }

        let config: Self = toml::Value::Table(merged).try_into()?;
        Ok(config)
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        root.join(&self.output.relative_path)
    }
}

fn read_layer(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))
}

fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(incoming) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, incoming);
                continue;
            }
            base.insert(key, toml::Value::Table(incoming));
        } else {
            base.insert(key, value);
        }
    }
}
