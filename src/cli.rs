use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mxexport")]
#[command(about = "Export roxygen docs and variadic wrappers for the MXNet R package", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Root directory of the R package; output goes to <PATH>/R/mxnet_generated.R
    pub path: PathBuf,

    /// Registry snapshot to export (defaults to <PATH>/registry.toml)
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    /// Extra configuration file layered over the defaults
    #[arg(short, long, env = "MXEXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the generated file to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Mirror log output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn registry_path(&self) -> PathBuf {
        self.registry
            .clone()
            .unwrap_or_else(|| self.path.join("registry.toml"))
    }
}
