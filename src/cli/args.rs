//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// jlinkw - Build Java runtime images with jlink
///
/// Prepares a JDK through a provider, collects the modules to link and
/// runs jlink from a registered toolchain.
#[derive(Parser, Debug)]
#[command(name = "jlinkw")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "JLINKW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local jlinkw.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,

    /// Plain output without spinners or colors
    #[arg(long, global = true)]
    pub plain: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a runtime image with jlink
    Build(BuildArgs),

    /// Print the modules that would be passed to --add-modules
    Modules(ModulesArgs),

    /// List registered JDK toolchains
    Toolchains,

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the build command
#[derive(Parser, Debug, Default)]
pub struct BuildArgs {
    /// Image output folder (deleted before linking)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Modules to add (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub add_modules: Vec<String>,

    /// jdeps report to collect module names from
    #[arg(long)]
    pub jdeps_report: Option<PathBuf>,

    /// JDK whose jlink is used instead of a registered toolchain
    #[arg(long)]
    pub tool_jdk: Option<PathBuf>,

    /// JDK provider (e.g. local)
    #[arg(long)]
    pub provider: Option<String>,

    /// Build runs offline; providers may only use cached JDKs
    #[arg(long)]
    pub offline: bool,

    /// Only use JDKs already in the cache
    #[arg(long)]
    pub use_only_cache: bool,

    /// Skip the build step
    #[arg(long)]
    pub skip: bool,

    /// Options passed to jlink as is
    #[arg(last = true)]
    pub jlink_options: Vec<String>,
}

/// Arguments for the modules command
#[derive(Parser, Debug)]
pub struct ModulesArgs {
    /// jdeps report to collect module names from
    #[arg(long)]
    pub jdeps_report: Option<PathBuf>,

    /// Modules to add (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub add_modules: Vec<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}
