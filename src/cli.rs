//! Command-line interface implementation for sitebaker.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::DEFAULT_NPM_CLIENT;
use clap::Parser;
use std::path::PathBuf;

/// Template tree shipped with the crate.
pub const DEFAULT_TEMPLATE_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/template");

/// Command-line arguments structure for sitebaker.
#[derive(Parser, Debug)]
#[command(author, version, about = "sitebaker: interactive static site scaffolding tool", long_about = None)]
pub struct Args {
    /// Directory where the site will be generated
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Path to the template directory
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_TEMPLATE_DIR)]
    pub template: PathBuf,

    /// Overwrite conflicting files without asking
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Read answers as JSON or YAML from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Do not ask for confirmation before generating
    #[arg(short, long)]
    pub yes: bool,

    /// Do not install dependencies after writing the manifest
    #[arg(long)]
    pub skip_install: bool,

    /// Package manager used to install dependencies
    #[arg(long, value_name = "NAME", default_value = DEFAULT_NPM_CLIENT)]
    pub npm_client: String,
}

/// Parses command line arguments and returns the Args structure.
///
/// Exits with clap's error handling on invalid arguments.
pub fn get_args() -> Args {
    Args::parse()
}
