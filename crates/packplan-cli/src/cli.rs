//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use packplan_config::Mode;

/// packplan - bundler configuration composer for multi-page projects
#[derive(Parser, Debug)]
#[command(
    name = "packplan",
    version,
    about = "Compose a bundler configuration from a declarative project description"
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compose the bundler configuration and print it as JSON
    Print(PrintArgs),

    /// Load and compose the declaration, reporting problems
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Build mode to compose for (development or production)
    #[arg(short, long, default_value = "production")]
    pub mode: Mode,

    /// Project directory (defaults to the working directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Explicit declaration file, bypassing discovery
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the configuration to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Emit compact single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Build mode to compose for (development or production)
    #[arg(short, long, default_value = "production")]
    pub mode: Mode,

    /// Project directory (defaults to the working directory)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Explicit declaration file, bypassing discovery
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
