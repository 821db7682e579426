//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use kinship_domain::Sex;
use kinship_pedigree::CensusCounts;
use std::path::PathBuf;

/// Kinship CLI - Build and lay out pedigree charts.
#[derive(Debug, Parser)]
#[command(name = "kinship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (TOML with [layout] and [viewport])
    #[arg(short, long, global = true, env = "KINSHIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON snapshot
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seed a pedigree from relative counts and print its layout
    Seed(SeedArgs),

    /// Run a TOML script of census counts and relative additions
    Run(RunArgs),

    /// List the relation keywords understood by `run`
    Relations,
}

/// Arguments for the seed command.
#[derive(Debug, Parser)]
pub struct SeedArgs {
    /// Sex of the respondent
    #[arg(short, long, value_enum, default_value = "female")]
    pub sex: SexArg,

    /// Number of brothers
    #[arg(long, default_value = "0")]
    pub brothers: u32,

    /// Number of sisters
    #[arg(long, default_value = "0")]
    pub sisters: u32,

    /// Number of sons
    #[arg(long, default_value = "0")]
    pub sons: u32,

    /// Number of daughters
    #[arg(long, default_value = "0")]
    pub daughters: u32,

    /// Number of mother's brothers
    #[arg(long, default_value = "0")]
    pub maternal_uncles: u32,

    /// Number of mother's sisters
    #[arg(long, default_value = "0")]
    pub maternal_aunts: u32,

    /// Number of father's brothers
    #[arg(long, default_value = "0")]
    pub paternal_uncles: u32,

    /// Number of father's sisters
    #[arg(long, default_value = "0")]
    pub paternal_aunts: u32,
}

impl SeedArgs {
    /// The counts as seeding input
    pub fn counts(&self) -> CensusCounts {
        CensusCounts {
            brothers: self.brothers,
            sisters: self.sisters,
            sons: self.sons,
            daughters: self.daughters,
            maternal_uncles: self.maternal_uncles,
            maternal_aunts: self.maternal_aunts,
            paternal_uncles: self.paternal_uncles,
            paternal_aunts: self.paternal_aunts,
        }
    }
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Script file
    pub script: PathBuf,
}

/// Sex argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SexArg {
    /// Male
    Male,
    /// Female
    Female,
}

impl From<SexArg> for Sex {
    fn from(sex: SexArg) -> Self {
        match sex {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
        }
    }
}

impl From<CliFormat> for crate::output::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::output::OutputFormat::Table,
            CliFormat::Json => crate::output::OutputFormat::Json,
        }
    }
}
