//! Kinship CLI - Seed, extend and lay out pedigree charts.

use clap::Parser;
use kinship_cli::commands;
use kinship_cli::{Cli, Command, Formatter};
use kinship_pedigree::{Pedigree, PedigreeConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let formatter = Formatter::new(cli.format.into(), !cli.no_color);
    if let Err(e) = run(cli, &formatter) {
        eprintln!("{}", formatter.error(&format!("Error: {}", e)));
        std::process::exit(1);
    }
}

/// Log to stderr; RUST_LOG overrides the -v flags
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli, formatter: &Formatter) -> kinship_cli::Result<()> {
    let config = match &cli.config {
        Some(path) => PedigreeConfig::from_file(path)?,
        None => PedigreeConfig::default(),
    };

    let mut pedigree = Pedigree::with_config(config);

    match cli.command {
        Command::Seed(args) => commands::execute_seed(args, &mut pedigree, formatter)?,
        Command::Run(args) => commands::execute_run(args, &mut pedigree, formatter)?,
        Command::Relations => commands::execute_relations(formatter),
    }

    Ok(())
}
