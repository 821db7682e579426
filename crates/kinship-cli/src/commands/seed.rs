//! Seed command implementation.

use crate::cli::SeedArgs;
use crate::error::Result;
use crate::output::Formatter;
use kinship_pedigree::Pedigree;

/// Execute the seed command.
pub fn execute_seed(args: SeedArgs, pedigree: &mut Pedigree, formatter: &Formatter) -> Result<()> {
    let counts = args.counts();
    let scaffold = pedigree.generate_placeholder_network(&counts, args.sex.into())?;

    if !formatter.is_json() {
        println!(
            "{}",
            formatter.success(&format!(
                "Seeded {} node(s), {} relative(s)",
                scaffold.node_count(),
                scaffold.relatives.len()
            ))
        );
    }
    println!("{}", formatter.format_pedigree(pedigree)?);

    Ok(())
}
