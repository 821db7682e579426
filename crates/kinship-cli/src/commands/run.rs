//! Run command implementation.

use crate::cli::RunArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::script::Script;
use kinship_pedigree::Pedigree;

/// Execute the run command.
pub fn execute_run(args: RunArgs, pedigree: &mut Pedigree, formatter: &Formatter) -> Result<()> {
    let script = Script::from_file(&args.script)?;
    let outcomes = script.apply(pedigree)?;

    if !formatter.is_json() && !outcomes.is_empty() {
        println!("{}", formatter.format_outcomes(&outcomes));
    }
    println!("{}", formatter.format_pedigree(pedigree)?);

    Ok(())
}
