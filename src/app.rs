use anyhow::{Context, Result};
use log::info;

use crate::cli::Cli;
use crate::data::loader::load_file;
use crate::export::{format_table, write_csv_summary, write_json_report};
use crate::roi::{analyse, AggregationResult};

// ---------------------------------------------------------------------------
// Batch run: load → resolve → aggregate → export
// ---------------------------------------------------------------------------

/// Run one analysis as described by the command line.
///
/// Anchor failures surface as a [`crate::roi::RoiError`] inside the returned
/// error so the caller can tell them apart from I/O problems.
pub fn run(cli: &Cli) -> Result<AggregationResult> {
    let config = cli.roi_config().context("invalid configuration")?;
    let dataset = load_file(&cli.input)?;

    let result = analyse(&dataset, &config).context("cannot aggregate parameters")?;
    info!(
        "{} parameters aggregated, {} unresolved",
        result.outcomes.len() - result.unresolved_count(),
        result.unresolved_count()
    );

    print!("{}", format_table(&result));

    write_csv_summary(&result, &cli.output)?;
    println!("analysed values saved to '{}'", cli.output.display());

    if let Some(path) = &cli.report {
        write_json_report(&result, path)?;
        println!("region report saved to '{}'", path.display());
    }

    Ok(result)
}
