use clap::Parser;
use neo_approaches::extract::{load_approaches, load_neos};
use neo_approaches::ui::cli::Args;
use neo_approaches::ui::output::{print_export_report, print_load_summary};
use neo_approaches::{NeoDatabase, Result, write_results};
use std::process;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<()> {
    args.validate()?;

    let neos = load_neos(&args.neofile)?;
    let approaches = load_approaches(&args.cadfile)?;
    let db = NeoDatabase::new(neos, approaches)?;
    print_load_summary(&db);

    let results = db.approaches();
    write_results(results, &args.outfile)?;
    print_export_report(results.len(), &args.outfile);

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
