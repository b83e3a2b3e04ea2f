use anyhow::{Context, Result};
use clap::Parser;
use keytally::constants::ENV_PARALLELISM;
use keytally::{Pipeline, Record};
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    /// Input CSV of flight rows: passenger id first, 6 columns total
    #[arg(long)]
    input: String,
    /// Map worker count; defaults to KEYTALLY_PARALLELISM or all cores
    #[arg(long)]
    parallelism: Option<usize>,
}

fn read_records(path: &str) -> Result<Vec<Record>> {
    // flexible: wrong-arity rows must reach the pipeline, which drops them.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path))?;
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.with_context(|| format!("read {}", path))?;
        records.push(row.iter().collect::<Record>());
    }
    Ok(records)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let records = read_records(&args.input)?;
    let parallelism = args.parallelism.or_else(|| {
        std::env::var(ENV_PARALLELISM).ok().and_then(|v| v.parse::<usize>().ok())
    });
    let pipeline = match parallelism {
        Some(n) => Pipeline::with_parallelism(n),
        None => Pipeline::new(),
    };

    let summary = pipeline.run(&records)?;
    if summary.stats.skipped > 0 {
        info!(skipped = summary.stats.skipped, "rows without exactly 6 fields were dropped");
    }

    println!("Passengers with the highest number of flights:");
    for passenger in summary.selection.sorted_winners() {
        println!(
            "Passenger ID: {} | Number of flights: {}",
            passenger, summary.selection.max_count
        );
    }
    Ok(())
}
