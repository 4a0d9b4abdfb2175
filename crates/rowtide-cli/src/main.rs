//! rowtide CLI: stream, filter, and summarize user tables.

use clap::{Parser, Subcommand};
use std::path::Path;
use std::path::PathBuf;

use rowtide_core::prelude::PipelineConfig;
use rowtide_exec::Pipeline;
use rowtide_io::CsvTable;
use rowtide_stages::{RecordStream, RowStream};

#[derive(Parser)]
#[command(name = "rowtide")]
#[command(about = "Bounded-memory row streaming and batch filtering over tabular stores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream a table and print records passing the age filter
    Run {
        /// Path to the CSV table (id,name,email,age header)
        #[arg(short, long)]
        table: PathBuf,

        /// Rows per batch (overrides env/config)
        #[arg(long)]
        batch_size: Option<usize>,

        /// Keep records with age strictly greater than this
        #[arg(long)]
        min_age: Option<i64>,

        /// Stop after this many matches
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Stream the table once and report the average age
    Stats {
        /// Path to the CSV table
        #[arg(short, long)]
        table: PathBuf,
    },

    /// Check that a table opens and every row decodes
    Check {
        /// Path to the CSV table
        #[arg(short, long)]
        table: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            table,
            batch_size,
            min_age,
            limit,
        } => {
            if let Err(e) = run_table(&table, batch_size, min_age, limit) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Stats { table } => {
            if let Err(e) = stats_table(&table) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Check { table } => {
            if let Err(e) = check_table(&table) {
                eprintln!("Check failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn run_table(
    table: &Path,
    batch_size: Option<usize>,
    min_age: Option<i64>,
    limit: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = PipelineConfig::from_env();
    apply_overrides(&mut cfg, batch_size, min_age, limit);

    let pipeline = Pipeline::new(cfg)?;
    let source = CsvTable::new(table);

    let summary = pipeline.run_with(&source, |record| println!("{record}"))?;

    println!("✓ Traversal complete");
    println!("  Rows scanned: {}", summary.rows_scanned);
    println!("  Batches: {}", summary.batches);
    println!("  Matches: {}", summary.matched);
    if summary.limited {
        println!("  Stopped at match limit");
    }
    println!("  Duration: {}ms", summary.duration_ms());

    Ok(())
}

fn stats_table(table: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new(PipelineConfig::from_env())?;
    let source = CsvTable::new(table);

    match pipeline.average_age(&source)? {
        Some(avg) => println!("Average age: {avg:.2}"),
        None => println!("Average age: 0.00 (empty table)"),
    }
    Ok(())
}

fn check_table(table: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = CsvTable::new(table);
    let mut rows = RowStream::open(&source)?;
    let mut count = 0u64;
    while rows.next_record()?.is_some() {
        count += 1;
    }
    rows.close()?;
    println!("✓ Table is valid ({count} rows)");
    Ok(())
}

/// CLI flags take priority over env, env over defaults.
fn apply_overrides(
    cfg: &mut PipelineConfig,
    batch_size: Option<usize>,
    min_age: Option<i64>,
    limit: Option<usize>,
) {
    if let Some(size) = batch_size {
        cfg.batch_size = size;
    }
    if let Some(age) = min_age {
        cfg.min_age = age;
    }
    if let Some(n) = limit {
        cfg.limit = Some(n);
    }
}
