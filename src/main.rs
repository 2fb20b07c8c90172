//! spark-primer CLI
//!
//! Runs the DataFrame walkthrough and prints every step to stdout.
//!
//! # Usage
//!
//! ```bash
//! # Whole tour against the bundled sample data
//! spark-primer
//!
//! # Only the literal-dataset steps, 3 rows per table
//! spark-primer --rows 3 --step literal --step filter --step group-by
//!
//! # Your own copy of the fire data, with engine logging
//! RUST_LOG=info spark-primer --data /path/to/forestfires.csv
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use spark_primer::fires::DEFAULT_DATA_PATH;
use spark_primer::{EngineError, SessionConfig, Tour};

#[derive(Parser, Debug)]
#[command(name = "spark-primer")]
#[command(about = "A guided tour of a Spark-style DataFrame API next to an eager in-memory DataFrame", long_about = None)]
struct Args {
    /// Forest-fire CSV file
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Rows printed by each table (overrides SPARK_PRIMER_SHOW_ROWS)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Run only the named step; repeat to run several in the given order
    #[arg(short, long = "step", value_name = "NAME")]
    steps: Vec<String>,

    /// List the steps and exit
    #[arg(long)]
    list: bool,

    /// Match column names case-sensitively
    #[arg(long)]
    case_sensitive: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("spark-primer: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), EngineError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        for (i, step) in Tour::list().iter().enumerate() {
            let marker = if step.needs_data { " (fire data)" } else { "" };
            writeln!(out, "{:>2}. {:<18} {}{}", i + 1, step.name, step.title, marker)?;
        }
        return Ok(());
    }

    let mut config = SessionConfig::from_env();
    if let Some(n) = args.rows {
        config.show_rows = n;
    }
    if args.case_sensitive {
        config.case_sensitive = true;
    }
    log::debug!("session config: {config:?}");

    let mut tour = Tour::new(config, args.data);
    let summary = if args.steps.is_empty() {
        tour.run_all(&mut out)?
    } else {
        let names: Vec<&str> = args.steps.iter().map(String::as_str).collect();
        tour.run_only(&names, &mut out)?
    };
    if !summary.skipped.is_empty() {
        writeln!(
            out,
            "{} step(s) skipped: {}",
            summary.skipped.len(),
            summary.skipped.join(", ")
        )?;
    }
    out.flush()?;
    Ok(())
}
