//! Fuzzy c-means command line tool.
//!
//! ## Usage
//!
//! ```bash
//! cmeans data.txt 3
//! cmeans data.txt 3 --epsilon 0.0001 --fuzziness 2.5 --seed 42 --memberships
//! ```
//!
//! The data file holds one instance per line, attributes separated by whitespace. Lines starting
//! with `#` or `//` are comments. The resulting centroids are printed to stdout, one per line.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use rand::SeedableRng;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use cmeans::{AbortStrategy, Dataset, FuzzyCMeans, FuzzyCMeansConfig, Variant};

#[derive(Parser, Debug)]
#[command(name = "cmeans", version)]
#[command(about = "Fuzzy c-means clustering of a whitespace separated numeric dataset")]
struct Args {
    /// Path to the dataset, one instance per line with attributes separated by spaces
    path: PathBuf,

    /// Number of clusters to use
    clusters: usize,

    /// Stop once the partition matrix changes by at most this amount (sum of absolute differences)
    #[arg(long, default_value_t = cmeans::DEFAULT_EPSILON)]
    epsilon: f64,

    /// Fuzziness exponent m; values below 1 are replaced by 2
    #[arg(long, default_value_t = cmeans::DEFAULT_FUZZINESS)]
    fuzziness: f64,

    /// Maximum number of iterations, 0 iterates until convergence
    #[arg(long, default_value_t = cmeans::DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Seed for the partition initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Use the formulas of the original c-means tool
    #[arg(long)]
    legacy: bool,

    /// Also print the partition (membership) matrix
    #[arg(long)]
    memberships: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn print_usage() {
    println!();
    println!("{}", Args::command().render_usage());
    println!();
    println!("[PATH]      location of the text file holding the dataset, with attributes separated");
    println!("            by spaces and one instance per line");
    println!("[CLUSTERS]  number of clusters to use");
}

/// Translate the command line options into a calculation config.
fn build_config(args: &Args) -> FuzzyCMeansConfig<'static, f64> {
    let abort_strategy = if args.max_iter == 0 {
        AbortStrategy::PartitionDelta { epsilon: args.epsilon }
    } else {
        AbortStrategy::PartitionDeltaOrMaxIterations { epsilon: args.epsilon, max_iter: args.max_iter }
    };
    let mut builder = FuzzyCMeansConfig::build()
        .abort_strategy(abort_strategy)
        .fuzziness(args.fuzziness)
        .variant(if args.legacy { Variant::Legacy } else { Variant::Standard });
    if let Some(seed) = args.seed {
        builder = builder.random_generator(rand::rngs::StdRng::seed_from_u64(seed));
    }
    builder.build()
}

fn run(args: &Args) -> Result<()> {
    let dataset = Dataset::<f64>::from_path(&args.path)
        .with_context(|| format!("could not load dataset {}", args.path.display()))?;
    debug!(instances = dataset.instance_cnt(), attributes = dataset.attribute_cnt(), "dataset loaded");
    let conf = build_config(args);

    let result = FuzzyCMeans::new(&dataset)
        .fit(args.clusters, FuzzyCMeans::init_random_walk, &conf)
        .context("error while running the c-means method")?;

    print!("{}", result);
    if args.memberships {
        println!();
        print!("{}", result.render_partition());
    }
    Ok(())
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => {
            let _ = err.print();
            print_usage();
            process::exit(1);
        }
    };

    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to install logger: {}", err);
    }

    if let Err(err) = run(&args) {
        println!("{:#}", err);
        print_usage();
        process::exit(1);
    }
}
