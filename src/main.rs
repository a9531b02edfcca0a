//! namegen CLI
//!
//! Usage:
//!   namegen [OPTIONS] <FILE>
//!
//! Options:
//!   -n, --number <N>            Number of generations to print (default 1)
//!   -s, --seed <SEED>           Seed the random number generator
//!       --start <TEXT>          Start text instead of <<START>>
//!       --max-iterations <N>    Iteration budget per generation
//!   -c, --config <FILE>         Generation settings (TOML format)
//!   -d, --debug                 Trace every substitution on stderr
//!       --lint                  Report definition problems before generating
//!   -h, --help                  Print help

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use namegen::{generate_with_config, lint, GeneratorConfig, GeneratorDefinition};

#[derive(Parser)]
#[command(name = "namegen")]
#[command(about = "Random name generator using JSON generator files")]
struct Cli {
    /// The JSON (or TOML) file defining the generator
    generator_file: PathBuf,

    /// The number of generations to return
    #[arg(short, long, default_value_t = 1)]
    number: usize,

    /// Seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Text to expand instead of the start tag
    #[arg(long)]
    start: Option<String>,

    /// Maximum substitution passes per generation
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Generation settings file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug mode: trace every substitution on stderr
    #[arg(short, long)]
    debug: bool,

    /// Check the definition and print warnings to stderr
    #[arg(long)]
    lint: bool,
}

fn main() {
    let cli = Cli::parse();

    // Load settings, then let flags override them
    let mut config = match &cli.config {
        Some(path) => match GeneratorConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => GeneratorConfig::default(),
    };
    if let Some(max) = cli.max_iterations {
        config = config.with_max_iterations(max);
    }
    if cli.debug {
        config = config.with_debug(true);
    }

    let definition = match GeneratorDefinition::from_file(&cli.generator_file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!(
                "Error loading generator '{}': {}",
                cli.generator_file.display(),
                e
            );
            std::process::exit(1);
        }
    };

    if cli.lint {
        for warning in lint::check(&definition) {
            eprintln!("warning[{}]: {}", warning.category, warning.message);
        }
    }

    let start = cli.start.clone().unwrap_or_else(|| config.start_text());
    let seed = cli.seed.unwrap_or_else(rand::random);
    if config.debug {
        eprintln!("seed: {}", seed);
    }
    let mut rng = StdRng::seed_from_u64(seed);

    for _ in 0..cli.number {
        match generate_with_config(&start, &definition, &config, &mut rng) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                let filename = cli.generator_file.display().to_string();
                eprint!("{}", e.format(&filename));
                std::process::exit(1);
            }
        }
    }
}
