//! Lunar lander balance simulator CLI.
//!
//! Run Monte Carlo simulations of autopiloted sessions to analyze difficulty.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                       # Default: 100 runs, Journeyman
//!   cargo run --bin simulate -- -n 500 -d master   # 500 runs on Master
//!   cargo run --bin simulate -- --seed 42 --json   # Reproducible, JSON output

use lunar_lander::build_info;
use lunar_lander::config::{LanderConfig, LanderDifficulty};
use lunar_lander::simulator::{run_simulation, SimConfig};
use std::env;
use std::fs;
use std::process;
use tracing_subscriber::filter::EnvFilter;

struct CliOptions {
    config: SimConfig,
    json: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Run with --help for usage.");
            process::exit(2);
        }
    };
    let config = options.config;

    init_tracing(config.verbosity);

    if !options.json {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              LUNAR LANDER BALANCE SIMULATOR                   ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!("  {}", build_info::version_line());
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        match config.lander {
            Some(_) => println!("  Tuning:         custom"),
            None => println!("  Difficulty:     {}", config.difficulty.name()),
        }
        println!("  Max Frames:     {}", config.max_frames_per_run);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        }
    };

    if options.json {
        println!("{}", report.to_json());
    } else {
        println!("{}", report.to_text());
    }
}

/// Log to stderr. `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbosity: u8) {
    let default_level = if verbosity >= 2 { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut config = SimConfig::default();
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                config.num_runs = parse_value(args, i, "--runs")?;
                i += 1;
            }
            "-s" | "--seed" => {
                config.seed = Some(parse_value(args, i, "--seed")?);
                i += 1;
            }
            "-f" | "--frames" => {
                config.max_frames_per_run = parse_value(args, i, "--frames")?;
                i += 1;
            }
            "-d" | "--difficulty" => {
                let name = value(args, i, "--difficulty")?;
                config.difficulty = LanderDifficulty::from_name(name)
                    .ok_or_else(|| format!("unknown difficulty '{}'", name))?;
                i += 1;
            }
            "--config" => {
                let path = value(args, i, "--config")?;
                let text = fs::read_to_string(path)
                    .map_err(|err| format!("cannot read {}: {}", path, err))?;
                let lander = LanderConfig::from_json(&text).map_err(|err| err.to_string())?;
                config.lander = Some(lander);
                i += 1;
            }
            "--json" => {
                json = true;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    Ok(CliOptions { config, json })
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = value(args, i, flag)?;
    raw.parse()
        .map_err(|_| format!("invalid value '{}' for {}", raw, flag))
}

fn print_help() {
    println!("Lunar Lander Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>          Number of simulated sessions (default: 100)");
    println!("    -s, --seed <S>          Random seed for reproducibility");
    println!("    -f, --frames <F>        Max frames per session (default: 100,000)");
    println!("    -d, --difficulty <D>    novice, apprentice, journeyman or master");
    println!("    --config <FILE>         Lander tuning as JSON (overrides --difficulty)");
    println!("    --json                  Print the report as JSON");
    println!("    -v, --verbose           Per-run logging");
    println!("    -h, --help              Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                        # Default run");
    println!("    cargo run --bin simulate -- -n 500 -d master    # Hardest preset");
    println!("    cargo run --bin simulate -- --seed 42           # Reproducible");
    println!("    cargo run --bin simulate -- --config low_g.json # Custom tuning");
}
