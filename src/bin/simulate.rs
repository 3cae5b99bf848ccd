//! Battle balance simulator CLI.
//!
//! Plays consecutive encounters with the autopilot party and reports how
//! they went.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                         # Default: 100 battles
//!   cargo run --bin simulate -- -n 500 --seed 42     # Reproducible run
//!   cargo run --bin simulate -- --config tuning.json # Custom battle tuning

use skirmish::core::BattleConfig;
use skirmish::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let args: Vec<String> = env::args().collect();
    let (config, write_json) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Run with --help for usage.");
            process::exit(2);
        }
    };

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              SKIRMISH BATTLE SIMULATOR                        ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Battles:        {}", config.battles);
    println!("  Escape Chance:  {}", config.battle_config.escape_chance);
    println!("  Max Group:      {}", config.battle_config.max_group_size);
    println!("  Round Cap:      {}", config.max_rounds_per_battle);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match run_simulation(&config) {
        Ok(report) => report,
        Err(err) => {
            tracing::error!(%err, "simulation failed");
            process::exit(1);
        }
    };

    println!("{}", report.to_text());

    if write_json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(err) => {
                tracing::error!(%err, file = %filename, "failed to write JSON report");
                process::exit(1);
            }
        }
    }
}

/// `RUST_LOG` as given, or `info` when it is unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn parse_args(args: &[String]) -> Result<(SimConfig, bool), String> {
    let mut config = SimConfig::default();
    let mut write_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--battles" => {
                let value = next_value(args, &mut i)?;
                config.battles = value
                    .parse()
                    .map_err(|_| format!("invalid battle count: {value}"))?;
            }
            "-s" | "--seed" => {
                let value = next_value(args, &mut i)?;
                config.seed = Some(value.parse().map_err(|_| format!("invalid seed: {value}"))?);
            }
            "--config" => {
                let value = next_value(args, &mut i)?;
                config.battle_config =
                    BattleConfig::load(Path::new(value)).map_err(|err| format!("{value}: {err}"))?;
            }
            "--json" => {
                write_json = true;
            }
            "-v" | "--verbose" => {
                config.verbose = true;
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => return Err(format!("unknown option: {other}")),
        }
        i += 1;
    }

    Ok((config, write_json))
}

fn next_value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn print_help() {
    println!("Skirmish Battle Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --battles <N>   Number of consecutive battles (default: 100)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    --config <FILE>     Battle tuning JSON (missing keys keep defaults)");
    println!("    --json              Save JSON report");
    println!("    -v, --verbose       One line per battle");
    println!("    -h, --help          Show this help");
    println!();
    println!("Set RUST_LOG=skirmish=debug to trace every battle message.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn test_log_filter_keeps_user_level() {
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(
            log_filter(Some("skirmish=debug")).max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }

    #[test]
    fn test_log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }
}
