mod alerts;
mod bands;
mod config;
mod paths;
mod report;
mod scoring;
mod solar;
mod spots;

use chrono::{Duration, Timelike, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::Config;
use crate::report::build_report;
use crate::solar::{muf_curve, SolarState};
use crate::spots::{load_with_fallback, SpotMode};

#[derive(Parser)]
#[command(name = "hfprop")]
#[command(about = "HF propagation scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the deterministic 24-hour MUF forecast
    Forecast {
        /// Solar flux index
        #[arg(long)]
        sfi: f64,
        /// Planetary K index
        #[arg(long)]
        kp: f64,
    },
    /// Compute the full conditions report
    Report {
        /// Solar flux index
        #[arg(long)]
        sfi: f64,
        /// Planetary K index
        #[arg(long)]
        kp: f64,
        /// Previous-cycle SFI (defaults to the current value)
        #[arg(long)]
        sfi_prev: Option<f64>,
        /// Previous-cycle Kp (defaults to the current value)
        #[arg(long)]
        kp_prev: Option<f64>,
        /// JSON file of WSPR spot reports (bundled snapshot if omitted)
        #[arg(long)]
        wspr: Option<PathBuf>,
        /// JSON file of FT8 spot reports (bundled snapshot if omitted)
        #[arg(long)]
        ft8: Option<PathBuf>,
        /// Station config file (YAML)
        #[arg(long)]
        config: Option<String>,
        /// Alert freshness window, e.g. "24h" or "90m"
        #[arg(long)]
        max_age: Option<String>,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast { sfi, kp } => forecast(sfi, kp),
        Commands::Report {
            sfi,
            kp,
            sfi_prev,
            kp_prev,
            wspr,
            ft8,
            config,
            max_age,
        } => report(sfi, kp, sfi_prev, kp_prev, wspr, ft8, config, max_age),
    }
}

fn forecast(sfi: f64, kp: f64) -> ExitCode {
    let solar = SolarState {
        sfi,
        sfi_prev: sfi,
        kp,
        kp_prev: kp,
    }
    .sanitized();
    let curve = muf_curve(solar.sfi, solar.kp, Utc::now().hour());
    print_json(&curve)
}

#[allow(clippy::too_many_arguments)]
fn report(
    sfi: f64,
    kp: f64,
    sfi_prev: Option<f64>,
    kp_prev: Option<f64>,
    wspr: Option<PathBuf>,
    ft8: Option<PathBuf>,
    config_path: Option<String>,
    max_age: Option<String>,
) -> ExitCode {
    let config = match config_path {
        Some(path) => match Config::from_file(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let window = match max_age {
        Some(s) => match parse_window(&s) {
            Ok(w) => w,
            Err(e) => {
                eprintln!("Invalid freshness window: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => alerts::default_freshness_window(),
    };

    let solar = SolarState {
        sfi,
        sfi_prev: sfi_prev.unwrap_or(sfi),
        kp,
        kp_prev: kp_prev.unwrap_or(kp),
    };

    let wspr_reports = load_with_fallback(wspr.as_deref(), SpotMode::Wspr);
    let ft8_reports = load_with_fallback(ft8.as_deref(), SpotMode::Ft8);

    let report = build_report(
        solar,
        &wspr_reports,
        &ft8_reports,
        &config,
        Utc::now(),
        window,
    );
    print_json(&report)
}

fn parse_window(s: &str) -> Result<Duration, String> {
    let std_duration = humantime::parse_duration(s.trim()).map_err(|e| e.to_string())?;
    Duration::from_std(std_duration).map_err(|e| e.to_string())
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error encoding output: {}", e);
            ExitCode::FAILURE
        }
    }
}
