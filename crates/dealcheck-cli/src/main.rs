mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::schedule::ScheduleArgs;
use output::Report;

/// Rental property deal analysis with decimal precision
#[derive(Parser)]
#[command(
    name = "dealcheck",
    version,
    about = "Rental property deal analysis with decimal precision",
    long_about = "Analyze rental property deals with decimal precision. Computes \
                  cash flow, cap rate, cash-on-cash return, DSCR, and gross rent \
                  multiplier, generates full amortization schedules, and raises \
                  heuristic risk flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full deal analysis: metrics, amortization aggregates, risk flags
    Analyze(AnalyzeArgs),
    /// Monthly amortization schedule for a fixed-rate loan
    Schedule(ScheduleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<Report, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Schedule(args) => commands::schedule::run(args),
        Commands::Version => {
            println!("dealcheck {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(report) => {
            output::render(&cli.output, &report);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
