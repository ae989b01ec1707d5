//! Hybrid cache trace replayer.
//!
//! This binary replays a memory trace against the hybrid SRAM/NVM cache model
//! and reports the resulting statistics. It performs:
//! 1. **Configuration:** Loads a JSON config, or uses the built-in defaults.
//! 2. **Replay:** Feeds every trace record through the simulator.
//! 3. **Reporting:** Prints the text report (optionally only some sections) or JSON.

use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hdm_core::config::Config;
use hdm_core::sim::Simulator;
use hdm_core::sim::trace;
use hdm_core::stats::STATS_SECTIONS;

#[derive(Parser, Debug)]
#[command(
    name = "hdmsim",
    author,
    version,
    about = "Hybrid SRAM/NVM cache simulator",
    long_about = "Replay a memory trace against a hybrid SRAM/NVM cache with wear-leveling LRU replacement.\n\nTrace lines are `<R|W|I> <hex address>`; `#` starts a comment.\n\nExamples:\n  hdmsim run -t traces/stream.trace\n  hdmsim run -c configs/l2.json -t traces/stream.trace --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print statistics.
    Run {
        /// JSON configuration file (defaults are used when omitted).
        #[arg(short, long)]
        config: Option<String>,

        /// Trace file to replay.
        #[arg(short, long)]
        trace: String,

        /// Print statistics as JSON instead of text.
        #[arg(long)]
        json: bool,

        /// Report sections to print (summary, media, policy); all when omitted.
        #[arg(short, long, value_delimiter = ',')]
        sections: Vec<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            trace,
            json,
            sections,
        } => cmd_run(config.as_deref(), &trace, json, &sections),
    }
}

/// Loads config and trace, replays, and prints the report.
///
/// Exits the process with code 1 on any configuration, trace or output error.
fn cmd_run(config_path: Option<&str>, trace_path: &str, json: bool, sections: &[String]) {
    let config = match config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: {path}: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    };

    if let Some(unknown) = sections
        .iter()
        .find(|s| !STATS_SECTIONS.contains(&s.as_str()))
    {
        eprintln!(
            "Error: unknown section `{unknown}` (expected one of {})",
            STATS_SECTIONS.join(", ")
        );
        process::exit(1);
    }

    let records = trace::load_trace(trace_path).unwrap_or_else(|e| {
        eprintln!("Error: {trace_path}: {e}");
        process::exit(1);
    });

    let mut sim = Simulator::new(&config).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    info!(
        sets = sim.cache.num_sets(),
        ways = sim.cache.ways(),
        threshold = config.cache.write_skew_threshold,
        records = records.len(),
        "replaying trace"
    );
    sim.run(records);

    if json {
        match serde_json::to_string_pretty(sim.stats()) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: cannot encode statistics: {e}");
                process::exit(1);
            }
        }
    } else {
        sim.stats().print_sections(sections);
    }
}
