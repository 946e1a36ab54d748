use clap::Parser;
use std::path::PathBuf;
use std::process;
use stressor_cli::report::{anomalies_exceeded, render_report};
use stressor_cli::run::{execute, export_csv, RunConfig};
use stressor_common::{
    LatencyProfile, Scenario, DEFAULT_BASE_LATENCY_MS, DEFAULT_JITTER_MS, DEFAULT_SPIKE_CHANCE,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stressor", about = "Synthetic latency load simulator")]
struct Args {
    /// Number of simulated clients
    #[arg(long, default_value_t = 10)]
    clients: u32,

    /// Requests per second issued by each client
    #[arg(long, default_value_t = 5.0)]
    rps: f64,

    /// Simulated run length (seconds)
    #[arg(long, default_value_t = 10)]
    duration: u32,

    /// Baseline request latency (ms)
    #[arg(long, default_value_t = DEFAULT_BASE_LATENCY_MS)]
    base_latency: f64,

    /// Jitter width (ms); the Gaussian term uses half of it
    #[arg(long, default_value_t = DEFAULT_JITTER_MS)]
    jitter: f64,

    /// Probability of a tail-latency spike per request, 0..1
    #[arg(long, default_value_t = DEFAULT_SPIKE_CHANCE)]
    spike_chance: f64,

    /// Sample buffer capacity [default: 20% over the nominal request count, at least 1000]
    #[arg(long)]
    max_samples: Option<usize>,

    /// Fixed generator seed for a reproducible run [default: wall clock]
    #[arg(long)]
    seed: Option<u64>,

    /// Flag samples above mean x multiplier as anomalies
    #[arg(long, default_value_t = 2.0)]
    multiplier: f64,

    /// Maximum number of anomaly indices to collect [default: one per sample]
    #[arg(long)]
    max_out: Option<usize>,

    /// Write every sample to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Fail if more anomalies than this are found
    #[arg(long)]
    max_anomalies: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = RunConfig {
        scenario: Scenario {
            clients: args.clients,
            requests_per_second_per_client: args.rps,
            duration_secs: args.duration,
            latency: LatencyProfile {
                base_ms: args.base_latency,
                jitter_ms: args.jitter,
                spike_chance: args.spike_chance,
            },
        },
        seed: args.seed,
        max_samples: args.max_samples,
        multiplier: args.multiplier,
        max_out: args.max_out,
    };

    let run = execute(&config).unwrap_or_else(|e| {
        eprintln!("Simulation failed: {e}");
        process::exit(3);
    });

    if let Some(path) = &args.csv {
        export_csv(path, &run.samples).unwrap_or_else(|e| {
            eprintln!("Failed to write {}: {e}", path.display());
            process::exit(3);
        });
    }

    if args.json {
        let json = serde_json::to_string_pretty(&run.report).unwrap_or_else(|e| {
            eprintln!("Failed to encode report: {e}");
            process::exit(3);
        });
        println!("{json}");
    } else {
        print!("{}", render_report(&run.report, args.max_anomalies));
    }

    let exit_code = if anomalies_exceeded(&run.report, args.max_anomalies) { 1 } else { 0 };
    process::exit(exit_code);
}
