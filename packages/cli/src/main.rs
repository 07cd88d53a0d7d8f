use anyhow::{Context, Result};
use bankers_twin::infrastructure::{
    encode_json, encode_report, load_scenario_config, load_state, save_state,
};
use bankers_twin::{
    assess, Explorer, ProcessId, RequestArbiter, ResourceState, SafetyChecker,
    ScenarioConfig, Units,
};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

/// Banker's Algorithm simulator and verifier
#[derive(Parser)]
#[command(name = "bankers", version)]
#[command(about = "Deadlock avoidance with the Banker's Algorithm", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate every scenario within the configured bounds
    Explore(ExploreArgs),
    /// Report whether a state is safe, with a completion order when P is small
    Check {
        /// State document (JSON)
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Arbitrate a single request against a state
    Request {
        /// State document (JSON)
        #[arg(short, long)]
        state: PathBuf,
        /// Requesting process index
        #[arg(short, long)]
        process: usize,
        /// Request vector, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        vector: Vec<Units>,
        /// Write the resulting state here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ExploreArgs {
    /// Scenario configuration (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of processes
    #[arg(short = 'p', long)]
    processes: Option<usize>,
    /// Number of resource types
    #[arg(short = 'r', long)]
    resources: Option<usize>,
    /// Upper bound for generated values
    #[arg(long)]
    max_units: Option<Units>,
    /// Dynamic requests per scenario
    #[arg(long)]
    requests: Option<usize>,
    /// Stop after this many scenarios
    #[arg(long)]
    limit: Option<usize>,
    /// Print every scenario report
    #[arg(long)]
    print: bool,
    /// Skip the search oracle (required above its process limit)
    #[arg(long)]
    no_cross_check: bool,
}

impl ExploreArgs {
    fn resolve(&self) -> Result<ScenarioConfig> {
        let mut config = match &self.config {
            Some(path) => load_scenario_config(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ScenarioConfig::default(),
        };
        if let Some(p) = self.processes {
            config = config.processes(p);
        }
        if let Some(r) = self.resources {
            config = config.resources(r);
        }
        if let Some(m) = self.max_units {
            config = config.max_units(m);
        }
        if let Some(n) = self.requests {
            config = config.requests(n);
        }
        if self.limit.is_some() {
            config = config.scenario_limit(self.limit);
        }
        if self.no_cross_check {
            config = config.cross_check(false);
        }
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn explore(args: &ExploreArgs, json: bool) -> Result<()> {
    let config = args.resolve()?;
    info!(?config, "starting exploration");

    let mut encode_error = None;
    let summary = Explorer::new(config)?.explore(|report| {
        if !args.print || encode_error.is_some() {
            return;
        }
        if json {
            match encode_report(report) {
                Ok(line) => println!("{line}"),
                Err(e) => encode_error = Some(e),
            }
        } else {
            println!("{report}");
        }
    })?;
    if let Some(e) = encode_error {
        return Err(e.into());
    }

    if json {
        println!("{}", encode_json(&summary)?);
    } else {
        println!("{summary}");
    }
    Ok(())
}

fn check(path: &Path, json: bool) -> Result<()> {
    let state = load_state(path).with_context(|| format!("loading state {}", path.display()))?;
    let verdict = assess(&state)?;
    let stuck = SafetyChecker::new().check(&state).stuck_processes();

    if json {
        let doc = serde_json::json!({
            "state": &state,
            "safe": verdict.safe,
            "sequence": verdict.sequence,
            "stuck": stuck,
        });
        println!("{}", encode_json(&doc)?);
        return Ok(());
    }

    print_state(&state);
    match verdict.sequence {
        Some(seq) => println!("safe: {seq}"),
        None if verdict.safe => println!("safe"),
        None => {
            let stuck: Vec<String> = stuck.iter().map(ToString::to_string).collect();
            println!("unsafe: {} cannot finish", stuck.join(", "));
        }
    }
    Ok(())
}

fn request(
    path: &Path,
    process: usize,
    vector: &[Units],
    out: Option<&Path>,
    json: bool,
) -> Result<()> {
    let mut state =
        load_state(path).with_context(|| format!("loading state {}", path.display()))?;
    let decision = RequestArbiter::new().request(&mut state, ProcessId(process), vector)?;

    if let Some(out) = out {
        save_state(out, &state).with_context(|| format!("writing state {}", out.display()))?;
    }

    if json {
        let doc = serde_json::json!({ "decision": decision, "state": &state });
        println!("{}", encode_json(&doc)?);
    } else {
        println!("{} requests {:?}: {decision}", ProcessId(process), vector);
        print_state(&state);
    }
    Ok(())
}

fn row(values: &[Units]) -> String {
    values.iter().map(|v| format!("{v:4}")).collect()
}

fn print_state(state: &ResourceState) {
    println!("Available:\n{}", row(state.available()));
    for (title, matrix) in [
        ("Max", state.max_matrix()),
        ("Allocation", state.allocation_matrix()),
        ("Need", state.need_matrix()),
    ] {
        println!("{title}:");
        for values in matrix {
            println!("{}", row(values));
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("bankers v{}", bankers_twin::VERSION);

    match &cli.command {
        Commands::Explore(args) => explore(args, cli.json),
        Commands::Check { state } => check(state, cli.json),
        Commands::Request {
            state,
            process,
            vector,
            out,
        } => request(state, *process, vector, out.as_deref(), cli.json),
    }
}
