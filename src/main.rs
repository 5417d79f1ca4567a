//! Catpoint host controller.
//!
//! Boot sequence:
//! 1. Logging (tracing-subscriber, `RUST_LOG` aware)
//! 2. Open the key/value store (directory or in-memory)
//! 3. Load config, apply command-line overrides, persist
//! 4. Restore the alarm state and build the security service
//! 5. Replay the command script, then print the final status

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use catpoint::adapters::label_analyzer::LabelAnalyzer;
use catpoint::adapters::log_listener::LogStatusListener;
use catpoint::adapters::store::{DirectoryStore, MemoryStore};
use catpoint::adapters::stored::StoredRepository;
use catpoint::app::commands::{AppCommand, parse_script};
use catpoint::app::ports::{ConfigPort, StoragePort};
use catpoint::app::report::StatusReport;
use catpoint::app::service::SecurityService;

#[derive(Debug, Parser)]
#[command(name = "catpoint", version, about = "Catpoint home security controller")]
struct Args {
    /// Persist state and config under this directory. Without it the run
    /// starts from defaults and forgets everything on exit.
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Camera confidence threshold (0-100) for subject detection.
    #[arg(long)]
    threshold: Option<f32>,

    /// Classifier label that counts as the subject.
    #[arg(long)]
    subject: Option<String>,

    /// Print status reports as JSON.
    #[arg(long)]
    json: bool,

    /// Command script, one JSON command per line. Reads stdin when omitted.
    script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    info!("Catpoint v{} starting", env!("CARGO_PKG_VERSION"));

    match &args.state_dir {
        Some(dir) => {
            let store = DirectoryStore::open(dir)
                .with_context(|| format!("opening state directory {}", dir.display()))?;
            run(store, &args)
        }
        None => {
            warn!("No --state-dir given; state will not be persisted");
            run(MemoryStore::new(), &args)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run<S: StoragePort + ConfigPort>(mut store: S, args: &Args) -> anyhow::Result<()> {
    let mut config = store.load().context("loading config")?;
    if let Some(threshold) = args.threshold {
        config.sensitivity_threshold = threshold;
    }
    if let Some(subject) = &args.subject {
        config.subject_label.clone_from(subject);
    }
    if let Err(reason) = config.validate() {
        bail!("invalid configuration: {reason}");
    }
    store.save(&config).context("saving config")?;
    info!(
        "Config: subject='{}' threshold={}",
        config.subject_label, config.sensitivity_threshold
    );

    let repository = StoredRepository::open(store).context("restoring alarm state")?;
    let analyzer = LabelAnalyzer::from_config(&config);
    let mut service = SecurityService::with_config(repository, analyzer, &config);
    service.add_status_listener(Box::new(LogStatusListener::new()));

    let text = read_script(args.script.as_deref())?;
    let commands = parse_script(&text).context("parsing command script")?;
    info!("Replaying {} command(s)", commands.len());

    for cmd in commands {
        if cmd == AppCommand::Status {
            print_report(&service.status_report()?, args.json)?;
            continue;
        }
        service.handle_command(cmd)?;
    }

    print_report(&service.status_report()?, args.json)
}

fn read_script(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading script from stdin")?;
            Ok(text)
        }
    }
}

fn print_report(report: &StatusReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
