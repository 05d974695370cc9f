//! Run one animation strategy against the simulated sculpture.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use kinesis::animation::AnimationRegistry;
use kinesis::error::KinesisError;
use kinesis::options::Options;
use kinesis::rig::{RecordingSink, ReportSink, RigState};
use kinesis::scheduler::Scheduler;

/// Drive the kinetic ball grid with a named animation.
#[derive(Parser, Debug)]
#[command(name = "kinesis", version, about)]
struct Cli {
    /// Animation to run (see --list)
    #[arg(required_unless_present = "list")]
    animation: Option<String>,

    /// TOML options file; defaults are used for anything it leaves out
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write every applied frame to PATH as JSON lines
    #[arg(short, long, value_name = "PATH")]
    record: Option<PathBuf>,

    /// Stop after SECS seconds (overrides the options file)
    #[arg(short, long, value_name = "SECS")]
    duration: Option<f64>,

    /// List the available animations and exit
    #[arg(short, long)]
    list: bool,
}

fn list(registry: &AnimationRegistry) {
    for entry in registry.entries() {
        if entry.aliases.is_empty() {
            println!("{:<12} {}", entry.name, entry.description);
        } else {
            println!(
                "{:<12} {} (also: {})",
                entry.name,
                entry.description,
                entry.aliases.join(", ")
            );
        }
    }
}

fn load_options(cli: &Cli) -> Result<Options, KinesisError> {
    let mut options = match &cli.config {
        Some(path) => {
            log::info!("Loading options from {}", path.display());
            Options::load(path)?
        }
        None => Options::default(),
    };
    if cli.duration.is_some() {
        options.scheduler.max_duration_secs = cli.duration;
        options.validate()?;
    }
    Ok(options)
}

fn run(
    registry: &AnimationRegistry,
    cli: &Cli,
    name: &str,
) -> Result<(), KinesisError> {
    let options = load_options(cli)?;
    let animation = registry.create(name, &options)?;

    let mut rig = RigState::new(options.rig.clone());
    rig.add_sink(ReportSink::new(options.scheduler.report_interval_secs));
    if let Some(path) = &cli.record {
        rig.add_sink(RecordingSink::create(path)?);
    }

    let mut scheduler = Scheduler::new(rig, animation, options.scheduler)?;
    let _ = scheduler.run()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let cli = Cli::parse();
    let registry = AnimationRegistry::builtin();

    if cli.list {
        list(&registry);
        return ExitCode::SUCCESS;
    }

    let Some(name) = cli.animation.as_deref() else {
        log::error!("No animation given");
        return ExitCode::FAILURE;
    };

    match run(&registry, &cli, name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
