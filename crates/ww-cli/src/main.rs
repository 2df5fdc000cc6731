//! Wild West Slots
//!
//! Usage:
//!   ww play               - Spin the reels in the terminal
//!   ww simulate           - Run many spins on a virtual clock and report rates

mod terminal;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use ww_audio::{AudioDispatcher, LogSink};
use ww_core::{Clock, MonotonicClock};
use ww_slot::{SimulationReport, Simulator, SlotConfig, SlotMachine, TimingProfile};

use crate::terminal::TerminalPresenter;

#[derive(Parser)]
#[command(name = "ww", about = "Wild West Slots", version)]
struct Cli {
    /// YAML or JSON machine configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Fixed RNG seed
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spin the reels in real time
    Play {
        /// Number of spins before exiting
        #[arg(short = 'n', long, default_value_t = 1)]
        spins: u64,

        /// Timing preset, overrides the config file
        #[arg(short, long, value_enum)]
        profile: Option<Profile>,

        /// Write the stage traces of every spin to this JSON file
        #[arg(long)]
        trace: Option<PathBuf>,
    },
    /// Run spins on a virtual clock and report outcome rates
    Simulate {
        #[arg(short = 'n', long, default_value_t = 100_000)]
        spins: u64,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Normal,
    Turbo,
    Studio,
}

impl From<Profile> for TimingProfile {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Normal => TimingProfile::Normal,
            Profile::Turbo => TimingProfile::Turbo,
            Profile::Studio => TimingProfile::Studio,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Play {
            spins,
            profile,
            trace,
        } => {
            let config = match profile {
                Some(profile) => config.with_timing(profile.into()),
                None => config,
            };
            play(config, cli.seed, spins, trace.as_deref())
        }
        Commands::Simulate { spins, json } => simulate(config, cli.seed, spins, json),
    }
}

fn load_config(path: Option<&Path>) -> Result<SlotConfig> {
    match path {
        Some(path) => SlotConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SlotConfig::default()),
    }
}

fn play(config: SlotConfig, seed: Option<u64>, spins: u64, trace: Option<&Path>) -> Result<()> {
    let presenter = TerminalPresenter::new(config.symbols.clone());
    let audio = AudioDispatcher::spawn(LogSink).context("Failed to start audio worker")?;
    let mut machine = SlotMachine::new(config, presenter, audio)?;
    if let Some(seed) = seed {
        machine.seed(seed);
    }
    machine.set_trace_recording(trace.is_some());

    let clock = MonotonicClock::new();
    let mut remaining = spins;

    loop {
        if machine.is_trigger_enabled() {
            if remaining == 0 {
                break;
            }
            machine.start(clock.now())?;
            remaining -= 1;
        } else {
            machine.tick(clock.now());
        }

        if let Some(deadline) = machine.next_deadline() {
            let now = clock.now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
    }

    let stats = machine.stats();
    println!(
        "\n{} spins: {} wins, {} jackpots, {} losses",
        stats.total_spins, stats.wins, stats.jackpots, stats.losses
    );

    if let Some(path) = trace {
        let traces = machine.take_traces();
        let json = serde_json::to_string_pretty(&traces)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write traces to {}", path.display()))?;
        println!("Wrote {} traces to {}", traces.len(), path.display());
    }

    machine.audio().flush()?;
    Ok(())
}

fn simulate(config: SlotConfig, seed: Option<u64>, spins: u64, json: bool) -> Result<()> {
    let mut sim = match seed {
        Some(seed) => Simulator::seeded(config, seed)?,
        None => Simulator::new(config)?,
    };
    let report = sim.run(spins)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &SimulationReport) {
    println!("Spins:    {}", report.spins);
    println!(
        "Win:      {:.4}  (expected {:.4}, z {:+.2})",
        report.observed_win_rate,
        report.expected.win,
        report.win_z_score()
    );
    println!(
        "Jackpot:  {:.4}  (expected {:.4}, z {:+.2})",
        report.observed_jackpot_rate,
        report.expected.jackpot,
        report.jackpot_z_score()
    );
    println!(
        "Loss:     {:.4}  (expected {:.4})",
        report.stats.loss_rate(),
        report.expected.loss()
    );
    println!(
        "Coupling: {} jackpot forces, {} matched reels",
        report.stats.jackpot_forces, report.stats.match_couplings
    );
}
