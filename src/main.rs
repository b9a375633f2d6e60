// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::fs::File;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser};
use tracing::{info, Level};

use drumz::config::Settings;
use drumz::kit::{find_kit, kit_names, KitEntry, KITS};
use drumz::sequencer::{read_tab, CancelToken, Player};
use drumz::timing::StepClock;

/// Name shown for a tablature read from standard input
const STDIN_NAME: &str = "(standard input)";

/// Play a drum tablature
#[derive(Parser, Debug)]
#[command(name = "drumz", version, about, long_about = None)]
struct Cli {
    /// Tablature file (standard input when omitted)
    file: Option<PathBuf>,

    /// Beats per minute [default: 120]
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    bpm: Option<u32>,

    /// Kind of drum kit [default: text]
    #[arg(short, long)]
    kit: Option<String>,

    /// Settings file (.yaml or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play the tablature once instead of looping
    #[arg(long)]
    once: bool,

    /// List the supported drum kits and exit
    #[arg(long)]
    list_kits: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn print_kits(kits: &[KitEntry]) {
    println!("Supported drum kits:-");
    for kit in kits {
        println!("  {:<10} {}", kit.name, kit.description);
    }
}

/// Open the tablature, returning its display name and a reader
fn open_input(file: Option<&PathBuf>) -> Result<(String, Box<dyn Read>)> {
    match file {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("cannot open {:?}", path))?;
            Ok((path.display().to_string(), Box::new(f)))
        }
        None => Ok((STDIN_NAME.to_string(), Box::new(io::stdin().lock()))),
    }
}

fn run(cli: Cli, kits: &[KitEntry]) -> Result<()> {
    if cli.list_kits {
        print_kits(kits);
        return Ok(());
    }

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(bpm) = cli.bpm {
        settings.bpm = bpm;
    }
    if let Some(kit) = cli.kit {
        settings.kit = kit;
    }

    // Configuration problems are reported before anything is read
    let clock = StepClock::new(settings.bpm)?;
    let entry = find_kit(kits, &settings.kit).ok_or_else(|| {
        anyhow!(
            "invalid kit: {} (supported: {})",
            settings.kit,
            kit_names(kits)
        )
    })?;

    let (name, input) = open_input(cli.file.as_ref())?;
    let kit = (entry.build)(&settings)
        .with_context(|| format!("cannot start the {} kit", entry.name))?;
    let mut tab = read_tab(input, kit.as_ref()).with_context(|| format!("cannot read {}", name))?;

    info!("Name: {}", name);
    info!("Tempo: {} bpm", clock.bpm());

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || handler_token.cancel())
        .context("cannot install the Ctrl-C handler")?;

    let report = Player::new(clock, !cli.once)
        .with_cancel_token(cancel)
        .play(&mut tab);

    if report.mid_pass {
        kit.pass_interrupted();
    }
    info!(
        passes = report.passes,
        steps = report.steps_played,
        "playback finished"
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    run(cli, KITS)
}
