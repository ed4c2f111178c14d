use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use matrix_repair_core::{ActionOutcome, GameError, Preset, Session};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing_subscriber::filter::LevelFilter;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use command::{Command, HELP};
use config::AppConfig;
use render::{Board, outcome_message};

mod command;
mod config;
mod render;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Mode {
    /// 7x2 matrix, one challenge per row
    FastTrack,
    /// Cell by cell, winning a challenge unlocks the cell
    Grid,
    /// Timed levels, each won challenge asks for the repaired value
    Mission,
}

impl From<Mode> for Preset {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::FastTrack => Preset::FastTrack,
            Mode::Grid => Preset::Grid,
            Mode::Mission => Preset::Mission,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file overriding the preset
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Game variant, overrides the config file
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,
}

fn tracing_level(level: log::LevelFilter) -> LevelFilter {
    match level {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

/// Applies one command; `Ok(None)` means there is nothing to report.
fn run(
    session: &mut Session<SmallRng>,
    command: Command,
    now: Duration,
) -> Result<Option<ActionOutcome>, GameError> {
    let outcome = match command {
        Command::Select(target) => session.select(target, now)?,
        Command::Back => session.deselect(),
        Command::Play(input) => session.play(input, now)?,
        Command::Answer(text) => session.submit_answer(&text, now)?,
        Command::Next => session.advance_level(now)?,
        Command::Restart => session.restart(now)?,
        Command::Show | Command::Help | Command::Quit => return Ok(None),
    };
    Ok(Some(outcome))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(tracing_level(args.verbose.log_level_filter()))
        .with_writer(io::stderr)
        .try_init()
        .map_err(anyhow::Error::msg)?;

    let config = AppConfig::load(args.config.as_deref(), args.mode.map(Preset::from))?;
    let seed = args.seed.or(config.seed).unwrap_or_else(clock_seed);
    log::debug!("seed: {seed}");

    let clock = Instant::now();
    let mut session = Session::new(config.session, SmallRng::seed_from_u64(seed), clock.elapsed())?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", Board::new(&session, clock.elapsed()))?;
    writeln!(stdout, "Type help for commands.")?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let now = clock.elapsed();
        if let Some(message) = outcome_message(session.tick(now)) {
            writeln!(stdout, "{message}")?;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(stdout, "{err}")?;
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            _ => {}
        }

        match run(&mut session, command, now) {
            Ok(Some(outcome)) => {
                log::debug!("{outcome:?}");
                if let Some(message) = outcome_message(outcome) {
                    writeln!(stdout, "{message}")?;
                }
                if outcome.has_update() {
                    writeln!(stdout, "{}", Board::new(&session, now))?;
                }
            }
            Ok(None) => writeln!(stdout, "{}", Board::new(&session, now))?,
            Err(err) => writeln!(stdout, "{err}")?,
        }
    }
    Ok(())
}
