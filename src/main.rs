use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::thread;

use clap::Parser;
use flume::Sender;
use log::{error, info, warn, LevelFilter};

use light_stopwatch::alerts::StderrNotifier;
use light_stopwatch::app::{App, AppOp};
use light_stopwatch::clipboard;
use light_stopwatch::clock::MonotonicClock;
use light_stopwatch::command::Command;
use light_stopwatch::error::AppError;
use light_stopwatch::pump::Pump;
use light_stopwatch::stopwatch::Stopwatch;
use light_stopwatch::storage::{self, ConfigWatcher};
use light_stopwatch::ui::TerminalSink;

const QUIT_KEY: char = 'q';
const SECONDARY_KEY: char = '.';

/// Stopwatch with lap records, driven from the terminal.
///
/// Type keys and press enter: s start, p pause, c continue, x stop, r reset,
/// l record, m record mode, h hide/show, t copy time, y copy records,
/// . stop/reset button, q quit. An empty line clicks the time.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// Settings file (TOML). Defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} [{}] {}",
                buf.timestamp(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
}

/// Maps every typed line to app messages, like raw key events.
fn spawn_key_reader(tx: Sender<AppOp>) -> Result<(), AppError> {
    thread::Builder::new()
        .name("keys".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let line = line.trim();
                if line.is_empty() {
                    if tx.send(AppOp::ClickPrimary).is_err() {
                        return;
                    }
                    continue;
                }
                for key in line.chars() {
                    let op = match key {
                        QUIT_KEY => AppOp::Quit,
                        SECONDARY_KEY => AppOp::ClickSecondary,
                        _ => match Command::from_key(key) {
                            Some(command) => AppOp::Command(command),
                            None => {
                                warn!("unknown key {:?}", key);
                                continue;
                            }
                        },
                    };
                    if tx.send(op).is_err() {
                        return;
                    }
                }
            }
            // end of input
            tx.send(AppOp::Quit).ok();
        })
        .map_err(|source| AppError::Thread {
            name: "keys",
            source,
        })?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config_path = match cli.config {
        Some(path) => path,
        None => storage::default_config_path()?,
    };
    let settings = storage::load_settings(&config_path)?;
    info!("settings: {:?}", settings);

    let (tx, rx) = flume::unbounded();
    let pump = Pump::spawn(tx.clone())?;
    let _watcher = match ConfigWatcher::spawn(&config_path, tx.clone()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("settings will not reload: {}", e);
            None
        }
    };

    let stopwatch = Stopwatch::new(
        &settings,
        Box::new(MonotonicClock::new()),
        Box::new(pump),
    );
    let mut app = App::new(
        stopwatch,
        clipboard::from_settings(&settings.clipboard),
        Box::new(StderrNotifier),
        Box::new(TerminalSink::new()),
        Some(config_path),
        tx.clone(),
    );

    spawn_key_reader(tx)?;
    app.run(rx);
    println!();
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose);
    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("light-stopwatch: {}", e);
        std::process::exit(1);
    }
}
