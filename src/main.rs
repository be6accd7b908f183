mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod layout;
mod nav;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;

use crate::app::App;
use crate::event::{Event, EventHandler};
use crate::tui::{install_panic_hook, Tui};

/// A Miller-column terminal file browser.
#[derive(Parser, Debug)]
#[command(name = "miller_fm", version, about)]
struct Cli {
    /// Directory to start browsing in (defaults to the current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to a config file (overrides the default search)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a debug log to FILE (the terminal itself is owned by the UI)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(cli: &Cli) -> error::Result<()> {
    let Some(ref log_path) = cli.log_file else {
        return Ok(());
    };
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let file = std::fs::File::create(log_path)?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.to_string()),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .init();
    Ok(())
}

#[tokio::main]
async fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = config::load(cli.config.as_deref());

    // CLI path wins; a configured default_path is the fallback.
    let start = if cli.path == PathBuf::from(".") {
        config
            .general
            .default_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or(cli.path)
    } else {
        cli.path
    };
    let start = start.canonicalize().map_err(|_| {
        error::AppError::InvalidPath(format!("{} does not exist", start.display()))
    })?;
    if !start.is_dir() {
        return Err(error::AppError::InvalidPath(format!(
            "{} is not a directory",
            start.display()
        )));
    }

    install_panic_hook();

    let mut tui = Tui::new()?;
    let mut app = App::new(&start, &config)?;
    let mut events = EventHandler::new(Duration::from_millis(16));

    loop {
        tui.terminal_mut().draw(|frame| {
            ui::render(&mut app, frame);
        })?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Tick => app.clear_expired_status(),
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;
    Ok(())
}
