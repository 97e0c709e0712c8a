//! stackbar - stacked, segmented bar graphs in the terminal
//!
//! Entry point: parses the command line, loads config and data, then runs
//! the component event loop.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use stackbar::action::Action;
use stackbar::app::App;
use stackbar::component::Component;
use stackbar::config::Config;
use stackbar::model::{AnimationDirection, GraphData};
use stackbar::services::{load_graph_data, sample_days};
use stackbar::tui::{Tui, TuiEvent};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DirectionArg {
    TopDown,
    BottomUp,
    #[value(name = "none")]
    Still,
}

impl From<DirectionArg> for AnimationDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::TopDown => AnimationDirection::TopDown,
            DirectionArg::BottomUp => AnimationDirection::BottomUp,
            DirectionArg::Still => AnimationDirection::None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "stackbar", version, about = "Stacked, segmented bar graphs in the terminal")]
struct Cli {
    /// Data file (.json, .yaml, .yml or .csv); sample data when omitted
    #[arg(long)]
    data: Option<PathBuf>,

    /// Config file; defaults to ~/.stackbar/config.json
    #[arg(long)]
    config: Option<PathBuf>,

    /// Segment entry animation
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Entry animation duration in milliseconds
    #[arg(long)]
    duration_ms: Option<u64>,

    /// Log file; defaults to ~/.stackbar/stackbar.log
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Number of days of sample data
    #[arg(long, default_value_t = 21)]
    columns: usize,

    /// Write the effective config (after the flags above) and exit
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.clone().or_else(stackbar::logging::default_log_path) {
        // Logging is best effort; the UI runs without it
        if let Err(err) = stackbar::logging::init(&path) {
            eprintln!("Warning: logging disabled: {:#}", err);
        }
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(direction) = cli.direction {
        config.animation_direction = direction.into();
    }
    if let Some(ms) = cli.duration_ms {
        config.animation_duration_ms = ms;
    }

    if cli.save_config {
        save_config(&cli, &config)?;
        println!("Config written");
        return Ok(());
    }

    let (data, source) = load_data(&cli)?;
    tracing::info!(source = %source, columns = data.column_count(), "starting");

    let mut app = App::new(&config, data, source)?;
    app.init()?;

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(config.tick_rate());
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn save_config(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.config {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    tracing::info!("config written");
    Ok(())
}

fn load_data(cli: &Cli) -> Result<(GraphData<String>, String)> {
    match &cli.data {
        Some(path) => {
            let data = load_graph_data(path)
                .with_context(|| format!("Failed to load data from {}", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok((data, name))
        }
        None => {
            let today = chrono::Local::now().date_naive();
            Ok((sample_days(cli.columns, today), "sample data".to_string()))
        }
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                tracing::warn!(error = %e, "draw failed");
            }
        })?;

        let action = match tui.next_event()? {
            TuiEvent::Key(key) => app.handle_key_event(key)?,
            TuiEvent::Mouse(mouse) => app.handle_mouse_event(mouse)?,
            TuiEvent::Resize(w, h) => Some(Action::Resize(w, h)),
            // No input within the tick rate: advance animations
            TuiEvent::Tick => Some(Action::Tick),
            TuiEvent::Ignored => None,
        };

        // Action might produce a follow-up action
        let mut current_action = action;
        while let Some(a) = current_action {
            current_action = app.update(a)?;
        }
    }

    Ok(())
}
