//! # Game of Life sandbox
//!
//! Terminal front end: parses the command line, sets up the terminal and
//! drives the simulation from a fixed-rate frame clock.

use std::{
    io::{self, Stdout},
    ops::ControlFlow,
    path::PathBuf,
    process,
    time::{Duration, Instant},
};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sysinfo::{System, SystemExt};

use life_sandbox::{
    input::{self, GridGeometry},
    ui, Config, Result, SimulationController,
};

/// How often the memory readout is refreshed
const MEMORY_REFRESH: Duration = Duration::from_secs(1);

/// Interactive Conway's Game of Life in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// JSON config file; flags below override its values.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Number of grid columns.
    #[arg(long, value_name = "COLUMNS")]
    width: Option<u32>,
    /// Number of grid rows.
    #[arg(long, value_name = "ROWS")]
    height: Option<u32>,
    /// Frame clock rate in ticks per second.
    #[arg(long, value_name = "TICKS")]
    fps: Option<u32>,
    /// Terminal columns per cell.
    #[arg(long, value_name = "COLUMNS")]
    tile_width: Option<u16>,
    /// Terminal rows per cell.
    #[arg(long, value_name = "ROWS")]
    tile_height: Option<u16>,
    /// Seed for reproducible random patterns.
    #[arg(long)]
    seed: Option<u64>,
}

impl CliArgs {
    /// Builds the effective config: file (or defaults), then flag overrides.
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(fps) = self.fps {
            config.fps = fps;
        }
        if let Some(tile_width) = self.tile_width {
            config.tile_width = tile_width;
        }
        if let Some(tile_height) = self.tile_height {
            config.tile_height = tile_height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match CliArgs::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Sets up the terminal, runs the sandbox, and restores the terminal even
/// when the loop fails.
fn run(config: &Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main loop: draw, handle input until the next tick is due, then tick.
fn event_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, config: &Config) -> Result<()> {
    let mut sim = SimulationController::new(config);
    let mut sys = System::new_all();
    let mut geometry = GridGeometry {
        origin_x: 1,
        origin_y: 1,
        tile_width: config.tile_width,
        tile_height: config.tile_height,
    };

    let tick_rate = config.frame_duration();
    let mut last_tick = Instant::now();
    let mut last_refresh = Instant::now();

    log::info!(
        "Starting {}x{} grid at {} fps",
        config.grid_width,
        config.grid_height,
        config.fps
    );

    loop {
        terminal.draw(|f| {
            geometry = ui::draw(f, &sim, &sys, config);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            let event = event::read()?;
            if let Some(action) = input::map_event(&event, &geometry) {
                if let ControlFlow::Break(()) = sim.apply(action) {
                    log::info!("Quit requested");
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            sim.advance();
            last_tick = Instant::now();
        }

        if last_refresh.elapsed() >= MEMORY_REFRESH {
            sys.refresh_memory();
            last_refresh = Instant::now();
        }
    }
}
