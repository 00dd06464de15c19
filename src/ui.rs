//! Terminal rendering
//!
//! Draws the grid and the side control panel from a read-only view of the
//! controller. Nothing here mutates simulation state.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sysinfo::{System, SystemExt};

use crate::cell::Cell;
use crate::config::Config;
use crate::controller::SimulationController;
use crate::input::GridGeometry;

/// Character used to paint a live cell
const LIVE_GLYPH: char = '█';
/// Width of the side control panel, in terminal columns
const PANEL_WIDTH: u16 = 30;

const CONTROLS: [&str; 9] = [
    "Space: Pause/Play",
    "C: Clear",
    "R: Reset",
    "G: Generate Random",
    "Enter: Step",
    "",
    "UP: Faster",
    "DOWN: Slower",
    "Q/Esc: Quit",
];

/// Draws one frame.
///
/// # Arguments
///
/// * `f` - The frame to draw on
/// * `sim` - The simulation state, borrowed for this frame only
/// * `sys` - System information for the memory readout
/// * `config` - Tile size used to lay out the grid
///
/// # Returns
///
/// Where the grid was placed, for mapping mouse clicks back to cells.
pub fn draw<R>(
    f: &mut Frame,
    sim: &SimulationController<R>,
    sys: &System,
    config: &Config,
) -> GridGeometry {
    let grid_columns = grid_block_width(sim.bounds().width(), config.tile_width);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(grid_columns), Constraint::Min(PANEL_WIDTH)].as_ref())
        .split(f.size());

    draw_grid(f, sim, config, chunks[0]);
    draw_panel(f, sim, sys, chunks[1]);

    GridGeometry {
        origin_x: chunks[0].x + 1,
        origin_y: chunks[0].y + 1,
        tile_width: config.tile_width,
        tile_height: config.tile_height,
    }
}

/// Terminal columns needed for the grid block, borders included, clamped to
/// what a layout constraint can express.
pub fn grid_block_width(grid_width: i32, tile_width: u16) -> u16 {
    let columns = u32::try_from(grid_width)
        .unwrap_or(0)
        .saturating_mul(u32::from(tile_width))
        .saturating_add(2);
    u16::try_from(columns).unwrap_or(u16::MAX)
}

/// Window caption reflecting the play state.
pub fn caption(playing: bool) -> &'static str {
    if playing {
        "Game of Life - Playing"
    } else {
        "Game of Life - Paused"
    }
}

/// Renders the live cells as text, one line per terminal row.
pub fn grid_text<R>(sim: &SimulationController<R>, config: &Config) -> String {
    let bounds = sim.bounds();
    let live = sim.live_cells();
    let tile_width = usize::from(config.tile_width);

    let mut text = String::new();
    for row in 0..bounds.height() {
        let mut line = String::with_capacity(bounds.width() as usize * tile_width);
        for col in 0..bounds.width() {
            let glyph = if live.contains(&Cell::new(col, row)) {
                LIVE_GLYPH
            } else {
                ' '
            };
            line.extend(std::iter::repeat(glyph).take(tile_width));
        }
        for _ in 0..config.tile_height {
            text.push_str(&line);
            text.push('\n');
        }
    }
    text
}

fn draw_grid<R>(f: &mut Frame, sim: &SimulationController<R>, config: &Config, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(caption(sim.is_playing()));

    let paragraph = Paragraph::new(grid_text(sim, config))
        .style(Style::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

/// Control help, speed readout, statistics and memory usage.
pub fn panel_text<R>(sim: &SimulationController<R>, memory_kb: (u64, u64)) -> String {
    let stats = sim.stats();
    let mut text = CONTROLS.join("\n");
    text.push_str(&format!(
        "\nGame Speed: {}\n\
        \n\
        Generation: {}\n\
        Population: {}\n\
        Births: {}\n\
        Deaths: {}\n\
        Birth Rate: {:.2}/gen\n\
        Death Rate: {:.2}/gen\n\
        Memory Usage: {}KB/{:.2}MB\n",
        sim.speed_label(),
        stats.generation,
        stats.population,
        stats.births,
        stats.deaths,
        stats.births as f64 / stats.generation.max(1) as f64,
        stats.deaths as f64 / stats.generation.max(1) as f64,
        memory_kb.0,
        memory_kb.1 as f64 / 1024.0,
    ));
    text
}

fn draw_panel<R>(f: &mut Frame, sim: &SimulationController<R>, sys: &System, area: Rect) {
    let memory_kb = (sys.used_memory() / 1024, sys.total_memory() / 1024);

    let panel = Paragraph::new(panel_text(sim, memory_kb))
        .block(Block::default().borders(Borders::ALL).title("Controls"))
        .wrap(Wrap { trim: true });

    f.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Action;
    use std::ops::ControlFlow;

    fn send(sim: &mut SimulationController, action: Action) {
        assert_eq!(sim.apply(action), ControlFlow::Continue(()));
    }

    fn small() -> (SimulationController, Config) {
        let config = Config {
            grid_width: 3,
            grid_height: 2,
            seed: Some(1),
            ..Config::default()
        };
        (SimulationController::new(&config), config)
    }

    #[test]
    fn grid_text_scales_cells_by_tile() {
        let (mut sim, config) = small();
        send(&mut sim, Action::ToggleCell(Cell::new(1, 0)));
        assert_eq!(grid_text(&sim, &config), "  ██  \n      \n");
    }

    #[test]
    fn grid_block_width_saturates() {
        assert_eq!(grid_block_width(3, 2), 8);
        assert_eq!(grid_block_width(i32::MAX, 4), u16::MAX);
        assert_eq!(grid_block_width(70_000, 1), u16::MAX);
    }

    #[test]
    fn caption_follows_play_state() {
        let (mut sim, _) = small();
        assert_eq!(caption(sim.is_playing()), "Game of Life - Paused");
        send(&mut sim, Action::TogglePlay);
        assert_eq!(caption(sim.is_playing()), "Game of Life - Playing");
    }

    #[test]
    fn panel_shows_speed_label() {
        let (mut sim, _) = small();
        assert!(panel_text(&sim, (0, 0)).contains("Game Speed: 60"));
        for _ in 0..10 {
            send(&mut sim, Action::SpeedUp);
        }
        assert!(panel_text(&sim, (0, 0)).contains("Game Speed: Max."));
        for _ in 0..10 {
            send(&mut sim, Action::SpeedDown);
        }
        assert!(panel_text(&sim, (0, 0)).contains("Game Speed: Min."));
    }
}
