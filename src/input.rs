//! Maps terminal events to controller actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::cell::Cell;
use crate::controller::Action;

/// Where the grid sits on screen and how large a cell is, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub origin_x: u16,
    pub origin_y: u16,
    pub tile_width: u16,
    pub tile_height: u16,
}

impl GridGeometry {
    /// Converts a screen position into a grid cell.
    ///
    /// Positions left of or above the grid origin have no cell. Positions past
    /// the right or bottom edge map to off-grid cells, which the controller
    /// ignores.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Cell> {
        let dx = x.checked_sub(self.origin_x)?;
        let dy = y.checked_sub(self.origin_y)?;
        Some(Cell::new(
            i32::from(dx / self.tile_width.max(1)),
            i32::from(dy / self.tile_height.max(1)),
        ))
    }
}

/// Translates one terminal event into an action, if it maps to one.
///
/// # Controls
///
/// * Space: Play/Pause
/// * c: Clear, r: Reset, g: Generate random
/// * Up/Down: Faster/Slower
/// * Enter: Step one generation (when paused)
/// * q, Esc, Ctrl-C: Quit
/// * Left click: Toggle the cell under the pointer
pub fn map_event(event: &Event, geometry: &GridGeometry) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(mouse) => map_mouse(mouse, geometry),
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::Clear,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Reset,
        KeyCode::Char('g') | KeyCode::Char('G') => Action::Randomize,
        KeyCode::Up => Action::SpeedUp,
        KeyCode::Down => Action::SpeedDown,
        KeyCode::Enter => Action::Step,
        _ => return None,
    };
    Some(action)
}

fn map_mouse(mouse: &MouseEvent, geometry: &GridGeometry) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => geometry
            .cell_at(mouse.column, mouse.row)
            .map(Action::ToggleCell),
        _ => None,
    }
}
