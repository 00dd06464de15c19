//! # Life Sandbox
//!
//! An interactive Conway's Game of Life sandbox for the terminal, built on
//! `ratatui` and `crossterm`.
//!
//! Core modules:
//! - `cell`: Grid coordinates and neighbor enumeration on a bounded grid
//! - `stepper`: Sparse two-pass generation advance (B3/S23)
//! - `random`: Random starting patterns
//! - `controller`: Play/pause, speed and restaging state machine
//! - `config`: Init-time constants, JSON loading and validation
//! - `input`: Terminal events to controller actions
//! - `ui`: Read-only rendering of the grid and control panel

pub mod cell;
pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod random;
pub mod stepper;
pub mod ui;

pub use cell::{Cell, GridBounds};
pub use config::Config;
pub use controller::{Action, SimulationController, SpeedLabel, Stats};
pub use error::{Error, Result};
pub use stepper::{step, GenerationDelta, LiveSet};
