//! Interaction state machine
//!
//! [`SimulationController`] owns every piece of mutable simulation state and
//! is driven by discrete [`Action`]s from the input source plus
//! [`Action::Tick`] from the frame clock.

use std::fmt;
use std::ops::ControlFlow;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::cell::{Cell, GridBounds};
use crate::config::Config;
use crate::random;
use crate::stepper::{self, GenerationDelta, LiveSet};

/// Discrete events accepted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Flip between playing and paused
    TogglePlay,
    /// Flip a single cell between alive and dead
    ToggleCell(Cell),
    /// Kill every cell and pause
    Clear,
    /// Restore the last randomized pattern and pause
    Reset,
    /// Seed a fresh random pattern and pause
    Randomize,
    /// Fewer ticks between generations
    SpeedUp,
    /// More ticks between generations
    SpeedDown,
    /// Advance one generation while paused
    Step,
    /// One frame clock tick elapsed
    Tick,
    /// Leave the application
    Quit,
}

/// Statistics about the simulation since the last restage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Generations computed since the last clear, reset or randomize
    pub generation: u64,
    /// Cells born by the rule since the last restage
    pub births: u64,
    /// Cells killed by the rule since the last restage
    pub deaths: u64,
    /// Current number of living cells
    pub population: u64,
}

impl Stats {
    fn restaged(population: usize) -> Self {
        Stats {
            population: population as u64,
            ..Stats::default()
        }
    }

    fn record(&mut self, delta: GenerationDelta, population: usize) {
        self.generation += 1;
        self.births += delta.births;
        self.deaths += delta.deaths;
        self.population = population as u64;
    }
}

/// Speed readout for the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedLabel {
    /// A generation every tick
    Max,
    /// The slowest configured speed
    Min,
    /// `max_update_freq - update_freq`
    Value(u32),
}

impl SpeedLabel {
    /// Derives the label from the current and maximum update frequency.
    pub fn new(update_freq: u32, max_update_freq: u32) -> Self {
        if update_freq <= 1 {
            SpeedLabel::Max
        } else if update_freq >= max_update_freq {
            SpeedLabel::Min
        } else {
            SpeedLabel::Value(max_update_freq - update_freq)
        }
    }
}

impl fmt::Display for SpeedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeedLabel::Max => f.write_str("Max."),
            SpeedLabel::Min => f.write_str("Min."),
            SpeedLabel::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Owns the live set, the reset snapshot, and the play/speed state.
///
/// Every mutation replaces the live set with a newly built value, so a
/// reader borrowing [`live_cells`](Self::live_cells) between actions always
/// sees a whole generation.
#[derive(Debug)]
pub struct SimulationController<R = Pcg64> {
    bounds: GridBounds,
    live: LiveSet,
    initial: LiveSet,
    playing: bool,
    update_freq: u32,
    tick_counter: u32,
    max_update_freq: u32,
    speed_step: u32,
    randomize_multiplier: (u32, u32),
    stats: Stats,
    rng: R,
}

impl SimulationController<Pcg64> {
    /// Creates a paused controller with an empty grid.
    ///
    /// The RNG is seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => {
                log::info!("Using RNG seed {seed}");
                Pcg64::seed_from_u64(seed)
            }
            None => Pcg64::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SimulationController<R> {
    /// Creates a paused controller with an empty grid and a caller-supplied RNG.
    pub fn with_rng(config: &Config, rng: R) -> Self {
        let max_update_freq = config.max_update_freq.max(1);
        SimulationController {
            bounds: config.bounds(),
            live: LiveSet::new(),
            initial: LiveSet::new(),
            playing: false,
            update_freq: config.initial_update_freq.clamp(1, max_update_freq),
            tick_counter: 0,
            max_update_freq,
            speed_step: config.speed_step.max(1),
            randomize_multiplier: (
                config.randomize_multiplier_min,
                config.randomize_multiplier_max,
            ),
            stats: Stats::default(),
            rng,
        }
    }

    /// Applies a single action.
    ///
    /// # Returns
    ///
    /// `ControlFlow::Break` for [`Action::Quit`], otherwise `Continue`.
    pub fn apply(&mut self, action: Action) -> ControlFlow<()> {
        match action {
            Action::TogglePlay => self.toggle_play(),
            Action::ToggleCell(cell) => self.toggle_cell(cell),
            Action::Clear => self.clear(),
            Action::Reset => self.reset(),
            Action::Randomize => self.randomize(),
            Action::SpeedUp => self.speed_up(),
            Action::SpeedDown => self.speed_down(),
            Action::Step => self.step_once(),
            Action::Tick => self.advance(),
            Action::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Toggles the simulation between playing and paused.
    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        log::debug!("{}", if self.playing { "Playing" } else { "Paused" });
    }

    /// Adds `cell` if dead, removes it if alive. Off-grid cells are ignored.
    pub fn toggle_cell(&mut self, cell: Cell) {
        if !self.bounds.contains(cell) {
            log::debug!("Ignoring toggle outside the grid at {cell}");
            return;
        }
        let mut next = self.live.clone();
        if !next.remove(&cell) {
            next.insert(cell);
        }
        self.live = next;
        self.stats.population = self.live.len() as u64;
    }

    /// Empties the grid and pauses.
    pub fn clear(&mut self) {
        self.restage(LiveSet::new());
        log::info!("Grid cleared");
    }

    /// Restores the last randomized pattern and pauses.
    pub fn reset(&mut self) {
        self.restage(self.initial.clone());
        log::info!("Grid reset to {} cells", self.live.len());
    }

    /// Seeds `k * grid_width` random draws for a random multiplier `k`,
    /// records the result as the reset snapshot, and pauses.
    pub fn randomize(&mut self) {
        let (lo, hi) = self.randomize_multiplier;
        let multiplier = if lo < hi { self.rng.gen_range(lo..hi) } else { lo };
        let count = multiplier as usize * self.bounds.width().max(0) as usize;
        let pattern = random::generate(&mut self.rng, self.bounds, count);
        self.initial = pattern.clone();
        self.restage(pattern);
        log::info!(
            "Randomized grid: {} draws, {} live cells",
            count,
            self.live.len()
        );
    }

    /// Lowers the update frequency by one speed step, floored at 1.
    pub fn speed_up(&mut self) {
        self.update_freq = if self.update_freq > self.speed_step {
            self.update_freq - self.speed_step
        } else {
            1
        };
        log::debug!("Update frequency {}", self.update_freq);
    }

    /// Raises the update frequency by one speed step, capped at the maximum.
    ///
    /// From below one step the frequency snaps to exactly one step, so the
    /// fastest setting of 1 returns to the regular step grid.
    pub fn speed_down(&mut self) {
        if self.update_freq >= self.max_update_freq {
            return;
        }
        let raised = if self.update_freq >= self.speed_step {
            self.update_freq.saturating_add(self.speed_step)
        } else {
            self.speed_step
        };
        self.update_freq = raised.min(self.max_update_freq);
        log::debug!("Update frequency {}", self.update_freq);
    }

    /// Frame clock entry point. While playing, counts the tick and computes
    /// a generation once `update_freq` ticks have elapsed.
    pub fn advance(&mut self) {
        if !self.playing {
            return;
        }
        self.tick_counter += 1;
        if self.tick_counter >= self.update_freq {
            self.tick_counter = 0;
            self.next_generation();
        }
    }

    /// Computes one generation immediately. Only honored while paused.
    pub fn step_once(&mut self) {
        if self.playing {
            return;
        }
        self.tick_counter = 0;
        self.next_generation();
    }

    fn next_generation(&mut self) {
        let next = stepper::step(&self.live, self.bounds);
        let delta = GenerationDelta::between(&self.live, &next);
        self.live = next;
        self.stats.record(delta, self.live.len());
        log::trace!(
            "Generation {}: {} alive (+{} -{})",
            self.stats.generation,
            self.live.len(),
            delta.births,
            delta.deaths
        );
    }

    fn restage(&mut self, live: LiveSet) {
        self.live = live;
        self.playing = false;
        self.tick_counter = 0;
        self.stats = Stats::restaged(self.live.len());
    }
}

impl<R> SimulationController<R> {
    /// The current generation.
    pub fn live_cells(&self) -> &LiveSet {
        &self.live
    }

    /// The pattern restored by [`reset`](Self::reset).
    pub fn initial_snapshot(&self) -> &LiveSet {
        &self.initial
    }

    /// Whether ticks currently advance the simulation.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Ticks between generations; lower is faster.
    pub fn update_freq(&self) -> u32 {
        self.update_freq
    }

    /// The slowest allowed update frequency.
    pub fn max_update_freq(&self) -> u32 {
        self.max_update_freq
    }

    /// Ticks counted toward the next generation.
    pub fn tick_counter(&self) -> u32 {
        self.tick_counter
    }

    /// Speed readout derived from the update frequency.
    pub fn speed_label(&self) -> SpeedLabel {
        SpeedLabel::new(self.update_freq, self.max_update_freq)
    }

    /// Statistics since the last clear, reset or randomize.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The grid extent.
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }
}
