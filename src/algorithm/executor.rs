use crate::{
    algorithm::propagation::propagate,
    algorithm::random::RandomSource,
    algorithm::selection::{Collapse, apply_collapse, minimum_entropy_candidates, pick_collapse},
    io::configuration::{
        DEFAULT_DIMENSION, DEFAULT_RESET_PAUSE_MS, DEFAULT_TICK_INTERVAL_MS, MAX_GRID_DIMENSION,
    },
    io::error::{Result, invalid_parameter},
    spatial::grid::Grid,
    spatial::tiles::RuleTable,
};
use log::{debug, info, warn};
use std::time::Duration;

/// Engine parameters fixed at construction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Side length of the square grid
    pub dimension: usize,
    /// Time between scheduler ticks
    pub tick_interval: Duration,
    /// Pause between full collapse and the next fresh grid
    pub reset_pause: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dimension: DEFAULT_DIMENSION,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            reset_pause: Duration::from_millis(DEFAULT_RESET_PAUSE_MS),
        }
    }
}

impl EngineConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The dimension is zero or exceeds `MAX_GRID_DIMENSION`
    /// - The tick interval is zero
    pub fn validate(self) -> Result<Self> {
        if self.dimension == 0 || self.dimension > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "dimension",
                &self.dimension,
                &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
            ));
        }
        if self.tick_interval.is_zero() {
            return Err(invalid_parameter(
                "tick_interval",
                &format!("{:?}", self.tick_interval),
                &"must be greater than zero",
            ));
        }
        Ok(self)
    }
}

/// Where the engine is in its grid lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Collapsing one cell per step
    Generating,
    /// Fully collapsed, waiting for the reset deadline
    ResetPending {
        /// Clock time at which the grid is replaced
        due: Duration,
    },
    /// Stepping stopped until the next reset
    Halted,
}

/// Result of a single `step` call
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One cell was collapsed and the grid re-propagated
    Collapsed(Collapse),
    /// The grid was already fully collapsed; a reset is now scheduled
    ResetScheduled {
        /// Clock time at which the grid is replaced
        due: Duration,
    },
    /// A reset is already pending; nothing changed
    ResetPending,
    /// Stepping is halted; nothing changed
    Halted,
}

/// Simplified wave function collapse over a square grid
///
/// Owns the grid, the rule table and the random source. Every mutation goes
/// through `&mut self`, and a step either commits a complete new grid or
/// leaves the old one untouched.
pub struct WaveCollapse<R> {
    grid: Grid,
    rules: RuleTable,
    random: R,
    config: EngineConfig,
    phase: Phase,
    /// Successful collapses in the current cycle
    pub iteration: usize,
    /// Grids started so far, counting the first
    pub cycle: usize,
}

impl<R: RandomSource> WaveCollapse<R> {
    /// Create an engine with the pipe rule table
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: EngineConfig, random: R) -> Result<Self> {
        Self::with_rules(config, RuleTable::pipes(), random)
    }

    /// Create an engine with a custom rule table
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn with_rules(config: EngineConfig, rules: RuleTable, random: R) -> Result<Self> {
        let config = config.validate()?;
        Ok(Self {
            grid: Grid::new(config.dimension),
            rules,
            random,
            config,
            phase: Phase::Generating,
            iteration: 0,
            cycle: 1,
        })
    }

    /// Access the committed grid
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Access the rule table
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Access the engine configuration
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current lifecycle phase
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Access the random source
    pub fn random_mut(&mut self) -> &mut R {
        &mut self.random
    }

    /// Perform one collapse-and-propagate pass, or schedule a reset
    ///
    /// `now` is the caller's clock; it only positions the reset deadline.
    ///
    /// # Errors
    ///
    /// Returns a contradiction error if propagation empties a cell. The grid
    /// is left as it was before the call and the engine halts until reset.
    pub fn step(&mut self, now: Duration) -> Result<StepOutcome> {
        match self.phase {
            Phase::ResetPending { .. } => return Ok(StepOutcome::ResetPending),
            Phase::Halted => return Ok(StepOutcome::Halted),
            Phase::Generating => {}
        }

        if self.grid.is_fully_collapsed() {
            let due = now + self.config.reset_pause;
            self.phase = Phase::ResetPending { due };
            info!(
                "Cycle {} complete after {} collapses, reset due at {:?}",
                self.cycle, self.iteration, due
            );
            return Ok(StepOutcome::ResetScheduled { due });
        }

        let candidates = minimum_entropy_candidates(&self.grid);
        let mut working = self.grid.clone();
        let Some(collapse) = pick_collapse(&working, &candidates, &mut self.random)
            .filter(|&collapse| apply_collapse(&mut working, collapse))
        else {
            self.phase = Phase::Halted;
            warn!("No uncollapsed cell left to select, halting until reset");
            return Ok(StepOutcome::Halted);
        };

        let next = match propagate(&working, &self.rules, self.iteration + 1) {
            Ok(next) => next,
            Err(error) => {
                self.phase = Phase::Halted;
                warn!("{error}");
                return Err(error);
            }
        };

        self.grid = next;
        self.iteration += 1;
        debug!(
            "Collapsed ({}, {}) to {:?} from {} candidates",
            collapse.cell.col,
            collapse.cell.row,
            collapse.tile,
            candidates.len()
        );

        Ok(StepOutcome::Collapsed(collapse))
    }

    /// Replace the grid with a fresh one if the reset deadline has passed
    ///
    /// Returns whether a reset happened.
    pub fn poll_reset(&mut self, now: Duration) -> bool {
        match self.phase {
            Phase::ResetPending { due } if now >= due => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Start a brand-new grid and resume stepping
    pub fn reset(&mut self) {
        self.grid = Grid::new(self.config.dimension);
        self.phase = Phase::Generating;
        self.iteration = 0;
        self.cycle += 1;
        info!("Starting cycle {}", self.cycle);
    }
}
