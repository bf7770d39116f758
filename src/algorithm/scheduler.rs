//! Tick loop driving the engine on a logical clock
//!
//! Each tick advances the clock by the configured interval, fires the reset
//! timer if it is due and then performs one engine step. Observers only ever
//! see the grid between ticks.

use crate::{
    algorithm::executor::{StepOutcome, WaveCollapse},
    algorithm::random::RandomSource,
    io::error::Result,
    spatial::grid::Grid,
};
use log::warn;
use std::time::Duration;

/// What a contradiction does at the scheduler level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContradictionPolicy {
    /// Return the error to the caller
    #[default]
    Fail,
    /// Log it, discard the grid and start a fresh one
    Restart,
}

/// Summary of one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Clock time of this tick
    pub now: Duration,
    /// Engine result, `None` when a contradiction forced a restart
    pub outcome: Option<StepOutcome>,
    /// Whether the reset timer fired before stepping
    pub reset_fired: bool,
    /// Cycle the grid belongs to after this tick
    pub cycle: usize,
}

impl TickReport {
    /// Whether this tick observed a freshly completed grid
    pub const fn completed_cycle(&self) -> bool {
        matches!(self.outcome, Some(StepOutcome::ResetScheduled { .. }))
    }

    /// Whether a fresh grid was started during this tick
    pub const fn started_cycle(&self) -> bool {
        self.reset_fired || self.outcome.is_none()
    }

    /// Whether this tick changed any cell
    pub const fn collapsed(&self) -> bool {
        matches!(self.outcome, Some(StepOutcome::Collapsed(_)))
    }
}

/// Sole owner of the engine, ticking it on a logical clock
pub struct Scheduler<R> {
    engine: WaveCollapse<R>,
    policy: ContradictionPolicy,
    clock: Duration,
    ticks: usize,
    contradictions: usize,
}

impl<R: RandomSource> Scheduler<R> {
    /// Wrap an engine
    pub const fn new(engine: WaveCollapse<R>, policy: ContradictionPolicy) -> Self {
        Self {
            engine,
            policy,
            clock: Duration::ZERO,
            ticks: 0,
            contradictions: 0,
        }
    }

    /// Access the engine
    pub const fn engine(&self) -> &WaveCollapse<R> {
        &self.engine
    }

    /// Access the committed grid
    pub const fn grid(&self) -> &Grid {
        self.engine.grid()
    }

    /// Logical time elapsed
    pub const fn clock(&self) -> Duration {
        self.clock
    }

    /// Ticks performed
    pub const fn ticks(&self) -> usize {
        self.ticks
    }

    /// Contradictions absorbed by the restart policy
    pub const fn contradictions(&self) -> usize {
        self.contradictions
    }

    /// Advance the clock one interval and run the engine once
    ///
    /// # Errors
    ///
    /// Returns a contradiction error when the policy is `Fail`
    pub fn tick(&mut self) -> Result<TickReport> {
        self.clock += self.engine.config().tick_interval;
        self.ticks += 1;

        let reset_fired = self.engine.poll_reset(self.clock);

        let outcome = match self.engine.step(self.clock) {
            Ok(outcome) => Some(outcome),
            Err(error) if error.is_contradiction() && self.policy == ContradictionPolicy::Restart => {
                warn!("Restarting cycle {}: {error}", self.engine.cycle);
                self.contradictions += 1;
                self.engine.reset();
                None
            }
            Err(error) => return Err(error),
        };

        Ok(TickReport {
            now: self.clock,
            outcome,
            reset_fired,
            cycle: self.engine.cycle,
        })
    }

    /// Tick until `cycles` grids have fully collapsed
    ///
    /// `observer` runs after every tick with the report and the committed
    /// grid. Returning `false` from it stops the run early. Returns the
    /// number of completed grids.
    ///
    /// # Errors
    ///
    /// Propagates tick errors
    pub fn run_until_cycles<F>(&mut self, cycles: usize, mut observer: F) -> Result<usize>
    where
        F: FnMut(&TickReport, &Grid) -> Result<bool>,
    {
        let mut completed = 0;

        while completed < cycles {
            let report = self.tick()?;
            if report.completed_cycle() {
                completed += 1;
            }
            if !observer(&report, self.engine.grid())? {
                break;
            }
        }

        Ok(completed)
    }
}
