//! Per-cycle progress display and log routing that keeps bars intact

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::sync::LazyLock;
use std::time::Duration;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Cycles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display across generation cycles
///
/// Shows one bar for the grid being collapsed and, for multi-cycle runs, a
/// batch bar counting finished grids.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    cycle_bar: Option<ProgressBar>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            cycle_bar: None,
        }
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            batch_bar: None,
            cycle_bar: None,
        }
    }

    /// Handle used to print above the bars
    pub fn multi_progress(&self) -> &MultiProgress {
        &self.multi_progress
    }

    /// Prepare the batch bar for a run of `cycles` grids
    pub fn initialize(&mut self, cycles: usize) {
        if cycles > 1 {
            let batch_bar = ProgressBar::new(cycles as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }
    }

    /// Start a bar for a new grid
    pub fn start_cycle(&mut self, cycle: usize, total_cells: usize) {
        if let Some(old) = self.cycle_bar.take() {
            old.finish_and_clear();
        }

        let bar = ProgressBar::new(total_cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(format!("Cycle {cycle}"));
        self.cycle_bar = Some(self.multi_progress.add(bar));
    }

    /// Report how many cells are collapsed
    pub fn update(&self, collapsed: usize) {
        if let Some(ref bar) = self.cycle_bar {
            bar.set_position(collapsed as u64);
        }
    }

    /// Mark the current grid as finished
    pub fn complete_cycle(&mut self, elapsed: Duration) {
        if let Some(bar) = self.cycle_bar.take() {
            bar.finish_with_message(format!("done in {elapsed:.2?}"));
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All cycles generated");
        }
        let _ = self.multi_progress.clear();
    }
}

/// `log` backend that suspends the progress bars while printing
pub struct ProgressLogger {
    multi_progress: MultiProgress,
    level: LevelFilter,
}

impl ProgressLogger {
    /// Create a logger printing records up to `level`
    pub const fn new(multi_progress: MultiProgress, level: LevelFilter) -> Self {
        Self {
            multi_progress,
            level,
        }
    }

    /// Install as the global logger
    ///
    /// # Errors
    ///
    /// Returns an error if a global logger is already installed
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for ProgressLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    // Allow print: this is the log sink
    #[allow(clippy::print_stderr)]
    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            self.multi_progress.suspend(|| {
                eprintln!("[{:<5}] {}", record.level(), record.args());
            });
        }
    }

    fn flush(&self) {}
}
