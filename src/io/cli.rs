//! Command-line interface driving the tick loop and exporting results

use crate::algorithm::executor::{EngineConfig, WaveCollapse};
use crate::algorithm::random::SeededRandom;
use crate::algorithm::scheduler::{ContradictionPolicy, Scheduler, TickReport};
use crate::io::configuration::{
    DEFAULT_CELL_SIZE, DEFAULT_CYCLES, DEFAULT_DIMENSION, DEFAULT_RESET_PAUSE_MS, DEFAULT_SEED,
    DEFAULT_TICK_INTERVAL_MS, OUTPUT_PREFIX,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{TileAtlas, export_grid_as_png, snapshot_path, validate_render_size};
use crate::io::progress::{ProgressLogger, ProgressManager};
use crate::io::visualization::VisualizationCapture;
use crate::spatial::grid::Grid;
use clap::Parser;
use log::{LevelFilter, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "pipecollapse")]
#[command(
    author,
    version,
    about = "Generate pipe tile grids with a simplified wave function collapse"
)]
/// Command-line arguments for the grid generator
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory receiving snapshots and animations
    #[arg(value_name = "OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Side length of the square grid
    #[arg(short, long, default_value_t = DEFAULT_DIMENSION)]
    pub dimension: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of fully collapsed grids to produce
    #[arg(short, long, default_value_t = DEFAULT_CYCLES)]
    pub cycles: usize,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_ms: u64,

    /// Milliseconds to wait after a full collapse before starting over
    #[arg(long, default_value_t = DEFAULT_RESET_PAUSE_MS)]
    pub pause_ms: u64,

    /// Rendered tile size in pixels
    #[arg(long, default_value_t = DEFAULT_CELL_SIZE)]
    pub cell_size: u32,

    /// Directory with blank.png, up.png, right.png, down.png and left.png
    #[arg(short, long, value_name = "DIR")]
    pub tiles: Option<PathBuf>,

    /// Export each cycle as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Sleep for the tick interval between ticks
    #[arg(short, long)]
    pub realtime: bool,

    /// Stop with an error instead of restarting on a contradiction
    #[arg(long)]
    pub fail_on_contradiction: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log every collapse
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Engine parameters from the arguments
    pub const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            dimension: self.dimension,
            tick_interval: Duration::from_millis(self.tick_ms),
            reset_pause: Duration::from_millis(self.pause_ms),
        }
    }

    /// Contradiction handling selected by the flags
    pub const fn contradiction_policy(&self) -> ContradictionPolicy {
        if self.fail_on_contradiction {
            ContradictionPolicy::Fail
        } else {
            ContradictionPolicy::Restart
        }
    }

    /// Log verbosity selected by the flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

/// Outcome of a complete run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Grids that reached full collapse
    pub completed_cycles: usize,
    /// Ticks performed
    pub ticks: usize,
    /// Contradictions absorbed by restarting
    pub contradictions: usize,
    /// Exported PNG snapshots
    pub snapshots: Vec<PathBuf>,
    /// Exported GIF animations
    pub animations: Vec<PathBuf>,
}

/// Runs the scheduler and exports every completed grid
pub struct Generator {
    cli: Cli,
    progress_manager: ProgressManager,
}

impl Generator {
    /// Create a generator for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = if cli.should_show_progress() {
            ProgressManager::new()
        } else {
            ProgressManager::hidden()
        };

        Self {
            cli,
            progress_manager,
        }
    }

    /// Route `log` output above the progress bars
    ///
    /// Does nothing if a logger is already installed.
    pub fn install_logger(&self) {
        let logger = ProgressLogger::new(
            self.progress_manager.multi_progress().clone(),
            self.cli.log_level(),
        );
        let _ = logger.install();
    }

    /// Generate the requested number of grids
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any parameter is out of range
    /// - The rendered image would be too large
    /// - Tile images cannot be loaded
    /// - A contradiction occurs with `--fail-on-contradiction`
    /// - Exporting a snapshot or animation fails
    pub fn run(&mut self) -> Result<RunSummary> {
        if self.cli.cycles == 0 {
            return Err(invalid_parameter(
                "cycles",
                &self.cli.cycles,
                &"must be at least 1",
            ));
        }

        let config = self.cli.engine_config().validate()?;
        validate_render_size(config.dimension, self.cli.cell_size)?;
        let atlas = match &self.cli.tiles {
            Some(dir) => TileAtlas::from_dir(dir, self.cli.cell_size)?,
            None => TileAtlas::pipes(self.cli.cell_size)?,
        };

        let engine = WaveCollapse::new(config, SeededRandom::new(self.cli.seed))?;
        let mut scheduler = Scheduler::new(engine, self.cli.contradiction_policy());

        info!(
            "Generating {} grid(s) of {}x{} with seed {}",
            self.cli.cycles, config.dimension, config.dimension, self.cli.seed
        );

        let total_cells = config.dimension * config.dimension;
        let frame_delay_ms = u32::try_from(config.tick_interval.as_millis()).unwrap_or(u32::MAX);
        let output_dir = self.cli.output_dir.as_path();
        let realtime = self.cli.realtime;
        let progress = &mut self.progress_manager;

        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(config.dimension));
        let mut summary = RunSummary::default();
        let mut cycle_start = Instant::now();

        progress.initialize(self.cli.cycles);
        progress.start_cycle(1, total_cells);

        scheduler.run_until_cycles(self.cli.cycles, |report: &TickReport, grid: &Grid| {
            if report.started_cycle() {
                progress.start_cycle(summary.completed_cycles + 1, total_cells);
                cycle_start = Instant::now();
                if let Some(ref mut frames) = capture {
                    frames.clear();
                }
            }

            if report.collapsed() {
                progress.update(grid.collapsed_count());
                if let Some(ref mut frames) = capture {
                    frames.record(grid);
                }
            }

            if report.completed_cycle() {
                summary.completed_cycles += 1;
                let index = summary.completed_cycles;

                let path = snapshot_path(output_dir, index);
                export_grid_as_png(grid, &atlas, &path)?;
                info!("Saved {}", path.display());
                summary.snapshots.push(path);

                if let Some(ref frames) = capture {
                    let path = animation_path(output_dir, index);
                    frames.export_gif(&atlas, &path, frame_delay_ms)?;
                    info!("Saved {}", path.display());
                    summary.animations.push(path);
                }

                progress.complete_cycle(cycle_start.elapsed());
            }

            if realtime {
                std::thread::sleep(config.tick_interval);
            }

            Ok(true)
        })?;

        progress.finish();

        summary.ticks = scheduler.ticks();
        summary.contradictions = scheduler.contradictions();
        Ok(summary)
    }
}

/// Animation path for a completed cycle
pub fn animation_path(output_dir: &Path, cycle: usize) -> PathBuf {
    output_dir.join(format!("{OUTPUT_PREFIX}-{cycle:03}.gif"))
}
