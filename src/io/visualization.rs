//! Frame capture and GIF generation for grid animations

use crate::io::configuration::{
    FINAL_FRAME_HOLD, GIF_MAX_FRAME_DELAY_MS, VIEWER_MIN_FRAME_DELAY_MS,
};
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::{TileAtlas, render_view};
use crate::spatial::grid::{CellView, Grid};
use image::{Delay, Frame};
use std::path::Path;

/// Captures committed grid states for an animated export
///
/// Stores the lightweight render projection per frame and only rasterizes
/// when exporting.
pub struct VisualizationCapture {
    pub(crate) frames: Vec<Vec<CellView>>,
    dimension: usize,
}

impl VisualizationCapture {
    /// Start an empty capture for grids of the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            frames: Vec::with_capacity(dimension * dimension + 1),
            dimension,
        }
    }

    /// Record the current state of the grid as a frame
    pub fn record(&mut self, grid: &Grid) {
        self.frames.push(grid.view());
    }

    /// Drop all recorded frames
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Returns the total number of recorded frames
    pub const fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Export the captured frames as a GIF
    ///
    /// The frame delay is clamped between what viewers reliably support and
    /// what a GIF can store. The last frame is held for `FINAL_FRAME_HOLD`
    /// delays, capped at the same maximum.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, atlas: &TileAtlas, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No frames captured for visualization".to_string(),
            });
        }

        let delay_ms = frame_delay_ms.clamp(VIEWER_MIN_FRAME_DELAY_MS, GIF_MAX_FRAME_DELAY_MS);
        let frames = self.generate_frames(atlas, delay_ms);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| AlgorithmError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, atlas: &TileAtlas, delay_ms: u32) -> Vec<Frame> {
        let mut frames: Vec<Frame> = self
            .frames
            .iter()
            .map(|view| {
                Frame::from_parts(
                    render_view(view, self.dimension, atlas),
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay_ms, 1),
                )
            })
            .collect();

        let hold_ms = delay_ms
            .saturating_mul(FINAL_FRAME_HOLD)
            .min(GIF_MAX_FRAME_DELAY_MS);
        if let Some(last_frame_img) = frames.last().map(|f| f.buffer().clone()) {
            frames.push(Frame::from_parts(
                last_frame_img,
                0,
                0,
                Delay::from_numer_denom_ms(hold_ms, 1),
            ));
        }

        frames
    }
}
