//! Tile atlas construction and PNG export of grid snapshots

use crate::io::configuration::{
    MAX_CELL_SIZE, MAX_RENDERED_SIDE, OUTPUT_PREFIX, PIPE_COLOR, PIPE_WIDTH_RATIO,
    PLACEHOLDER_COLOR, TILE_BACKGROUND,
};
use crate::io::error::{AlgorithmError, Result, WithContext, invalid_parameter};
use crate::spatial::grid::{CellView, Grid};
use crate::spatial::tiles::{Direction, TileType};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// One square image per tile type
#[derive(Debug, Clone)]
pub struct TileAtlas {
    tiles: Vec<RgbaImage>,
    cell_size: u32,
}

impl TileAtlas {
    /// Draw the pipe tiles procedurally
    ///
    /// Each tile is a dark square with a bar from the centre to every open
    /// edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell size is zero or exceeds `MAX_CELL_SIZE`
    pub fn pipes(cell_size: u32) -> Result<Self> {
        let cell_size = validate_cell_size(cell_size)?;
        let tiles = TileType::ALL
            .iter()
            .map(|&tile| draw_pipe_tile(tile, cell_size))
            .collect();

        Ok(Self { tiles, cell_size })
    }

    /// Load `blank.png`, `up.png`, `right.png`, `down.png` and `left.png`
    /// from a directory, resized to the cell size
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cell size is invalid
    /// - Any tile image is missing or cannot be decoded
    pub fn from_dir(dir: &Path, cell_size: u32) -> Result<Self> {
        let cell_size = validate_cell_size(cell_size)?;
        let mut tiles = Vec::with_capacity(TileType::COUNT);

        for tile in TileType::ALL {
            let path = dir.join(format!("{}.png", tile.name()));
            let image = image::open(&path)
                .with_path(&path, "load tile")?
                .into_rgba8();

            if image.width() == 0 || image.height() == 0 {
                return Err(AlgorithmError::InvalidSourceData {
                    reason: format!("Tile image '{}' is empty", path.display()),
                });
            }

            tiles.push(imageops::resize(
                &image,
                cell_size,
                cell_size,
                FilterType::Triangle,
            ));
        }

        Ok(Self { tiles, cell_size })
    }

    /// Side length of each tile in pixels
    pub const fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Image for a tile type
    pub fn tile(&self, tile: TileType) -> Option<&RgbaImage> {
        self.tiles.get(tile.index())
    }
}

fn validate_cell_size(cell_size: u32) -> Result<u32> {
    if cell_size == 0 || cell_size > MAX_CELL_SIZE {
        return Err(invalid_parameter(
            "cell_size",
            &cell_size,
            &format!("must be between 1 and {MAX_CELL_SIZE}"),
        ));
    }
    Ok(cell_size)
}

/// Side length in pixels of a rendered `dimension` grid
///
/// # Errors
///
/// Returns an error if the side exceeds `MAX_RENDERED_SIDE`
pub fn validate_render_size(dimension: usize, cell_size: u32) -> Result<u32> {
    u32::try_from(dimension)
        .ok()
        .and_then(|dimension| dimension.checked_mul(cell_size))
        .filter(|&side| side <= MAX_RENDERED_SIDE)
        .ok_or_else(|| {
            invalid_parameter(
                "dimension * cell_size",
                &format!("{dimension} * {cell_size}"),
                &format!("rendered side must not exceed {MAX_RENDERED_SIDE} pixels"),
            )
        })
}

// Bars run from the centre band out to each open edge
fn draw_pipe_tile(tile: TileType, size: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(size, size, Rgba(TILE_BACKGROUND));

    if tile == TileType::Blank {
        return img;
    }

    let width = ((size as f32 * PIPE_WIDTH_RATIO).round() as u32).clamp(1, size);
    let low = (size - width) / 2;
    let high = low + width;

    for y in 0..size {
        for x in 0..size {
            let in_column = (low..high).contains(&x);
            let in_row = (low..high).contains(&y);

            let on_pipe = (in_column && in_row)
                || (in_column && y < low && tile.is_open(Direction::Up))
                || (in_column && y >= high && tile.is_open(Direction::Down))
                || (in_row && x < low && tile.is_open(Direction::Left))
                || (in_row && x >= high && tile.is_open(Direction::Right));

            if on_pipe {
                img.put_pixel(x, y, Rgba(PIPE_COLOR));
            }
        }
    }

    img
}

/// Rasterize a grid view, drawing placeholders for uncollapsed cells
pub fn render_view(view: &[CellView], dimension: usize, atlas: &TileAtlas) -> RgbaImage {
    let size = atlas.cell_size();
    let side = size * dimension as u32;
    let mut img = RgbaImage::from_pixel(side, side, Rgba(PLACEHOLDER_COLOR));

    for cell in view {
        let Some(tile) = cell.display_tile.and_then(|tile| atlas.tile(tile)) else {
            continue;
        };
        let x = i64::from(cell.position.col as u32 * size);
        let y = i64::from(cell.position.row as u32 * size);
        imageops::replace(&mut img, tile, x, y);
    }

    img
}

/// Rasterize the committed state of a grid
pub fn render_grid(grid: &Grid, atlas: &TileAtlas) -> RgbaImage {
    render_view(&grid.view(), grid.dimension(), atlas)
}

/// Export the grid state as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(grid: &Grid, atlas: &TileAtlas, output_path: &Path) -> Result<()> {
    let img = render_grid(grid, atlas);

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Snapshot path for a completed cycle
pub fn snapshot_path(output_dir: &Path, cycle: usize) -> PathBuf {
    output_dir.join(format!("{OUTPUT_PREFIX}-{cycle:03}.png"))
}
