//! Grid state with explicit column/row addressing
//!
//! Cells live in an `Array2` indexed `[row, col]`. Callers address cells with
//! [`CellRef`] and find neighbours through [`Grid::neighbor`], so nothing
//! outside this module depends on how the array is laid out.

use ndarray::Array2;

use crate::algorithm::bitset::TileSet;
use crate::spatial::tiles::{Direction, TileType};

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    /// Column, growing rightwards
    pub col: usize,
    /// Row, growing downwards
    pub row: usize,
}

impl CellRef {
    /// Create a reference from column and row
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Row-major flattened index in a grid of the given dimension
    pub const fn index(self, dimension: usize) -> usize {
        self.col + self.row * dimension
    }
}

/// State of one grid position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Whether the cell has been fixed to a single tile
    pub collapsed: bool,
    /// Remaining candidate tiles
    pub options: TileSet,
}

impl Cell {
    /// Uncollapsed cell with every tile available
    pub fn new() -> Self {
        Self {
            collapsed: false,
            options: TileSet::all(),
        }
    }

    /// Cell fixed to `tile`
    pub fn collapsed(tile: TileType) -> Self {
        Self {
            collapsed: true,
            options: TileSet::single(tile),
        }
    }

    /// Number of remaining candidates
    pub fn entropy(&self) -> usize {
        self.options.len()
    }

    /// The tile to draw, present only once collapsed
    pub fn display_tile(&self) -> Option<TileType> {
        if self.collapsed {
            self.options.sole()
        } else {
            None
        }
    }

    /// Check the collapsed/options invariant
    pub fn is_consistent(&self) -> bool {
        if self.collapsed {
            self.options.len() == 1
        } else {
            !self.options.is_empty()
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only projection of a cell for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Position of the cell
    pub position: CellRef,
    /// Whether the cell is collapsed
    pub collapsed: bool,
    /// Tile to draw, `None` for uncollapsed cells
    pub display_tile: Option<TileType>,
}

/// Square grid of cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<Cell>,
    dimension: usize,
}

impl Grid {
    /// Fresh grid with every cell uncollapsed and all tiles available
    pub fn new(dimension: usize) -> Self {
        Self {
            cells: Array2::from_elem((dimension, dimension), Cell::new()),
            dimension,
        }
    }

    /// Build a grid from cells listed in row-major order
    ///
    /// Returns `None` if the cell count is not `dimension * dimension`.
    pub fn from_cells(dimension: usize, cells: Vec<Cell>) -> Option<Self> {
        Array2::from_shape_vec((dimension, dimension), cells)
            .ok()
            .map(|cells| Self { cells, dimension })
    }

    /// Side length of the grid
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.dimension * self.dimension
    }

    /// Whether the grid has no cells
    pub const fn is_empty(&self) -> bool {
        self.dimension == 0
    }

    /// Whether a reference lies inside the grid
    pub const fn contains(&self, cell: CellRef) -> bool {
        cell.col < self.dimension && cell.row < self.dimension
    }

    /// Look up a cell
    pub fn cell(&self, cell: CellRef) -> Option<&Cell> {
        self.cells.get([cell.row, cell.col])
    }

    /// Look up a cell for mutation
    pub fn cell_mut(&mut self, cell: CellRef) -> Option<&mut Cell> {
        self.cells.get_mut([cell.row, cell.col])
    }

    /// Neighbouring position in `direction`, `None` past the boundary
    pub fn neighbor(&self, cell: CellRef, direction: Direction) -> Option<CellRef> {
        let (dcol, drow) = direction.offset();
        let col = cell.col.checked_add_signed(dcol)?;
        let row = cell.row.checked_add_signed(drow)?;
        let target = CellRef::new(col, row);
        self.contains(target).then_some(target)
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = CellRef> + use<> {
        let dimension = self.dimension;
        (0..dimension).flat_map(move |row| (0..dimension).map(move |col| CellRef::new(col, row)))
    }

    /// All cells with their positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| (CellRef::new(col, row), cell))
    }

    /// Whether every cell is collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(|cell| cell.collapsed)
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.collapsed).count()
    }

    /// Uncollapsed cells in row-major order
    pub fn uncollapsed(&self) -> Vec<(CellRef, &Cell)> {
        self.iter().filter(|(_, cell)| !cell.collapsed).collect()
    }

    /// Render projection of every cell in row-major order
    pub fn view(&self) -> Vec<CellView> {
        self.iter()
            .map(|(position, cell)| CellView {
                position,
                collapsed: cell.collapsed,
                display_tile: cell.display_tile(),
            })
            .collect()
    }

    /// Check every cell satisfies the collapsed/options invariant
    pub fn is_consistent(&self) -> bool {
        self.cells.iter().all(Cell::is_consistent)
    }
}
