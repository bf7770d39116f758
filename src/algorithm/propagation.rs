use crate::{
    algorithm::bitset::TileSet,
    io::error::{AlgorithmError, Result, invalid_parameter},
    spatial::grid::{Cell, CellRef, Grid},
    spatial::tiles::{Direction, RuleTable},
};

/// Candidate tiles for `position` given its neighbours in `grid`
///
/// Starts from the full tile set and, for each direction with a neighbour,
/// keeps only tiles that at least one of the neighbour's options permits on
/// the facing side. Boundary sides filter nothing.
pub fn constrained_options(grid: &Grid, rules: &RuleTable, position: CellRef) -> TileSet {
    let mut options = TileSet::all();

    for direction in Direction::ALL {
        let Some(neighbor) = grid
            .neighbor(position, direction)
            .and_then(|neighbor| grid.cell(neighbor))
        else {
            continue;
        };

        let permitted = rules.allowed_by_any(&neighbor.options, direction.opposite());
        options.intersect_with(&permitted);
    }

    options
}

/// Rebuild the whole grid from a snapshot
///
/// Collapsed cells are copied unchanged. Every other cell has its options
/// recomputed by [`constrained_options`] against the snapshot, never against
/// cells already rewritten in this pass. This is a single relaxation step,
/// not an iterated arc-consistency fixpoint.
///
/// # Errors
///
/// Returns [`AlgorithmError::Contradiction`] for the first cell, in row-major
/// order, whose recomputed options are empty. `iteration` is only used to
/// label that error.
pub fn propagate(grid: &Grid, rules: &RuleTable, iteration: usize) -> Result<Grid> {
    let mut cells = Vec::with_capacity(grid.len());

    for (position, cell) in grid.iter() {
        if cell.collapsed {
            cells.push(cell.clone());
            continue;
        }

        let options = constrained_options(grid, rules, position);
        if options.is_empty() {
            return Err(AlgorithmError::Contradiction {
                col: position.col,
                row: position.row,
                iteration,
            });
        }

        cells.push(Cell {
            collapsed: false,
            options,
        });
    }

    Grid::from_cells(grid.dimension(), cells).ok_or_else(|| {
        invalid_parameter(
            "dimension",
            &grid.dimension(),
            &"propagated cell count does not match the grid shape",
        )
    })
}
