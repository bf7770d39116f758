use crate::{
    algorithm::random::{RandomSource, choose},
    spatial::grid::{Cell, CellRef, Grid},
    spatial::tiles::TileType,
};

/// A cell chosen for collapse together with its chosen tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collapse {
    /// Position of the collapsed cell
    pub cell: CellRef,
    /// Tile the cell was fixed to
    pub tile: TileType,
}

/// Uncollapsed cells sharing the lowest option count
///
/// The pool is stable-sorted by option count and cut at the first cell whose
/// count exceeds the minimum, so every tied cell survives in grid order.
pub fn minimum_entropy_candidates(grid: &Grid) -> Vec<CellRef> {
    let mut pool: Vec<(CellRef, usize)> = grid
        .uncollapsed()
        .into_iter()
        .map(|(position, cell)| (position, cell.entropy()))
        .collect();

    pool.sort_by_key(|&(_, entropy)| entropy);

    let Some(&(_, minimum)) = pool.first() else {
        return Vec::new();
    };
    let stop = pool.partition_point(|&(_, entropy)| entropy <= minimum);
    pool.truncate(stop);

    pool.into_iter().map(|(position, _)| position).collect()
}

/// Choose a cell among `candidates` and a tile among its options
///
/// Draws exactly twice from `random` when a cell is found. Returns `None`
/// when there are no candidates or the chosen cell has no options left.
pub fn pick_collapse<R>(grid: &Grid, candidates: &[CellRef], random: &mut R) -> Option<Collapse>
where
    R: RandomSource + ?Sized,
{
    let cell = *choose(random, candidates)?;
    let options = grid.cell(cell)?.options.to_vec();
    let tile = *choose(random, &options)?;
    Some(Collapse { cell, tile })
}

/// Fix the chosen cell to its tile in place
///
/// Returns `false` if the position lies outside the grid.
pub fn apply_collapse(grid: &mut Grid, collapse: Collapse) -> bool {
    grid.cell_mut(collapse.cell).is_some_and(|cell| {
        *cell = Cell::collapsed(collapse.tile);
        true
    })
}
