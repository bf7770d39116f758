//! Tests for minimum-entropy selection and collapse

#[cfg(test)]
mod tests {
    use pipecollapse::algorithm::bitset::TileSet;
    use pipecollapse::algorithm::random::SequenceRandom;
    use pipecollapse::algorithm::selection::{
        Collapse, apply_collapse, minimum_entropy_candidates, pick_collapse,
    };
    use pipecollapse::spatial::grid::{Cell, CellRef, Grid};
    use pipecollapse::spatial::tiles::TileType;

    fn set_options(grid: &mut Grid, position: CellRef, tiles: &[TileType]) {
        if let Some(cell) = grid.cell_mut(position) {
            cell.options = tiles.iter().copied().collect();
        }
    }

    // Tests fresh grid keeps every cell as a candidate
    // Verified by truncating at the first index
    #[test]
    fn test_fresh_grid_all_candidates() {
        let grid = Grid::new(3);
        let candidates = minimum_entropy_candidates(&grid);
        assert_eq!(candidates, grid.positions().collect::<Vec<_>>());
    }

    // Tests ties at the minimum survive in grid order
    // Verified by keeping only the first minimum
    #[test]
    fn test_ties_preserved_in_grid_order() {
        let mut grid = Grid::new(3);
        set_options(&mut grid, CellRef::new(2, 2), &[TileType::Up, TileType::Down]);
        set_options(&mut grid, CellRef::new(1, 0), &[TileType::Blank, TileType::Left]);
        set_options(
            &mut grid,
            CellRef::new(0, 1),
            &[TileType::Blank, TileType::Left, TileType::Right],
        );

        let candidates = minimum_entropy_candidates(&grid);
        assert_eq!(candidates, vec![CellRef::new(1, 0), CellRef::new(2, 2)]);
    }

    // Tests collapsed cells never enter the pool
    // Verified by dropping the collapsed filter
    #[test]
    fn test_collapsed_cells_excluded() {
        let mut grid = Grid::new(2);
        if let Some(cell) = grid.cell_mut(CellRef::new(0, 0)) {
            *cell = Cell::collapsed(TileType::Up);
        }
        set_options(&mut grid, CellRef::new(1, 1), &[TileType::Blank, TileType::Down]);

        let candidates = minimum_entropy_candidates(&grid);
        assert_eq!(candidates, vec![CellRef::new(1, 1)]);
    }

    // Tests fully collapsed grid yields an empty pool
    // Verified by returning all cells when none are open
    #[test]
    fn test_empty_pool() {
        let grid = Grid::from_cells(2, vec![Cell::collapsed(TileType::Blank); 4])
            .unwrap_or_else(|| Grid::new(2));
        assert!(minimum_entropy_candidates(&grid).is_empty());
    }

    // Tests the two draws pick cell then tile
    // Verified by swapping the draw order
    #[test]
    fn test_pick_collapse_uses_two_draws() {
        let mut grid = Grid::new(2);
        set_options(
            &mut grid,
            CellRef::new(1, 0),
            &[TileType::Up, TileType::Right, TileType::Left],
        );
        let candidates = vec![CellRef::new(0, 0), CellRef::new(1, 0)];
        let mut random = SequenceRandom::new(vec![1, 2]);

        let collapse = pick_collapse(&grid, &candidates, &mut random);

        assert_eq!(
            collapse,
            Some(Collapse {
                cell: CellRef::new(1, 0),
                tile: TileType::Left,
            })
        );
        assert_eq!(random.draws(), 2);
    }

    // Tests empty candidate list yields nothing without drawing
    // Verified by drawing before checking emptiness
    #[test]
    fn test_pick_collapse_no_candidates() {
        let grid = Grid::new(2);
        let mut random = SequenceRandom::new(vec![0]);
        assert_eq!(pick_collapse(&grid, &[], &mut random), None);
        assert_eq!(random.draws(), 0);
    }

    // Tests applying a collapse fixes the cell
    // Verified by leaving the collapsed flag unset
    #[test]
    fn test_apply_collapse() {
        let mut grid = Grid::new(2);
        let collapse = Collapse {
            cell: CellRef::new(0, 1),
            tile: TileType::Down,
        };

        assert!(apply_collapse(&mut grid, collapse));
        let cell = grid.cell(CellRef::new(0, 1)).cloned().unwrap_or_default();
        assert!(cell.collapsed);
        assert_eq!(cell.options, TileSet::single(TileType::Down));

        let outside = Collapse {
            cell: CellRef::new(5, 5),
            tile: TileType::Down,
        };
        assert!(!apply_collapse(&mut grid, outside));
    }
}
