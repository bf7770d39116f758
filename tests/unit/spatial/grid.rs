//! Tests for grid addressing, neighbour lookup and render views

#[cfg(test)]
mod tests {
    use pipecollapse::algorithm::bitset::TileSet;
    use pipecollapse::spatial::grid::{Cell, CellRef, Grid};
    use pipecollapse::spatial::tiles::{Direction, TileType};

    // Tests fresh grid invariants
    // Verified by initializing cells as collapsed
    #[test]
    fn test_new_grid_is_uncollapsed_with_all_options() {
        let grid = Grid::new(4);

        assert_eq!(grid.dimension(), 4);
        assert_eq!(grid.len(), 16);
        assert_eq!(grid.collapsed_count(), 0);
        assert!(!grid.is_fully_collapsed());
        assert!(grid.is_consistent());
        for (_, cell) in grid.iter() {
            assert!(!cell.collapsed);
            assert_eq!(cell.options, TileSet::all());
        }
    }

    // Tests neighbours inside the grid
    // Verified by swapping the Up and Down offsets
    #[test]
    fn test_neighbor_interior() {
        let grid = Grid::new(3);
        let center = CellRef::new(1, 1);

        assert_eq!(grid.neighbor(center, Direction::Up), Some(CellRef::new(1, 0)));
        assert_eq!(grid.neighbor(center, Direction::Right), Some(CellRef::new(2, 1)));
        assert_eq!(grid.neighbor(center, Direction::Down), Some(CellRef::new(1, 2)));
        assert_eq!(grid.neighbor(center, Direction::Left), Some(CellRef::new(0, 1)));
    }

    // Tests boundary sides have no neighbour
    // Verified by removing the bounds check
    #[test]
    fn test_neighbor_boundaries() {
        let grid = Grid::new(3);

        assert_eq!(grid.neighbor(CellRef::new(0, 0), Direction::Up), None);
        assert_eq!(grid.neighbor(CellRef::new(0, 0), Direction::Left), None);
        assert_eq!(grid.neighbor(CellRef::new(2, 2), Direction::Right), None);
        assert_eq!(grid.neighbor(CellRef::new(2, 2), Direction::Down), None);
        assert_eq!(grid.neighbor(CellRef::new(2, 0), Direction::Right), None);
    }

    // Tests single-cell grid has no neighbours at all
    // Verified by allowing wraparound
    #[test]
    fn test_single_cell_has_no_neighbors() {
        let grid = Grid::new(1);
        for direction in Direction::ALL {
            assert_eq!(grid.neighbor(CellRef::new(0, 0), direction), None);
        }
    }

    // Tests iteration and flattened index follow row-major order
    // Verified by iterating column-major
    #[test]
    fn test_row_major_order() {
        let grid = Grid::new(3);
        let positions: Vec<CellRef> = grid.iter().map(|(position, _)| position).collect();

        assert_eq!(positions, grid.positions().collect::<Vec<_>>());
        for (i, position) in positions.iter().enumerate() {
            assert_eq!(position.index(3), i);
        }
        assert_eq!(positions.get(1), Some(&CellRef::new(1, 0)));
        assert_eq!(positions.get(3), Some(&CellRef::new(0, 1)));
    }

    // Tests column/row addressing maps onto the right cell
    // Verified by swapping row and col in the array index
    #[test]
    fn test_cell_addressing() {
        let mut grid = Grid::new(3);
        if let Some(cell) = grid.cell_mut(CellRef::new(2, 0)) {
            *cell = Cell::collapsed(TileType::Right);
        }

        assert_eq!(
            grid.cell(CellRef::new(2, 0)).and_then(Cell::display_tile),
            Some(TileType::Right)
        );
        assert_eq!(
            grid.cell(CellRef::new(0, 2)).and_then(Cell::display_tile),
            None
        );
        assert!(grid.cell(CellRef::new(3, 0)).is_none());
    }

    // Tests render view exposes only collapsed tiles
    // Verified by showing the first option of open cells
    #[test]
    fn test_view_projection() {
        let mut grid = Grid::new(2);
        if let Some(cell) = grid.cell_mut(CellRef::new(1, 1)) {
            *cell = Cell::collapsed(TileType::Left);
        }
        if let Some(cell) = grid.cell_mut(CellRef::new(0, 1)) {
            cell.options = TileSet::single(TileType::Down);
        }

        let view = grid.view();
        assert_eq!(view.len(), 4);

        let last = view.last().copied();
        assert_eq!(last.map(|v| v.position), Some(CellRef::new(1, 1)));
        assert_eq!(last.and_then(|v| v.display_tile), Some(TileType::Left));

        let open = view.get(2).copied();
        assert_eq!(open.map(|v| v.collapsed), Some(false));
        assert_eq!(open.and_then(|v| v.display_tile), None);
    }

    // Tests invariant check catches broken cells
    // Verified by accepting empty option sets
    #[test]
    fn test_consistency_check() {
        let mut grid = Grid::new(2);
        assert!(grid.is_consistent());

        if let Some(cell) = grid.cell_mut(CellRef::new(0, 0)) {
            cell.options = TileSet::new();
        }
        assert!(!grid.is_consistent());

        let broken = Cell {
            collapsed: true,
            options: TileSet::all(),
        };
        assert!(!broken.is_consistent());
    }

    // Tests building from a cell list checks the shape
    // Verified by skipping the shape check
    #[test]
    fn test_from_cells_shape() {
        assert!(Grid::from_cells(2, vec![Cell::new(); 4]).is_some());
        assert!(Grid::from_cells(2, vec![Cell::new(); 3]).is_none());
    }

    // Tests fully collapsed detection
    // Verified by checking any instead of all
    #[test]
    fn test_fully_collapsed() {
        let cells = vec![Cell::collapsed(TileType::Blank); 4];
        let grid = Grid::from_cells(2, cells).unwrap_or_else(|| Grid::new(2));
        assert!(grid.is_fully_collapsed());
        assert_eq!(grid.collapsed_count(), 4);
        assert!(grid.uncollapsed().is_empty());
    }
}
