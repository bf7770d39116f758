//! Tile types, directions and the adjacency rule table
//!
//! The tile set is closed: five pipe pieces, each either blank or a
//! T-junction whose stem points in the named direction. Rules are fixed at
//! build time and looked up by enum, so an out-of-range tile or direction
//! cannot be expressed.

use crate::algorithm::bitset::TileSet;

/// One of the fixed pipe tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileType {
    /// No openings
    Blank,
    /// Openings up, right and left
    Up,
    /// Openings up, right and down
    Right,
    /// Openings right, down and left
    Down,
    /// Openings up, down and left
    Left,
}

impl TileType {
    /// Number of tile types
    pub const COUNT: usize = 5;

    /// Every tile type in canonical order
    pub const ALL: [Self; Self::COUNT] = [Self::Blank, Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position of this tile in canonical order
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Tile at a canonical position
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Blank),
            1 => Some(Self::Up),
            2 => Some(Self::Right),
            3 => Some(Self::Down),
            4 => Some(Self::Left),
            _ => None,
        }
    }

    /// Lowercase name, also used as the tile image file stem
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
        }
    }

    /// Whether the pipe art reaches the given edge of the tile
    pub const fn is_open(self, direction: Direction) -> bool {
        !matches!(
            (self, direction),
            (Self::Blank, _)
                | (Self::Up, Direction::Down)
                | (Self::Right, Direction::Left)
                | (Self::Down, Direction::Up)
                | (Self::Left, Direction::Right)
        )
    }
}

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last column
    Right,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
}

impl Direction {
    /// All directions in propagation order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Position of this direction in propagation order
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction pointing the other way
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Column and row step for one move in this direction
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }
}

/// Adjacency compatibility data
///
/// `allowed(tile, direction)` lists the tiles that may sit next to `tile` on
/// its `direction` side. The table is directional and need not be symmetric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    allowed: [[TileSet; 4]; TileType::COUNT],
}

impl RuleTable {
    /// Build a rule table from per-tile lists ordered up, right, down, left
    pub fn from_lists(lists: [[&[TileType]; 4]; TileType::COUNT]) -> Self {
        Self {
            allowed: lists.map(|sides| sides.map(|tiles| tiles.iter().copied().collect())),
        }
    }

    /// The pipe tile rules
    pub fn pipes() -> Self {
        use TileType::{Blank, Down, Left, Right, Up};

        Self::from_lists([
            // Blank
            [&[Blank, Up], &[Blank, Right], &[Blank, Down], &[Blank, Left]],
            // Up
            [
                &[Right, Left, Down],
                &[Left, Up, Down],
                &[Blank, Down],
                &[Right, Up, Down],
            ],
            // Right
            [
                &[Right, Left, Down],
                &[Left, Up, Down],
                &[Right, Left, Up],
                &[Blank, Left],
            ],
            // Down
            [
                &[Blank, Up],
                &[Left, Up, Down],
                &[Right, Left, Up],
                &[Right, Up, Down],
            ],
            // Left
            [
                &[Right, Left, Down],
                &[Blank, Right],
                &[Right, Left, Up],
                &[Up, Down, Right],
            ],
        ])
    }

    /// Tiles permitted on the `direction` side of `tile`
    pub const fn allowed(&self, tile: TileType, direction: Direction) -> &TileSet {
        let [up, right, down, left] = self.sides(tile);
        match direction {
            Direction::Up => up,
            Direction::Right => right,
            Direction::Down => down,
            Direction::Left => left,
        }
    }

    const fn sides(&self, tile: TileType) -> &[TileSet; 4] {
        let [blank, up, right, down, left] = &self.allowed;
        match tile {
            TileType::Blank => blank,
            TileType::Up => up,
            TileType::Right => right,
            TileType::Down => down,
            TileType::Left => left,
        }
    }

    /// Union of `allowed(option, direction)` over every option in `options`
    pub fn allowed_by_any(&self, options: &TileSet, direction: Direction) -> TileSet {
        let mut union = TileSet::new();
        for option in options.iter() {
            union.union_with(self.allowed(option, direction));
        }
        union
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::pipes()
    }
}
