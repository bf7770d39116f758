use crate::spatial::tiles::TileType;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset holding candidate tile types for a cell
///
/// Bits are indexed by [`TileType::index`], so iteration always yields tiles
/// in canonical order. Since every candidate set is a filtered copy of the
/// full tile list, canonical order is also insertion order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TileSet {
    bits: BitVec,
}

impl TileSet {
    /// Create a set with no tiles present
    pub fn new() -> Self {
        Self {
            bits: bitvec![0; TileType::COUNT],
        }
    }

    /// Create a set containing every tile type
    pub fn all() -> Self {
        Self {
            bits: bitvec![1; TileType::COUNT],
        }
    }

    /// Create a set holding exactly one tile
    pub fn single(tile: TileType) -> Self {
        let mut set = Self::new();
        set.insert(tile);
        set
    }

    /// Insert a tile type
    pub fn insert(&mut self, tile: TileType) {
        self.bits.set(tile.index(), true);
    }

    /// Remove a tile type
    pub fn remove(&mut self, tile: TileType) {
        self.bits.set(tile.index(), false);
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileType) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Add every tile of another set in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only tile in the set, if it holds exactly one
    pub fn sole(&self) -> Option<TileType> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Iterate tiles in canonical order
    pub fn iter(&self) -> impl Iterator<Item = TileType> + '_ {
        self.bits.iter_ones().filter_map(TileType::from_index)
    }

    /// Extract all tiles in canonical order
    pub fn to_vec(&self) -> Vec<TileType> {
        self.iter().collect()
    }
}

impl Default for TileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<TileType> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileType>>(iter: I) -> Self {
        let mut set = Self::new();
        for tile in iter {
            set.insert(tile);
        }
        set
    }
}

impl fmt::Debug for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for TileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileSet({} tiles: {:?})", self.len(), self.to_vec())
    }
}
