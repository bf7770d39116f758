/// Bitset of candidate tiles
pub mod bitset;
/// Engine owning the grid and performing collapse steps
pub mod executor;
/// Neighbour-consistency pass run after each collapse
pub mod propagation;
/// Injectable uniform random sources
pub mod random;
/// Tick loop with the deferred reset timer
pub mod scheduler;
/// Minimum-entropy cell selection and collapse
pub mod selection;
