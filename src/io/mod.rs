//! Input/output, configuration and error handling

/// Command-line interface and run orchestration
pub mod cli;
/// Compile-time defaults
pub mod configuration;
/// Error types shared across the crate
pub mod error;
/// Tile atlas and PNG snapshots
pub mod image;
/// Progress bars and log routing
pub mod progress;
/// Animated GIF capture
pub mod visualization;
