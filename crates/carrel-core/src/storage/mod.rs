//! Storage abstraction for seat snapshots
//!
//! Trait-based abstraction for persisting the whole [`SeatGrid`]. The trait is
//! synchronous (no async): a command is applied and saved before the next one
//! is read.

mod chaotic;
mod error;
mod file;
mod memory;

pub use chaotic::ChaoticStorage;
pub use error::StorageError;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::grid::SeatGrid;

/// Durable home of the seat grid.
///
/// Must be Clone (runtimes and tests may hold the same backend), Send + Sync,
/// and synchronous. Implementations that keep state in memory share it via
/// `Arc`, so clones observe the same snapshot.
pub trait Storage: Clone + Send + Sync + 'static {
    /// Load the last saved grid.
    ///
    /// Returns `None` if nothing was ever saved. A snapshot that exists but
    /// cannot be read or decoded is an error, never `None`.
    fn load(&self) -> Result<Option<SeatGrid>, StorageError>;

    /// Replace the saved grid with `grid`.
    ///
    /// # Invariants
    ///
    /// - Post: a following [`Self::load`] returns a grid equal to `grid`
    fn save(&self, grid: &SeatGrid) -> Result<(), StorageError>;
}
