//! Error types for the reservation core.
//!
//! Each layer has its own enum: [`CoordinateError`] for grid addressing,
//! [`Denial`] for access control, [`crate::SnapshotError`] for the codec and
//! [`StorageError`] for backends. [`LibraryError`] is the command-level error
//! the operator sees; it wraps the others.
//!
//! Every variant is recoverable: the command that produced it had no effect
//! and the caller may carry on with the next one.

use thiserror::Error;

use crate::{
    access::Denial,
    grid::{DAYS, FLOORS, SeatCoord},
    seat::UserLetter,
    storage::StorageError,
};

/// Coordinate outside the addressable or active range.
///
/// Fields hold zero-based indices; messages print them one-based.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateError {
    /// Floor index beyond the building.
    #[error("floor {} does not exist (1-{})", .0 + 1, FLOORS)]
    Floor(usize),

    /// Day index beyond the week.
    #[error("day {} does not exist (1-{})", .0 + 1, DAYS)]
    Day(usize),

    /// Row or column outside the floor's active rectangle.
    #[error("seat ({}, {}) is outside the floor's {rows}x{cols} layout", .row + 1, .col + 1)]
    Seat {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Active rows on that floor.
        rows: usize,
        /// Active columns on that floor.
        cols: usize,
    },
}

/// Command-level errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// Coordinate out of range for the current layout.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordinateError),

    /// Seat is already held.
    #[error("{coord} is already reserved")]
    AlreadyReserved {
        /// Seat that was requested
        coord: SeatCoord,
        /// Current holder
        owner: UserLetter,
    },

    /// Seat holds no reservation to cancel.
    #[error("{coord} is not reserved")]
    NotReserved {
        /// Seat that was requested
        coord: SeatCoord,
    },

    /// Session may not perform this action.
    #[error("not authorized: {0}")]
    NotAuthorized(#[from] Denial),

    /// Requested floor size is outside `[1, capacity]`, or floors are locked.
    #[error("invalid floor configuration for floor {}: {rows}x{cols}", .floor + 1)]
    InvalidFloorConfig {
        /// Floor index
        floor: usize,
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
    },

    /// Login name is neither `Admin` nor a single letter.
    #[error("invalid user name {0:?}: expected a letter A-Z or Admin")]
    InvalidLogin(String),

    /// Snapshot could not be read or written.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StorageError),
}

impl LibraryError {
    /// Returns true if the failed command changed nothing in memory.
    ///
    /// Only persistence failures can leave an applied mutation behind; every
    /// other variant is raised before any state is touched.
    pub fn is_no_op(&self) -> bool {
        !matches!(self, Self::Persistence(_))
    }
}
