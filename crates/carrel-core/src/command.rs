//! Typed commands accepted by [`crate::LibrarySystem`].
//!
//! Produced outside the core (the CLI parser, tests). All indices are
//! zero-based; range checks happen when the command is handled.

use crate::grid::SeatCoord;

/// One operator request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Log in as `"Admin"` or a single letter.
    Login {
        /// Name as typed
        name: String,
    },

    /// End the current session.
    Logout,

    /// Show one floor on one day.
    View {
        /// Floor index
        floor: usize,
        /// Day index
        day: usize,
    },

    /// Reserve a seat.
    Reserve {
        /// Seat to reserve
        coord: SeatCoord,
        /// Letter to reserve for; required for the administrator
        target: Option<char>,
    },

    /// Cancel the reservation on a seat.
    Cancel {
        /// Seat to cancel
        coord: SeatCoord,
    },

    /// List every reservation (administrator).
    ListAll,

    /// Empty the whole grid and restore default layouts (administrator).
    Clear,

    /// Cancel every reservation on one day, all floors (administrator).
    CancelDay {
        /// Day index
        day: usize,
    },

    /// Cancel every reservation on one floor, all days (administrator).
    CancelFloor {
        /// Floor index
        floor: usize,
    },

    /// Change a floor's active rectangle (administrator).
    ResizeFloor {
        /// Floor index
        floor: usize,
        /// New row count
        rows: usize,
        /// New column count
        cols: usize,
    },

    /// Save and stop.
    Quit,
}

impl Command {
    /// True for commands that change the grid when they succeed.
    ///
    /// Session changes and reads are not persisted.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Reserve { .. }
                | Self::Cancel { .. }
                | Self::Clear
                | Self::CancelDay { .. }
                | Self::CancelFloor { .. }
                | Self::ResizeFloor { .. }
        )
    }
}
