//! Floor configurator.
//!
//! Resizes a floor's active rectangle. Shrinking cancels every reservation in
//! the vacated strips before the new bounds are committed, so cells that
//! become active again on a later grow are always empty.

use tracing::{debug, info};

use crate::{
    error::LibraryError,
    grid::{DAYS, FloorBounds, SeatCoord, SeatGrid},
    seat::Seat,
};

/// Result of a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeReport {
    /// Floor index.
    pub floor: usize,
    /// Bounds before the resize.
    pub previous: FloorBounds,
    /// Bounds after the resize.
    pub current: FloorBounds,
    /// Reservations cancelled because their cell left the active area.
    pub cancelled: usize,
}

impl SeatGrid {
    /// Set a floor's active rectangle to `rows × cols`.
    ///
    /// # Errors
    ///
    /// - `InvalidCoordinate` if `floor` does not exist
    /// - `InvalidFloorConfig` if either dimension is outside `[1, capacity]`;
    ///   nothing is mutated
    pub fn resize_floor(
        &mut self,
        floor: usize,
        rows: usize,
        cols: usize,
    ) -> Result<ResizeReport, LibraryError> {
        let previous = self.bounds(floor)?;
        let current = FloorBounds::new(rows, cols)
            .ok_or(LibraryError::InvalidFloorConfig { floor, rows, cols })?;

        // Cells inside the old rectangle but outside the new one: the row strip
        // and the column strip, with their shared corner visited once.
        let mut cancelled = 0;
        for day in 0..DAYS {
            for row in 0..previous.rows() {
                for col in 0..previous.cols() {
                    if current.contains(row, col) {
                        continue;
                    }
                    let seat = self.slot_mut(SeatCoord::new(floor, row, col, day));
                    if !seat.is_empty() {
                        *seat = Seat::Empty;
                        cancelled += 1;
                    }
                }
            }
        }

        self.set_bounds(floor, current);

        if cancelled > 0 {
            info!(floor, %previous, %current, cancelled, "floor shrunk, reservations cancelled");
        } else {
            debug!(floor, %previous, %current, "floor resized");
        }

        Ok(ResizeReport { floor, previous, current, cancelled })
    }
}
