//! Reservation state machine.
//!
//! Per seat: `Empty → Reserved(ByAdmin | BySelf) → Empty`. There is no
//! transfer and no in-place rebooking; moving a reservation means cancelling
//! and reserving again.
//!
//! Transitions here are authorization-free: [`crate::LibrarySystem`] consults
//! [`crate::access`] before calling them.

use tracing::debug;

use crate::{
    access::ReserveGrant,
    error::{CoordinateError, LibraryError},
    grid::{DAYS, FLOORS, SeatCoord, SeatGrid},
    seat::{Reservation, Seat},
};

/// Filter for a bulk cancellation sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelScope {
    /// Every active seat of every floor on this day.
    Day(usize),
    /// Every active seat of this floor on every day.
    Floor(usize),
}

impl SeatGrid {
    /// Reserve an empty active seat.
    ///
    /// # Errors
    ///
    /// - `InvalidCoordinate` if `coord` is outside the active layout
    /// - `AlreadyReserved` if the seat is held, whoever holds it
    pub fn reserve(
        &mut self,
        coord: SeatCoord,
        grant: ReserveGrant,
        now: i64,
    ) -> Result<Reservation, LibraryError> {
        if let Some(held) = self.get(coord)?.reservation() {
            return Err(LibraryError::AlreadyReserved { coord, owner: held.owner });
        }

        let reservation = Reservation { kind: grant.kind, owner: grant.owner, reserved_at: now };
        self.set(coord, Seat::Reserved(reservation))?;

        debug!(%coord, owner = %grant.owner, kind = ?grant.kind, "seat reserved");
        Ok(reservation)
    }

    /// Empty a reserved active seat, returning what it held.
    ///
    /// # Errors
    ///
    /// - `InvalidCoordinate` if `coord` is outside the active layout
    /// - `NotReserved` if the seat is already empty
    pub fn cancel(&mut self, coord: SeatCoord) -> Result<Reservation, LibraryError> {
        match self.set(coord, Seat::Empty)? {
            Seat::Reserved(reservation) => {
                debug!(%coord, owner = %reservation.owner, "reservation cancelled");
                Ok(reservation)
            },
            Seat::Empty => Err(LibraryError::NotReserved { coord }),
        }
    }

    /// Empty every reserved active seat matching `scope`.
    ///
    /// Returns the number of reservations removed. Each reset is independent,
    /// so a sweep either completes or leaves the grid partially swept but
    /// consistent.
    pub fn cancel_where(&mut self, scope: CancelScope) -> Result<usize, CoordinateError> {
        let coords: Vec<SeatCoord> = match scope {
            CancelScope::Day(day) => {
                Self::check_day(day)?;
                let mut coords = Vec::new();
                for floor in 0..FLOORS {
                    coords.extend(self.active_cells(floor, day)?);
                }
                coords
            },
            CancelScope::Floor(floor) => {
                Self::check_floor(floor)?;
                let mut coords = Vec::new();
                for day in 0..DAYS {
                    coords.extend(self.active_cells(floor, day)?);
                }
                coords
            },
        };

        let mut cancelled = 0;
        for coord in coords {
            let seat = self.slot_mut(coord);
            if !seat.is_empty() {
                *seat = Seat::Empty;
                cancelled += 1;
            }
        }

        debug!(?scope, cancelled, "bulk cancellation");
        Ok(cancelled)
    }

    /// Empty every slot and restore default bounds on every floor.
    ///
    /// Returns the number of reservations removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.reserved_count();
        *self = Self::new();
        debug!(removed, "grid cleared");
        removed
    }

    /// Every reservation on an active seat, ordered by floor, day, row,
    /// column.
    pub fn reservations(&self) -> Vec<(SeatCoord, Reservation)> {
        let mut found = Vec::new();
        for floor in 0..FLOORS {
            let bounds = self.all_bounds()[floor];
            for day in 0..DAYS {
                for row in 0..bounds.rows() {
                    for col in 0..bounds.cols() {
                        let coord = SeatCoord::new(floor, row, col, day);
                        if let Some(r) = self.slot(coord).reservation() {
                            found.push((coord, *r));
                        }
                    }
                }
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::FloorBounds,
        seat::{ReservationKind, UserLetter},
    };

    fn grant(c: char, kind: ReservationKind) -> ReserveGrant {
        ReserveGrant { owner: UserLetter::new(c).unwrap(), kind }
    }

    #[test]
    fn reserve_then_cancel_restores_grid() {
        let mut grid = SeatGrid::new();
        let before = grid.clone();
        let coord = SeatCoord::new(0, 1, 2, 3);

        let r = grid.reserve(coord, grant('B', ReservationKind::BySelf), 1_700_000_000).unwrap();
        assert_eq!(r.reserved_at, 1_700_000_000);
        assert_ne!(grid, before);

        assert_eq!(grid.cancel(coord), Ok(r));
        assert_eq!(grid, before);
    }

    #[test]
    fn reserve_held_seat_fails_for_any_kind() {
        let mut grid = SeatGrid::new();
        let coord = SeatCoord::new(4, 0, 0, 0);
        grid.reserve(coord, grant('C', ReservationKind::BySelf), 5).unwrap();

        for kind in [ReservationKind::BySelf, ReservationKind::ByAdmin] {
            let err = grid.reserve(coord, grant('D', kind), 6).unwrap_err();
            assert_eq!(
                err,
                LibraryError::AlreadyReserved { coord, owner: UserLetter::new('C').unwrap() }
            );
        }
        assert_eq!(grid.get(coord).unwrap().reserved_at(), Some(5));
    }

    #[test]
    fn cancel_empty_seat_fails() {
        let mut grid = SeatGrid::new();
        let coord = SeatCoord::new(0, 0, 0, 0);
        assert_eq!(grid.cancel(coord), Err(LibraryError::NotReserved { coord }));
    }

    #[test]
    fn bulk_cancel_by_day_spans_floors() {
        let mut grid = SeatGrid::new();
        let g = grant('A', ReservationKind::ByAdmin);
        grid.reserve(SeatCoord::new(0, 0, 0, 2), g, 1).unwrap();
        grid.reserve(SeatCoord::new(4, 3, 3, 2), g, 1).unwrap();
        grid.reserve(SeatCoord::new(4, 3, 3, 3), g, 1).unwrap();

        assert_eq!(grid.cancel_where(CancelScope::Day(2)), Ok(2));
        assert_eq!(grid.reserved_count(), 1);
        assert!(!grid.get(SeatCoord::new(4, 3, 3, 3)).unwrap().is_empty());
    }

    #[test]
    fn bulk_cancel_by_floor_spans_days() {
        let mut grid = SeatGrid::new();
        let g = grant('A', ReservationKind::ByAdmin);
        for day in 0..DAYS {
            grid.reserve(SeatCoord::new(1, 0, 0, day), g, 1).unwrap();
        }
        grid.reserve(SeatCoord::new(2, 0, 0, 0), g, 1).unwrap();

        assert_eq!(grid.cancel_where(CancelScope::Floor(1)), Ok(DAYS));
        assert_eq!(grid.reserved_count(), 1);
        assert_eq!(grid.cancel_where(CancelScope::Floor(1)), Ok(0));
    }

    #[test]
    fn bulk_cancel_rejects_bad_scope() {
        let mut grid = SeatGrid::new();
        assert_eq!(grid.cancel_where(CancelScope::Day(DAYS)), Err(CoordinateError::Day(DAYS)));
        assert_eq!(
            grid.cancel_where(CancelScope::Floor(FLOORS)),
            Err(CoordinateError::Floor(FLOORS))
        );
    }

    #[test]
    fn clear_resets_seats_and_bounds() {
        let mut grid = SeatGrid::new();
        grid.reserve(SeatCoord::new(0, 0, 0, 0), grant('A', ReservationKind::BySelf), 1).unwrap();
        grid.set_bounds(0, FloorBounds::new(1, 1).unwrap());

        assert_eq!(grid.clear(), 1);
        assert_eq!(grid, SeatGrid::new());
    }

    #[test]
    fn reservations_are_ordered_floor_day_row_col() {
        let mut grid = SeatGrid::new();
        let g = grant('E', ReservationKind::BySelf);
        let coords = [
            SeatCoord::new(1, 0, 0, 0),
            SeatCoord::new(0, 3, 0, 1),
            SeatCoord::new(0, 0, 2, 1),
            SeatCoord::new(0, 2, 2, 0),
        ];
        for coord in coords {
            grid.reserve(coord, g, 9).unwrap();
        }

        let listed: Vec<SeatCoord> = grid.reservations().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            listed,
            vec![
                SeatCoord::new(0, 2, 2, 0),
                SeatCoord::new(0, 0, 2, 1),
                SeatCoord::new(0, 3, 0, 1),
                SeatCoord::new(1, 0, 0, 0),
            ]
        );
    }
}
