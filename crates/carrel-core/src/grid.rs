//! Seat grid with per-floor active bounds.
//!
//! Storage always holds `FLOORS × MAX_ROWS × MAX_COLS × DAYS` slots, laid out
//! floor-major then row, column, day. A floor's [`FloorBounds`] select the
//! active sub-rectangle; slots outside it exist in storage but are not
//! addressable through [`SeatGrid::get`] / [`SeatGrid::set`].
//!
//! # Invariants
//!
//! - Every slot outside its floor's active rectangle is [`Seat::Empty`]. The
//!   floor configurator empties vacated cells before shrinking, and the
//!   snapshot decoder rejects images that violate this.

use std::fmt;

use crate::{error::CoordinateError, seat::Seat};

/// Number of floors.
pub const FLOORS: usize = 5;
/// Row capacity of every floor.
pub const MAX_ROWS: usize = 4;
/// Column capacity of every floor.
pub const MAX_COLS: usize = 4;
/// Number of bookable days (a week).
pub const DAYS: usize = 7;
/// Total storage slots.
pub const SLOT_COUNT: usize = FLOORS * MAX_ROWS * MAX_COLS * DAYS;

/// Zero-based seat address.
///
/// Displayed one-based, the way operators type coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeatCoord {
    /// Floor index `[0, FLOORS)`.
    pub floor: usize,
    /// Row index within the floor.
    pub row: usize,
    /// Column index within the floor.
    pub col: usize,
    /// Day index `[0, DAYS)`.
    pub day: usize,
}

impl SeatCoord {
    /// Build a coordinate. No validation happens here.
    pub const fn new(floor: usize, row: usize, col: usize, day: usize) -> Self {
        Self { floor, row, col, day }
    }
}

impl fmt::Display for SeatCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "floor {} row {} col {} day {}",
            self.floor + 1,
            self.row + 1,
            self.col + 1,
            self.day + 1
        )
    }
}

/// Active rectangle of one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FloorBounds {
    rows: usize,
    cols: usize,
}

impl FloorBounds {
    /// Full-capacity bounds every floor starts with.
    pub const DEFAULT: Self = Self { rows: MAX_ROWS, cols: MAX_COLS };

    /// Validated bounds. `None` unless `1 <= rows <= MAX_ROWS` and
    /// `1 <= cols <= MAX_COLS`.
    pub fn new(rows: usize, cols: usize) -> Option<Self> {
        ((1..=MAX_ROWS).contains(&rows) && (1..=MAX_COLS).contains(&cols))
            .then_some(Self { rows, cols })
    }

    /// Active row count.
    pub fn rows(self) -> usize {
        self.rows
    }

    /// Active column count.
    pub fn cols(self) -> usize {
        self.cols
    }

    /// True when `(row, col)` lies inside the rectangle.
    pub fn contains(self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl Default for FloorBounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FloorBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// All seats of all floors for all days, plus the floors' active bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatGrid {
    /// Exactly `SLOT_COUNT` entries.
    seats: Vec<Seat>,
    bounds: [FloorBounds; FLOORS],
}

impl SeatGrid {
    /// All seats empty, every floor at default bounds.
    pub fn new() -> Self {
        Self { seats: vec![Seat::Empty; SLOT_COUNT], bounds: [FloorBounds::DEFAULT; FLOORS] }
    }

    /// Reassemble a grid from decoded parts.
    ///
    /// Callers guarantee `seats.len() == SLOT_COUNT` and that inactive slots
    /// are empty.
    pub(crate) fn from_parts(seats: Vec<Seat>, bounds: [FloorBounds; FLOORS]) -> Self {
        debug_assert_eq!(seats.len(), SLOT_COUNT);
        Self { seats, bounds }
    }

    /// Seat at an active coordinate.
    pub fn get(&self, coord: SeatCoord) -> Result<&Seat, CoordinateError> {
        let idx = self.active_index(coord)?;
        Ok(&self.seats[idx])
    }

    /// Overwrite the seat at an active coordinate, returning the old value.
    pub fn set(&mut self, coord: SeatCoord, seat: Seat) -> Result<Seat, CoordinateError> {
        let idx = self.active_index(coord)?;
        Ok(std::mem::replace(&mut self.seats[idx], seat))
    }

    /// Current bounds of a floor.
    pub fn bounds(&self, floor: usize) -> Result<FloorBounds, CoordinateError> {
        Self::check_floor(floor)?;
        Ok(self.bounds[floor])
    }

    /// Bounds of every floor, in floor order.
    pub fn all_bounds(&self) -> &[FloorBounds; FLOORS] {
        &self.bounds
    }

    /// Every storage slot, active or not, in layout order.
    pub fn slots(&self) -> &[Seat] {
        &self.seats
    }

    /// Active coordinates of one floor on one day, row-major.
    pub fn active_cells(
        &self,
        floor: usize,
        day: usize,
    ) -> Result<impl Iterator<Item = SeatCoord> + use<>, CoordinateError> {
        Self::check_floor(floor)?;
        Self::check_day(day)?;
        let bounds = self.bounds[floor];
        Ok((0..bounds.rows)
            .flat_map(move |row| (0..bounds.cols).map(move |col| SeatCoord::new(floor, row, col, day))))
    }

    /// Number of reserved seats across the whole grid.
    pub fn reserved_count(&self) -> usize {
        self.seats.iter().filter(|s| !s.is_empty()).count()
    }

    /// Validate a floor index.
    pub fn check_floor(floor: usize) -> Result<(), CoordinateError> {
        if floor < FLOORS { Ok(()) } else { Err(CoordinateError::Floor(floor)) }
    }

    /// Validate a day index.
    pub fn check_day(day: usize) -> Result<(), CoordinateError> {
        if day < DAYS { Ok(()) } else { Err(CoordinateError::Day(day)) }
    }

    /// Validate a coordinate against the floor's current bounds.
    pub fn check(&self, coord: SeatCoord) -> Result<(), CoordinateError> {
        self.active_index(coord).map(|_| ())
    }

    fn active_index(&self, coord: SeatCoord) -> Result<usize, CoordinateError> {
        Self::check_floor(coord.floor)?;
        Self::check_day(coord.day)?;
        let bounds = self.bounds[coord.floor];
        if !bounds.contains(coord.row, coord.col) {
            return Err(CoordinateError::Seat {
                row: coord.row,
                col: coord.col,
                rows: bounds.rows,
                cols: bounds.cols,
            });
        }
        Ok(Self::slot_index(coord))
    }

    /// Storage index of a coordinate within the capacity ceiling.
    pub(crate) fn slot_index(coord: SeatCoord) -> usize {
        debug_assert!(coord.row < MAX_ROWS && coord.col < MAX_COLS);
        ((coord.floor * MAX_ROWS + coord.row) * MAX_COLS + coord.col) * DAYS + coord.day
    }

    /// Raw slot access within the ceiling, bypassing active bounds.
    pub(crate) fn slot_mut(&mut self, coord: SeatCoord) -> &mut Seat {
        &mut self.seats[Self::slot_index(coord)]
    }

    /// Raw slot read within the ceiling, bypassing active bounds.
    pub(crate) fn slot(&self, coord: SeatCoord) -> &Seat {
        &self.seats[Self::slot_index(coord)]
    }

    pub(crate) fn set_bounds(&mut self, floor: usize, bounds: FloorBounds) {
        self.bounds[floor] = bounds;
    }
}

impl Default for SeatGrid {
    fn default() -> Self {
        Self::new()
    }
}
