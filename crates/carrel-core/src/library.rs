//! Library system.
//!
//! Owns the seat grid and the login session, and turns each [`Command`] into
//! a list of [`LibraryAction`]s. Pure: no clock reads, no disk. The caller
//! passes the current time in and executes `Persist` itself (see
//! [`crate::Runtime`]).
//!
//! # Invariants
//!
//! - A command that returns `Err` changed nothing.
//! - Every successful grid mutation, and `Quit`, yields exactly one
//!   [`LibraryAction::Persist`], ahead of the response.

use tracing::debug;

use crate::{
    access::{self, SeatView},
    command::Command,
    error::LibraryError,
    floor::ResizeReport,
    grid::{FLOORS, FloorBounds, SeatCoord, SeatGrid},
    reservation::CancelScope,
    seat::Reservation,
    session::{Identity, Session},
};

/// Library configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Whether floors may be resized. When false every floor stays at full
    /// capacity and resize requests are rejected.
    pub resizable_floors: bool,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self { resizable_floors: true }
    }
}

/// Actions produced by [`LibrarySystem::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryAction {
    /// Write the full grid to storage.
    Persist,
    /// Report a result to the operator.
    Respond(Response),
    /// Stop reading commands.
    Quit,
}

/// Successful result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Session now belongs to this identity.
    LoggedIn(Identity),
    /// Session ended. `None` when nobody was logged in.
    LoggedOut(Option<Identity>),
    /// Floor rendered for the current viewer.
    FloorView(FloorView),
    /// Seat reserved.
    Reserved {
        /// Seat that was reserved
        coord: SeatCoord,
        /// Stored reservation
        reservation: Reservation,
    },
    /// Seat cancelled.
    Cancelled {
        /// Seat that was emptied
        coord: SeatCoord,
        /// Reservation that was removed
        reservation: Reservation,
    },
    /// Bulk cancellation finished.
    BulkCancelled {
        /// Sweep that ran
        scope: CancelScope,
        /// Reservations removed
        count: usize,
    },
    /// Every reservation, ordered by floor, day, row, column.
    Listing(Vec<ListedReservation>),
    /// Grid emptied and layouts restored.
    Cleared {
        /// Reservations removed
        removed: usize,
    },
    /// Floor resized.
    Resized(ResizeReport),
}

/// One floor on one day as the current viewer may see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorView {
    /// Floor index
    pub floor: usize,
    /// Day index
    pub day: usize,
    /// Active rectangle at the time of the view
    pub bounds: FloorBounds,
    /// `bounds.rows()` rows of `bounds.cols()` cells
    pub cells: Vec<Vec<SeatView>>,
}

/// Entry of a full listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListedReservation {
    /// Where
    pub coord: SeatCoord,
    /// Who and when
    pub reservation: Reservation,
}

/// Reservation system state machine.
///
/// Owned explicitly; independent instances do not share anything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LibrarySystem {
    grid: SeatGrid,
    session: Session,
    config: LibraryConfig,
}

impl LibrarySystem {
    /// Empty grid, default layouts, nobody logged in.
    pub fn new(config: LibraryConfig) -> Self {
        Self::with_grid(SeatGrid::new(), config)
    }

    /// Start from an existing grid (typically a loaded snapshot).
    ///
    /// With floors locked, every floor is restored to full capacity. Cells
    /// outside a resized floor are always empty, so growing cancels nothing.
    pub fn with_grid(mut grid: SeatGrid, config: LibraryConfig) -> Self {
        if !config.resizable_floors {
            for floor in 0..FLOORS {
                if grid.all_bounds()[floor] != FloorBounds::DEFAULT {
                    debug!(
                        floor,
                        previous = %grid.all_bounds()[floor],
                        "layout locked at full size"
                    );
                    grid.set_bounds(floor, FloorBounds::DEFAULT);
                }
            }
        }
        Self { grid, session: Session::new(), config }
    }

    /// Current grid.
    pub fn grid(&self) -> &SeatGrid {
        &self.grid
    }

    /// Current session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Configuration.
    pub fn config(&self) -> LibraryConfig {
        self.config
    }

    /// Process one command and return the actions to execute.
    ///
    /// `now` is the wall-clock time in Unix seconds, used to stamp new
    /// reservations.
    pub fn handle(
        &mut self,
        command: Command,
        now: i64,
    ) -> Result<Vec<LibraryAction>, LibraryError> {
        let persist = command.is_mutating();

        let response = match command {
            Command::Login { name } => Response::LoggedIn(self.login(&name)?),
            Command::Logout => Response::LoggedOut(self.logout()),
            Command::View { floor, day } => Response::FloorView(self.view(floor, day)?),
            Command::Reserve { coord, target } => {
                let reservation = self.reserve(coord, target, now)?;
                Response::Reserved { coord, reservation }
            },
            Command::Cancel { coord } => {
                let reservation = self.cancel(coord)?;
                Response::Cancelled { coord, reservation }
            },
            Command::ListAll => Response::Listing(self.list_all()?),
            Command::Clear => Response::Cleared { removed: self.clear()? },
            Command::CancelDay { day } => {
                let scope = CancelScope::Day(day);
                Response::BulkCancelled { scope, count: self.cancel_where(scope)? }
            },
            Command::CancelFloor { floor } => {
                let scope = CancelScope::Floor(floor);
                Response::BulkCancelled { scope, count: self.cancel_where(scope)? }
            },
            Command::ResizeFloor { floor, rows, cols } => {
                Response::Resized(self.resize_floor(floor, rows, cols)?)
            },
            Command::Quit => return Ok(vec![LibraryAction::Persist, LibraryAction::Quit]),
        };

        let mut actions = Vec::with_capacity(2);
        if persist {
            actions.push(LibraryAction::Persist);
        }
        actions.push(LibraryAction::Respond(response));
        Ok(actions)
    }

    /// Log in, replacing any current identity.
    ///
    /// An invalid name leaves the session untouched.
    pub fn login(&mut self, name: &str) -> Result<Identity, LibraryError> {
        let identity = Identity::parse(name)?;
        let previous = self.session.login(identity);
        debug!(%identity, ?previous, "logged in");
        Ok(identity)
    }

    /// Log out. Returns who was logged in.
    pub fn logout(&mut self) -> Option<Identity> {
        let previous = self.session.logout();
        debug!(?previous, "logged out");
        previous
    }

    /// Project one floor on one day for the current viewer.
    ///
    /// Allowed without logging in; anonymous viewers see only free or taken.
    pub fn view(&self, floor: usize, day: usize) -> Result<FloorView, LibraryError> {
        let bounds = self.grid.bounds(floor)?;
        SeatGrid::check_day(day)?;

        let mut cells = Vec::with_capacity(bounds.rows());
        for row in 0..bounds.rows() {
            let mut line = Vec::with_capacity(bounds.cols());
            for col in 0..bounds.cols() {
                let seat = self.grid.get(SeatCoord::new(floor, row, col, day))?;
                line.push(access::seat_view(&self.session, seat));
            }
            cells.push(line);
        }

        Ok(FloorView { floor, day, bounds, cells })
    }

    /// Reserve a seat for `target` (administrator) or for oneself.
    ///
    /// Checked in order: logged in, target valid, coordinate active, seat
    /// empty.
    pub fn reserve(
        &mut self,
        coord: SeatCoord,
        target: Option<char>,
        now: i64,
    ) -> Result<Reservation, LibraryError> {
        let grant = access::authorize_reserve(&self.session, target)?;
        self.grid.reserve(coord, grant, now)
    }

    /// Cancel a reservation the session is allowed to cancel.
    pub fn cancel(&mut self, coord: SeatCoord) -> Result<Reservation, LibraryError> {
        access::require_login(&self.session)?;
        let held = *self
            .grid
            .get(coord)?
            .reservation()
            .ok_or(LibraryError::NotReserved { coord })?;
        access::authorize_cancel(&self.session, &held)?;
        self.grid.cancel(coord)
    }

    /// Every reservation, for the administrator.
    pub fn list_all(&self) -> Result<Vec<ListedReservation>, LibraryError> {
        access::require_admin(&self.session)?;
        Ok(self
            .grid
            .reservations()
            .into_iter()
            .map(|(coord, reservation)| ListedReservation { coord, reservation })
            .collect())
    }

    /// Empty every seat and restore default layouts (administrator).
    pub fn clear(&mut self) -> Result<usize, LibraryError> {
        access::require_admin(&self.session)?;
        Ok(self.grid.clear())
    }

    /// Bulk cancellation by day or floor (administrator).
    pub fn cancel_where(&mut self, scope: CancelScope) -> Result<usize, LibraryError> {
        access::require_admin(&self.session)?;
        Ok(self.grid.cancel_where(scope)?)
    }

    /// Cancel every reservation on `day` (administrator).
    pub fn cancel_day(&mut self, day: usize) -> Result<usize, LibraryError> {
        self.cancel_where(CancelScope::Day(day))
    }

    /// Cancel every reservation on `floor` (administrator).
    pub fn cancel_floor(&mut self, floor: usize) -> Result<usize, LibraryError> {
        self.cancel_where(CancelScope::Floor(floor))
    }

    /// Resize a floor (administrator), cancelling reservations that fall
    /// outside the new rectangle.
    pub fn resize_floor(
        &mut self,
        floor: usize,
        rows: usize,
        cols: usize,
    ) -> Result<ResizeReport, LibraryError> {
        access::require_admin(&self.session)?;
        if !self.config.resizable_floors {
            SeatGrid::check_floor(floor)?;
            return Err(LibraryError::InvalidFloorConfig { floor, rows, cols });
        }
        self.grid.resize_floor(floor, rows, cols)
    }
}
