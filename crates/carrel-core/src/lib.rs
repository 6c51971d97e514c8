//! Carrel reservation core
//!
//! Seat-reservation state engine for a multi-floor reading room. Every seat is
//! addressed by `(floor, row, col, day)` and is either empty or reserved by a
//! single-letter user. Mutations are gated by the logged-in identity, floors
//! can be resized at runtime, and the whole grid round-trips through a
//! fixed-width binary snapshot.
//!
//! # Architecture
//!
//! [`LibrarySystem`] is a pure state machine: it consumes a typed [`Command`]
//! and returns [`LibraryAction`]s without touching disk or clock. The
//! [`Runtime`] owns a system together with a [`Storage`] backend and an
//! [`Environment`], and executes those actions (the synchronous save after
//! each mutation).
//!
//! # Components
//!
//! - [`SeatGrid`]: fixed-capacity storage with per-floor active bounds
//! - [`access`]: who may do what, and what each viewer is allowed to see
//! - [`reservation`]: reserve / cancel / bulk-cancel transitions
//! - [`floor`]: resize with cascading cancellation
//! - [`snapshot`]: versioned fixed-width codec
//! - [`storage`]: file, in-memory and fault-injecting backends

#![forbid(unsafe_code)]

pub mod access;
mod command;
pub mod env;
mod error;
pub mod floor;
mod grid;
mod library;
pub mod reservation;
mod runtime;
mod seat;
mod session;
pub mod snapshot;
pub mod storage;

pub use access::{Denial, SeatView};
pub use command::Command;
pub use env::{Environment, ManualEnv, SystemEnv};
pub use error::{CoordinateError, LibraryError};
pub use floor::ResizeReport;
pub use grid::{DAYS, FLOORS, FloorBounds, MAX_COLS, MAX_ROWS, SLOT_COUNT, SeatCoord, SeatGrid};
pub use library::{
    FloorView, LibraryAction, LibraryConfig, LibrarySystem, ListedReservation, Response,
};
pub use reservation::CancelScope;
pub use runtime::{Outcome, Persistence, Runtime};
pub use seat::{Reservation, ReservationKind, Seat, SeatStatus, UserLetter};
pub use session::{Identity, Session};
pub use snapshot::SnapshotError;
pub use storage::{ChaoticStorage, FileStorage, MemoryStorage, Storage, StorageError};
