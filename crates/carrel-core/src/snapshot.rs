//! Versioned fixed-width snapshot codec.
//!
//! The snapshot is the only durable form of the grid. It is written as raw
//! big-endian records in a fixed order: header, every seat slot (active or
//! not), the per-floor row counts, then the per-floor column counts. There are
//! no delimiters and no length prefixes; every size is implied by the header.
//!
//! ```text
//! offset  size      field
//! 0       4         magic "SEAT"
//! 4       1         format version
//! 5       1         floors
//! 6       1         max rows
//! 7       1         max cols
//! 8       1         days
//! 9       3         reserved (zero)
//! 12      560 × 10  seat records
//! 5612    5 × 4     rows per floor (u32, version 2 only)
//! 5632    5 × 4     cols per floor (u32, version 2 only)
//! ```
//!
//! A seat record is `status u8 | owner u8 | reserved_at i64`. Status is 0
//! (empty), 1 (by admin) or 2 (by self); owner is 0 or an ASCII letter;
//! `reserved_at` is 0 for empty seats.
//!
//! Version 1 images carry no bounds block and load with default bounds.
//! Headerless images whose length matches the raw in-memory layout written by
//! the older native tool (64-bit little-endian, 16-byte seat records) are
//! migrated on read.

use bytes::{Buf, BufMut};
use thiserror::Error;

use crate::{
    grid::{DAYS, FLOORS, FloorBounds, MAX_COLS, MAX_ROWS, SLOT_COUNT, SeatCoord, SeatGrid},
    seat::{Reservation, ReservationKind, Seat, UserLetter},
};

/// Magic bytes at offset 0.
pub const MAGIC: [u8; 4] = *b"SEAT";

/// Format version written by [`encode`].
pub const VERSION: u8 = 2;

/// Format version without the bounds block.
pub const VERSION_WITHOUT_BOUNDS: u8 = 1;

/// Header length in bytes.
pub const HEADER_SIZE: usize = 12;

/// Seat record length in bytes.
pub const RECORD_SIZE: usize = 10;

/// Bounds block length in bytes (rows then cols, one `u32` per floor each).
pub const BOUNDS_SIZE: usize = FLOORS * 4 * 2;

/// Total length of a current-version snapshot.
pub const SNAPSHOT_SIZE: usize = HEADER_SIZE + SLOT_COUNT * RECORD_SIZE + BOUNDS_SIZE;

const STATUS_EMPTY: u8 = 0;
const STATUS_BY_ADMIN: u8 = 1;
const STATUS_BY_SELF: u8 = 2;

/// Raw native record: `i32` status, `u8` owner, 3 padding bytes, `i64` time.
const LEGACY_RECORD_SIZE: usize = 16;
const LEGACY_SEATS_SIZE: usize = SLOT_COUNT * LEGACY_RECORD_SIZE;
const LEGACY_BOUNDS_SIZE: usize = FLOORS * 4 * 2;

/// Errors decoding a snapshot image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Image is shorter or longer than its header implies.
    #[error("snapshot length mismatch: expected {expected} bytes, got {actual}")]
    Length {
        /// Length implied by the header
        expected: usize,
        /// Length found
        actual: usize,
    },

    /// Magic bytes are wrong and the length matches no legacy layout.
    #[error("not a seat snapshot (bad magic)")]
    InvalidMagic,

    /// Unknown format version.
    #[error("unsupported snapshot version: {0}")]
    UnsupportedVersion(u8),

    /// Header describes a building of a different shape.
    #[error("snapshot geometry {floors}x{rows}x{cols}x{days} does not match this build")]
    Geometry {
        /// Floors in the image
        floors: u8,
        /// Row capacity in the image
        rows: u8,
        /// Column capacity in the image
        cols: u8,
        /// Days in the image
        days: u8,
    },

    /// Status code is not 0, 1 or 2.
    #[error("slot {slot}: invalid seat status {status}")]
    InvalidStatus {
        /// Slot index
        slot: usize,
        /// Status code found
        status: i64,
    },

    /// Reserved seat whose owner byte is not `A`-`Z`.
    #[error("slot {slot}: invalid owner byte {owner:#04x}")]
    InvalidOwner {
        /// Slot index
        slot: usize,
        /// Owner byte found
        owner: u8,
    },

    /// Empty seat carrying an owner or a timestamp.
    #[error("slot {slot}: empty seat carries owner or timestamp")]
    StaleEmptySeat {
        /// Slot index
        slot: usize,
    },

    /// Floor bounds outside `[1, capacity]`.
    #[error("floor {floor}: invalid bounds {rows}x{cols}")]
    InvalidBounds {
        /// Floor index
        floor: usize,
        /// Row count found
        rows: i64,
        /// Column count found
        cols: i64,
    },

    /// Reservation stored in a slot outside its floor's active rectangle.
    #[error("slot {slot}: reservation outside the active floor area")]
    InactiveReservation {
        /// Slot index
        slot: usize,
    },
}

/// Write the current-version image of `grid` into `dst`.
pub fn encode(grid: &SeatGrid, dst: &mut impl BufMut) {
    dst.put_slice(&MAGIC);
    dst.put_u8(VERSION);
    dst.put_u8(FLOORS as u8);
    dst.put_u8(MAX_ROWS as u8);
    dst.put_u8(MAX_COLS as u8);
    dst.put_u8(DAYS as u8);
    dst.put_bytes(0, 3);

    for seat in grid.slots() {
        match seat {
            Seat::Empty => {
                dst.put_u8(STATUS_EMPTY);
                dst.put_u8(0);
                dst.put_i64(0);
            },
            Seat::Reserved(r) => {
                dst.put_u8(match r.kind {
                    ReservationKind::ByAdmin => STATUS_BY_ADMIN,
                    ReservationKind::BySelf => STATUS_BY_SELF,
                });
                dst.put_u8(r.owner.as_byte());
                dst.put_i64(r.reserved_at);
            },
        }
    }

    for bounds in grid.all_bounds() {
        dst.put_u32(bounds.rows() as u32);
    }
    for bounds in grid.all_bounds() {
        dst.put_u32(bounds.cols() as u32);
    }
}

/// Encode into a fresh buffer of exactly [`SNAPSHOT_SIZE`] bytes.
pub fn encode_to_vec(grid: &SeatGrid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SNAPSHOT_SIZE);
    encode(grid, &mut buf);
    debug_assert_eq!(buf.len(), SNAPSHOT_SIZE);
    buf
}

/// Decode a snapshot image.
///
/// Accepts current and version-1 images, and headerless legacy images whose
/// length matches the native layout. Never panics on arbitrary input.
///
/// # Errors
///
/// Any structural or semantic violation yields a [`SnapshotError`]; no
/// partially decoded grid is ever returned.
pub fn decode(bytes: &[u8]) -> Result<SeatGrid, SnapshotError> {
    if bytes.starts_with(&MAGIC) {
        return decode_versioned(bytes);
    }

    match bytes.len() {
        LEGACY_SEATS_SIZE => decode_legacy(bytes, false),
        len if len == LEGACY_SEATS_SIZE + LEGACY_BOUNDS_SIZE => decode_legacy(bytes, true),
        len if len < MAGIC.len() => {
            Err(SnapshotError::Length { expected: SNAPSHOT_SIZE, actual: len })
        },
        _ => Err(SnapshotError::InvalidMagic),
    }
}

fn decode_versioned(bytes: &[u8]) -> Result<SeatGrid, SnapshotError> {
    if bytes.len() < HEADER_SIZE {
        return Err(SnapshotError::Length { expected: SNAPSHOT_SIZE, actual: bytes.len() });
    }

    let mut buf = &bytes[MAGIC.len()..];
    let version = buf.get_u8();
    let (floors, rows, cols, days) = (buf.get_u8(), buf.get_u8(), buf.get_u8(), buf.get_u8());
    buf.advance(3);

    let has_bounds = match version {
        VERSION => true,
        VERSION_WITHOUT_BOUNDS => false,
        other => return Err(SnapshotError::UnsupportedVersion(other)),
    };

    if (floors as usize, rows as usize, cols as usize, days as usize)
        != (FLOORS, MAX_ROWS, MAX_COLS, DAYS)
    {
        return Err(SnapshotError::Geometry { floors, rows, cols, days });
    }

    let expected =
        HEADER_SIZE + SLOT_COUNT * RECORD_SIZE + if has_bounds { BOUNDS_SIZE } else { 0 };
    if bytes.len() != expected {
        return Err(SnapshotError::Length { expected, actual: bytes.len() });
    }

    let mut seats = Vec::with_capacity(SLOT_COUNT);
    for slot in 0..SLOT_COUNT {
        let status = buf.get_u8();
        let owner = buf.get_u8();
        let reserved_at = buf.get_i64();
        seats.push(seat_from_record(slot, i64::from(status), owner, reserved_at, true)?);
    }

    let bounds = if has_bounds {
        let rows: Vec<i64> = (0..FLOORS).map(|_| i64::from(buf.get_u32())).collect();
        let cols: Vec<i64> = (0..FLOORS).map(|_| i64::from(buf.get_u32())).collect();
        bounds_from_counts(&rows, &cols)?
    } else {
        [FloorBounds::DEFAULT; FLOORS]
    };

    debug_assert!(!buf.has_remaining());
    assemble(seats, bounds)
}

fn decode_legacy(bytes: &[u8], has_bounds: bool) -> Result<SeatGrid, SnapshotError> {
    let mut buf = bytes;

    let mut seats = Vec::with_capacity(SLOT_COUNT);
    for slot in 0..SLOT_COUNT {
        let status = buf.get_i32_le();
        let owner = buf.get_u8();
        buf.advance(3);
        let reserved_at = buf.get_i64_le();
        seats.push(seat_from_record(slot, i64::from(status), owner, reserved_at, false)?);
    }

    let bounds = if has_bounds {
        let rows: Vec<i64> = (0..FLOORS).map(|_| i64::from(buf.get_i32_le())).collect();
        let cols: Vec<i64> = (0..FLOORS).map(|_| i64::from(buf.get_i32_le())).collect();
        bounds_from_counts(&rows, &cols)?
    } else {
        [FloorBounds::DEFAULT; FLOORS]
    };

    assemble(seats, bounds)
}

/// Rebuild one seat. `strict` rejects empty records with leftover fields.
fn seat_from_record(
    slot: usize,
    status: i64,
    owner: u8,
    reserved_at: i64,
    strict: bool,
) -> Result<Seat, SnapshotError> {
    let kind = match status {
        s if s == i64::from(STATUS_EMPTY) => {
            if strict && (owner != 0 || reserved_at != 0) {
                return Err(SnapshotError::StaleEmptySeat { slot });
            }
            return Ok(Seat::Empty);
        },
        s if s == i64::from(STATUS_BY_ADMIN) => ReservationKind::ByAdmin,
        s if s == i64::from(STATUS_BY_SELF) => ReservationKind::BySelf,
        _ => return Err(SnapshotError::InvalidStatus { slot, status }),
    };

    let owner = UserLetter::from_byte(owner).ok_or(SnapshotError::InvalidOwner { slot, owner })?;
    Ok(Seat::Reserved(Reservation { kind, owner, reserved_at }))
}

fn bounds_from_counts(rows: &[i64], cols: &[i64]) -> Result<[FloorBounds; FLOORS], SnapshotError> {
    let mut bounds = [FloorBounds::DEFAULT; FLOORS];
    for (floor, slot) in bounds.iter_mut().enumerate() {
        let (r, c) = (rows[floor], cols[floor]);
        *slot = usize::try_from(r)
            .ok()
            .zip(usize::try_from(c).ok())
            .and_then(|(r, c)| FloorBounds::new(r, c))
            .ok_or(SnapshotError::InvalidBounds { floor, rows: r, cols: c })?;
    }
    Ok(bounds)
}

/// Check that no reservation sits outside its floor's bounds, then build.
fn assemble(seats: Vec<Seat>, bounds: [FloorBounds; FLOORS]) -> Result<SeatGrid, SnapshotError> {
    for floor in 0..FLOORS {
        for row in 0..MAX_ROWS {
            for col in 0..MAX_COLS {
                if bounds[floor].contains(row, col) {
                    continue;
                }
                for day in 0..DAYS {
                    let slot = SeatGrid::slot_index(SeatCoord::new(floor, row, col, day));
                    if !seats[slot].is_empty() {
                        return Err(SnapshotError::InactiveReservation { slot });
                    }
                }
            }
        }
    }

    Ok(SeatGrid::from_parts(seats, bounds))
}
