//! Fuzz target for command sequences against the library state machine
//!
//! # Strategy
//!
//! - Arbitrary identities, coordinates (in and out of range), resizes and
//!   bulk cancellations, in any order
//!
//! # Invariants
//!
//! - NEVER panic
//! - A rejected command leaves the library unchanged
//! - No reservation survives outside its floor's active rectangle
//! - The grid always survives a snapshot round trip

#![no_main]

use arbitrary::Arbitrary;
use carrel_core::{Command, LibraryConfig, LibrarySystem, SeatCoord, snapshot};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Login(u8),
    LoginAdmin,
    Logout,
    Reserve { at: [u8; 4], target: Option<u8> },
    Cancel { at: [u8; 4] },
    CancelDay(u8),
    CancelFloor(u8),
    Resize { floor: u8, rows: u8, cols: u8 },
    Clear,
}

fn coord(at: [u8; 4]) -> SeatCoord {
    SeatCoord::new(at[0] as usize % 6, at[1] as usize % 5, at[2] as usize % 5, at[3] as usize % 8)
}

fn to_command(op: Op) -> Command {
    match op {
        Op::Login(c) => Command::Login { name: char::from(c).to_string() },
        Op::LoginAdmin => Command::Login { name: "Admin".to_string() },
        Op::Logout => Command::Logout,
        Op::Reserve { at, target } => {
            Command::Reserve { coord: coord(at), target: target.map(char::from) }
        }
        Op::Cancel { at } => Command::Cancel { coord: coord(at) },
        Op::CancelDay(day) => Command::CancelDay { day: day as usize % 8 },
        Op::CancelFloor(floor) => Command::CancelFloor { floor: floor as usize % 6 },
        Op::Resize { floor, rows, cols } => Command::ResizeFloor {
            floor: floor as usize % 6,
            rows: rows as usize % 6,
            cols: cols as usize % 6,
        },
        Op::Clear => Command::Clear,
    }
}

fuzz_target!(|input: (bool, Vec<Op>)| {
    let (fixed_layout, ops) = input;
    let mut library = LibrarySystem::new(LibraryConfig { resizable_floors: !fixed_layout });

    for (now, op) in ops.into_iter().enumerate() {
        let before = library.clone();
        if library.handle(to_command(op), now as i64).is_err() {
            assert_eq!(library, before);
        }

        let grid = library.grid();
        assert_eq!(grid.reservations().len(), grid.reserved_count());
    }

    let grid = library.grid();
    assert_eq!(snapshot::decode(&snapshot::encode_to_vec(grid)).ok().as_ref(), Some(grid));
});
