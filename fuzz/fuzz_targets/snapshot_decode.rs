//! Fuzz target for snapshot decoding
//!
//! # Strategy
//!
//! - Random bytes: arbitrary input of any length (general malformation)
//! - Bit flips: a valid current-version image with bytes overwritten
//! - Legacy sized: random bytes at exactly the legacy native image lengths
//!
//! # Invariants
//!
//! - NEVER panic on malformed input
//! - Any grid that decodes re-encodes to an image that decodes to the same grid

#![no_main]

use arbitrary::Arbitrary;
use carrel_core::{SLOT_COUNT, SeatGrid, snapshot};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum SnapshotAttack {
    RandomBytes { bytes: Vec<u8> },
    Corrupted { patches: Vec<(u16, u8)> },
    LegacySized { with_bounds: bool, seed: Vec<u8> },
}

fuzz_target!(|attack: SnapshotAttack| {
    let bytes = match attack {
        SnapshotAttack::RandomBytes { bytes } => bytes,
        SnapshotAttack::Corrupted { patches } => {
            let mut bytes = snapshot::encode_to_vec(&SeatGrid::new());
            for (offset, value) in patches {
                let offset = offset as usize % bytes.len();
                bytes[offset] = value;
            }
            bytes
        }
        SnapshotAttack::LegacySized { with_bounds, seed } => {
            let len = SLOT_COUNT * 16 + if with_bounds { 40 } else { 0 };
            if seed.is_empty() {
                vec![0; len]
            } else {
                seed.iter().copied().cycle().take(len).collect()
            }
        }
    };

    if let Ok(grid) = snapshot::decode(&bytes) {
        let reencoded = snapshot::encode_to_vec(&grid);
        assert_eq!(reencoded.len(), snapshot::SNAPSHOT_SIZE);
        assert_eq!(snapshot::decode(&reencoded).ok(), Some(grid));
    }
});
