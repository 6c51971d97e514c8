//! Chaos tests for persistence.
//!
//! A failed save must be reported without undoing the change it tried to
//! persist, and whatever did reach storage must always be a valid snapshot of
//! some state the library passed through.

use carrel_core::{
    ChaoticStorage, Command, LibraryConfig, ManualEnv, MemoryStorage, Persistence, Runtime,
    SeatCoord, Storage, StorageError,
};
use proptest::prelude::*;

fn admin_runtime(
    storage: ChaoticStorage<MemoryStorage>,
) -> Runtime<ChaoticStorage<MemoryStorage>, ManualEnv> {
    let mut runtime = Runtime::open(storage, ManualEnv::new(1_000), LibraryConfig::default());
    // Login never touches storage, so it cannot be failed by chaos.
    runtime.execute(Command::Login { name: "Admin".into() }).unwrap();
    runtime
}

#[test]
fn failed_save_keeps_mutation_in_memory() {
    let mut runtime = admin_runtime(ChaoticStorage::new(MemoryStorage::new(), 1.0));
    let coord = SeatCoord::new(2, 2, 2, 2);

    let outcome = runtime.execute(Command::Reserve { coord, target: Some('F') }).unwrap();

    assert!(matches!(outcome.persistence, Persistence::Failed(StorageError::Io(_))));
    assert_eq!(outcome.responses.len(), 1);
    assert!(!runtime.library().grid().get(coord).unwrap().is_empty());
    assert_eq!(runtime.storage().inner().save_count(), 0);
}

#[test]
fn unreadable_storage_starts_empty() {
    let inner = MemoryStorage::new();
    let mut grid = carrel_core::SeatGrid::new();
    grid.resize_floor(0, 1, 1).unwrap();
    inner.save(&grid).unwrap();

    let runtime =
        Runtime::open(ChaoticStorage::new(inner, 1.0), ManualEnv::new(0), LibraryConfig::default());
    assert_eq!(runtime.library().grid(), &carrel_core::SeatGrid::new());
}

#[test]
fn prop_storage_always_holds_a_state_the_library_reached() {
    proptest!(|(
        failure_rate in 0.0..0.9,
        seed in any::<u64>(),
        seats in prop::collection::vec((0usize..5, 0usize..4, 0usize..4, 0usize..7), 1..40),
    )| {
        let storage = ChaoticStorage::with_seed(MemoryStorage::new(), failure_rate, seed);
        let mut runtime = admin_runtime(storage);

        let mut last_saved = None;
        for (floor, row, col, day) in seats {
            let coord = SeatCoord::new(floor, row, col, day);
            let Ok(outcome) = runtime.execute(Command::Reserve { coord, target: Some('X') }) else {
                continue;
            };
            prop_assert_eq!(outcome.responses.len(), 1);
            match outcome.persistence {
                Persistence::Saved => last_saved = Some(runtime.library().grid().clone()),
                Persistence::Failed(StorageError::Io(_)) => {},
                other => prop_assert!(false, "unexpected persistence {:?}", other),
            }
        }

        // ORACLE: storage holds exactly the last successfully saved state.
        let stored = runtime.storage().inner().load().unwrap();
        prop_assert_eq!(stored, last_saved);
    });
}
