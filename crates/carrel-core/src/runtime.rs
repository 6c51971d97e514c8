//! Runtime: executes [`LibraryAction`]s against real resources.
//!
//! Couples a [`LibrarySystem`] with a [`Storage`] backend and an
//! [`Environment`] clock. Every command is validated, applied and persisted
//! before the next one is accepted.

use tracing::{info, warn};

use crate::{
    command::Command,
    env::Environment,
    error::LibraryError,
    library::{LibraryAction, LibraryConfig, LibrarySystem, Response},
    storage::{Storage, StorageError},
};

/// What happened to the snapshot while executing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Command did not change the grid.
    NotNeeded,
    /// Snapshot written.
    Saved,
    /// Write failed. The in-memory change stays applied.
    Failed(StorageError),
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Responses for the operator, in order.
    pub responses: Vec<Response>,
    /// Snapshot status.
    pub persistence: Persistence,
    /// True once the session should end.
    pub quit: bool,
}

/// Synchronous command executor.
pub struct Runtime<S, E>
where
    S: Storage,
    E: Environment,
{
    library: LibrarySystem,
    storage: S,
    env: E,
}

impl<S, E> Runtime<S, E>
where
    S: Storage,
    E: Environment,
{
    /// Open the library from `storage`.
    ///
    /// A missing snapshot starts an empty library. A snapshot that cannot be
    /// read or decoded is logged and also starts an empty library; it is
    /// overwritten by the next save.
    pub fn open(storage: S, env: E, config: LibraryConfig) -> Self {
        let library = match storage.load() {
            Ok(Some(grid)) => {
                info!(reserved = grid.reserved_count(), "library restored from snapshot");
                LibrarySystem::with_grid(grid, config)
            },
            Ok(None) => {
                info!("no snapshot found, starting empty");
                LibrarySystem::new(config)
            },
            Err(error) => {
                warn!(%error, "snapshot unreadable, starting empty");
                LibrarySystem::new(config)
            },
        };

        Self { library, storage, env }
    }

    /// Wrap an already built library.
    pub fn with_library(library: LibrarySystem, storage: S, env: E) -> Self {
        Self { library, storage, env }
    }

    /// Current library state.
    pub fn library(&self) -> &LibrarySystem {
        &self.library
    }

    /// Storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Handle one command and carry out the resulting actions.
    ///
    /// # Errors
    ///
    /// Returns the command's error; nothing was changed or saved. A failed
    /// save is not an error here: it is reported through
    /// [`Outcome::persistence`].
    pub fn execute(&mut self, command: Command) -> Result<Outcome, LibraryError> {
        let now = self.env.wall_clock_secs();
        let actions = self.library.handle(command, now)?;

        let mut outcome =
            Outcome { responses: Vec::new(), persistence: Persistence::NotNeeded, quit: false };

        for action in actions {
            match action {
                LibraryAction::Persist => outcome.persistence = self.persist(),
                LibraryAction::Respond(response) => outcome.responses.push(response),
                LibraryAction::Quit => outcome.quit = true,
            }
        }

        Ok(outcome)
    }

    /// Write the full grid now.
    pub fn save(&self) -> Result<(), StorageError> {
        self.storage.save(self.library.grid())
    }

    fn persist(&self) -> Persistence {
        match self.save() {
            Ok(()) => Persistence::Saved,
            Err(error) => {
                warn!(%error, "snapshot save failed, change kept in memory only");
                Persistence::Failed(error)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        env::ManualEnv,
        grid::{FloorBounds, SeatCoord, SeatGrid},
        snapshot,
        storage::MemoryStorage,
    };

    #[test]
    fn reserve_is_saved_with_clock_time() {
        let storage = MemoryStorage::new();
        let env = ManualEnv::new(1_700_000_000);
        let mut runtime = Runtime::open(storage.clone(), env.clone(), LibraryConfig::default());

        runtime.execute(Command::Login { name: "Admin".into() }).unwrap();
        env.advance(60);
        let coord = SeatCoord::new(0, 0, 0, 0);
        let outcome = runtime.execute(Command::Reserve { coord, target: Some('A') }).unwrap();

        assert_eq!(outcome.persistence, Persistence::Saved);
        assert!(!outcome.quit);
        assert_eq!(storage.save_count(), 1);

        let saved = storage.load().unwrap().unwrap();
        assert_eq!(saved.get(coord).unwrap().reserved_at(), Some(1_700_000_060));
    }

    #[test]
    fn failed_command_saves_nothing() {
        let storage = MemoryStorage::new();
        let mut runtime = Runtime::open(storage.clone(), ManualEnv::new(0), LibraryConfig::default());

        let coord = SeatCoord::new(0, 0, 0, 0);
        assert!(runtime.execute(Command::Reserve { coord, target: None }).is_err());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn corrupt_snapshot_starts_empty() {
        let storage = MemoryStorage::with_bytes(b"not a snapshot".to_vec());
        let runtime = Runtime::open(storage, ManualEnv::new(0), LibraryConfig::default());
        assert_eq!(runtime.library().grid(), &SeatGrid::new());
    }

    #[test]
    fn quit_saves_and_stops() {
        let mut grid = SeatGrid::new();
        grid.resize_floor(2, 1, 1).unwrap();
        let storage = MemoryStorage::with_bytes(snapshot::encode_to_vec(&grid));
        let mut runtime = Runtime::open(storage.clone(), ManualEnv::new(0), LibraryConfig::default());

        let outcome = runtime.execute(Command::Quit).unwrap();
        assert!(outcome.quit);
        assert!(outcome.responses.is_empty());
        assert_eq!(outcome.persistence, Persistence::Saved);
        assert_eq!(storage.load().unwrap(), Some(grid));
    }

    #[test]
    fn fixed_layout_opens_shrunk_snapshot_at_full_size() {
        let mut grid = SeatGrid::new();
        grid.resize_floor(0, 1, 1).unwrap();
        let storage = MemoryStorage::with_bytes(snapshot::encode_to_vec(&grid));
        let config = LibraryConfig { resizable_floors: false };
        let mut runtime = Runtime::open(storage.clone(), ManualEnv::new(0), config);

        assert_eq!(runtime.library().grid().bounds(0), Ok(FloorBounds::DEFAULT));

        runtime.execute(Command::Login { name: "Admin".into() }).unwrap();
        let coord = SeatCoord::new(0, 3, 3, 0);
        runtime.execute(Command::Reserve { coord, target: Some('B') }).unwrap();

        let saved = storage.load().unwrap().unwrap();
        assert_eq!(saved.bounds(0), Ok(FloorBounds::DEFAULT));
        assert_eq!(saved.reserved_count(), 1);
    }
}
