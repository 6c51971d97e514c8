//! File-backed snapshot storage.
//!
//! The whole grid is rewritten on every save. Bytes go to a sibling `.tmp`
//! file first and are renamed over the target, so a crash mid-write leaves the
//! previous snapshot intact.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use tracing::{debug, info};

use super::{Storage, StorageError};
use crate::{grid::SeatGrid, snapshot};

/// Snapshot stored in a single file. Clone is cheap (Arc).
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: Arc<PathBuf>,
}

impl FileStorage {
    /// Storage at `path`. The file is not touched until the first load/save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: Arc::new(path.as_ref().to_path_buf()) }
    }

    /// Location of the snapshot.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<SeatGrid>, StorageError> {
        let bytes = match fs::read(self.path.as_path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot on disk");
                return Ok(None);
            },
            Err(err) => return Err(err.into()),
        };

        let grid = snapshot::decode(&bytes)?;
        info!(path = %self.path.display(), reserved = grid.reserved_count(), "snapshot loaded");
        Ok(Some(grid))
    }

    fn save(&self, grid: &SeatGrid) -> Result<(), StorageError> {
        let bytes = snapshot::encode_to_vec(grid);
        let temp = self.temp_path();

        fs::write(&temp, &bytes)?;
        if let Err(err) = fs::rename(&temp, self.path.as_path()) {
            // Best-effort cleanup; report the rename error.
            let _ = fs::remove_file(&temp);
            return Err(err.into());
        }

        debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }
}
