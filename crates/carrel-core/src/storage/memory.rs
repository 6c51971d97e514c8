use std::sync::{Arc, Mutex};

use super::{Storage, StorageError};
use crate::{grid::SeatGrid, snapshot};

/// In-memory storage for testing and simulation
///
/// Keeps the encoded snapshot bytes rather than the grid itself, so every
/// save/load goes through the same codec as the file backend. State is wrapped
/// in `Arc<Mutex<>>`: clones share one snapshot.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryStorageInner>>,
}

#[derive(Default)]
struct MemoryStorageInner {
    /// Encoded snapshot, `None` until the first save
    bytes: Option<Vec<u8>>,

    /// Number of successful saves
    saves: usize,
}

impl MemoryStorage {
    /// Create an empty `MemoryStorage` (nothing saved yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with raw snapshot bytes.
    ///
    /// Useful for feeding legacy or corrupt images to the loader.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryStorageInner { bytes: Some(bytes), saves: 0 })),
        }
    }

    /// Number of successful saves so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    pub fn save_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").saves
    }

    /// Copy of the stored snapshot bytes, `None` if nothing was saved.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.inner.lock().expect("Mutex poisoned").bytes.clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<SeatGrid>, StorageError> {
        let inner = self.inner.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        match inner.bytes.as_deref() {
            Some(bytes) => Ok(Some(snapshot::decode(bytes)?)),
            None => Ok(None),
        }
    }

    fn save(&self, grid: &SeatGrid) -> Result<(), StorageError> {
        let bytes = snapshot::encode_to_vec(grid);
        let mut inner = self.inner.lock().map_err(|e| StorageError::Io(e.to_string()))?;
        inner.bytes = Some(bytes);
        inner.saves += 1;
        Ok(())
    }
}
