//! Explicit memoisation of permutation tables.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::error::ReorderResult;
use crate::permutation::bit_reversal_permutation;

/// Cache of bit-reversal permutation tables keyed by qubit count.
///
/// Tables are shared as `Arc<[usize]>`. Each qubit count is computed at most
/// once, even under concurrent first use: readers take a shared lock and a
/// miss re-checks under the exclusive lock before computing.
#[derive(Debug, Default)]
pub struct PermutationCache {
    tables: RwLock<FxHashMap<u32, Arc<[usize]>>>,
}

impl PermutationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the permutation for `num_qubits`, computing it on first use.
    pub fn get(&self, num_qubits: u32) -> ReorderResult<Arc<[usize]>> {
        if let Some(table) = self.read().get(&num_qubits) {
            return Ok(Arc::clone(table));
        }

        let mut tables = self.write();
        if let Some(table) = tables.get(&num_qubits) {
            return Ok(Arc::clone(table));
        }

        let table: Arc<[usize]> = bit_reversal_permutation(num_qubits)?.into();
        trace!(num_qubits, size = table.len(), "cached bit-reversal permutation");
        tables.insert(num_qubits, Arc::clone(&table));
        Ok(table)
    }

    /// Whether a table for `num_qubits` has been computed.
    pub fn contains(&self, num_qubits: u32) -> bool {
        self.read().contains_key(&num_qubits)
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the cache holds no tables.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every cached table.
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, FxHashMap<u32, Arc<[usize]>>> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, FxHashMap<u32, Arc<[usize]>>> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}
