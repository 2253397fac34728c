//! Cache-backed reindexing handle.

use std::sync::Arc;

use ndarray::{Array2, ArrayView2};

use crate::cache::PermutationCache;
use crate::error::ReorderResult;
use crate::order::QubitOrder;
use crate::permutation::qubits_for_len;
use crate::reorder::{check_flat_len, permute_matrix, permute_matrix_flat, permute_vector, square_dim};
use crate::state::{DensityMatrix, StateVector};

/// Reorders buffers using a shared [`PermutationCache`].
///
/// Cloning a `Reindexer` shares its cache. Components that reorder on every
/// initialisation and readout should own one instead of recomputing tables.
#[derive(Debug, Clone, Default)]
pub struct Reindexer {
    cache: Arc<PermutationCache>,
}

impl Reindexer {
    /// Create a reindexer with a fresh cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reindexer backed by an existing cache.
    pub fn with_cache(cache: Arc<PermutationCache>) -> Self {
        Self { cache }
    }

    /// The backing cache.
    pub fn cache(&self) -> &Arc<PermutationCache> {
        &self.cache
    }

    /// Bit-reversal permutation for `num_qubits`.
    pub fn permutation(&self, num_qubits: u32) -> ReorderResult<Arc<[usize]>> {
        self.cache.get(num_qubits)
    }

    /// See [`crate::reorder_vector`].
    pub fn reorder_vector<T: Clone>(&self, buffer: &[T]) -> ReorderResult<Vec<T>> {
        let perm = self.cache.get(qubits_for_len(buffer.len())?)?;
        Ok(permute_vector(buffer, &perm))
    }

    /// See [`crate::reorder_matrix`].
    pub fn reorder_matrix<T: Clone>(&self, matrix: ArrayView2<'_, T>) -> ReorderResult<Array2<T>> {
        let dim = square_dim(&matrix)?;
        let perm = self.cache.get(qubits_for_len(dim)?)?;
        Ok(permute_matrix(matrix, &perm))
    }

    /// See [`crate::reorder_matrix_flat`].
    pub fn reorder_matrix_flat<T: Clone>(&self, buffer: &[T], dim: usize) -> ReorderResult<Vec<T>> {
        let num_qubits = qubits_for_len(dim)?;
        check_flat_len(buffer.len(), dim)?;
        let perm = self.cache.get(num_qubits)?;
        Ok(permute_matrix_flat(buffer, dim, &perm))
    }

    /// Convert a flat vector from `from` order to `to` order.
    pub fn convert_vector<T: Clone>(
        &self,
        buffer: &[T],
        from: QubitOrder,
        to: QubitOrder,
    ) -> ReorderResult<Vec<T>> {
        if from.requires_reorder(to) {
            self.reorder_vector(buffer)
        } else {
            qubits_for_len(buffer.len())?;
            Ok(buffer.to_vec())
        }
    }

    /// Convert a row-major flat `dim x dim` matrix from `from` order to `to` order.
    pub fn convert_matrix_flat<T: Clone>(
        &self,
        buffer: &[T],
        dim: usize,
        from: QubitOrder,
        to: QubitOrder,
    ) -> ReorderResult<Vec<T>> {
        if from.requires_reorder(to) {
            self.reorder_matrix_flat(buffer, dim)
        } else {
            qubits_for_len(dim)?;
            check_flat_len(buffer.len(), dim)?;
            Ok(buffer.to_vec())
        }
    }

    /// Re-index a state vector into `target` order.
    pub fn convert_state(&self, state: StateVector, target: QubitOrder) -> ReorderResult<StateVector> {
        if !state.order().requires_reorder(target) {
            return Ok(state);
        }
        let amplitudes = self.reorder_vector(state.amplitudes())?;
        StateVector::new(amplitudes, target)
    }

    /// Re-index a density matrix into `target` order.
    pub fn convert_density(
        &self,
        density: DensityMatrix,
        target: QubitOrder,
    ) -> ReorderResult<DensityMatrix> {
        if !density.order().requires_reorder(target) {
            return Ok(density);
        }
        let data = self.reorder_matrix(density.data().view())?;
        DensityMatrix::new(data, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_reorder_vector_uses_cache() {
        let reindexer = Reindexer::new();
        assert_eq!(reindexer.reorder_vector(&[1, 2, 3, 4]).unwrap(), vec![1, 3, 2, 4]);
        assert!(reindexer.cache().contains(2));
        assert_eq!(reindexer.cache().len(), 1);
    }

    #[test]
    fn test_clones_share_cache() {
        let a = Reindexer::new();
        let b = a.clone();
        b.permutation(5).unwrap();
        assert!(a.cache().contains(5));
    }

    #[test]
    fn test_shape_error_does_not_populate_cache() {
        let reindexer = Reindexer::new();
        assert!(reindexer.reorder_vector(&[0u8; 5]).is_err());
        assert!(reindexer.cache().is_empty());
    }

    #[test]
    fn test_convert_state_round_trip() {
        let reindexer = Reindexer::new();
        let amps: Vec<Complex64> = (0..8).map(|i| Complex64::new(f64::from(i), -1.0)).collect();
        let le = StateVector::new(amps, QubitOrder::LittleEndian).unwrap();
        let be = reindexer.convert_state(le.clone(), QubitOrder::BigEndian).unwrap();
        assert_eq!(be.amplitudes()[1], le.amplitudes()[4]);
        let back = reindexer.convert_state(be, QubitOrder::LittleEndian).unwrap();
        assert_eq!(back, le);
    }

    #[test]
    fn test_convert_same_order_validates() {
        let reindexer = Reindexer::new();
        assert!(
            reindexer
                .convert_vector(&[1, 2, 3], QubitOrder::BigEndian, QubitOrder::BigEndian)
                .is_err()
        );
        assert!(
            reindexer
                .convert_matrix_flat(&[0; 9], 3, QubitOrder::BigEndian, QubitOrder::BigEndian)
                .is_err()
        );
    }
}
