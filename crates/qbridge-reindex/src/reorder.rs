//! Vector and matrix reordering by bit-reversal permutation.
//!
//! All functions allocate a fresh output and leave their input untouched,
//! except [`reorder_vector_in_place`]. Shapes are validated before anything
//! is allocated.

use ndarray::{Array2, ArrayView2};

use crate::error::{ReorderError, ReorderResult};
use crate::permutation::{bit_reversal_permutation, qubits_for_len, reverse_bits};

/// Reorder a `2^n` buffer so that `out[i] == buffer[perm[i]]`.
///
/// ```
/// use qbridge_reindex::reorder_vector;
///
/// let out = reorder_vector(&[1, 2, 3, 4]).unwrap();
/// assert_eq!(out, vec![1, 3, 2, 4]);
/// ```
pub fn reorder_vector<T: Clone>(buffer: &[T]) -> ReorderResult<Vec<T>> {
    let num_qubits = qubits_for_len(buffer.len())?;
    let perm = bit_reversal_permutation(num_qubits)?;
    Ok(permute_vector(buffer, &perm))
}

/// Reorder a `2^n` buffer without allocating.
///
/// The permutation is an involution, so it splits into disjoint swaps of
/// `i` and `perm[i]`.
pub fn reorder_vector_in_place<T>(buffer: &mut [T]) -> ReorderResult<()> {
    let num_qubits = qubits_for_len(buffer.len())?;
    for i in 0..buffer.len() {
        let j = reverse_bits(i, num_qubits);
        if i < j {
            buffer.swap(i, j);
        }
    }
    Ok(())
}

/// Reorder a `2^n x 2^n` matrix so that `out[(i, j)] == m[(perm[i], perm[j])]`.
///
/// Rows and columns are permuted identically.
pub fn reorder_matrix<T: Clone>(matrix: ArrayView2<'_, T>) -> ReorderResult<Array2<T>> {
    let dim = square_dim(&matrix)?;
    let num_qubits = qubits_for_len(dim)?;
    let perm = bit_reversal_permutation(num_qubits)?;
    Ok(permute_matrix(matrix, &perm))
}

/// Reorder a row-major flat `dim x dim` matrix.
pub fn reorder_matrix_flat<T: Clone>(buffer: &[T], dim: usize) -> ReorderResult<Vec<T>> {
    let num_qubits = qubits_for_len(dim)?;
    check_flat_len(buffer.len(), dim)?;
    let perm = bit_reversal_permutation(num_qubits)?;
    Ok(permute_matrix_flat(buffer, dim, &perm))
}

pub(crate) fn square_dim<T>(matrix: &ArrayView2<'_, T>) -> ReorderResult<usize> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(ReorderError::NotSquare { rows, cols });
    }
    Ok(rows)
}

pub(crate) fn check_flat_len(len: usize, dim: usize) -> ReorderResult<()> {
    let expected = dim
        .checked_mul(dim)
        .ok_or(ReorderError::TooManyQubits(2 * dim.trailing_zeros()))?;
    if len != expected {
        return Err(ReorderError::LengthMismatch { expected, got: len });
    }
    Ok(())
}

pub(crate) fn permute_vector<T: Clone>(buffer: &[T], perm: &[usize]) -> Vec<T> {
    perm.iter().map(|&p| buffer[p].clone()).collect()
}

pub(crate) fn permute_matrix<T: Clone>(matrix: ArrayView2<'_, T>, perm: &[usize]) -> Array2<T> {
    let dim = perm.len();
    Array2::from_shape_fn((dim, dim), |(i, j)| matrix[[perm[i], perm[j]]].clone())
}

pub(crate) fn permute_matrix_flat<T: Clone>(buffer: &[T], dim: usize, perm: &[usize]) -> Vec<T> {
    let mut out = Vec::with_capacity(dim * dim);
    for &row in perm {
        let base = row * dim;
        out.extend(perm.iter().map(|&col| buffer[base + col].clone()));
    }
    out
}

/// Bit-reverse a buffer whose qubit count is already known to be valid.
pub(crate) fn reverse_index_bits<T: Clone>(buffer: &[T], num_qubits: u32) -> Vec<T> {
    (0..buffer.len())
        .map(|i| buffer[reverse_bits(i, num_qubits)].clone())
        .collect()
}
