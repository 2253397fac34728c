//! Axis-reversal formulation of the reindexing.
//!
//! A `2^n` vector reshaped into an `n`-dimensional `2 x ... x 2` tensor has
//! one axis per qubit. Reversing the axis order and reading the tensor back
//! in row-major order reverses the bits of every index, which is the same
//! permutation [`crate::reorder_vector`] applies through an index table.
//! Matrices reverse their row axes and column axes independently.

use ndarray::{Array2, ArrayView2, ArrayViewD, IxDyn, ShapeError};

use crate::error::{ReorderError, ReorderResult};
use crate::permutation::qubits_for_len;
use crate::reorder::square_dim;

/// Reorder a `2^n` buffer by reversing tensor axes.
pub fn reorder_vector_by_axes<T: Clone>(buffer: &[T]) -> ReorderResult<Vec<T>> {
    let num_qubits = qubits_for_len(buffer.len())? as usize;
    let tensor = ArrayViewD::from_shape(IxDyn(&vec![2; num_qubits]), buffer)
        .map_err(|e| shape_error(e, buffer.len()))?;
    Ok(tensor.reversed_axes().iter().cloned().collect())
}

/// Reorder a `2^n x 2^n` matrix by reversing row and column tensor axes.
pub fn reorder_matrix_by_axes<T: Clone>(matrix: ArrayView2<'_, T>) -> ReorderResult<Array2<T>> {
    let dim = square_dim(&matrix)?;
    let num_qubits = qubits_for_len(dim)? as usize;

    let flat: Vec<T> = matrix.iter().cloned().collect();
    let tensor = ArrayViewD::from_shape(IxDyn(&vec![2; 2 * num_qubits]), &flat[..])
        .map_err(|e| shape_error(e, flat.len()))?;

    let axes: Vec<usize> = (0..num_qubits)
        .rev()
        .chain((num_qubits..2 * num_qubits).rev())
        .collect();
    let data: Vec<T> = tensor.permuted_axes(IxDyn(&axes)).iter().cloned().collect();

    let len = data.len();
    Array2::from_shape_vec((dim, dim), data).map_err(|e| shape_error(e, len))
}

fn shape_error(_: ShapeError, got: usize) -> ReorderError {
    ReorderError::LengthMismatch {
        expected: got.next_power_of_two(),
        got,
    }
}
