//! Bit-reversal permutation of basis indices.
//!
//! For `n` qubits the permutation maps every basis index in `[0, 2^n)` to the
//! index obtained by reversing its `n`-bit binary representation. It is its
//! own inverse, so the same table converts in both directions between the
//! little-endian and big-endian qubit orders.

use crate::error::{ReorderError, ReorderResult};

/// Reverse the lowest `num_bits` bits of `index`.
///
/// Bits above `num_bits` must be zero.
#[inline]
pub fn reverse_bits(index: usize, num_bits: u32) -> usize {
    if num_bits == 0 {
        return index;
    }
    index.reverse_bits() >> (usize::BITS - num_bits)
}

/// Number of basis states for `num_qubits` qubits.
pub fn basis_size(num_qubits: u32) -> ReorderResult<usize> {
    if num_qubits >= usize::BITS {
        return Err(ReorderError::TooManyQubits(num_qubits));
    }
    Ok(1usize << num_qubits)
}

/// Qubit count for a buffer of `len` entries.
///
/// Fails unless `len` is a power of two.
pub fn qubits_for_len(len: usize) -> ReorderResult<u32> {
    if !len.is_power_of_two() {
        return Err(ReorderError::NotPowerOfTwo(len));
    }
    Ok(len.trailing_zeros())
}

/// Compute the bit-reversal permutation for `num_qubits` qubits.
///
/// `perm[i]` is `i` with its `num_qubits` bits reversed. Zero qubits yield
/// the single-element identity `[0]`.
pub fn bit_reversal_permutation(num_qubits: u32) -> ReorderResult<Vec<usize>> {
    let size = basis_size(num_qubits)?;
    Ok((0..size).map(|i| reverse_bits(i, num_qubits)).collect())
}
