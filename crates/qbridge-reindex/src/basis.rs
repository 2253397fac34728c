//! Computational basis states and their flat indices.

use num_complex::Complex64;

use crate::error::{ReorderError, ReorderResult};
use crate::order::QubitOrder;
use crate::permutation::basis_size;
use crate::state::StateVector;

/// Flat index of the basis state whose qubit `q` holds `bits[q]`.
///
/// ```
/// use qbridge_reindex::{basis_index, QubitOrder};
///
/// // qubit 0 = 1, qubit 1 = 0
/// assert_eq!(basis_index(&[1, 0], QubitOrder::LittleEndian).unwrap(), 1);
/// assert_eq!(basis_index(&[1, 0], QubitOrder::BigEndian).unwrap(), 2);
/// ```
pub fn basis_index(bits: &[u8], order: QubitOrder) -> ReorderResult<usize> {
    let num_qubits = u32::try_from(bits.len()).map_err(|_| ReorderError::TooManyQubits(u32::MAX))?;
    basis_size(num_qubits)?;

    bits.iter()
        .enumerate()
        .try_fold(0usize, |index, (qubit, &value)| match value {
            0 => Ok(index),
            1 => Ok(index | 1 << order.bit_position(qubit, num_qubits)),
            _ => Err(ReorderError::InvalidBasisState { qubit, value }),
        })
}

/// Per-qubit bits of `index`; entry `q` is qubit `q`.
///
/// Index bits above `num_qubits` are ignored.
pub fn basis_bits(index: usize, num_qubits: u32, order: QubitOrder) -> Vec<u8> {
    (0..num_qubits as usize)
        .map(|qubit| ((index >> order.bit_position(qubit, num_qubits)) & 1) as u8)
        .collect()
}

/// Bitstring of `index` with qubit 0 as the first character.
pub fn bitstring(index: usize, num_qubits: u32, order: QubitOrder) -> String {
    basis_bits(index, num_qubits, order)
        .into_iter()
        .map(|b| if b == 1 { '1' } else { '0' })
        .collect()
}

/// One-hot state vector for a basis state given as per-qubit bits.
pub fn basis_state(bits: &[u8], order: QubitOrder) -> ReorderResult<StateVector> {
    let index = basis_index(bits, order)?;
    let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << bits.len()];
    amplitudes[index] = Complex64::new(1.0, 0.0);
    StateVector::new(amplitudes, order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::bit_reversal_permutation;

    #[test]
    fn test_orders_related_by_permutation() {
        let perm = bit_reversal_permutation(3).unwrap();
        for index in 0..8 {
            let bits = basis_bits(index, 3, QubitOrder::LittleEndian);
            let be = basis_index(&bits, QubitOrder::BigEndian).unwrap();
            assert_eq!(be, perm[index]);
        }
    }

    #[test]
    fn test_bits_round_trip() {
        for order in [QubitOrder::LittleEndian, QubitOrder::BigEndian] {
            for index in 0..16 {
                let bits = basis_bits(index, 4, order);
                assert_eq!(basis_index(&bits, order).unwrap(), index);
            }
        }
    }

    #[test]
    fn test_bitstring() {
        assert_eq!(bitstring(1, 3, QubitOrder::LittleEndian), "100");
        assert_eq!(bitstring(1, 3, QubitOrder::BigEndian), "001");
        assert_eq!(bitstring(0, 0, QubitOrder::BigEndian), "");
    }

    #[test]
    fn test_invalid_bit() {
        assert_eq!(
            basis_index(&[0, 2], QubitOrder::BigEndian),
            Err(ReorderError::InvalidBasisState { qubit: 1, value: 2 })
        );
    }

    #[test]
    fn test_basis_state() {
        let sv = basis_state(&[1, 1, 0], QubitOrder::BigEndian).unwrap();
        assert_eq!(sv.amplitudes()[0b110], Complex64::new(1.0, 0.0));
        assert!((sv.norm_sqr() - 1.0).abs() < 1e-12);

        let empty = basis_state(&[], QubitOrder::LittleEndian).unwrap();
        assert_eq!(empty.amplitudes(), &[Complex64::new(1.0, 0.0)]);
    }
}
