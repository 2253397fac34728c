//! Probability readout from amplitudes and density matrices.

use ndarray::ArrayView2;
use num_complex::Complex64;

use crate::error::{ReorderError, ReorderResult};
use crate::order::QubitOrder;
use crate::permutation::qubits_for_len;
use crate::reorder::square_dim;

/// `|a_i|^2` for every amplitude, in the amplitudes' own order.
pub fn probabilities(amplitudes: &[Complex64]) -> Vec<f64> {
    amplitudes.iter().map(Complex64::norm_sqr).collect()
}

/// Diagonal of a square matrix.
pub fn diagonal<T: Clone>(matrix: ArrayView2<'_, T>) -> ReorderResult<Vec<T>> {
    square_dim(&matrix)?;
    Ok(matrix.diag().to_vec())
}

/// Real part of a density matrix's diagonal.
pub fn density_probabilities(matrix: ArrayView2<'_, Complex64>) -> ReorderResult<Vec<f64>> {
    square_dim(&matrix)?;
    Ok(matrix.diag().iter().map(|z| z.re).collect())
}

/// Marginalise a full probability vector onto `wires`.
///
/// Input and output are both indexed in `order`; `wires[k]` becomes qubit
/// `k` of the result. Wires must be distinct and inside the register.
pub fn marginal_probabilities(
    probs: &[f64],
    wires: &[usize],
    order: QubitOrder,
) -> ReorderResult<Vec<f64>> {
    let num_qubits = qubits_for_len(probs.len())?;
    let mut seen = vec![false; num_qubits as usize];
    for &wire in wires {
        if wire >= num_qubits as usize {
            return Err(ReorderError::WireOutOfRange { wire, num_qubits });
        }
        if std::mem::replace(&mut seen[wire], true) {
            return Err(ReorderError::DuplicateWire(wire));
        }
    }

    let kept = wires.len() as u32;
    let mut out = vec![0.0; 1 << kept];
    for (index, &p) in probs.iter().enumerate() {
        let reduced = wires.iter().enumerate().fold(0usize, |acc, (k, &wire)| {
            let bit = (index >> order.bit_position(wire, num_qubits)) & 1;
            acc | bit << order.bit_position(k, kept)
        });
        out[reduced] += p;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_probabilities() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let p = probabilities(&[Complex64::new(h, 0.0), Complex64::new(0.0, -h)]);
        assert!((p[0] - 0.5).abs() < 1e-12);
        assert!((p[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_diagonal() {
        let m = array![[1, 2], [3, 4]];
        assert_eq!(diagonal(m.view()).unwrap(), vec![1, 4]);
        let rect = array![[1, 2, 3], [4, 5, 6]];
        assert!(diagonal(rect.view()).is_err());
    }

    #[test]
    fn test_marginal_big_endian() {
        // P(q0 q1) over |00>, |01>, |10>, |11> in big-endian order
        let probs = [0.1, 0.2, 0.3, 0.4];
        let q0 = marginal_probabilities(&probs, &[0], QubitOrder::BigEndian).unwrap();
        assert!((q0[0] - 0.3).abs() < 1e-12);
        assert!((q0[1] - 0.7).abs() < 1e-12);
        let q1 = marginal_probabilities(&probs, &[1], QubitOrder::BigEndian).unwrap();
        assert!((q1[0] - 0.4).abs() < 1e-12);
        assert!((q1[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_marginal_swapped_wires() {
        let probs = [0.1, 0.2, 0.3, 0.4];
        let swapped = marginal_probabilities(&probs, &[1, 0], QubitOrder::BigEndian).unwrap();
        assert_eq!(swapped, vec![0.1, 0.3, 0.2, 0.4]);
    }

    #[test]
    fn test_marginal_all_wires_identity() {
        let probs = [0.1, 0.2, 0.3, 0.4, 0.0, 0.0, 0.0, 0.0];
        for order in [QubitOrder::LittleEndian, QubitOrder::BigEndian] {
            let out = marginal_probabilities(&probs, &[0, 1, 2], order).unwrap();
            assert_eq!(out, probs.to_vec());
        }
    }

    #[test]
    fn test_marginal_empty_wires_sums() {
        let out = marginal_probabilities(&[0.25; 4], &[], QubitOrder::LittleEndian).unwrap();
        assert_eq!(out, vec![1.0]);
    }

    #[test]
    fn test_marginal_rejects_bad_wires() {
        let probs = [0.25; 4];
        assert_eq!(
            marginal_probabilities(&probs, &[2], QubitOrder::BigEndian),
            Err(ReorderError::WireOutOfRange {
                wire: 2,
                num_qubits: 2
            })
        );
        assert_eq!(
            marginal_probabilities(&probs, &[1, 1], QubitOrder::BigEndian),
            Err(ReorderError::DuplicateWire(1))
        );
    }
}
