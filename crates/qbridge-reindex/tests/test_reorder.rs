//! Concrete reindexing examples and shape failures.

use ndarray::array;
use num_complex::Complex64;
use qbridge_reindex::{
    DensityMatrix, QubitOrder, ReorderError, StateVector, basis_index, basis_state,
    bit_reversal_permutation, density_probabilities, marginal_probabilities, reorder_matrix,
    reorder_vector,
};

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// ---------------------------------------------------------------------------
// Concrete permutations
// ---------------------------------------------------------------------------

#[test]
fn two_qubit_permutation_swaps_middle() {
    assert_eq!(bit_reversal_permutation(2).unwrap(), vec![0, 2, 1, 3]);
    assert_eq!(reorder_vector(&[1, 2, 3, 4]).unwrap(), vec![1, 3, 2, 4]);
}

#[test]
fn single_qubit_is_identity() {
    assert_eq!(bit_reversal_permutation(1).unwrap(), vec![0, 1]);
    let v = [c(0.6, 0.0), c(0.0, 0.8)];
    assert_eq!(reorder_vector(&v).unwrap(), v.to_vec());
}

#[test]
fn zero_qubits_is_singleton() {
    assert_eq!(bit_reversal_permutation(0).unwrap(), vec![0]);
    assert_eq!(reorder_vector(&[c(1.0, 0.0)]).unwrap(), vec![c(1.0, 0.0)]);
}

// ---------------------------------------------------------------------------
// Shape failures
// ---------------------------------------------------------------------------

#[test]
fn length_three_vector_is_a_shape_error() {
    let v = [c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)];
    assert!(matches!(
        reorder_vector(&v),
        Err(ReorderError::NotPowerOfTwo(3))
    ));
}

#[test]
fn non_square_matrix_is_a_shape_error() {
    let m = array![[c(1.0, 0.0), c(0.0, 0.0)]];
    assert!(matches!(
        reorder_matrix(m.view()),
        Err(ReorderError::NotSquare { rows: 1, cols: 2 })
    ));
}

// ---------------------------------------------------------------------------
// Host / engine conversions
// ---------------------------------------------------------------------------

#[test]
fn host_basis_state_lands_on_reversed_engine_index() {
    // Host |110> on three wires: qubit 0 = 1, qubit 1 = 1, qubit 2 = 0
    let bits = [1, 1, 0];
    let host = basis_state(&bits, QubitOrder::BigEndian).unwrap();
    let engine = host.into_order(QubitOrder::LittleEndian);

    let expected = basis_index(&bits, QubitOrder::LittleEndian).unwrap();
    assert_eq!(expected, 0b011);
    assert_eq!(engine.amplitudes()[expected], c(1.0, 0.0));
}

#[test]
fn density_and_state_readouts_agree() {
    let amps = vec![
        c(0.5, 0.0),
        c(0.0, 0.5),
        c(-0.5, 0.0),
        c(0.0, -0.5),
    ];
    let engine_state = StateVector::new(amps, QubitOrder::LittleEndian).unwrap();
    let engine_density = DensityMatrix::from_state(&engine_state);

    let host_probs = engine_state
        .clone()
        .into_order(QubitOrder::BigEndian)
        .probabilities();
    let host_density = engine_density.into_order(QubitOrder::BigEndian);
    let density_probs = density_probabilities(host_density.data().view()).unwrap();

    for (a, b) in host_probs.iter().zip(&density_probs) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn marginals_agree_across_orders() {
    let amps: Vec<Complex64> = (1..=8).map(|i| c(f64::from(i).sqrt() / 6.0, 0.0)).collect();
    let le = StateVector::new(amps, QubitOrder::LittleEndian).unwrap();
    let be = le.clone().into_order(QubitOrder::BigEndian);

    let le_marg = marginal_probabilities(&le.probabilities(), &[2, 0], QubitOrder::LittleEndian)
        .unwrap();
    let be_marg =
        marginal_probabilities(&be.probabilities(), &[2, 0], QubitOrder::BigEndian).unwrap();
    let be_marg_as_le = QubitOrder::BigEndian
        .convert_vector(&be_marg, QubitOrder::LittleEndian)
        .unwrap();

    for (a, b) in le_marg.iter().zip(&be_marg_as_le) {
        assert!((a - b).abs() < 1e-12);
    }
}
