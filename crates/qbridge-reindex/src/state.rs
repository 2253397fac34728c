//! Order-tagged amplitude vectors and density matrices.

use ndarray::Array2;
use num_complex::Complex64;
use serde::Serialize;

use crate::error::{ReorderError, ReorderResult};
use crate::order::QubitOrder;
use crate::permutation::{basis_size, qubits_for_len, reverse_bits};
use crate::probs;
use crate::reorder::{check_flat_len, permute_matrix, reverse_index_bits, square_dim};

/// A `2^n` amplitude vector together with the qubit order it is indexed in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
    order: QubitOrder,
}

impl StateVector {
    /// Wrap amplitudes indexed in `order`.
    ///
    /// Fails unless the length is a power of two.
    pub fn new(amplitudes: Vec<Complex64>, order: QubitOrder) -> ReorderResult<Self> {
        qubits_for_len(amplitudes.len())?;
        Ok(Self { amplitudes, order })
    }

    /// The all-zero basis state `|0...0⟩`.
    pub fn zero_state(num_qubits: u32, order: QubitOrder) -> ReorderResult<Self> {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); basis_size(num_qubits)?];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self { amplitudes, order })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.amplitudes.len().trailing_zeros()
    }

    /// The qubit order the amplitudes are indexed in.
    pub fn order(&self) -> QubitOrder {
        self.order
    }

    /// Amplitudes in [`Self::order`].
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume and return the raw amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Re-index the amplitudes into `target` order.
    pub fn into_order(self, target: QubitOrder) -> Self {
        if !self.order.requires_reorder(target) {
            return self;
        }
        let num_qubits = self.num_qubits();
        Self {
            amplitudes: reverse_index_bits(&self.amplitudes, num_qubits),
            order: target,
        }
    }

    /// Measurement probabilities indexed in [`Self::order`].
    pub fn probabilities(&self) -> Vec<f64> {
        probs::probabilities(&self.amplitudes)
    }

    /// Squared norm of the state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }
}

/// A `2^n x 2^n` density matrix together with its qubit order.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityMatrix {
    data: Array2<Complex64>,
    order: QubitOrder,
}

impl DensityMatrix {
    /// Wrap a matrix indexed in `order`.
    pub fn new(data: Array2<Complex64>, order: QubitOrder) -> ReorderResult<Self> {
        let dim = square_dim(&data.view())?;
        qubits_for_len(dim)?;
        Ok(Self { data, order })
    }

    /// Build from a row-major flat buffer of `dim * dim` entries.
    pub fn from_flat(buffer: Vec<Complex64>, dim: usize, order: QubitOrder) -> ReorderResult<Self> {
        qubits_for_len(dim)?;
        let len = buffer.len();
        check_flat_len(len, dim)?;
        let data = Array2::from_shape_vec((dim, dim), buffer).map_err(|_| {
            ReorderError::LengthMismatch {
                expected: dim * dim,
                got: len,
            }
        })?;
        Ok(Self { data, order })
    }

    /// The pure-state projector `|ψ⟩⟨ψ|` in the state's order.
    pub fn from_state(state: &StateVector) -> Self {
        let amps = state.amplitudes();
        let dim = amps.len();
        let data = Array2::from_shape_fn((dim, dim), |(r, c)| amps[r] * amps[c].conj());
        Self {
            data,
            order: state.order(),
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.dim().trailing_zeros()
    }

    /// Matrix dimension `2^n`.
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    /// The qubit order rows and columns are indexed in.
    pub fn order(&self) -> QubitOrder {
        self.order
    }

    /// Matrix entries in [`Self::order`].
    pub fn data(&self) -> &Array2<Complex64> {
        &self.data
    }

    /// Consume and return the raw matrix.
    pub fn into_data(self) -> Array2<Complex64> {
        self.data
    }

    /// Re-index rows and columns into `target` order.
    pub fn into_order(self, target: QubitOrder) -> Self {
        if !self.order.requires_reorder(target) {
            return self;
        }
        let num_qubits = self.num_qubits();
        let perm: Vec<usize> = (0..self.dim())
            .map(|i| reverse_bits(i, num_qubits))
            .collect();
        Self {
            data: permute_matrix(self.data.view(), &perm),
            order: target,
        }
    }

    /// The diagonal in [`Self::order`].
    pub fn diagonal(&self) -> Vec<Complex64> {
        self.data.diag().to_vec()
    }

    /// Measurement probabilities (real part of the diagonal).
    pub fn probabilities(&self) -> Vec<f64> {
        self.data.diag().iter().map(|z| z.re).collect()
    }

    /// Trace of the matrix.
    pub fn trace(&self) -> Complex64 {
        self.data.diag().sum()
    }
}
