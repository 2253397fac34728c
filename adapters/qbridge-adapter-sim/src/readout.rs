//! Host-order results of a device execution.

use rustc_hash::FxHashMap;
use serde::Serialize;

use qbridge_reindex::{DensityMatrix, QubitOrder, StateVector, marginal_probabilities};

use crate::error::DeviceResult;

/// Measurement counts keyed by bitstring (qubit 0 first).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    counts: FxHashMap<String, u64>,
}

impl Counts {
    /// Create an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.counts.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Occurrences of `bitstring`.
    pub fn get(&self, bitstring: &str) -> u64 {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Most frequent outcome.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(k, &v)| (k.as_str(), v))
    }

    /// Iterate over `(bitstring, count)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

/// Result of a device execution, indexed in the host's qubit order.
#[derive(Debug, Clone)]
pub struct Readout {
    order: QubitOrder,
    probabilities: Vec<f64>,
    state: Option<StateVector>,
    density: Option<DensityMatrix>,
}

impl Readout {
    /// Readout of a pure register.
    pub fn from_state(state: StateVector) -> Self {
        Self {
            order: state.order(),
            probabilities: state.probabilities(),
            state: Some(state),
            density: None,
        }
    }

    /// Readout of a mixed register.
    pub fn from_density(density: DensityMatrix) -> Self {
        Self {
            order: density.order(),
            probabilities: density.probabilities(),
            state: None,
            density: Some(density),
        }
    }

    /// Qubit order of every buffer in this readout.
    pub fn order(&self) -> QubitOrder {
        self.order
    }

    /// Full probability vector.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Final state, for pure registers.
    pub fn state(&self) -> Option<&StateVector> {
        self.state.as_ref()
    }

    /// Final density matrix, for mixed registers.
    pub fn density(&self) -> Option<&DensityMatrix> {
        self.density.as_ref()
    }

    /// Probabilities marginalised onto `wires`, `wires[0]` as qubit 0.
    pub fn marginal(&self, wires: &[usize]) -> DeviceResult<Vec<f64>> {
        Ok(marginal_probabilities(&self.probabilities, wires, self.order)?)
    }
}
