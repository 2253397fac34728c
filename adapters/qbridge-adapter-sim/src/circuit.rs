//! Host-side description of one device execution.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::engine::OperationCall;

/// Initial state supplied by the host, indexed in the host's qubit order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preparation {
    /// Computational basis state; entry `q` is the value of wire `q`.
    BasisState(Vec<u8>),
    /// Full amplitude vector of length `2^num_wires`.
    StateVector(Vec<Complex64>),
}

/// Preparation followed by a sequence of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceCircuit {
    /// Optional initial state; `|0...0⟩` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<Preparation>,
    /// Operations in application order.
    #[serde(default)]
    pub operations: Vec<OperationCall>,
}

impl DeviceCircuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a basis state.
    pub fn with_basis_state(mut self, bits: Vec<u8>) -> Self {
        self.preparation = Some(Preparation::BasisState(bits));
        self
    }

    /// Start from an amplitude vector.
    pub fn with_state_vector(mut self, amplitudes: Vec<Complex64>) -> Self {
        self.preparation = Some(Preparation::StateVector(amplitudes));
        self
    }

    /// Append an operation.
    pub fn push(mut self, operation: OperationCall) -> Self {
        self.operations.push(operation);
        self
    }

    /// Parse a circuit from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
