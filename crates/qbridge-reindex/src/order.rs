//! Qubit-order conventions for flat basis indices.

use serde::{Deserialize, Serialize};

use crate::error::ReorderResult;
use crate::permutation::qubits_for_len;
use crate::reorder::reverse_index_bits;

/// Which bit of a basis index belongs to qubit 0.
///
/// Buffers carry no self-describing tag, so every amplitude vector or
/// density matrix handed across the bridge must be paired with its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QubitOrder {
    /// Qubit 0 is the least significant index bit (native engine layout).
    LittleEndian,
    /// Qubit 0 is the most significant index bit (host framework layout).
    BigEndian,
}

impl QubitOrder {
    /// The opposite convention.
    pub const fn reversed(self) -> Self {
        match self {
            Self::LittleEndian => Self::BigEndian,
            Self::BigEndian => Self::LittleEndian,
        }
    }

    /// Whether converting from `self` to `target` permutes indices.
    pub fn requires_reorder(self, target: Self) -> bool {
        self != target
    }

    /// Position of `qubit`'s bit inside a basis index of `num_qubits` bits.
    ///
    /// `qubit` must be less than `num_qubits`.
    #[inline]
    pub fn bit_position(self, qubit: usize, num_qubits: u32) -> usize {
        match self {
            Self::LittleEndian => qubit,
            Self::BigEndian => num_qubits as usize - 1 - qubit,
        }
    }

    /// Convert a flat buffer indexed in `self` order into `target` order.
    ///
    /// The length is validated even when no permutation is needed.
    pub fn convert_vector<T: Clone>(self, buffer: &[T], target: Self) -> ReorderResult<Vec<T>> {
        let num_qubits = qubits_for_len(buffer.len())?;
        if self.requires_reorder(target) {
            Ok(reverse_index_bits(buffer, num_qubits))
        } else {
            Ok(buffer.to_vec())
        }
    }
}

impl std::fmt::Display for QubitOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LittleEndian => write!(f, "little-endian"),
            Self::BigEndian => write!(f, "big-endian"),
        }
    }
}
