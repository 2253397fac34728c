//! `qbridge-reindex`: basis reordering between qubit-order conventions.
//!
//! Host frameworks usually index a state vector with qubit 0 as the most
//! significant bit of the basis index, while native simulation engines put
//! qubit 0 in the least significant bit. Moving a state across that boundary
//! means permuting every index by reversing its bits.
//!
//! The permutation is an involution: the same table converts in both
//! directions, and reordering twice restores the original buffer exactly.
//! Density matrices are reindexed by applying the permutation to rows and
//! columns alike, so `diag(reorder_matrix(M)) == reorder_vector(diag(M))`.
//!
//! # Quick start
//!
//! ```rust
//! use qbridge_reindex::{bit_reversal_permutation, reorder_vector, Reindexer};
//!
//! assert_eq!(bit_reversal_permutation(2).unwrap(), vec![0, 2, 1, 3]);
//! assert_eq!(reorder_vector(&[1, 2, 3, 4]).unwrap(), vec![1, 3, 2, 4]);
//!
//! // Memoised tables for repeated use.
//! let reindexer = Reindexer::new();
//! let v = reindexer.reorder_vector(&[1, 2, 3, 4]).unwrap();
//! assert_eq!(reindexer.reorder_vector(&v).unwrap(), vec![1, 2, 3, 4]);
//! ```

pub mod axis;
pub mod basis;
pub mod cache;
pub mod error;
pub mod order;
pub mod permutation;
pub mod probs;
pub mod reindexer;
pub mod reorder;
pub mod state;

pub use axis::{reorder_matrix_by_axes, reorder_vector_by_axes};
pub use basis::{basis_bits, basis_index, basis_state, bitstring};
pub use cache::PermutationCache;
pub use error::{ReorderError, ReorderResult};
pub use order::QubitOrder;
pub use permutation::{basis_size, bit_reversal_permutation, qubits_for_len, reverse_bits};
pub use probs::{density_probabilities, diagonal, marginal_probabilities, probabilities};
pub use reindexer::Reindexer;
pub use reorder::{reorder_matrix, reorder_matrix_flat, reorder_vector, reorder_vector_in_place};
pub use state::{DensityMatrix, StateVector};
