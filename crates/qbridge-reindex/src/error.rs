//! Error types for the reindex crate.

use thiserror::Error;

/// Errors produced while reindexing buffers between qubit-order conventions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReorderError {
    /// A vector length or matrix dimension is not a power of two.
    #[error("Buffer length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// A matrix is not square.
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// The qubit count cannot be indexed on this platform.
    #[error("{0} qubits exceed the addressable basis size")]
    TooManyQubits(u32),

    /// A flat buffer does not hold the number of entries its shape implies.
    #[error("Expected {expected} entries, got {got}")]
    LengthMismatch {
        /// Entries implied by the declared shape.
        expected: usize,
        /// Entries actually present.
        got: usize,
    },

    /// A basis-state bit is neither 0 nor 1.
    #[error("Basis state entry for qubit {qubit} must be 0 or 1, got {value}")]
    InvalidBasisState {
        /// Qubit holding the offending entry.
        qubit: usize,
        /// The offending value.
        value: u8,
    },

    /// A wire index is outside the register.
    #[error("Wire {wire} out of range for {num_qubits} qubits")]
    WireOutOfRange {
        /// The offending wire.
        wire: usize,
        /// Number of qubits in the register.
        num_qubits: u32,
    },

    /// A wire appears more than once in a wire list.
    #[error("Wire {0} listed more than once")]
    DuplicateWire(usize),
}

/// Result type for reindexing operations.
pub type ReorderResult<T> = Result<T, ReorderError>;
