//! Error types for the device adapter.

use thiserror::Error;

use qbridge_reindex::ReorderError;

/// Errors that can occur while executing on a reindexing device.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// The engine does not implement the named operation.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An operation received the wrong number of wires or parameters.
    #[error("Invalid arguments for {operation}: {reason}")]
    InvalidArguments {
        /// Operation name.
        operation: String,
        /// What was wrong.
        reason: String,
    },

    /// A wire index is outside the device.
    #[error("Wire {wire} out of range for device with {num_wires} wires")]
    WireOutOfRange {
        /// The offending wire.
        wire: usize,
        /// Number of device wires.
        num_wires: u32,
    },

    /// State preparation does not match the device.
    #[error("Invalid state preparation: {0}")]
    InvalidPreparation(String),

    /// Requested register exceeds engine or device limits.
    #[error("{requested} qubits requested but at most {max} are supported")]
    TooManyQubits {
        /// Requested qubit count.
        requested: u32,
        /// Supported maximum.
        max: u32,
    },

    /// Register handle does not refer to a live register.
    #[error("Unknown register: {0}")]
    UnknownRegister(String),

    /// Engine cannot serve the request for this register kind.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Buffer reindexing failed.
    #[error("Reindexing error: {0}")]
    Reorder(#[from] ReorderError),

    /// Generic engine error.
    #[error("Engine error: {0}")]
    Engine(String),
}

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;
