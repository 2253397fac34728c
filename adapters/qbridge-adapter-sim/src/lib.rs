//! qbridge Reindexing Device Adapter
//!
//! This crate connects a host framework, which indexes flat state buffers
//! with wire 0 as the most significant bit, to a native simulation engine
//! that puts qubit 0 in the least significant bit. Every state handed to the
//! engine and every readout handed back passes through a
//! [`qbridge_reindex::Reindexer`].
//!
//! # Components
//!
//! - [`SimulationEngine`]: the opaque engine seam (register lifecycle, named
//!   operations, amplitude and density readout)
//! - [`RegisterGuard`]: scoped register ownership, released on drop
//! - [`ReindexingDevice`]: validation, preparation, execution, readout and
//!   shot sampling in host order
//! - [`ReferenceEngine`]: an in-memory little-endian engine for pure and
//!   mixed registers
//!
//! # Example
//!
//! ```
//! use qbridge_adapter_sim::{
//!     DeviceCircuit, DeviceConfig, OperationCall, ReferenceEngine, ReindexingDevice,
//! };
//!
//! let mut device = ReindexingDevice::new(DeviceConfig::pure(2), ReferenceEngine::new()).unwrap();
//!
//! // Flip wire 0 only
//! let circuit = DeviceCircuit::new().push(OperationCall::new("PauliX", vec![0]));
//! let readout = device.execute(&circuit).unwrap();
//!
//! // Host order: wire 0 is the most significant bit, so |10⟩ is index 2
//! assert_eq!(readout.probabilities(), &[0.0, 0.0, 1.0, 0.0]);
//! ```

mod circuit;
mod config;
mod device;
mod engine;
mod error;
mod guard;
mod kernels;
mod readout;
mod reference;

pub use circuit::{DeviceCircuit, Preparation};
pub use config::{DeviceConfig, RegisterKind};
pub use device::ReindexingDevice;
pub use engine::{Arity, OperationCall, RegisterId, SimulationEngine};
pub use error::{DeviceError, DeviceResult};
pub use guard::RegisterGuard;
pub use readout::{Counts, Readout};
pub use reference::ReferenceEngine;
