//! Native simulation engine seam.

use std::fmt;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use qbridge_reindex::QubitOrder;

use crate::config::RegisterKind;
use crate::error::DeviceResult;

/// Handle to a register owned by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterId(pub u64);

impl fmt::Display for RegisterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reg-{}", self.0)
    }
}

/// A named operation applied to a list of wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationCall {
    /// Operation name, e.g. `"Hadamard"`.
    pub name: String,
    /// Real parameters.
    #[serde(default)]
    pub params: Vec<f64>,
    /// Wires the operation acts on, in the operation's own argument order.
    pub wires: Vec<usize>,
}

impl OperationCall {
    /// Create a parameterless operation.
    pub fn new(name: impl Into<String>, wires: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            wires,
        }
    }

    /// Attach parameters.
    pub fn with_params(mut self, params: Vec<f64>) -> Self {
        self.params = params;
        self
    }
}

/// Number of wires and real parameters an operation takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    /// Wire count.
    pub wires: usize,
    /// Parameter count.
    pub params: usize,
}

impl Arity {
    /// Arity of an operation.
    pub const fn new(wires: usize, params: usize) -> Self {
        Self { wires, params }
    }
}

/// An opaque native simulation engine.
///
/// Engines index their flat buffers in their own [`QubitOrder`]; the device
/// converts to and from the host order around every call. Registers are
/// created and destroyed explicitly, so callers should hold them through a
/// [`crate::RegisterGuard`].
pub trait SimulationEngine {
    /// Engine name.
    fn name(&self) -> &str;

    /// Order the engine's flat buffers are indexed in.
    fn qubit_order(&self) -> QubitOrder;

    /// Arity of the named operation, or `None` if unsupported.
    fn operation_arity(&self, name: &str) -> Option<Arity>;

    /// Largest register of `kind` the engine can create, if it is bounded.
    fn max_qubits(&self, _kind: RegisterKind) -> Option<u32> {
        None
    }

    /// Allocate a register initialised to `|0...0⟩`.
    fn create_register(&mut self, num_qubits: u32, kind: RegisterKind) -> DeviceResult<RegisterId>;

    /// Release a register.
    fn destroy_register(&mut self, id: RegisterId) -> DeviceResult<()>;

    /// Overwrite the register with a pure state given in engine order.
    fn load_amplitudes(&mut self, id: RegisterId, amplitudes: &[Complex64]) -> DeviceResult<()>;

    /// Apply an operation.
    fn apply(&mut self, id: RegisterId, operation: &OperationCall) -> DeviceResult<()>;

    /// Amplitudes of a pure register, in engine order.
    fn amplitudes(&self, id: RegisterId) -> DeviceResult<Vec<Complex64>>;

    /// Row-major density matrix of a register, in engine order.
    fn density_matrix(&self, id: RegisterId) -> DeviceResult<Vec<Complex64>>;
}
