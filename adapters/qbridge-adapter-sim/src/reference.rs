//! In-memory reference engine.
//!
//! Stores registers as flat little-endian buffers. A mixed register on `n`
//! qubits is stored as its row-major density matrix, which is a `2n`-bit
//! buffer whose high `n` bits index rows and low `n` bits index columns.
//! Applying `U` to the row bits and `conj(U)` to the column bits gives
//! `U ρ U†`.

use num_complex::Complex64;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use qbridge_reindex::{QubitOrder, basis_size};

use crate::config::RegisterKind;
use crate::engine::{Arity, OperationCall, RegisterId, SimulationEngine};
use crate::error::{DeviceError, DeviceResult};
use crate::kernels;

/// Operations understood by [`ReferenceEngine`].
const OPERATIONS: &[(&str, Arity)] = &[
    ("Identity", Arity::new(1, 0)),
    ("PauliX", Arity::new(1, 0)),
    ("PauliY", Arity::new(1, 0)),
    ("PauliZ", Arity::new(1, 0)),
    ("Hadamard", Arity::new(1, 0)),
    ("S", Arity::new(1, 0)),
    ("T", Arity::new(1, 0)),
    ("PhaseShift", Arity::new(1, 1)),
    ("RX", Arity::new(1, 1)),
    ("RY", Arity::new(1, 1)),
    ("RZ", Arity::new(1, 1)),
    ("CNOT", Arity::new(2, 0)),
    ("SWAP", Arity::new(2, 0)),
];

struct Register {
    kind: RegisterKind,
    num_qubits: u32,
    data: Vec<Complex64>,
}

/// Little-endian statevector / density-matrix engine held in memory.
pub struct ReferenceEngine {
    registers: FxHashMap<u64, Register>,
    next_id: u64,
    /// Maximum number of buffer bits (`n` for pure, `2n` for mixed).
    max_bits: u32,
}

impl ReferenceEngine {
    /// Create an engine with the default 20-bit buffer limit.
    pub fn new() -> Self {
        Self::with_max_bits(20)
    }

    /// Create an engine whose buffers span at most `max_bits` index bits.
    ///
    /// A mixed register on `n` qubits uses `2n` bits.
    pub fn with_max_bits(max_bits: u32) -> Self {
        Self {
            registers: FxHashMap::default(),
            next_id: 0,
            max_bits,
        }
    }

    /// Number of registers currently allocated.
    pub fn live_registers(&self) -> usize {
        self.registers.len()
    }

    fn capacity(&self, kind: RegisterKind) -> u32 {
        match kind {
            RegisterKind::Pure => self.max_bits,
            RegisterKind::Mixed => self.max_bits / 2,
        }
    }

    fn register(&self, id: RegisterId) -> DeviceResult<&Register> {
        self.registers
            .get(&id.0)
            .ok_or_else(|| DeviceError::UnknownRegister(id.to_string()))
    }

    fn register_mut(&mut self, id: RegisterId) -> DeviceResult<&mut Register> {
        self.registers
            .get_mut(&id.0)
            .ok_or_else(|| DeviceError::UnknownRegister(id.to_string()))
    }
}

impl Default for ReferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationEngine for ReferenceEngine {
    fn name(&self) -> &str {
        "reference"
    }

    fn qubit_order(&self) -> QubitOrder {
        QubitOrder::LittleEndian
    }

    fn operation_arity(&self, name: &str) -> Option<Arity> {
        OPERATIONS
            .iter()
            .find(|(op, _)| *op == name)
            .map(|(_, arity)| *arity)
    }

    fn max_qubits(&self, kind: RegisterKind) -> Option<u32> {
        Some(self.capacity(kind))
    }

    fn create_register(&mut self, num_qubits: u32, kind: RegisterKind) -> DeviceResult<RegisterId> {
        let bits = kind.buffer_bits(num_qubits);
        if bits > self.max_bits {
            return Err(DeviceError::TooManyQubits {
                requested: num_qubits,
                max: self.capacity(kind),
            });
        }

        let mut data = vec![Complex64::new(0.0, 0.0); basis_size(bits)?];
        data[0] = Complex64::new(1.0, 0.0);

        let id = RegisterId(self.next_id);
        self.next_id += 1;
        self.registers.insert(
            id.0,
            Register {
                kind,
                num_qubits,
                data,
            },
        );
        debug!("Created {:?} register {} on {} qubits", kind, id, num_qubits);
        Ok(id)
    }

    fn destroy_register(&mut self, id: RegisterId) -> DeviceResult<()> {
        self.registers
            .remove(&id.0)
            .map(|_| ())
            .ok_or_else(|| DeviceError::UnknownRegister(id.to_string()))
    }

    fn load_amplitudes(&mut self, id: RegisterId, amplitudes: &[Complex64]) -> DeviceResult<()> {
        let reg = self.register_mut(id)?;
        let dim = basis_size(reg.num_qubits)?;
        if amplitudes.len() != dim {
            return Err(DeviceError::InvalidPreparation(format!(
                "expected {} amplitudes, got {}",
                dim,
                amplitudes.len()
            )));
        }

        match reg.kind {
            RegisterKind::Pure => reg.data.copy_from_slice(amplitudes),
            RegisterKind::Mixed => {
                for (r, a) in amplitudes.iter().enumerate() {
                    for (c, b) in amplitudes.iter().enumerate() {
                        reg.data[r * dim + c] = a * b.conj();
                    }
                }
            }
        }
        Ok(())
    }

    fn apply(&mut self, id: RegisterId, operation: &OperationCall) -> DeviceResult<()> {
        let arity = self
            .operation_arity(&operation.name)
            .ok_or_else(|| DeviceError::UnsupportedOperation(operation.name.clone()))?;
        if operation.wires.len() != arity.wires || operation.params.len() != arity.params {
            return Err(DeviceError::InvalidArguments {
                operation: operation.name.clone(),
                reason: format!(
                    "expected {} wires and {} parameters, got {} and {}",
                    arity.wires,
                    arity.params,
                    operation.wires.len(),
                    operation.params.len()
                ),
            });
        }

        let reg = self.register_mut(id)?;
        if let Some(&wire) = operation
            .wires
            .iter()
            .find(|&&w| w >= reg.num_qubits as usize)
        {
            return Err(DeviceError::WireOutOfRange {
                wire,
                num_wires: reg.num_qubits,
            });
        }

        trace!("Applying {} to {:?} on register {}", operation.name, operation.wires, id);
        match reg.kind {
            RegisterKind::Pure => apply_unitary(&mut reg.data, operation, 0, false),
            RegisterKind::Mixed => {
                let rows = reg.num_qubits as usize;
                apply_unitary(&mut reg.data, operation, rows, false);
                apply_unitary(&mut reg.data, operation, 0, true);
            }
        }
        Ok(())
    }

    fn amplitudes(&self, id: RegisterId) -> DeviceResult<Vec<Complex64>> {
        let reg = self.register(id)?;
        match reg.kind {
            RegisterKind::Pure => Ok(reg.data.clone()),
            RegisterKind::Mixed => Err(DeviceError::Unsupported(format!(
                "amplitudes of mixed register {id}"
            ))),
        }
    }

    fn density_matrix(&self, id: RegisterId) -> DeviceResult<Vec<Complex64>> {
        let reg = self.register(id)?;
        match reg.kind {
            RegisterKind::Mixed => Ok(reg.data.clone()),
            RegisterKind::Pure => Ok(reg
                .data
                .iter()
                .flat_map(|a| reg.data.iter().map(move |b| a * b.conj()))
                .collect()),
        }
    }
}

/// Apply `operation` with every wire shifted up by `offset` index bits.
///
/// Arity has already been checked by the caller.
fn apply_unitary(data: &mut [Complex64], operation: &OperationCall, offset: usize, conjugate: bool) {
    let w = |k: usize| operation.wires[k] + offset;
    let p = |k: usize| operation.params[k];
    match operation.name.as_str() {
        "Identity" => {}
        "PauliX" => kernels::apply_x(data, w(0)),
        "PauliY" => kernels::apply_y(data, w(0), conjugate),
        "PauliZ" => kernels::apply_z(data, w(0)),
        "Hadamard" => kernels::apply_h(data, w(0)),
        "S" => kernels::apply_phase(data, w(0), std::f64::consts::FRAC_PI_2, conjugate),
        "T" => kernels::apply_phase(data, w(0), std::f64::consts::FRAC_PI_4, conjugate),
        "PhaseShift" => kernels::apply_phase(data, w(0), p(0), conjugate),
        "RX" => kernels::apply_rx(data, w(0), p(0), conjugate),
        "RY" => kernels::apply_ry(data, w(0), p(0)),
        "RZ" => kernels::apply_rz(data, w(0), p(0), conjugate),
        "CNOT" => kernels::apply_cx(data, w(0), w(1)),
        "SWAP" => kernels::apply_swap(data, w(0), w(1)),
        _ => {}
    }
}
