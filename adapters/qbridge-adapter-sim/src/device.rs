//! Reindexing device implementation.

use num_complex::Complex64;
use rand::Rng;
use tracing::{debug, instrument};

use qbridge_reindex::{
    DensityMatrix, QubitOrder, Reindexer, StateVector, basis_index, basis_size, bitstring,
};

use crate::circuit::{DeviceCircuit, Preparation};
use crate::config::{DeviceConfig, RegisterKind};
use crate::engine::SimulationEngine;
use crate::error::{DeviceError, DeviceResult};
use crate::guard::RegisterGuard;
use crate::readout::{Counts, Readout};

/// Tolerance on the squared norm of a prepared state vector.
const NORM_TOLERANCE: f64 = 1e-8;

/// Device that runs host circuits on a [`SimulationEngine`].
///
/// Inputs arrive in the host's qubit order and are reindexed into the
/// engine's order before loading; every readout is reindexed back. Each
/// execution holds its engine register through a [`RegisterGuard`].
pub struct ReindexingDevice<E: SimulationEngine> {
    config: DeviceConfig,
    engine: E,
    reindexer: Reindexer,
}

impl<E: SimulationEngine> ReindexingDevice<E> {
    /// Create a device over `engine`.
    ///
    /// Fails if the configuration is invalid or the engine cannot hold a
    /// register of the configured size and kind.
    pub fn new(config: DeviceConfig, engine: E) -> DeviceResult<Self> {
        config.validate()?;
        if let Some(max) = engine.max_qubits(config.kind) {
            if config.num_wires > max {
                return Err(DeviceError::TooManyQubits {
                    requested: config.num_wires,
                    max,
                });
            }
        }
        debug!(
            "Created device {} ({} wires, {:?}) on engine {}",
            config.name,
            config.num_wires,
            config.kind,
            engine.name()
        );
        Ok(Self {
            config,
            engine,
            reindexer: Reindexer::new(),
        })
    }

    /// Share an existing reindexer (and its permutation cache).
    pub fn with_reindexer(mut self, reindexer: Reindexer) -> Self {
        self.reindexer = reindexer;
        self
    }

    /// Device configuration.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The reindexer used for conversions.
    pub fn reindexer(&self) -> &Reindexer {
        &self.reindexer
    }

    /// Number of wires.
    pub fn num_wires(&self) -> u32 {
        self.config.num_wires
    }

    /// Check a circuit against the device and engine without running it.
    pub fn validate(&self, circuit: &DeviceCircuit) -> DeviceResult<()> {
        let num_wires = self.config.num_wires;

        match &circuit.preparation {
            Some(Preparation::BasisState(bits)) if bits.len() != num_wires as usize => {
                return Err(DeviceError::InvalidPreparation(format!(
                    "basis state has {} entries for {} wires",
                    bits.len(),
                    num_wires
                )));
            }
            Some(Preparation::StateVector(amps)) => {
                if amps.len() != basis_size(num_wires)? {
                    return Err(DeviceError::InvalidPreparation(format!(
                        "state vector has {} amplitudes for {} wires",
                        amps.len(),
                        num_wires
                    )));
                }
                let norm: f64 = amps.iter().map(Complex64::norm_sqr).sum();
                if (norm - 1.0).abs() > NORM_TOLERANCE {
                    return Err(DeviceError::InvalidPreparation(format!(
                        "state vector has squared norm {norm}"
                    )));
                }
            }
            _ => {}
        }

        for op in &circuit.operations {
            let arity = self
                .engine
                .operation_arity(&op.name)
                .ok_or_else(|| DeviceError::UnsupportedOperation(op.name.clone()))?;
            if op.wires.len() != arity.wires || op.params.len() != arity.params {
                return Err(DeviceError::InvalidArguments {
                    operation: op.name.clone(),
                    reason: format!(
                        "expected {} wires and {} parameters, got {} and {}",
                        arity.wires,
                        arity.params,
                        op.wires.len(),
                        op.params.len()
                    ),
                });
            }
            for (k, &wire) in op.wires.iter().enumerate() {
                if wire >= num_wires as usize {
                    return Err(DeviceError::WireOutOfRange { wire, num_wires });
                }
                if op.wires[..k].contains(&wire) {
                    return Err(DeviceError::InvalidArguments {
                        operation: op.name.clone(),
                        reason: format!("wire {wire} used twice"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Run a circuit and read the final state back in host order.
    #[instrument(skip(self, circuit), fields(device = %self.config.name))]
    pub fn execute(&mut self, circuit: &DeviceCircuit) -> DeviceResult<Readout> {
        self.validate(circuit)?;

        let num_wires = self.config.num_wires;
        let host_order = self.config.host_order;
        let engine_order = self.engine.qubit_order();
        let kind = self.config.kind;
        let reindexer = &self.reindexer;

        debug!(
            "Executing {} operations ({} -> {})",
            circuit.operations.len(),
            host_order,
            engine_order
        );

        let mut guard = RegisterGuard::acquire(&mut self.engine, num_wires, kind)?;

        if let Some(preparation) = &circuit.preparation {
            let amplitudes = match preparation {
                Preparation::BasisState(bits) => {
                    let index = basis_index(bits, engine_order)?;
                    let mut amps = vec![Complex64::new(0.0, 0.0); basis_size(num_wires)?];
                    amps[index] = Complex64::new(1.0, 0.0);
                    amps
                }
                Preparation::StateVector(amps) => {
                    reindexer.convert_vector(amps, host_order, engine_order)?
                }
            };
            guard.load_amplitudes(&amplitudes)?;
        }

        for op in &circuit.operations {
            guard.apply(op)?;
        }

        let readout = match kind {
            RegisterKind::Pure => {
                let raw = guard.amplitudes()?;
                let host = reindexer.convert_vector(&raw, engine_order, host_order)?;
                Readout::from_state(StateVector::new(host, host_order)?)
            }
            RegisterKind::Mixed => {
                let dim = basis_size(num_wires)?;
                let raw = guard.density_matrix()?;
                let host = reindexer.convert_matrix_flat(&raw, dim, engine_order, host_order)?;
                Readout::from_density(DensityMatrix::from_flat(host, dim, host_order)?)
            }
        };

        Ok(readout)
    }

    /// Probabilities of `wires` (all wires when `None`), in host order.
    pub fn probabilities(
        &mut self,
        circuit: &DeviceCircuit,
        wires: Option<&[usize]>,
    ) -> DeviceResult<Vec<f64>> {
        let readout = self.execute(circuit)?;
        match wires {
            Some(wires) => readout.marginal(wires),
            None => Ok(readout.probabilities().to_vec()),
        }
    }

    /// Sample `shots` outcomes (the configured default when `None`).
    ///
    /// Bitstrings list wire 0 first regardless of either qubit order.
    #[instrument(skip(self, circuit), fields(device = %self.config.name))]
    pub fn sample(&mut self, circuit: &DeviceCircuit, shots: Option<u32>) -> DeviceResult<Counts> {
        let shots = shots.unwrap_or(self.config.shots);
        if shots == 0 {
            return Err(DeviceError::InvalidShots("shots must be at least 1".into()));
        }

        let readout = self.execute(circuit)?;
        let probabilities = readout.probabilities();
        let order: QubitOrder = readout.order();
        let mut rng = rand::thread_rng();
        let mut counts = Counts::new();

        for shot in 0..shots {
            let outcome = sample_index(probabilities, rng.r#gen());
            counts.insert(bitstring(outcome, self.config.num_wires, order), 1);

            if shot > 0 && shot % 1000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        Ok(counts)
    }
}

/// Index selected by the cumulative distribution at `r` in `[0, 1)`.
fn sample_index(probabilities: &[f64], r: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, p) in probabilities.iter().enumerate() {
        cumulative += p;
        if r < cumulative {
            return i;
        }
    }
    // Rounding can leave the total just under 1; fall back to the last
    // outcome with nonzero probability.
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::OperationCall;
    use crate::reference::ReferenceEngine;

    fn device(config: DeviceConfig) -> ReindexingDevice<ReferenceEngine> {
        ReindexingDevice::new(config, ReferenceEngine::new()).unwrap()
    }

    #[test]
    fn test_basis_state_reads_back_in_host_order() {
        let mut dev = device(DeviceConfig::pure(2));
        let circuit = DeviceCircuit::new().with_basis_state(vec![1, 0]);
        let readout = dev.execute(&circuit).unwrap();

        // Host order is big-endian: wire 0 = 1 is index 0b10
        assert_eq!(readout.probabilities(), &[0.0, 0.0, 1.0, 0.0]);
        assert_eq!(readout.order(), QubitOrder::BigEndian);
        assert_eq!(dev.engine().live_registers(), 0);
    }

    #[test]
    fn test_little_endian_host_needs_no_reorder() {
        let mut dev = device(DeviceConfig::pure(2).with_host_order(QubitOrder::LittleEndian));
        let circuit = DeviceCircuit::new().with_basis_state(vec![1, 0]);
        let readout = dev.execute(&circuit).unwrap();
        assert_eq!(readout.probabilities(), &[0.0, 1.0, 0.0, 0.0]);
        assert!(dev.reindexer().cache().is_empty());
    }

    #[test]
    fn test_validate_rejects_unknown_operation() {
        let dev = device(DeviceConfig::pure(1));
        let circuit = DeviceCircuit::new().push(OperationCall::new("Toffoli", vec![0]));
        assert!(matches!(
            dev.validate(&circuit),
            Err(DeviceError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_repeated_wire() {
        let dev = device(DeviceConfig::pure(2));
        let circuit = DeviceCircuit::new().push(OperationCall::new("CNOT", vec![1, 1]));
        assert!(matches!(
            dev.validate(&circuit),
            Err(DeviceError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unnormalised_state() {
        let dev = device(DeviceConfig::pure(1));
        let circuit = DeviceCircuit::new()
            .with_state_vector(vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)]);
        assert!(matches!(
            dev.validate(&circuit),
            Err(DeviceError::InvalidPreparation(_))
        ));
    }

    #[test]
    fn test_sample_index() {
        assert_eq!(sample_index(&[0.0, 1.0], 0.0), 1);
        assert_eq!(sample_index(&[0.5, 0.5], 0.25), 0);
        assert_eq!(sample_index(&[0.5, 0.5], 0.75), 1);
        assert_eq!(sample_index(&[0.3, 0.3, 0.0], 0.999), 1);
    }

    #[test]
    fn test_zero_shots_rejected() {
        let mut dev = device(DeviceConfig::pure(1));
        assert!(matches!(
            dev.sample(&DeviceCircuit::new(), Some(0)),
            Err(DeviceError::InvalidShots(_))
        ));
    }

    #[test]
    fn test_unaddressable_config_is_rejected_up_front() {
        let config = DeviceConfig::pure(64).with_max_qubits(64);
        let result = ReindexingDevice::new(config, ReferenceEngine::with_max_bits(64));
        assert!(matches!(
            result,
            Err(DeviceError::TooManyQubits { requested: 64, .. })
        ));
    }

    #[test]
    fn test_device_larger_than_engine_is_rejected() {
        // 11 mixed wires need 22 index bits; the default engine holds 20
        let result = ReindexingDevice::new(DeviceConfig::mixed(11), ReferenceEngine::new());
        assert!(matches!(
            result,
            Err(DeviceError::TooManyQubits {
                requested: 11,
                max: 10
            })
        ));
        assert!(ReindexingDevice::new(DeviceConfig::mixed(10), ReferenceEngine::new()).is_ok());
    }

    #[test]
    fn test_large_device_validates_state_vector_without_panicking() {
        let dev = device(DeviceConfig::pure(20));
        let circuit = DeviceCircuit::new().with_state_vector(vec![Complex64::new(1.0, 0.0); 2]);
        assert!(matches!(
            dev.validate(&circuit),
            Err(DeviceError::InvalidPreparation(_))
        ));
    }
}
