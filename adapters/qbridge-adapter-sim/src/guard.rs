//! Scoped ownership of engine registers.

use num_complex::Complex64;
use tracing::{debug, warn};

use crate::config::RegisterKind;
use crate::engine::{OperationCall, RegisterId, SimulationEngine};
use crate::error::DeviceResult;

/// Holds an engine register for the lifetime of the guard.
///
/// The register is destroyed exactly once when the guard is dropped, whether
/// the owning scope returns normally, exits early through `?` or unwinds.
pub struct RegisterGuard<'a, E: SimulationEngine + ?Sized> {
    engine: &'a mut E,
    id: RegisterId,
}

impl<'a, E: SimulationEngine + ?Sized> RegisterGuard<'a, E> {
    /// Create a register on `engine` and take ownership of it.
    pub fn acquire(engine: &'a mut E, num_qubits: u32, kind: RegisterKind) -> DeviceResult<Self> {
        let id = engine.create_register(num_qubits, kind)?;
        debug!("Acquired {:?} register {} ({} qubits)", kind, id, num_qubits);
        Ok(Self { engine, id })
    }

    /// The guarded register.
    pub fn id(&self) -> RegisterId {
        self.id
    }

    /// The engine the register lives on.
    pub fn engine(&self) -> &E {
        &*self.engine
    }

    /// See [`SimulationEngine::load_amplitudes`].
    pub fn load_amplitudes(&mut self, amplitudes: &[Complex64]) -> DeviceResult<()> {
        self.engine.load_amplitudes(self.id, amplitudes)
    }

    /// See [`SimulationEngine::apply`].
    pub fn apply(&mut self, operation: &OperationCall) -> DeviceResult<()> {
        self.engine.apply(self.id, operation)
    }

    /// See [`SimulationEngine::amplitudes`].
    pub fn amplitudes(&self) -> DeviceResult<Vec<Complex64>> {
        self.engine.amplitudes(self.id)
    }

    /// See [`SimulationEngine::density_matrix`].
    pub fn density_matrix(&self) -> DeviceResult<Vec<Complex64>> {
        self.engine.density_matrix(self.id)
    }
}

impl<E: SimulationEngine + ?Sized> Drop for RegisterGuard<'_, E> {
    fn drop(&mut self) {
        match self.engine.destroy_register(self.id) {
            Ok(()) => debug!("Released register {}", self.id),
            Err(e) => warn!("Failed to release register {}: {}", self.id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceEngine;

    #[test]
    fn test_guard_releases_on_drop() {
        let mut engine = ReferenceEngine::new();
        {
            let guard = RegisterGuard::acquire(&mut engine, 2, RegisterKind::Pure).unwrap();
            assert_eq!(guard.engine().live_registers(), 1);
        }
        assert_eq!(engine.live_registers(), 0);
    }

    #[test]
    fn test_guard_releases_on_early_return() {
        fn run(engine: &mut ReferenceEngine) -> DeviceResult<()> {
            let mut guard = RegisterGuard::acquire(engine, 1, RegisterKind::Pure)?;
            guard.apply(&OperationCall::new("NotAGate", vec![0]))?;
            Ok(())
        }

        let mut engine = ReferenceEngine::new();
        assert!(run(&mut engine).is_err());
        assert_eq!(engine.live_registers(), 0);
    }

    #[test]
    fn test_failed_acquire_holds_nothing() {
        let mut engine = ReferenceEngine::with_max_bits(2);
        assert!(RegisterGuard::acquire(&mut engine, 3, RegisterKind::Pure).is_err());
        assert_eq!(engine.live_registers(), 0);
    }
}
