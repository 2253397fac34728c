//! Device configuration.

use serde::{Deserialize, Serialize};

use qbridge_reindex::{QubitOrder, basis_size};

use crate::error::{DeviceError, DeviceResult};

/// Shape of the state an engine register holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterKind {
    /// A `2^n` state vector.
    #[default]
    Pure,
    /// A `2^n x 2^n` density matrix.
    Mixed,
}

impl RegisterKind {
    /// Index bits of the flat buffer backing a register on `num_qubits` qubits.
    pub fn buffer_bits(self, num_qubits: u32) -> u32 {
        match self {
            Self::Pure => num_qubits,
            Self::Mixed => num_qubits.saturating_mul(2),
        }
    }

    /// Largest qubit count whose flat buffer is addressable on this platform.
    pub fn addressable_qubits(self) -> u32 {
        match self {
            Self::Pure => usize::BITS - 1,
            Self::Mixed => (usize::BITS - 1) / 2,
        }
    }
}

fn default_shots() -> u32 {
    1000
}

fn default_max_qubits() -> u32 {
    20
}

fn default_host_order() -> QubitOrder {
    QubitOrder::BigEndian
}

/// Configuration for a [`crate::ReindexingDevice`].
///
/// ```
/// use qbridge_adapter_sim::{DeviceConfig, RegisterKind};
///
/// let config = DeviceConfig::from_json(r#"{"name": "qbridge.mixed", "num_wires": 2, "kind": "mixed"}"#).unwrap();
/// assert_eq!(config.kind, RegisterKind::Mixed);
/// assert_eq!(config.shots, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Short name of the device.
    pub name: String,
    /// Number of wires.
    pub num_wires: u32,
    /// Register kind used for every execution.
    #[serde(default)]
    pub kind: RegisterKind,
    /// Default number of shots for sampling.
    #[serde(default = "default_shots")]
    pub shots: u32,
    /// Largest wire count the device accepts.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: u32,
    /// Qubit order the host framework uses for flat buffers.
    #[serde(default = "default_host_order")]
    pub host_order: QubitOrder,
}

impl DeviceConfig {
    /// Create a pure-state configuration.
    pub fn new(name: impl Into<String>, num_wires: u32) -> Self {
        Self {
            name: name.into(),
            num_wires,
            kind: RegisterKind::Pure,
            shots: default_shots(),
            max_qubits: default_max_qubits(),
            host_order: default_host_order(),
        }
    }

    /// Pure-state device named `qbridge.pure`.
    pub fn pure(num_wires: u32) -> Self {
        Self::new("qbridge.pure", num_wires)
    }

    /// Mixed-state device named `qbridge.mixed`.
    pub fn mixed(num_wires: u32) -> Self {
        Self::new("qbridge.mixed", num_wires).with_kind(RegisterKind::Mixed)
    }

    /// Set the register kind.
    pub fn with_kind(mut self, kind: RegisterKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the default shot count.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = shots;
        self
    }

    /// Set the maximum wire count.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Set the host qubit order.
    pub fn with_host_order(mut self, order: QubitOrder) -> Self {
        self.host_order = order;
        self
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> DeviceResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> DeviceResult<()> {
        if self.name.is_empty() {
            return Err(DeviceError::Configuration("device name is empty".into()));
        }
        if self.num_wires > self.max_qubits {
            return Err(DeviceError::TooManyQubits {
                requested: self.num_wires,
                max: self.max_qubits,
            });
        }
        basis_size(self.kind.buffer_bits(self.num_wires)).map_err(|_| {
            DeviceError::TooManyQubits {
                requested: self.num_wires,
                max: self.kind.addressable_qubits(),
            }
        })?;
        Ok(())
    }
}
