//! Configuration system for the simulator harness.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** The built-in backends, the run quantum, and literal parsing mode.
//! 2. **Structures:** General (scheduling, parsing) and system (backend selection) sections.
//!
//! The command-line driver uses `Config::default()`. Embedders may deserialize a
//! configuration from JSON with [`Config::from_json`].

use std::num::NonZeroU32;

use serde::Deserialize;

use crate::common::SimError;
use crate::sim::literal::LiteralMode;

/// Default configuration constants.
mod defaults {
    /// Processor backend used when none is configured.
    pub const PROCESSOR: &str = "Sequencer";

    /// Device backend used when none is configured.
    pub const DEVICE: &str = "DRAM";

    use std::num::NonZeroU32;

    /// Execution units requested per `run` call.
    pub const QUANTUM: NonZeroU32 = match NonZeroU32::new(crate::common::DEFAULT_QUANTUM) {
        Some(quantum) => quantum,
        None => NonZeroU32::MIN,
    };
}

/// Root configuration structure containing all harness settings.
///
/// # Examples
///
/// ```
/// use plugsim_core::config::Config;
/// use plugsim_core::sim::literal::LiteralMode;
///
/// let config = Config::default();
/// assert_eq!(config.system.processor, "Sequencer");
/// assert_eq!(config.general.quantum.get(), 1000);
///
/// let config = Config::from_json(r#"{
///     "general": { "quantum": 64, "literal_mode": "Permissive" },
///     "system": { "devices": ["DRAM", "DRAM"] }
/// }"#).unwrap();
/// assert_eq!(config.general.quantum.get(), 64);
/// assert_eq!(config.general.literal_mode, LiteralMode::Permissive);
/// assert_eq!(config.system.processor, "Sequencer");
/// assert_eq!(config.system.devices.len(), 2);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Scheduling and parsing settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Backend selection
    #[serde(default)]
    pub system: SystemConfig,
}

impl Config {
    /// Deserializes a configuration from a JSON document; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the document is malformed, or if it sets
    /// `general.quantum` to 0.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Scheduling and parsing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Upper bound on execution units per `run` call; never zero
    #[serde(default = "GeneralConfig::default_quantum")]
    pub quantum: NonZeroU32,

    /// How strictly numeric command-line addresses are parsed
    #[serde(default)]
    pub literal_mode: LiteralMode,
}

impl GeneralConfig {
    const fn default_quantum() -> NonZeroU32 {
        defaults::QUANTUM
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            quantum: defaults::QUANTUM,
            literal_mode: LiteralMode::default(),
        }
    }
}

/// Backend selection.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    /// Catalog name of the processor
    #[serde(default = "SystemConfig::default_processor")]
    pub processor: String,

    /// Catalog names of the devices, in initialization order
    #[serde(default = "SystemConfig::default_devices")]
    pub devices: Vec<String>,
}

impl SystemConfig {
    fn default_processor() -> String {
        defaults::PROCESSOR.to_string()
    }

    fn default_devices() -> Vec<String> {
        vec![defaults::DEVICE.to_string()]
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            processor: Self::default_processor(),
            devices: Self::default_devices(),
        }
    }
}
