//! Built-in device backends.
//!
//! Peripheral models live outside this crate and plug in through the
//! [`Device`] trait; the DRAM device here is enough to assemble a simulation.

/// Main memory device.
pub mod dram;

pub use dram::Dram;

pub use crate::soc::traits::Device;
