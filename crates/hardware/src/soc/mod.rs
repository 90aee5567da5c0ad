//! Simulated system components.
//!
//! This module organizes the pieces a simulation is assembled from: the backend
//! traits, the shared address space and diagnostic sink, the built-in devices,
//! and the builder that wires them together.

/// Simulation builder.
pub mod builder;

/// Built-in device backends.
pub mod devices;

/// Diagnostic sink shared by the harness and every backend.
pub mod diag;

/// Sparse byte-addressable address space.
pub mod memory;

/// Backend trait definitions.
pub mod traits;

pub use builder::{Simulation, SimulationRequest};
