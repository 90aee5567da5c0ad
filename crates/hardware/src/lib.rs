//! Pluggable instruction-set simulator harness.
//!
//! This crate assembles and drives simulations built from interchangeable backends:
//! 1. **Catalog:** Named processor and device factories, registered once at startup.
//! 2. **Assembly:** One processor and its devices wired to a shared address space and diagnostic sink.
//! 3. **Loading:** Binary images placed into the address space before execution.
//! 4. **Execution:** The processor runs in fixed quanta until it faults; the fault produces a register dump.
//!
//! Instruction semantics and peripheral behaviour belong to the backends. The
//! built-in `Sequencer` processor and `DRAM` device make the harness runnable on its own.

/// Common types and constants (addresses, errors, platform constants).
pub mod common;
/// Harness configuration (backend selection, quantum, literal parsing).
pub mod config;
/// Built-in processor backends.
pub mod core;
/// Catalog, literal parsing, image loading, and the execution driver.
pub mod sim;
/// Backend traits, address space, diagnostic sink, devices, and the simulation builder.
pub mod soc;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Registry of backend factories.
pub use crate::sim::Catalog;
/// Assembled simulation; construct with `Simulation::assemble`.
pub use crate::soc::Simulation;
