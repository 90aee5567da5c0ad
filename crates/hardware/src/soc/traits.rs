//! Backend traits for processors and devices.
//!
//! This module defines the contracts every pluggable backend satisfies. It provides:
//! 1. **Identification:** `BackendKind` and `Backend::name` for catalog lookup and diagnostics.
//! 2. **Wiring:** `Backend::initialize`, which attaches a backend to the shared address space
//!    and diagnostic sink exactly once.
//! 3. **Register Access:** The processor's named, ordered register file.
//! 4. **Execution:** `Processor::run`, a bounded quantum that either returns or reports a `Fault`.
//!
//! Backends hold only `Weak` handles to the shared state; the simulation owns it.

use std::fmt;
use std::rc::Rc;

use crate::common::{Fault, RegisterError};
use crate::soc::diag::DiagnosticSink;
use crate::soc::memory::AddressSpace;

/// The two catalogs backends are registered in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Instruction-set processors.
    Processor,
    /// Memory-mapped devices.
    Device,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Processor => write!(f, "processor"),
            Self::Device => write!(f, "device"),
        }
    }
}

/// Capabilities shared by every backend.
pub trait Backend {
    /// Returns the name this backend reports in diagnostics (e.g., `"DRAM"`).
    fn name(&self) -> &'static str;

    /// Attaches the backend to the simulation's diagnostic sink and address space.
    ///
    /// Called exactly once per instance by the assembler, before any register is
    /// written and before any image is loaded. Implementations keep `Weak` handles
    /// (see [`Rc::downgrade`]) so that the simulation remains the sole owner.
    ///
    /// # Arguments
    ///
    /// * `sink` - Diagnostic sink shared by the whole simulation.
    /// * `memory` - Address space shared by the processor and every device.
    fn initialize(&mut self, sink: &Rc<DiagnosticSink>, memory: &Rc<AddressSpace>);
}

/// An instruction-set processor backend.
///
/// The register file is named and ordered; both the names and their order are fixed
/// by the backend and never change after construction.
pub trait Processor: Backend {
    /// Returns the register names in the backend's declared order.
    fn register_names(&self) -> &'static [&'static str];

    /// Returns the name of the program-counter register seeded with the entry address.
    fn pc_register(&self) -> &'static str {
        "pc"
    }

    /// Reads a register by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Unknown`] if `name` is not a declared register.
    fn register(&self, name: &str) -> Result<u64, RegisterError>;

    /// Writes a register by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegisterError::Unknown`] if `name` is not a declared register, or
    /// [`RegisterError::OutOfRange`] if `value` does not fit it.
    fn set_register(&mut self, name: &str, value: u64) -> Result<(), RegisterError>;

    /// Executes at most `quantum` units of work.
    ///
    /// # Errors
    ///
    /// Returns a [`Fault`] when execution cannot continue. Register state must
    /// reflect the point at which the fault was detected.
    fn run(&mut self, quantum: u32) -> Result<(), Fault>;
}

/// A device backend sharing the address space with the processor.
///
/// Devices own disjoint internal state and interact with the processor through
/// the shared address space.
pub trait Device: Backend {}
