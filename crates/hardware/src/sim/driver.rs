//! Execution driver: runs the processor until it faults.
//!
//! The driver owns the assembled [`Simulation`] and calls the processor's `run` with a
//! fixed quantum in an unconditional loop. The loop has no normal exit; the only way
//! out is a [`Fault`], which is handled once, here, by capturing the register file
//! into a [`FaultReport`].

use std::fmt;

use crate::common::{DEFAULT_QUANTUM, Fault};
use crate::soc::builder::Simulation;
use crate::soc::traits::Processor;

/// Process exit status used after a fault has been reported.
pub const FAULT_EXIT_CODE: i32 = 1;

/// One register captured at fault time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterDump {
    /// Register name, as declared by the backend.
    pub name: &'static str,
    /// Register value, or `None` if the backend refused to read a declared register.
    pub value: Option<u64>,
}

/// Register-state dump produced when execution faults.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaultReport {
    /// The fault returned by the processor.
    pub fault: Fault,
    /// Number of quanta started, including the one that faulted.
    pub quanta: u64,
    /// Every declared register, in the backend's order.
    pub registers: Vec<RegisterDump>,
}

impl FaultReport {
    /// Captures the processor's register file.
    ///
    /// # Arguments
    ///
    /// * `processor` - The processor that faulted.
    /// * `fault` - The fault it returned.
    /// * `quanta` - Number of quanta started before the report was taken.
    pub fn capture(processor: &dyn Processor, fault: Fault, quanta: u64) -> Self {
        let registers = processor
            .register_names()
            .iter()
            .map(|&name| RegisterDump {
                name,
                value: processor.register(name).ok(),
            })
            .collect();
        Self {
            fault,
            quanta,
            registers,
        }
    }
}

impl fmt::Display for FaultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Exception: {}", self.fault)?;
        for reg in &self.registers {
            match reg.value {
                Some(value) => writeln!(f, "{}: {value:x}", reg.name)?,
                None => writeln!(f, "{}: <unreadable>", reg.name)?,
            }
        }
        Ok(())
    }
}

/// Drives a simulation in fixed-size quanta.
#[derive(Debug)]
pub struct ExecutionDriver {
    simulation: Simulation,
    quantum: u32,
    quanta: u64,
}

impl ExecutionDriver {
    /// Creates a driver using [`DEFAULT_QUANTUM`].
    pub fn new(simulation: Simulation) -> Self {
        Self::with_quantum(simulation, DEFAULT_QUANTUM)
    }

    /// Creates a driver requesting at most `quantum` units of work per `run` call.
    ///
    /// A quantum of 0 would never make progress and is raised to 1.
    pub fn with_quantum(simulation: Simulation, quantum: u32) -> Self {
        Self {
            simulation,
            quantum: quantum.max(1),
            quanta: 0,
        }
    }

    /// Returns the quantum passed to every `run` call.
    pub const fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Returns the driven simulation.
    pub const fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Runs the processor until it faults.
    ///
    /// This only returns on a fault. The processor is not run again afterwards; the
    /// report reflects the register file exactly as the faulting quantum left it.
    pub fn run_until_fault(&mut self) -> FaultReport {
        self.simulation.sink().info("", "Starting the simulation...");
        loop {
            self.quanta += 1;
            if let Err(fault) = self.simulation.processor_mut().run(self.quantum) {
                let report = FaultReport::capture(self.simulation.processor(), fault, self.quanta);
                let sink = self.simulation.sink();
                sink.error(
                    self.simulation.processor().name(),
                    &format!("{} after {} quanta", report.fault, report.quanta),
                );
                sink.flush();
                return report;
            }
        }
    }
}
