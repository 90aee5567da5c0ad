//! Sequencer processor.
//!
//! A minimal processor backend that defines no instruction set. Each execution unit
//! fetches the byte at `pc` into `ir`, counts a cycle, and advances `pc` by one. It
//! faults when `pc` would move past the last address, which makes it useful for
//! exercising the harness end to end without a real ISA.
//!
//! # Registers
//!
//! * `pc`: Address of the next fetch.
//! * `ir`: Last fetched byte.
//! * `cycles`: Number of executed units.

use std::rc::{Rc, Weak};

use crate::common::addr::{Addr, addr_from_register};
use crate::common::{Fault, RegisterError};
use crate::soc::diag::DiagnosticSink;
use crate::soc::memory::AddressSpace;
use crate::soc::traits::{Backend, Processor};

const NAME: &str = "Sequencer";

const REGISTERS: &[&str] = &["pc", "ir", "cycles"];

/// Byte-stepping processor.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    pc: Addr,
    ir: u8,
    cycles: u64,
    memory: Weak<AddressSpace>,
    sink: Weak<DiagnosticSink>,
}

impl Sequencer {
    /// Creates a detached sequencer with every register at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn unknown(register: &str) -> RegisterError {
        RegisterError::Unknown {
            backend: NAME,
            register: register.to_string(),
        }
    }
}

impl Backend for Sequencer {
    fn name(&self) -> &'static str {
        NAME
    }

    fn initialize(&mut self, sink: &Rc<DiagnosticSink>, memory: &Rc<AddressSpace>) {
        self.sink = Rc::downgrade(sink);
        self.memory = Rc::downgrade(memory);
        sink.debug(NAME, "attached to the address space");
    }
}

impl Processor for Sequencer {
    fn register_names(&self) -> &'static [&'static str] {
        REGISTERS
    }

    fn register(&self, name: &str) -> Result<u64, RegisterError> {
        match name {
            "pc" => Ok(u64::from(self.pc)),
            "ir" => Ok(u64::from(self.ir)),
            "cycles" => Ok(self.cycles),
            _ => Err(Self::unknown(name)),
        }
    }

    fn set_register(&mut self, name: &str, value: u64) -> Result<(), RegisterError> {
        let out_of_range = || RegisterError::OutOfRange {
            backend: NAME,
            register: name.to_string(),
            value,
        };
        match name {
            "pc" => self.pc = addr_from_register(value).ok_or_else(out_of_range)?,
            "ir" => self.ir = u8::try_from(value).map_err(|_| out_of_range())?,
            "cycles" => self.cycles = value,
            _ => return Err(Self::unknown(name)),
        }
        Ok(())
    }

    fn run(&mut self, quantum: u32) -> Result<(), Fault> {
        let memory = self.memory.upgrade().ok_or(Fault::Detached { backend: NAME })?;
        for _ in 0..quantum {
            self.ir = memory.read_byte(self.pc);
            self.cycles += 1;
            self.pc = self
                .pc
                .checked_add(1)
                .ok_or(Fault::AddressOverflow { pc: self.pc })?;
        }
        if let Some(sink) = self.sink.upgrade() {
            sink.debug(NAME, &format!("quantum done, pc={:#x}", self.pc));
        }
        Ok(())
    }
}
