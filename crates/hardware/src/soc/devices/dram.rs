//! DRAM device.
//!
//! Main memory is the shared address space itself, so this device has no registers of
//! its own. It attaches to the address space and reports how much of it is resident
//! at attach time.

use std::rc::{Rc, Weak};

use crate::soc::devices::Device;
use crate::soc::diag::DiagnosticSink;
use crate::soc::memory::AddressSpace;
use crate::soc::traits::Backend;

/// DRAM device structure.
#[derive(Clone, Debug, Default)]
pub struct Dram {
    memory: Weak<AddressSpace>,
}

impl Dram {
    /// Creates a detached DRAM device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` once the device is attached to a live address space.
    pub fn is_attached(&self) -> bool {
        self.memory.strong_count() > 0
    }

    /// Returns the number of resident pages, or `None` when detached.
    pub fn resident_pages(&self) -> Option<usize> {
        self.memory.upgrade().map(|m| m.resident_pages())
    }
}

impl Backend for Dram {
    /// Returns the device name.
    fn name(&self) -> &'static str {
        "DRAM"
    }

    /// Attaches to the shared state and reports the attachment.
    fn initialize(&mut self, sink: &Rc<DiagnosticSink>, memory: &Rc<AddressSpace>) {
        self.memory = Rc::downgrade(memory);
        sink.info(
            "DRAM",
            &format!(
                "attached to the address space ({} resident pages)",
                memory.resident_pages()
            ),
        );
    }
}

impl Device for Dram {}
