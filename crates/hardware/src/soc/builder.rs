//! Simulation assembly and the top-level `Simulation` type.
//!
//! This module builds a ready-to-run simulation from catalog names. It performs:
//! 1. **Backend resolution:** Looks up the processor and every requested device in the catalog.
//! 2. **Shared state:** Creates the single address space and takes ownership of the diagnostic sink.
//! 3. **Initialization:** Attaches every backend to the shared state exactly once.
//! 4. **Entry point:** Seeds the processor's program counter with the entry address.

use std::fmt;
use std::rc::Rc;

use crate::common::{Addr, SimError};
use crate::sim::catalog::Catalog;
use crate::sim::loader::{self, ImageSet};
use crate::soc::diag::DiagnosticSink;
use crate::soc::memory::AddressSpace;
use crate::soc::traits::{Device, Processor};

/// What to build: backend names and the program entry address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationRequest {
    /// Processor name in the catalog.
    pub processor: String,
    /// Device names in the catalog, in initialization order.
    pub devices: Vec<String>,
    /// Value written to the processor's program-counter register.
    pub entry: Addr,
}

impl SimulationRequest {
    /// Creates a request for one processor, its devices, and an entry address.
    pub fn new<S: Into<String>>(
        processor: impl Into<String>,
        devices: impl IntoIterator<Item = S>,
        entry: Addr,
    ) -> Self {
        Self {
            processor: processor.into(),
            devices: devices.into_iter().map(Into::into).collect(),
            entry,
        }
    }
}

/// A fully initialized simulation: one processor, its devices, and the shared state.
///
/// The simulation is the owner of the address space and the diagnostic sink; the
/// backends only hold weak handles to them.
pub struct Simulation {
    memory: Rc<AddressSpace>,
    sink: Rc<DiagnosticSink>,
    processor: Box<dyn Processor>,
    devices: Vec<Box<dyn Device>>,
    entry: Addr,
}

impl Simulation {
    /// Resolves, wires, and initializes the backends named in `request`.
    ///
    /// All backends are resolved before any of them is initialized, so a missing
    /// name leaves nothing half-built.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Registered backend factories.
    /// * `request` - Processor and device names plus the entry address.
    /// * `sink` - Diagnostic sink the simulation takes ownership of.
    ///
    /// # Errors
    ///
    /// * [`SimError::BackendUnavailable`] / [`SimError::EmptyCatalog`] if a name cannot be resolved.
    /// * [`SimError::NoDevices`] if `request.devices` is empty.
    /// * [`SimError::Register`] if the processor rejects the entry address.
    pub fn assemble(
        catalog: &Catalog,
        request: &SimulationRequest,
        sink: DiagnosticSink,
    ) -> Result<Self, SimError> {
        let mut processor = catalog.processor(&request.processor)?;
        if request.devices.is_empty() {
            return Err(SimError::NoDevices);
        }
        let mut devices = request
            .devices
            .iter()
            .map(|name| catalog.device(name))
            .collect::<Result<Vec<_>, _>>()?;

        let memory = Rc::new(AddressSpace::new());
        let sink = Rc::new(sink);

        sink.info("", "Initializing the simulator...");
        processor.initialize(&sink, &memory);
        for device in &mut devices {
            device.initialize(&sink, &memory);
        }

        let pc = processor.pc_register();
        processor.set_register(pc, u64::from(request.entry))?;
        sink.debug(
            processor.name(),
            &format!("{pc} set to entry address {:#x}", request.entry),
        );

        Ok(Self {
            memory,
            sink,
            processor,
            devices,
            entry: request.entry,
        })
    }

    /// Loads the primary image and, if present, the boot ROM into the address space.
    ///
    /// # Arguments
    ///
    /// * `images` - Images read by [`ImageSet::read`] or built in memory.
    pub fn load(&self, images: &ImageSet) {
        self.sink.info("", "Loading the memory image...");
        loader::load_image(&self.memory, &images.primary);
        if let Some(boot_rom) = &images.boot_rom {
            self.sink.info("", "Loading the bootrom image...");
            loader::load_image(&self.memory, boot_rom);
        }
    }

    /// Returns the shared address space.
    pub fn memory(&self) -> &AddressSpace {
        &self.memory
    }

    /// Returns the shared diagnostic sink.
    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    /// Returns the processor.
    pub fn processor(&self) -> &dyn Processor {
        self.processor.as_ref()
    }

    /// Returns the processor for mutation (register writes, running quanta).
    pub fn processor_mut(&mut self) -> &mut dyn Processor {
        self.processor.as_mut()
    }

    /// Returns the devices in initialization order.
    pub fn devices(&self) -> &[Box<dyn Device>] {
        &self.devices
    }

    /// Returns the entry address the program counter was seeded with.
    pub const fn entry(&self) -> Addr {
        self.entry
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("processor", &self.processor.name())
            .field(
                "devices",
                &self.devices.iter().map(|d| d.name()).collect::<Vec<_>>(),
            )
            .field("entry", &format_args!("{:#x}", self.entry))
            .field("resident_pages", &self.memory.resident_pages())
            .finish_non_exhaustive()
    }
}
