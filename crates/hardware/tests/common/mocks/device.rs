use std::rc::Rc;

use plugsim_core::soc::devices::Device;
use plugsim_core::soc::diag::DiagnosticSink;
use plugsim_core::soc::memory::AddressSpace;
use plugsim_core::soc::traits::Backend;

use super::Journal;

/// Device that only records its initialization.
#[derive(Clone, Debug)]
pub struct FakeDevice {
    name: &'static str,
    journal: Journal,
}

impl FakeDevice {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: Rc::clone(journal),
        }
    }
}

impl Backend for FakeDevice {
    fn name(&self) -> &'static str {
        self.name
    }

    fn initialize(&mut self, _sink: &Rc<DiagnosticSink>, _memory: &Rc<AddressSpace>) {
        self.journal.borrow_mut().push(format!("init {}", self.name));
    }
}

impl Device for FakeDevice {}
