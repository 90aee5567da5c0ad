use std::rc::{Rc, Weak};

use mockall::mock;
use plugsim_core::common::{Addr, Fault, RegisterError};
use plugsim_core::soc::diag::DiagnosticSink;
use plugsim_core::soc::memory::AddressSpace;
use plugsim_core::soc::traits::{Backend, Processor};

use super::Journal;

mock! {
    pub Cpu {}

    impl Backend for Cpu {
        fn name(&self) -> &'static str;
        fn initialize(&mut self, sink: &Rc<DiagnosticSink>, memory: &Rc<AddressSpace>);
    }

    impl Processor for Cpu {
        fn register_names(&self) -> &'static [&'static str];
        fn register(&self, name: &str) -> Result<u64, RegisterError>;
        fn set_register(&mut self, name: &str, value: u64) -> Result<(), RegisterError>;
        fn run(&mut self, quantum: u32) -> Result<(), Fault>;
    }
}

/// Accumulating processor with registers `pc` and `acc`.
///
/// `run` adds the quantum to `acc` and faults once `acc` reaches `limit`. During
/// `initialize` it samples the byte at `probe`, which shows whether any image was
/// loaded before initialization.
#[derive(Clone, Debug)]
pub struct FakeCore {
    journal: Journal,
    probe: Addr,
    limit: u64,
    pc: u64,
    acc: u64,
    memory: Weak<AddressSpace>,
}

impl FakeCore {
    pub const NAME: &'static str = "FakeCore";

    pub fn new(journal: &Journal, probe: Addr, limit: u64) -> Self {
        Self {
            journal: Rc::clone(journal),
            probe,
            limit,
            pc: 0,
            acc: 0,
            memory: Weak::new(),
        }
    }

    fn unknown(name: &str) -> RegisterError {
        RegisterError::Unknown {
            backend: Self::NAME,
            register: name.to_string(),
        }
    }
}

impl Backend for FakeCore {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn initialize(&mut self, _sink: &Rc<DiagnosticSink>, memory: &Rc<AddressSpace>) {
        self.memory = Rc::downgrade(memory);
        self.journal.borrow_mut().push(format!(
            "init {} probe={:#x}",
            Self::NAME,
            memory.read_byte(self.probe)
        ));
    }
}

impl Processor for FakeCore {
    fn register_names(&self) -> &'static [&'static str] {
        &["pc", "acc"]
    }

    fn register(&self, name: &str) -> Result<u64, RegisterError> {
        match name {
            "pc" => Ok(self.pc),
            "acc" => Ok(self.acc),
            _ => Err(Self::unknown(name)),
        }
    }

    fn set_register(&mut self, name: &str, value: u64) -> Result<(), RegisterError> {
        self.journal
            .borrow_mut()
            .push(format!("set {name}={value:#x}"));
        match name {
            "pc" => self.pc = value,
            "acc" => self.acc = value,
            _ => return Err(Self::unknown(name)),
        }
        Ok(())
    }

    fn run(&mut self, quantum: u32) -> Result<(), Fault> {
        if self.memory.strong_count() == 0 {
            return Err(Fault::Detached {
                backend: Self::NAME,
            });
        }
        self.acc += u64::from(quantum);
        self.pc += 1;
        if self.acc >= self.limit {
            return Err(Fault::Backend {
                backend: Self::NAME,
                message: "limit reached".to_string(),
            });
        }
        Ok(())
    }
}
