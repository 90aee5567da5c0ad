//! # Simulation Assembly Tests
//!
//! Resolution, initialization order, entry-point seeding, and image loading.

use plugsim_core::common::{RegisterError, SimError};
use plugsim_core::sim::loader::{ImageSet, MemoryImage};
use plugsim_core::soc::SimulationRequest;
use plugsim_core::soc::diag::DiagnosticSink;
use plugsim_core::soc::traits::{BackendKind, Processor};
use plugsim_core::{Catalog, Simulation};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use crate::common::mocks::device::FakeDevice;
use crate::common::mocks::processor::{FakeCore, MockCpu};
use crate::common::mocks::{Journal, journal};
use crate::common::{builtin_request, image_file, log_lines};

fn fake_catalog(log: &Journal) -> Catalog {
    let mut catalog = Catalog::new();
    catalog
        .register_processor_prototype(FakeCore::new(log, 0x1000, u64::MAX))
        .unwrap();
    catalog
        .register_device_prototype(FakeDevice::new("Dev-A", log))
        .unwrap();
    catalog
        .register_device_prototype(FakeDevice::new("Dev-B", log))
        .unwrap();
    catalog
}

#[test]
fn image_and_entry_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = image_file(&dir, "fw.bin", &[0xAA, 0xBB, 0xCC, 0xDD]);
    let images = ImageSet::read(&path, 0x1000, None).unwrap();

    let catalog = Catalog::with_builtins();
    let simulation =
        Simulation::assemble(&catalog, &builtin_request(0x1000), DiagnosticSink::new()).unwrap();
    simulation.load(&images);

    assert_eq!(simulation.entry(), 0x1000);
    assert_eq!(simulation.processor().register("pc").unwrap(), 0x1000);
    assert_eq!(
        simulation.memory().read_bytes(0x1000, 4),
        vec![0xAA, 0xBB, 0xCC, 0xDD]
    );
    assert_eq!(simulation.memory().read_byte(0x0fff), 0);
    assert_eq!(simulation.memory().read_byte(0x1004), 0);
}

#[test]
fn backends_are_initialized_in_order_before_loading() {
    let log = journal();
    let catalog = fake_catalog(&log);
    let request = SimulationRequest::new(FakeCore::NAME, ["Dev-B", "Dev-A"], 0x1000);
    let simulation = Simulation::assemble(&catalog, &request, DiagnosticSink::new()).unwrap();
    simulation.load(&ImageSet {
        primary: MemoryImage::new(0x1000, vec![0xAA]),
        boot_rom: None,
    });

    assert_eq!(
        *log.borrow(),
        vec![
            "init FakeCore probe=0x0",
            "init Dev-B",
            "init Dev-A",
            "set pc=0x1000",
        ]
    );
    assert_eq!(simulation.memory().read_byte(0x1000), 0xAA);
}

#[test]
fn devices_may_repeat() {
    let catalog = Catalog::with_builtins();
    let request = SimulationRequest::new("Sequencer", ["DRAM", "DRAM"], 0);
    let simulation = Simulation::assemble(&catalog, &request, DiagnosticSink::new()).unwrap();
    let names: Vec<_> = simulation.devices().iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["DRAM", "DRAM"]);
}

#[test]
fn a_device_is_required() {
    let catalog = Catalog::with_builtins();
    let request = SimulationRequest::new("Sequencer", Vec::<String>::new(), 0);
    let err = Simulation::assemble(&catalog, &request, DiagnosticSink::new()).unwrap_err();
    assert!(matches!(err, SimError::NoDevices));
}

#[test]
fn unknown_processor_stops_assembly() {
    let catalog = Catalog::with_builtins();
    let request = SimulationRequest::new("VideoCoreIV", ["DRAM"], 0);
    let err = Simulation::assemble(&catalog, &request, DiagnosticSink::new()).unwrap_err();
    assert_eq!(err.to_string(), "processor 'VideoCoreIV' not available");
}

#[test]
fn unknown_device_initializes_nothing() {
    let log = journal();
    let catalog = fake_catalog(&log);
    let request = SimulationRequest::new(FakeCore::NAME, ["Dev-A", "Dev-C"], 0);
    let err = Simulation::assemble(&catalog, &request, DiagnosticSink::new()).unwrap_err();

    assert!(matches!(
        err,
        SimError::BackendUnavailable { kind: BackendKind::Device, ref name } if name == "Dev-C"
    ));
    assert!(log.borrow().is_empty());
}

#[test]
fn rejected_entry_address_is_reported() {
    let mut catalog = Catalog::with_builtins();
    catalog
        .register_processor("Narrow", || -> Box<dyn Processor> {
            let mut cpu = MockCpu::new();
            cpu.expect_name().return_const("Narrow");
            cpu.expect_initialize().times(1).return_const(());
            cpu.expect_set_register().times(1).returning(|name, value| {
                Err(RegisterError::OutOfRange {
                    backend: "Narrow",
                    register: name.to_string(),
                    value,
                })
            });
            Box::new(cpu)
        })
        .unwrap();

    let request = SimulationRequest::new("Narrow", ["DRAM"], 0x8000_0000);
    let err = Simulation::assemble(&catalog, &request, DiagnosticSink::new()).unwrap_err();
    assert!(matches!(
        err,
        SimError::Register(RegisterError::OutOfRange { value: 0x8000_0000, .. })
    ));
}

#[test]
fn loading_is_announced() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("plugsim.log");
    let catalog = Catalog::with_builtins();
    let simulation = Simulation::assemble(
        &catalog,
        &builtin_request(0),
        DiagnosticSink::to_file(&log_path).unwrap(),
    )
    .unwrap();
    simulation.load(&ImageSet {
        primary: MemoryImage::new(0, vec![1]),
        boot_rom: Some(MemoryImage::new(0x6000_0000, vec![2])),
    });
    simulation.sink().flush();

    let lines = log_lines(&log_path);
    let info: Vec<&str> = lines
        .iter()
        .map(String::as_str)
        .filter(|line| line.starts_with("INFO"))
        .collect();
    assert_eq!(
        info,
        vec![
            "INFO  Initializing the simulator...",
            "INFO  DRAM: attached to the address space (0 resident pages)",
            "INFO  Loading the memory image...",
            "INFO  Loading the bootrom image...",
        ]
    );
    assert_eq!(simulation.memory().read_byte(0x6000_0000), 2);
}

#[test]
fn debug_shows_the_wiring() {
    let catalog = Catalog::with_builtins();
    let simulation =
        Simulation::assemble(&catalog, &builtin_request(0x40), DiagnosticSink::new()).unwrap();
    let rendered = format!("{simulation:?}");
    assert!(rendered.contains("Sequencer"));
    assert!(rendered.contains("DRAM"));
    assert!(rendered.contains("0x40"));
}
