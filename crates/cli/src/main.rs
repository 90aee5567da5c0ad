//! Simulator harness CLI.
//!
//! This binary assembles a simulation from the built-in catalog and runs it until the
//! processor faults. It performs:
//! 1. **Argument parsing:** Leading `-log` / `-verbose` flags, then 3 or 4 positional arguments.
//! 2. **Loading:** Reads the memory image (and optional boot ROM) into the address space.
//! 3. **Execution:** Runs in fixed quanta; on a fault, dumps every register and exits with 1.
//!
//! Every error before execution prints one line and exits with -1.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use plugsim_core::common::{LOG_FILE_NAME, SimError};
use plugsim_core::config::Config;
use plugsim_core::sim::driver::{ExecutionDriver, FAULT_EXIT_CODE, FaultReport};
use plugsim_core::sim::literal::parse_literal;
use plugsim_core::sim::loader::ImageSet;
use plugsim_core::soc::diag::DiagnosticSink;
use plugsim_core::soc::traits::BackendKind;
use plugsim_core::{Catalog, Simulation, soc::SimulationRequest};

/// Exit status for every failure that happens before execution starts.
const SETUP_FAILURE_EXIT_CODE: i32 = -1;

const USAGE: &str =
    "[-log] [-verbose] <memory-image> <image-address> <start-address> [<bootrom>]";

#[derive(Parser, Debug)]
#[command(
    name = "plugsim",
    version,
    args_override_self = true,
    about = "Pluggable instruction-set simulator harness",
    override_usage = "plugsim [-log] [-verbose] <MEMORY_IMAGE> <IMAGE_ADDRESS> <START_ADDRESS> [BOOTROM]"
)]
struct Cli {
    /// Write diagnostics to plugsim.log instead of stderr.
    #[arg(long)]
    log: bool,

    /// List every registered backend before assembling the simulation.
    #[arg(long)]
    verbose: bool,

    /// Raw binary image to load.
    memory_image: PathBuf,

    /// Address of the first image byte (decimal, or hex with 0x).
    image_address: String,

    /// Initial program counter (decimal, or hex with 0x).
    start_address: String,

    /// Boot ROM image, loaded at the platform boot address.
    bootrom: Option<PathBuf>,
}

/// Rewrites the single-dash flags into clap's long form.
///
/// Flags are only recognized before the first positional argument; a `--` is
/// inserted there so that everything after it is positional, whatever it looks like.
fn normalize_args(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args = args.into_iter();
    let mut out: Vec<OsString> = args.next().into_iter().collect();
    let mut rest = Vec::new();
    for arg in args.by_ref() {
        match arg.to_str() {
            Some("-log") => out.push("--log".into()),
            Some("-verbose") => out.push("--verbose".into()),
            Some("-h" | "--help" | "-V" | "--version") => out.push(arg),
            _ => {
                rest.push(arg);
                break;
            }
        }
    }
    if !rest.is_empty() {
        out.push("--".into());
        out.extend(rest);
        out.extend(args);
    }
    out
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_catalog(catalog: &Catalog) {
    for name in catalog.names(BackendKind::Processor) {
        println!("Processor: {name}");
    }
    for name in catalog.names(BackendKind::Device) {
        println!("Device: {name}");
    }
}

/// Builds the simulation described by `cli` and runs it until it faults.
///
/// Order follows the command line: addresses are parsed and images read before
/// any backend is resolved, so a bad argument never touches the catalog.
fn run(cli: &Cli, config: &Config) -> Result<FaultReport, SimError> {
    let mode = config.general.literal_mode;
    let image_address = parse_literal(&cli.image_address, mode).map_err(|source| {
        SimError::Parse {
            field: "image base address",
            literal: cli.image_address.clone(),
            source,
        }
    })?;
    let entry = parse_literal(&cli.start_address, mode).map_err(|source| SimError::Parse {
        field: "program entry address",
        literal: cli.start_address.clone(),
        source,
    })?;

    let images = ImageSet::read(&cli.memory_image, image_address, cli.bootrom.as_deref())?;

    let catalog = Catalog::with_builtins();
    if cli.verbose {
        print_catalog(&catalog);
    }

    let sink = if cli.log {
        DiagnosticSink::to_file(LOG_FILE_NAME)?
    } else {
        DiagnosticSink::new()
    };
    let request = SimulationRequest::new(
        config.system.processor.as_str(),
        config.system.devices.iter().map(String::as_str),
        entry,
    );
    let simulation = Simulation::assemble(&catalog, &request, sink)?;
    simulation.load(&images);

    let mut driver = ExecutionDriver::with_quantum(simulation, config.general.quantum.get());
    Ok(driver.run_until_fault())
}

fn main() {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            process::exit(0);
        }
        Err(_) => {
            let program = std::env::args().next().unwrap_or_else(|| "plugsim".to_string());
            let usage = SimError::Usage(format!(
                "Invalid number of parameters. Usage: {program} {USAGE}"
            ));
            eprintln!("{usage}");
            process::exit(SETUP_FAILURE_EXIT_CODE);
        }
    };

    if !cli.log {
        init_tracing();
    }

    let config = Config::default();
    match run(&cli, &config) {
        Ok(report) => {
            eprint!("{report}");
            process::exit(FAULT_EXIT_CODE);
        }
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(SETUP_FAILURE_EXIT_CODE);
        }
    }
}
