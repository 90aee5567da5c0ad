//! Error and Fault definitions.
//!
//! This module defines the error handling for the harness. It provides:
//! 1. **Setup Errors:** `SimError`, covering everything that can go wrong before execution starts.
//! 2. **Faults:** `Fault`, the unrecoverable condition a processor reports from a run quantum.
//! 3. **Register Errors:** `RegisterError`, raised by register-file accessors.
//! 4. **Literal Errors:** `LiteralError`, raised while parsing numeric command-line tokens.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::addr::Addr;
use crate::soc::traits::BackendKind;

/// Errors raised while configuring, assembling, or loading a simulation.
///
/// Every variant is fatal: the harness never retries, and the command-line driver
/// reports a single line and exits.
#[derive(Debug, Error)]
pub enum SimError {
    /// The command line does not have the expected shape.
    #[error("{0}")]
    Usage(String),

    /// A numeric command-line token could not be converted to an address.
    #[error("could not parse the {field} `{literal}`: {source}")]
    Parse {
        /// Human readable name of the value being parsed (e.g. "image base address").
        field: &'static str,
        /// The token as given.
        literal: String,
        /// Why the token was rejected.
        #[source]
        source: LiteralError,
    },

    /// A file could not be opened, read, or created.
    #[error("could not open the {what} '{}': {source}", .path.display())]
    Io {
        /// What the file was supposed to contain (e.g. "memory image").
        what: &'static str,
        /// Path that was accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The requested backend name is not registered for its kind.
    #[error("{kind} '{name}' not available")]
    BackendUnavailable {
        /// Catalog that was searched.
        kind: BackendKind,
        /// Name that was requested.
        name: String,
    },

    /// A catalog required by the simulation has no entries at all.
    #[error("no {0} backends are registered")]
    EmptyCatalog(BackendKind),

    /// A backend with the same kind and name was registered twice.
    #[error("{kind} '{name}' is already registered")]
    DuplicateBackend {
        /// Catalog the registration targeted.
        kind: BackendKind,
        /// Conflicting name.
        name: String,
    },

    /// A simulation was requested without any device.
    #[error("a simulation needs at least one device")]
    NoDevices,

    /// A register access made during setup was rejected by the backend.
    #[error(transparent)]
    Register(#[from] RegisterError),

    /// The configuration document could not be deserialized.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// An unrecoverable condition raised by a processor during a run quantum.
///
/// A fault ends the simulation: the driver stops issuing quanta and dumps the
/// register file as it was when the fault was returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The backend was run without being attached to a simulation, or the
    /// simulation it was attached to no longer exists.
    #[error("{backend} is not attached to an address space")]
    Detached {
        /// Name of the backend.
        backend: &'static str,
    },

    /// The program counter would have moved past the last address.
    #[error("program counter overflowed the address space at {pc:#x}")]
    AddressOverflow {
        /// Address of the last executed unit.
        pc: Addr,
    },

    /// Backend-specific fault (illegal instruction, bus error, ...).
    #[error("{backend}: {message}")]
    Backend {
        /// Name of the backend.
        backend: &'static str,
        /// Description of the fault.
        message: String,
    },
}

/// Errors raised by processor register accessors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The register name is not part of the backend's register file.
    #[error("{backend} has no register named '{register}'")]
    Unknown {
        /// Name of the backend.
        backend: &'static str,
        /// Requested register name.
        register: String,
    },

    /// The value does not fit the register.
    #[error("value {value:#x} does not fit register '{register}' of {backend}")]
    OutOfRange {
        /// Name of the backend.
        backend: &'static str,
        /// Register that was written.
        register: String,
        /// Rejected value.
        value: u64,
    },
}

/// Reasons a numeric literal is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// Nothing but whitespace was supplied.
    #[error("empty literal")]
    Empty,

    /// A character is not a digit of the literal's base.
    #[error("invalid digit '{digit}' at position {position}")]
    InvalidDigit {
        /// Offending character.
        digit: char,
        /// Byte position of the character within the token.
        position: usize,
    },

    /// The value does not fit the address width.
    #[error("value does not fit in {bits} bits", bits = Addr::BITS)]
    Overflow,
}
