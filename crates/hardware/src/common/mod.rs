//! Common utilities and types used throughout the simulator harness.
//!
//! This module provides the building blocks shared by every other module. It includes:
//! 1. **Address Types:** The simulated address type and page helpers.
//! 2. **Constants:** Page geometry, boot ROM placement, and scheduling defaults.
//! 3. **Error Handling:** Setup errors, execution faults, register and literal errors.

/// Address type definitions.
pub mod addr;

/// Common constants used throughout the harness.
pub mod constants;

/// Error and fault types.
pub mod error;

pub use addr::{ADDR_MAX, Addr};
pub use constants::{BOOT_ROM_BASE, DEFAULT_QUANTUM, LOG_FILE_NAME, PAGE_SIZE};
pub use error::{Fault, LiteralError, RegisterError, SimError};
