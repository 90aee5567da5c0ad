//! Global Platform Constants.
//!
//! This module defines the constants shared across the harness. It includes:
//! 1. **Memory Constants:** Page sizes, masks, and shifts for the sparse address space.
//! 2. **Boot Constants:** The fixed placement of the boot ROM image.
//! 3. **Scheduling Constants:** The default amount of work requested per run quantum.

use super::addr::Addr;

/// Page size in bytes (4KB).
pub const PAGE_SIZE: usize = 4096;

/// Number of bits to shift to convert between bytes and pages.
pub const PAGE_SHIFT: u32 = 12;

/// Mask for extracting the page offset from an address.
pub const PAGE_OFFSET_MASK: Addr = (PAGE_SIZE as Addr) - 1;

/// Address at which the optional boot ROM image is always placed.
///
/// The simulated platform starts its boot sequence from this address, so the
/// boot ROM never follows the caller-supplied image address.
pub const BOOT_ROM_BASE: Addr = 0x6000_0000;

/// Upper bound on execution units requested from the processor per `run` call.
pub const DEFAULT_QUANTUM: u32 = 1000;

/// Name of the diagnostic log file written when logging is redirected.
pub const LOG_FILE_NAME: &str = "plugsim.log";
