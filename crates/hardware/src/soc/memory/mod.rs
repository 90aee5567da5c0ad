//! Simulated Address Space.
//!
//! This module implements the byte-addressable store shared by the processor and every
//! device. It provides:
//! 1. **Buffer:** Page-sized backing storage (`PageBuffer`).
//! 2. **AddressSpace:** A sparse map of pages covering the full 32-bit address range.
//!
//! The address space uses interior mutability so that backends holding a shared
//! handle can write to it. It is single-threaded by construction (`RefCell`); a
//! multi-threaded device model would have to wrap it in a lock.

/// Page-sized backing storage.
pub mod buffer;

use std::cell::RefCell;
use std::collections::HashMap;

use self::buffer::PageBuffer;
use crate::common::addr::{Addr, page_number, page_offset};

/// Byte-addressable memory spanning every [`Addr`].
///
/// Bytes that were never written read as zero. Pages are allocated lazily, so a
/// fresh address space costs nothing until an image is loaded into it.
#[derive(Debug, Default)]
pub struct AddressSpace {
    pages: RefCell<HashMap<Addr, PageBuffer>>,
}

impl AddressSpace {
    /// Creates an empty, zero-filled address space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads one byte.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to read.
    ///
    /// # Returns
    ///
    /// The stored byte, or zero if the containing page was never written.
    pub fn read_byte(&self, addr: Addr) -> u8 {
        self.pages
            .borrow()
            .get(&page_number(addr))
            .map_or(0, |page| page.read_u8(page_offset(addr)))
    }

    /// Writes one byte, allocating the containing page if needed.
    ///
    /// # Arguments
    ///
    /// * `addr` - Address to write.
    /// * `val` - Value to store.
    pub fn write_byte(&self, addr: Addr, val: u8) {
        self.pages
            .borrow_mut()
            .entry(page_number(addr))
            .or_default()
            .write_u8(page_offset(addr), val);
    }

    /// Writes a contiguous byte slice, one byte per address.
    ///
    /// Addresses past [`Addr::MAX`] wrap around to zero.
    ///
    /// # Arguments
    ///
    /// * `base` - Address of the first byte.
    /// * `data` - Bytes to write in order.
    pub fn write_bytes(&self, base: Addr, data: &[u8]) {
        let mut addr = base;
        for byte in data {
            self.write_byte(addr, *byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Reads `len` consecutive bytes starting at `base`, wrapping like [`Self::write_bytes`].
    pub fn read_bytes(&self, base: Addr, len: usize) -> Vec<u8> {
        let mut addr = base;
        let mut out = Vec::with_capacity(len);
        for _ in 0..len {
            out.push(self.read_byte(addr));
            addr = addr.wrapping_add(1);
        }
        out
    }

    /// Returns the number of pages that have been allocated by writes.
    pub fn resident_pages(&self) -> usize {
        self.pages.borrow().len()
    }
}
