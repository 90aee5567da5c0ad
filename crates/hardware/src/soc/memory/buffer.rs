//! Page Buffer Implementation.
//!
//! Backing storage for one page of the sparse address space. Pages are allocated
//! zero-filled on first write and never freed while the simulation lives.

use crate::common::PAGE_SIZE;

/// A single zero-initialized page of simulated memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageBuffer {
    data: Box<[u8; PAGE_SIZE]>,
}

impl PageBuffer {
    /// Creates a new zero-filled page.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; PAGE_SIZE]),
        }
    }

    /// Returns the size of the page in bytes.
    pub const fn len(&self) -> usize {
        PAGE_SIZE
    }

    /// Pages are never empty; provided for API symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Reads a single byte.
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset within the page; must be less than [`PAGE_SIZE`].
    pub fn read_u8(&self, offset: usize) -> u8 {
        self.data[offset]
    }

    /// Writes a single byte.
    ///
    /// # Arguments
    ///
    /// * `offset` - Byte offset within the page; must be less than [`PAGE_SIZE`].
    /// * `val` - Value to store.
    pub fn write_u8(&mut self, offset: usize, val: u8) {
        self.data[offset] = val;
    }

    /// Returns the whole page as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for PageBuffer {
    fn default() -> Self {
        Self::new()
    }
}
