//! Simulated address type.
//!
//! The simulated platform has a flat 32-bit physical address space. Addresses are
//! kept as a plain integer alias so that backends can do arithmetic on them freely;
//! the helpers here split an address into its page number and page offset for the
//! sparse [`AddressSpace`](crate::soc::memory::AddressSpace).

use super::constants::{PAGE_OFFSET_MASK, PAGE_SHIFT};

/// An address in the simulated address space.
pub type Addr = u32;

/// Highest addressable byte.
pub const ADDR_MAX: Addr = Addr::MAX;

/// Returns the page number containing `addr`.
#[inline(always)]
pub const fn page_number(addr: Addr) -> Addr {
    addr >> PAGE_SHIFT
}

/// Returns the byte offset of `addr` within its page.
#[inline(always)]
pub const fn page_offset(addr: Addr) -> usize {
    (addr & PAGE_OFFSET_MASK) as usize
}

/// Converts a register value into an address, if it fits the address width.
///
/// # Arguments
///
/// * `value` - Raw register value.
///
/// # Returns
///
/// `Some(addr)` when `value` is representable as an [`Addr`], otherwise `None`.
#[inline]
pub fn addr_from_register(value: u64) -> Option<Addr> {
    Addr::try_from(value).ok()
}
