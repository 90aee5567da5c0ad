//! # Address Space Tests

use plugsim_core::common::PAGE_SIZE;
use plugsim_core::soc::memory::AddressSpace;
use plugsim_core::soc::memory::buffer::PageBuffer;
use proptest::prelude::*;

#[test]
fn unwritten_bytes_read_as_zero() {
    let memory = AddressSpace::new();
    assert_eq!(memory.read_byte(0), 0);
    assert_eq!(memory.read_byte(0xffff_ffff), 0);
    assert_eq!(memory.read_bytes(0x8000_0000, 4), vec![0; 4]);
    assert_eq!(memory.resident_pages(), 0);
}

#[test]
fn writes_allocate_pages_lazily() {
    let memory = AddressSpace::new();
    memory.write_byte(0x1234, 0x5a);
    assert_eq!(memory.read_byte(0x1234), 0x5a);
    assert_eq!(memory.read_byte(0x1235), 0);
    assert_eq!(memory.resident_pages(), 1);

    memory.write_byte(0x1fff, 1);
    assert_eq!(memory.resident_pages(), 1);
    memory.write_byte(0x6000_0000, 1);
    assert_eq!(memory.resident_pages(), 2);
}

#[test]
fn slices_cross_page_boundaries() {
    let memory = AddressSpace::new();
    memory.write_bytes(0x0ffe, &[1, 2, 3, 4]);
    assert_eq!(memory.read_bytes(0x0ffe, 4), vec![1, 2, 3, 4]);
    assert_eq!(memory.resident_pages(), 2);
}

#[test]
fn later_writes_win() {
    let memory = AddressSpace::new();
    memory.write_bytes(0x100, &[1, 1, 1, 1]);
    memory.write_bytes(0x102, &[9, 9]);
    assert_eq!(memory.read_bytes(0x100, 4), vec![1, 1, 9, 9]);
}

#[test]
fn page_buffer_is_zeroed() {
    let mut page = PageBuffer::new();
    assert_eq!(page.len(), PAGE_SIZE);
    assert!(!page.is_empty());
    assert!(page.as_slice().iter().all(|&b| b == 0));
    page.write_u8(PAGE_SIZE - 1, 0xff);
    assert_eq!(page.read_u8(PAGE_SIZE - 1), 0xff);
}

proptest! {
    #[test]
    fn written_bytes_read_back(base in any::<u32>(), data in prop::collection::vec(any::<u8>(), 0..64)) {
        let memory = AddressSpace::new();
        memory.write_bytes(base, &data);
        prop_assert_eq!(memory.read_bytes(base, data.len()), data);
    }
}
