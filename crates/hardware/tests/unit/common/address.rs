//! # Address Type Tests

use mmu816_core::common::constants::MEMSIZE;
use mmu816_core::common::{PhysAddr, VirtAddr};

#[test]
fn test_wrap_reduces_modulo_memory_size() {
    assert_eq!(VirtAddr::new(MEMSIZE + 0x10).wrap(MEMSIZE), VirtAddr::new(0x10));
    assert_eq!(VirtAddr::new(MEMSIZE - 1).wrap(MEMSIZE).val(), MEMSIZE - 1);
    assert_eq!(VirtAddr::new(0x1234).wrap(0x1000).val(), 0x234);
}

#[test]
fn test_identity_conversion() {
    let paddr: PhysAddr = VirtAddr::new(0x00_C0D0).into();
    assert_eq!(paddr, PhysAddr::new(0xC0D0));
    assert_eq!(paddr.val(), 0xC0D0);
}

#[test]
fn test_from_raw() {
    assert_eq!(VirtAddr::from(0xFFFCu32).val(), 0xFFFC);
    assert_eq!(PhysAddr::from(0x2_0000u32).val(), 0x2_0000);
}
