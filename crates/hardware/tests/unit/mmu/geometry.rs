//! # Page Geometry Tests
//!
//! The page index uses exactly log2(entries) bits of the page number.

use mmu816_core::common::VirtAddr;
use mmu816_core::mmu::PageGeometry;
use proptest::prelude::*;
use rstest::rstest;

fn reference() -> PageGeometry {
    PageGeometry::new(16 * 1024 * 1024, 1024)
}

#[test]
fn test_reference_geometry() {
    let geo = reference();
    assert_eq!(geo.page_size(), 0x4000);
    assert_eq!(geo.entries(), 1024);
    assert_eq!(geo.upper_bank0_page(), 3);
    assert_eq!(geo.shadow_entry(), 1023);
}

#[rstest]
#[case(0x00_0000, 0, 0x0000)]
#[case(0x00_3FFF, 0, 0x3FFF)]
#[case(0x00_4000, 1, 0x0000)]
#[case(0x00_FFFC, 3, 0x3FFC)]
#[case(0xFF_FFFF, 1023, 0x3FFF)]
fn test_index_and_offset(#[case] vaddr: u32, #[case] index: usize, #[case] offset: u32) {
    let geo = reference();
    assert_eq!(geo.index(VirtAddr::new(vaddr)), index);
    assert_eq!(geo.offset(VirtAddr::new(vaddr)), offset);
}

#[test]
fn test_index_never_uses_an_extra_bit() {
    // One bit above the table: must alias page 0, not index entry 1024.
    let geo = reference();
    assert_eq!(geo.index(VirtAddr::new(0x0100_0000)), 0);
}

#[test]
fn test_smaller_geometry() {
    let geo = PageGeometry::new(0x2_0000, 8);
    assert_eq!(geo.page_size(), 0x4000);
    assert_eq!(geo.upper_bank0_page(), 3);
    assert_eq!(geo.shadow_entry(), 7);
}

proptest! {
    #[test]
    fn prop_index_is_in_bounds(vaddr in any::<u32>()) {
        let geo = reference();
        prop_assert!(geo.index(VirtAddr::new(vaddr)) < 1024);
        prop_assert!(geo.offset(VirtAddr::new(vaddr)) < geo.page_size());
    }
}
