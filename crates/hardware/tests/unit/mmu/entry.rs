//! # Page-Table Entry Tests

use mmu816_core::mmu::{PageTable, PageTableEntry};
use proptest::prelude::*;

#[test]
fn test_entry_fields() {
    let entry = PageTableEntry::new(0x123, true, false, true);
    assert_eq!(entry.frame(), 0x123);
    assert!(entry.present());
    assert!(!entry.writable());
    assert!(entry.user());
    assert_eq!(entry.bits(), 0x8000 | 0x2000 | 0x123);
}

#[test]
fn test_frame_is_truncated_to_eleven_bits() {
    let entry = PageTableEntry::new(0xFFFF, false, false, false);
    assert_eq!(entry.frame(), 0x7FF);
    assert!(!entry.present());
}

#[test]
fn test_empty_entry_is_not_present() {
    assert!(!PageTableEntry::EMPTY.present());
    assert_eq!(PageTableEntry::default(), PageTableEntry::EMPTY);
}

#[test]
fn test_table_bounds() {
    let mut table = PageTable::new(4);
    assert_eq!(table.len(), 4);
    assert!(table.get(4).is_err());

    table.set(9, PageTableEntry(0xFFFF));
    assert!(table.iter().all(|e| *e == PageTableEntry::EMPTY));
    assert_eq!(table.read_byte(8), 0);
}

proptest! {
    /// Writing low then high through the window reproduces the value; each
    /// write leaves the other half untouched.
    #[test]
    fn prop_window_bytes_round_trip(index in 0usize..1024, old in any::<u16>(), new in any::<u16>()) {
        let mut table = PageTable::new(1024);
        table.set(index, PageTableEntry(old));
        let offset = (index * 2) as u32;

        let [lo, hi] = new.to_le_bytes();
        table.write_byte(offset, lo);
        prop_assert_eq!(table.get(index).unwrap().high(), old.to_le_bytes()[1]);
        table.write_byte(offset + 1, hi);

        prop_assert_eq!(table.get(index).unwrap(), PageTableEntry(new));
        prop_assert_eq!(table.read_byte(offset), lo);
        prop_assert_eq!(table.read_byte(offset + 1), hi);
    }
}
