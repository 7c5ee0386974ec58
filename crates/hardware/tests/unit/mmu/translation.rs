//! # Translation Tests
//!
//! Read/write translation and protection checks on a bare `Mmu`.

use mmu816_core::common::{PhysAddr, PrivilegeCause, VirtAddr};
use mmu816_core::mmu::{Mmu, PageTableEntry};
use mmu816_core::{AccessFlags, Fault};
use pretty_assertions::assert_eq;

fn mmu() -> Mmu {
    let mut mmu = Mmu::new(16 * 1024 * 1024, 1024);
    mmu.control.enabled = true;
    mmu
}

fn rw(frame: u16, user: bool) -> PageTableEntry {
    PageTableEntry::new(frame, true, true, user)
}

#[test]
fn test_read_maps_frame_and_offset() {
    let mut mmu = mmu();
    mmu.map(1, rw(0x40, false));

    let paddr = mmu
        .translate_read(VirtAddr::new(0x4123), AccessFlags::empty())
        .unwrap();
    assert_eq!(paddr, PhysAddr::new(0x40 * 0x4000 + 0x123));
}

#[test]
fn test_write_maps_frame_and_offset() {
    let mut mmu = mmu();
    mmu.map(2, rw(5, false));

    let paddr = mmu.translate_write(VirtAddr::new(0x8001)).unwrap();
    assert_eq!(paddr, PhysAddr::new(5 * 0x4000 + 1));
}

#[test]
fn test_read_not_present() {
    let mut mmu = mmu();
    mmu.map(1, PageTableEntry::new(1, false, true, true));

    let err = mmu
        .translate_read(VirtAddr::new(0x4000), AccessFlags::empty())
        .unwrap_err();
    assert_eq!(
        err,
        Fault::PageNotPresent {
            vaddr: 0x4000,
            index: 1
        }
    );
}

#[test]
fn test_write_read_only() {
    let mmu = mmu();
    // Entry 0 is EMPTY, hence not writable.
    let err = mmu.translate_write(VirtAddr::new(0x10)).unwrap_err();
    assert_eq!(
        err,
        Fault::ReadOnlyViolation {
            vaddr: 0x10,
            index: 0
        }
    );
}

#[test]
fn test_user_data_read_of_supervisor_page() {
    let mut mmu = mmu();
    mmu.map(0, rw(0, false));
    mmu.control.supervisor = false;

    let err = mmu
        .translate_read(VirtAddr::new(0x20), AccessFlags::empty())
        .unwrap_err();
    assert_eq!(
        err,
        Fault::PrivilegeViolation {
            vaddr: 0x20,
            cause: PrivilegeCause::DataRead
        }
    );
}

#[test]
fn test_user_fetch_from_supervisor_page() {
    let mut mmu = mmu();
    mmu.map(0, rw(0, false));
    mmu.control.supervisor = false;

    let err = mmu
        .translate_read(VirtAddr::new(0x20), AccessFlags::VPA)
        .unwrap_err();
    assert_eq!(
        err,
        Fault::PrivilegeViolation {
            vaddr: 0x20,
            cause: PrivilegeCause::Fetch
        }
    );
    assert!(!mmu.supervisor());
}

#[test]
fn test_user_write_to_supervisor_page() {
    let mut mmu = mmu();
    mmu.map(0, rw(0, false));
    mmu.control.supervisor = false;

    let err = mmu.translate_write(VirtAddr::new(0x20)).unwrap_err();
    assert_eq!(
        err,
        Fault::PrivilegeViolation {
            vaddr: 0x20,
            cause: PrivilegeCause::Write
        }
    );
}

#[test]
fn test_user_access_to_user_page() {
    let mut mmu = mmu();
    mmu.map(0, rw(7, true));
    mmu.control.supervisor = false;

    assert!(mmu.translate_read(VirtAddr::new(0x20), AccessFlags::empty()).is_ok());
    assert!(mmu.translate_write(VirtAddr::new(0x20)).is_ok());
}

#[test]
fn test_supervisor_may_touch_user_pages() {
    let mut mmu = mmu();
    mmu.map(0, rw(7, true));

    assert!(mmu.translate_read(VirtAddr::new(0x20), AccessFlags::empty()).is_ok());
    assert!(mmu.translate_write(VirtAddr::new(0x20)).is_ok());
    assert!(mmu.supervisor());
}

#[test]
fn test_frame_beyond_memory() {
    let mut mmu = mmu();
    mmu.map(0, rw(0x7FF, false));

    let err = mmu
        .translate_read(VirtAddr::new(0), AccessFlags::empty())
        .unwrap_err();
    assert_eq!(
        err,
        Fault::FrameOutOfRange {
            index: 0,
            frame: 0x7FF,
            frames: 1024
        }
    );
    assert!(mmu.translate_write(VirtAddr::new(0)).is_err());
}

#[test]
fn test_top_of_space_uses_last_entry() {
    let mut mmu = mmu();
    mmu.map(1023, rw(9, false));

    let paddr = mmu
        .translate_read(VirtAddr::new(0xFF_FFFF), AccessFlags::empty())
        .unwrap();
    assert_eq!(paddr, PhysAddr::new(9 * 0x4000 + 0x3FFF));
}
