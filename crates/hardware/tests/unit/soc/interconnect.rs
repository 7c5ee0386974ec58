//! # Dispatcher Tests
//!
//! This module tests physical-address routing: device priority, the bank-0
//! decode limit, the I/O hole and the device maps of both profiles.

use crate::common::{RecordingEngine, ScratchDevice, TestSystem};
use mmu816_core::common::PhysAddr;
use mmu816_core::common::constants::{CONSOLE_OUT, IO_START};
use mmu816_core::mmu::Mmu;
use mmu816_core::soc::interconnect::Bus;
use mmu816_core::soc::memory::PhysicalMemory;
use pretty_assertions::assert_eq;
use rstest::rstest;

struct Rig {
    bus: Bus,
    mmu: Mmu,
    engine: RecordingEngine,
}

impl Rig {
    fn new(io_hole: Option<(u32, u32)>) -> Self {
        Self {
            bus: Bus::new(PhysicalMemory::new(0x2_0000), io_hole),
            mmu: Mmu::new(0x2_0000, 8),
            engine: RecordingEngine::default(),
        }
    }

    fn read(&mut self, addr: u32) -> u8 {
        self.bus.read_u8(PhysAddr::new(addr), &mut self.mmu, &mut self.engine)
    }

    fn write(&mut self, addr: u32, val: u8) {
        self.bus
            .write_u8(PhysAddr::new(addr), val, &mut self.mmu, &mut self.engine);
    }
}

#[test]
fn test_unclaimed_addresses_are_ram() {
    let mut rig = Rig::new(None);
    rig.write(0x1234, 0x99);
    assert_eq!(rig.read(0x1234), 0x99);
    assert_eq!(rig.bus.memory().read_u8(0x1234), 0x99);
}

#[test]
fn test_device_claims_its_window() {
    let mut rig = Rig::new(None);
    rig.bus.add_device(Box::new(ScratchDevice::new("A", 0x8000, 0x10, 0xAA)));

    assert_eq!(rig.read(0x8000), 0xAA);
    assert_eq!(rig.read(0x800F), 0xAA);
    assert_eq!(rig.read(0x8010), 0x00);

    rig.write(0x8001, 0x11);
    assert_eq!(rig.read(0x8001), 0x11);
    assert_eq!(rig.bus.memory().read_u8(0x8001), 0);
}

#[test]
fn test_earlier_device_wins_on_overlap() {
    let mut rig = Rig::new(None);
    rig.bus.add_device(Box::new(ScratchDevice::new("FIRST", 0x8000, 0x10, 0x01)));
    rig.bus.add_device(Box::new(ScratchDevice::new("SECOND", 0x8008, 0x10, 0x02)));

    // A hit on the second device must not change who wins the overlap.
    assert_eq!(rig.read(0x8017), 0x02);
    assert_eq!(rig.read(0x8008), 0x01);
    assert_eq!(rig.read(0x8010), 0x02);
    assert_eq!(rig.bus.device_names(), vec!["FIRST", "SECOND"]);
}

#[test]
fn test_nothing_is_decoded_above_bank0() {
    let mut rig = Rig::new(Some((0x8000, 0x8FFF)));
    rig.bus.add_device(Box::new(ScratchDevice::new("A", 0x8000, 0x10, 0xAA)));

    rig.write(0x1_8000, 0x42);
    assert_eq!(rig.read(0x1_8000), 0x42);
    assert_eq!(rig.read(0x1_8001), 0x00);
}

#[test]
fn test_io_hole_reads_zero_and_drops_writes() {
    let mut rig = Rig::new(Some((0xC000, 0xEFFF)));
    rig.bus.memory_mut().write_u8(0xC100, 0x5A);

    assert_eq!(rig.read(0xC100), 0);
    rig.write(0xC100, 0x11);
    assert_eq!(rig.bus.memory().read_u8(0xC100), 0x5A);

    rig.write(0xBFFF, 0x22);
    rig.write(0xF000, 0x33);
    assert_eq!(rig.read(0xBFFF), 0x22);
    assert_eq!(rig.read(0xF000), 0x33);
}

#[test]
fn test_device_inside_io_hole_is_reachable() {
    let mut rig = Rig::new(Some((0xC000, 0xEFFF)));
    rig.bus.add_device(Box::new(ScratchDevice::new("A", 0xC0D0, 4, 0x7E)));
    assert_eq!(rig.read(0xC0D2), 0x7E);
    assert_eq!(rig.read(0xC0D4), 0x00);
}

#[test]
fn test_paged_device_map() {
    let t = TestSystem::paged();
    assert_eq!(
        t.system.bus().device_names(),
        vec!["CONSOLE", "TRACE", "MMU_CTRL", "MMU_TABLE", "ROM"]
    );
}

#[test]
fn test_unpaged_device_map() {
    let t = TestSystem::unpaged();
    assert_eq!(
        t.system.bus().device_names(),
        vec!["CONSOLE", "TRACE", "EXIT", "RESET_VECTOR"]
    );
}

#[rstest]
#[case(IO_START)]
#[case(0xC0D2)]
#[case(0xD000)]
#[case(0xDFFF)]
fn test_paged_io_hole(#[case] addr: u32) {
    let mut t = TestSystem::paged();
    t.poke(addr, 0x66);
    assert_eq!(t.read(addr).value, 0);
    t.write(addr, 0x11).unwrap();
    assert_eq!(t.system.peek(addr), 0x66);
}

#[test]
fn test_unpaged_has_no_mmu_windows() {
    let mut t = TestSystem::unpaged();
    t.write(0xE000, 1).unwrap();
    assert!(!t.system.mmu().enabled());
    assert!(!t.system.translating());
}

#[test]
fn test_device_alias_above_bank0_is_ram() {
    let mut t = TestSystem::paged();
    t.write(0x01_0000 + CONSOLE_OUT, b'x').unwrap();
    assert!(t.output.contents().is_empty());
    assert_eq!(t.system.peek(0x01_0000 + CONSOLE_OUT), b'x');
}
