//! # Bank-0 Device Tests
//!
//! This module tests the trace toggle, MMU windows, boot ROM, exit trigger and
//! reset-vector overlay, both standalone and as seen through the bus.

use crate::common::{DeviceParts, TestSystem};
use mmu816_core::common::constants::{
    MMU_CONTROL_BASE, MMU_TABLE_BASE, RESET_VECTOR, ROM_BASE, TRACE_TOGGLE, UNPAGED_EXIT,
};
use mmu816_core::mmu::PageTableEntry;
use mmu816_core::mmu::control::reg;
use mmu816_core::sim::loader;
use mmu816_core::soc::devices::{
    Device, ExitPort, MmuControlPort, PageTableWindow, ResetVector, Rom, TracePort,
};
use proptest::prelude::*;

// ══════════════════════════════════════════════════════════
// Trace toggle
// ══════════════════════════════════════════════════════════

#[test]
fn test_trace_forwards_to_engine() {
    let mut t = TestSystem::paged();
    t.write(TRACE_TOGGLE, 1).unwrap();
    t.write(TRACE_TOGGLE, 0).unwrap();
    t.write(TRACE_TOGGLE, 0x80).unwrap();
    assert_eq!(t.engine.trace, vec![true, false, true]);
}

#[test]
fn test_trace_read_is_zero_and_silent() {
    let mut parts = DeviceParts::new();
    let mut port = TracePort::new(0xCFFF);
    assert_eq!(port.address_range(), (0xCFFF, 1));
    assert_eq!(port.read_u8(0, &mut parts.ctx()), 0);
    assert!(parts.engine.trace.is_empty());
}

// ══════════════════════════════════════════════════════════
// MMU windows
// ══════════════════════════════════════════════════════════

#[test]
fn test_control_port_routes_to_mmu() {
    let mut parts = DeviceParts::new();
    let mut port = MmuControlPort::new(0xE000);

    port.write_u8(reg::SHADOW_UPPER_BANK0, 1, &mut parts.ctx());
    assert!(parts.mmu.control.shadow_upper_bank0);
    assert_eq!(port.read_u8(reg::SUPERVISOR, &mut parts.ctx()), 1);
    assert_eq!(port.address_range(), (0xE000, 4));
}

#[test]
fn test_control_registers_through_bus() {
    let mut t = TestSystem::paged();
    assert_eq!(t.read(MMU_CONTROL_BASE + reg::ENABLE).value, 0);
    assert_eq!(t.read(MMU_CONTROL_BASE + reg::SUPERVISOR).value, 1);

    t.write(MMU_CONTROL_BASE + reg::RTI_TO_USER, 3).unwrap();
    assert!(t.system.mmu().control.rti_to_user);
    assert_eq!(t.read(MMU_CONTROL_BASE + reg::RTI_TO_USER).value, 1);

    t.write(MMU_CONTROL_BASE + reg::ENABLE, 1).unwrap();
    assert!(t.system.translating());
}

#[test]
fn test_table_window_size() {
    let window = PageTableWindow::new(0xE800, 1024);
    assert_eq!(window.address_range(), (0xE800, 0x800));
}

#[test]
fn test_table_window_through_bus() {
    let mut t = TestSystem::paged();
    let entry = PageTableEntry::new(0x155, true, false, true);
    t.write(MMU_TABLE_BASE + 10, entry.low()).unwrap();
    t.write(MMU_TABLE_BASE + 11, entry.high()).unwrap();

    assert_eq!(t.system.mmu().table().get(5).unwrap(), entry);
    assert_eq!(t.read(MMU_TABLE_BASE + 10).value, entry.low());
    assert_eq!(t.read(MMU_TABLE_BASE + 11).value, entry.high());
    // The window is not backed by RAM.
    assert_eq!(t.system.peek(MMU_TABLE_BASE + 10), 0);
}

#[test]
fn test_table_window_covers_last_entry() {
    let mut t = TestSystem::paged();
    t.write(MMU_TABLE_BASE + 0x7FE, 0x34).unwrap();
    t.write(MMU_TABLE_BASE + 0x7FF, 0x92).unwrap();
    assert_eq!(t.system.mmu().table().get(1023).unwrap(), PageTableEntry(0x9234));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_partial_update_keeps_other_half(index in 0u32..1024, old in any::<u16>(), lo in any::<u8>()) {
        let mut t = TestSystem::paged();
        t.map(index as usize, PageTableEntry(old));

        t.write(MMU_TABLE_BASE + index * 2, lo).unwrap();
        let entry = t.system.mmu().table().get(index as usize).unwrap();
        prop_assert_eq!(entry.low(), lo);
        prop_assert_eq!(entry.high(), old.to_le_bytes()[1]);
    }
}

// ══════════════════════════════════════════════════════════
// Boot ROM
// ══════════════════════════════════════════════════════════

#[test]
fn test_rom_reads_memory_and_ignores_writes() {
    let mut parts = DeviceParts::new();
    parts.memory.write_u8(0xF010, 0xA9);
    let mut rom = Rom::new(0xF000, 0x1000);

    assert_eq!(rom.read_u8(0x10, &mut parts.ctx()), 0xA9);
    rom.write_u8(0x10, 0x00, &mut parts.ctx());
    assert_eq!(parts.memory.read_u8(0xF010), 0xA9);
}

#[test]
fn test_rom_write_through_bus_is_noop() {
    let mut t = TestSystem::paged();
    let _ = loader::load_bytes(&mut t.system, &[0x18, 0xFB, 0x5C]);

    t.write(ROM_BASE + 1, 0xEA).unwrap();
    assert_eq!(t.read(ROM_BASE + 1).value, 0xFB);
    assert!(t.engine.aborts.is_empty());
}

// ══════════════════════════════════════════════════════════
// Unpaged exit trigger and reset vector
// ══════════════════════════════════════════════════════════

#[test]
fn test_exit_trigger() {
    let mut t = TestSystem::unpaged();
    assert_eq!(t.engine.exit, None);
    t.write(UNPAGED_EXIT, 3).unwrap();
    assert_eq!(t.engine.exit, Some(3));
}

#[test]
fn test_exit_read_returns_memory() {
    let mut parts = DeviceParts::new();
    parts.memory.write_u8(0xFFFF, 0x77);
    let mut port = ExitPort::new(0xFFFF);
    assert_eq!(port.read_u8(0, &mut parts.ctx()), 0x77);
    assert_eq!(parts.engine.exit, None);
}

#[test]
fn test_reset_vector_overrides_image() {
    let mut t = TestSystem::unpaged();
    t.poke(RESET_VECTOR, 0xAA);
    t.poke(RESET_VECTOR + 1, 0xBB);

    assert_eq!(t.pull(RESET_VECTOR).value, 0x00);
    assert_eq!(t.pull(RESET_VECTOR + 1).value, 0x10);
    // Neighbouring vectors come from memory.
    t.poke(0xFFFA, 0x12);
    assert_eq!(t.pull(0xFFFA).value, 0x12);
}

#[test]
fn test_reset_vector_writes_land_in_ram() {
    let mut parts = DeviceParts::new();
    let mut vector = ResetVector::new(0xFFFC, 0x1000);

    vector.write_u8(1, 0x55, &mut parts.ctx());
    assert_eq!(parts.memory.read_u8(0xFFFD), 0x55);
    assert_eq!(vector.read_u8(1, &mut parts.ctx()), 0x10);
}
