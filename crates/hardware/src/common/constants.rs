//! Global System Constants.
//!
//! This module defines the fixed values of the reference machine. It includes:
//! 1. **Geometry:** Physical space size, page-table size and derived page size.
//! 2. **Address Map:** Device, ROM and page-table windows for the paged and unpaged profiles.
//! 3. **Opcodes:** The few 65816 opcodes the translator inspects on instruction fetch.
//! 4. **Page-Table Entry Layout:** Bit positions of the entry fields.

/// Size of the physical address space (16 MiB).
pub const MEMSIZE: u32 = 16 * 1024 * 1024;

/// Number of entries in the page table.
pub const MMU_ENTRIES: u32 = 1024;

/// Page size in bytes (16 KiB with the reference geometry).
pub const PAGE_SIZE: u32 = MEMSIZE / MMU_ENTRIES;

/// Size of bank 0, the only window the device dispatcher decodes.
pub const BANK0_SIZE: u32 = 0x1_0000;

/// Mask for the frame field of a page-table entry (bits 0-10).
pub const PTE_FRAME_MASK: u16 = 0x07FF;

/// Page-table entry: page is accessible from user mode.
pub const PTE_USER: u16 = 1 << 13;

/// Page-table entry: page accepts writes.
pub const PTE_WRITE: u16 = 1 << 14;

/// Page-table entry: mapping is valid.
pub const PTE_PRESENT: u16 = 1 << 15;

/// Start of the I/O hole in bank 0.
pub const IO_START: u32 = 0x00_C000;

/// Last address of the I/O hole in bank 0.
pub const IO_END: u32 = 0x00_EFFF;

/// Paged profile: console output register.
pub const CONSOLE_OUT: u32 = 0x00_C0D0;

/// Paged profile: console input-pending register.
pub const CONSOLE_STATUS: u32 = 0x00_C0D1;

/// Paged profile: console non-blocking input register.
pub const CONSOLE_IN: u32 = 0x00_C0D3;

/// Trace toggle register (both profiles).
pub const TRACE_TOGGLE: u32 = 0x00_CFFF;

/// Base of the four MMU control registers.
pub const MMU_CONTROL_BASE: u32 = 0x00_E000;

/// Number of MMU control registers.
pub const MMU_CONTROL_SIZE: u32 = 4;

/// Base of the page-table window.
pub const MMU_TABLE_BASE: u32 = 0x00_E800;

/// Base of the boot ROM.
pub const ROM_BASE: u32 = 0x00_F000;

/// Size of the boot ROM (4 KiB).
pub const ROM_SIZE: u32 = 0x1000;

/// Unpaged profile: console input-pending register.
pub const UNPAGED_CONSOLE_STATUS: u32 = 0x00_FFF8;

/// Unpaged profile: console output register.
pub const UNPAGED_CONSOLE_OUT: u32 = 0x00_FFF9;

/// Unpaged profile: process-exit trigger.
pub const UNPAGED_EXIT: u32 = 0x00_FFFF;

/// Emulation-mode reset vector.
pub const RESET_VECTOR: u32 = 0x00_FFFC;

/// Unpaged profile: reset vector reported by the ROM.
pub const UNPAGED_RESET_TARGET: u16 = 0x1000;

/// Paged profile: image load offset.
pub const PAGED_LOAD_OFFSET: u32 = 0x00_F000;

/// Unpaged profile: image load offset.
pub const UNPAGED_LOAD_OFFSET: u32 = 0x00_1000;

/// End (exclusive) of the image load window for both profiles.
pub const LOAD_LIMIT: u32 = 0x01_0000;

/// Return from interrupt.
pub const OP_RTI: u8 = 0x40;

/// Set interrupt disable.
pub const OP_SEI: u8 = 0x78;

/// Stop the clock.
pub const OP_STP: u8 = 0xDB;

/// Wait for interrupt.
pub const OP_WAI: u8 = 0xCB;

/// Exchange carry and emulation flags.
pub const OP_XCE: u8 = 0xFB;

/// No operation; replaces forbidden opcodes fetched in user mode.
pub const OP_NOP: u8 = 0xEA;

/// Opcodes user code may not fetch: they could seize interrupts, halt the
/// processor or change privilege-sensing state.
pub const USER_FORBIDDEN_OPCODES: [u8; 4] = [OP_SEI, OP_STP, OP_WAI, OP_XCE];
