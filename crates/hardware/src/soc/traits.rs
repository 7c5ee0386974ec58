//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bank-0 devices. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Byte read/write at device-relative offsets; the 65816 bus is 8 bits wide.
//! 3. **Context:** A `DeviceContext` lending the MMU, physical memory and CPU engine
//!    to the device for the duration of one access.

use std::fmt;

use crate::engine::CpuEngine;
use crate::mmu::Mmu;
use crate::soc::memory::PhysicalMemory;

/// State a device may touch while servicing an access.
pub struct DeviceContext<'a> {
    /// MMU control registers and page table.
    pub mmu: &'a mut Mmu,
    /// Physical memory, for devices that overlay RAM or ROM.
    pub memory: &'a mut PhysicalMemory,
    /// The CPU engine, for trace and exit requests.
    pub engine: &'a mut dyn CpuEngine,
}

impl fmt::Debug for DeviceContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceContext")
            .field("mmu", &self.mmu.control)
            .field("memory", &self.memory)
            .finish_non_exhaustive()
    }
}

/// Trait for memory-mapped devices attached to the bank-0 dispatcher.
pub trait Device: fmt::Debug + Send {
    /// Returns a short name for this device (e.g., `"CONSOLE"`, `"ROM"`).
    fn name(&self) -> &str;

    /// Returns (base_address, size_in_bytes) of the window this device decodes.
    ///
    /// Offsets passed to `read_u8`/`write_u8` are relative to the base.
    fn address_range(&self) -> (u32, u32);

    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u32, ctx: &mut DeviceContext<'_>) -> u8;

    /// Writes one byte at the given device-relative offset.
    fn write_u8(&mut self, offset: u32, val: u8, ctx: &mut DeviceContext<'_>);

    /// Returns the device-relative offset of `paddr` if this device claims it.
    ///
    /// Defaults to the whole of `address_range`. Devices with sparse registers
    /// narrow it.
    fn claims(&self, paddr: u32) -> Option<u32> {
        let (base, size) = self.address_range();
        (paddr >= base && paddr - base < size).then(|| paddr - base)
    }
}
