//! System interconnect (bus) for memory and MMIO access.
//!
//! This module implements the physical-address dispatcher. It provides:
//! 1. **Device registration:** Devices are added in priority order; the first match wins.
//! 2. **Access routing:** Only bank 0 is decoded; above it every address is plain RAM.
//! 3. **I/O hole:** Bank-0 addresses reserved for I/O but claimed by no device read 0
//!    and drop writes.
//! 4. **Load and peek:** Side-effect-free access to physical memory for the loader and
//!    diagnostics.

use crate::common::PhysAddr;
use crate::common::constants::BANK0_SIZE;
use crate::engine::CpuEngine;
use crate::mmu::Mmu;
use crate::soc::memory::PhysicalMemory;
use crate::soc::traits::{Device, DeviceContext};

/// Physical bus: RAM plus the bank-0 device map.
#[derive(Debug)]
pub struct Bus {
    memory: PhysicalMemory,
    /// Registered devices, in lookup priority order.
    devices: Vec<Box<dyn Device>>,
    io_hole: Option<(u32, u32)>,
}

impl Bus {
    /// Creates a bus over `memory` with no devices.
    ///
    /// # Arguments
    ///
    /// * `memory` - Physical memory backing every unclaimed address.
    /// * `io_hole` - Optional (first, last) bank-0 range reserved for I/O.
    pub fn new(memory: PhysicalMemory, io_hole: Option<(u32, u32)>) -> Self {
        Self {
            memory,
            devices: Vec::new(),
            io_hole,
        }
    }

    /// Registers a device. Devices registered earlier take precedence where
    /// windows overlap.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
    }

    /// Names of the registered devices, in priority order.
    pub fn device_names(&self) -> Vec<&str> {
        self.devices.iter().map(|d| d.name()).collect()
    }

    /// Physical memory.
    pub const fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    /// Mutable physical memory, bypassing every device.
    pub const fn memory_mut(&mut self) -> &mut PhysicalMemory {
        &mut self.memory
    }

    fn in_io_hole(&self, paddr: u32) -> bool {
        self.io_hole
            .is_some_and(|(first, last)| paddr >= first && paddr <= last)
    }

    fn find_device(&self, paddr: u32) -> Option<(usize, u32)> {
        if paddr >= BANK0_SIZE {
            return None;
        }
        self.devices
            .iter()
            .enumerate()
            .find_map(|(i, d)| d.claims(paddr).map(|offset| (i, offset)))
    }

    /// Reads one byte at the given physical address.
    pub fn read_u8(&mut self, paddr: PhysAddr, mmu: &mut Mmu, engine: &mut dyn CpuEngine) -> u8 {
        let paddr = paddr.val();
        if let Some((idx, offset)) = self.find_device(paddr) {
            let mut ctx = DeviceContext {
                mmu,
                memory: &mut self.memory,
                engine,
            };
            return self.devices[idx].read_u8(offset, &mut ctx);
        }
        if self.in_io_hole(paddr) {
            return 0;
        }
        self.memory.read_u8(paddr)
    }

    /// Writes one byte at the given physical address.
    pub fn write_u8(&mut self, paddr: PhysAddr, val: u8, mmu: &mut Mmu, engine: &mut dyn CpuEngine) {
        let paddr = paddr.val();
        if let Some((idx, offset)) = self.find_device(paddr) {
            let mut ctx = DeviceContext {
                mmu,
                memory: &mut self.memory,
                engine,
            };
            self.devices[idx].write_u8(offset, val, &mut ctx);
            return;
        }
        if self.in_io_hole(paddr) {
            return;
        }
        self.memory.write_u8(paddr, val);
    }
}
