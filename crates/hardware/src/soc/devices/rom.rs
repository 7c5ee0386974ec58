//! Boot ROM and reset-vector overlays.
//!
//! Both overlay physical memory: the bytes live in RAM (written by the image
//! loader), the device only changes what the bus sees.

use crate::soc::traits::{Device, DeviceContext};

/// Read-only window over physical memory. Writes are ignored.
#[derive(Debug)]
pub struct Rom {
    base_addr: u32,
    size: u32,
}

impl Rom {
    /// Creates a ROM window of `size` bytes at `base_addr`.
    pub const fn new(base_addr: u32, size: u32) -> Self {
        Self { base_addr, size }
    }
}

impl Device for Rom {
    fn name(&self) -> &str {
        "ROM"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.size)
    }

    fn read_u8(&mut self, offset: u32, ctx: &mut DeviceContext<'_>) -> u8 {
        ctx.memory.read_u8(self.base_addr + offset)
    }

    fn write_u8(&mut self, _offset: u32, _val: u8, _ctx: &mut DeviceContext<'_>) {}
}

/// Fixed two-byte vector reported in place of memory contents.
///
/// Writes land in the RAM underneath, where the bus never shows them.
#[derive(Debug)]
pub struct ResetVector {
    base_addr: u32,
    target: u16,
}

impl ResetVector {
    /// Reports `target` (little-endian) at `base_addr` and `base_addr + 1`.
    pub const fn new(base_addr: u32, target: u16) -> Self {
        Self { base_addr, target }
    }
}

impl Device for ResetVector {
    fn name(&self) -> &str {
        "RESET_VECTOR"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 2)
    }

    fn read_u8(&mut self, offset: u32, _ctx: &mut DeviceContext<'_>) -> u8 {
        self.target.to_le_bytes()[(offset & 1) as usize]
    }

    fn write_u8(&mut self, offset: u32, val: u8, ctx: &mut DeviceContext<'_>) {
        ctx.memory.write_u8(self.base_addr + offset, val);
    }
}
