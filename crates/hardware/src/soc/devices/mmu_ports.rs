//! MMU register windows.
//!
//! The MMU owns its state; these devices only route bus accesses to it through
//! the [`DeviceContext`]. Two windows:
//! * control: four registers (enable, supervisor, shadow, RTI-to-user).
//! * page table: two bytes per entry, little-endian.

use tracing::debug;

use crate::common::constants::MMU_CONTROL_SIZE;
use crate::soc::traits::{Device, DeviceContext};

/// MMU control-register window.
#[derive(Debug)]
pub struct MmuControlPort {
    base_addr: u32,
}

impl MmuControlPort {
    /// Creates the window at `base_addr`.
    pub const fn new(base_addr: u32) -> Self {
        Self { base_addr }
    }
}

impl Device for MmuControlPort {
    fn name(&self) -> &str {
        "MMU_CTRL"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, MMU_CONTROL_SIZE)
    }

    fn read_u8(&mut self, offset: u32, ctx: &mut DeviceContext<'_>) -> u8 {
        ctx.mmu.control.read(offset)
    }

    fn write_u8(&mut self, offset: u32, val: u8, ctx: &mut DeviceContext<'_>) {
        ctx.mmu.control.write(offset, val);
        debug!(offset, val, control = ?ctx.mmu.control, "mmu control write");
    }
}

/// Page-table window.
#[derive(Debug)]
pub struct PageTableWindow {
    base_addr: u32,
    size: u32,
}

impl PageTableWindow {
    /// Creates the window at `base_addr` for a table of `entries` entries.
    pub const fn new(base_addr: u32, entries: u32) -> Self {
        Self {
            base_addr,
            size: entries * 2,
        }
    }
}

impl Device for PageTableWindow {
    fn name(&self) -> &str {
        "MMU_TABLE"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.size)
    }

    fn read_u8(&mut self, offset: u32, ctx: &mut DeviceContext<'_>) -> u8 {
        ctx.mmu.table().read_byte(offset)
    }

    fn write_u8(&mut self, offset: u32, val: u8, ctx: &mut DeviceContext<'_>) {
        ctx.mmu.table_mut().write_byte(offset, val);
    }
}
