//! Exit trigger.
//!
//! A single register used by bare programs on the unpaged machine to end the
//! session: a write asks the CPU engine to terminate with the written value as
//! exit status. Reads see the RAM byte underneath (it doubles as the high byte
//! of the emulation-mode IRQ vector).

use tracing::info;

use crate::soc::traits::{Device, DeviceContext};

/// Exit-trigger register.
#[derive(Debug)]
pub struct ExitPort {
    base_addr: u32,
}

impl ExitPort {
    /// Creates the register at `base_addr`.
    pub const fn new(base_addr: u32) -> Self {
        Self { base_addr }
    }
}

impl Device for ExitPort {
    fn name(&self) -> &str {
        "EXIT"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 1)
    }

    fn read_u8(&mut self, _offset: u32, ctx: &mut DeviceContext<'_>) -> u8 {
        ctx.memory.read_u8(self.base_addr)
    }

    fn write_u8(&mut self, _offset: u32, val: u8, ctx: &mut DeviceContext<'_>) {
        info!(code = val, "exit requested");
        ctx.engine.exit(val);
    }
}
