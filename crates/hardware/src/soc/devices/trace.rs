//! Trace toggle.
//!
//! A single write-only register: any write turns the CPU engine's instruction
//! trace on (non-zero) or off (zero). Reads return 0.

use tracing::debug;

use crate::soc::traits::{Device, DeviceContext};

/// Trace-toggle register.
#[derive(Debug)]
pub struct TracePort {
    base_addr: u32,
}

impl TracePort {
    /// Creates the register at `base_addr`.
    pub const fn new(base_addr: u32) -> Self {
        Self { base_addr }
    }
}

impl Device for TracePort {
    fn name(&self) -> &str {
        "TRACE"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, 1)
    }

    fn read_u8(&mut self, _offset: u32, _ctx: &mut DeviceContext<'_>) -> u8 {
        0
    }

    fn write_u8(&mut self, _offset: u32, val: u8, ctx: &mut DeviceContext<'_>) {
        debug!(val, "trace toggle written");
        ctx.engine.set_trace(val != 0);
    }
}
