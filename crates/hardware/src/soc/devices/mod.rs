//! Memory-Mapped IO Devices.
//!
//! This module contains the bank-0 devices of the machine: the serial console,
//! the trace toggle, the MMU register windows, the boot ROM and the unpaged
//! machine's exit trigger and reset-vector overlay.

/// Serial console backed by host stdio.
pub mod console;

/// Process-exit trigger.
pub mod exit;

/// MMU control-register and page-table windows.
pub mod mmu_ports;

/// Boot ROM and reset-vector overlays.
pub mod rom;

/// Instruction trace toggle.
pub mod trace;

pub use console::{Console, ConsoleRegisters};
pub use exit::ExitPort;
pub use mmu_ports::{MmuControlPort, PageTableWindow};
pub use rom::{ResetVector, Rom};
pub use trace::TracePort;

pub use crate::soc::traits::{Device, DeviceContext};
