//! Memory system construction and the bus façade.
//!
//! This module builds the complete memory subsystem from configuration. It performs:
//! 1. **Bus setup:** Allocates physical memory and the bank-0 dispatcher.
//! 2. **Device registration:** Console, trace toggle, exit trigger, reset vector,
//!    MMU windows and boot ROM, as the profile requires.
//! 3. **Access façade:** `read`/`write`, the only calls the CPU engine needs; they
//!    reduce the address, translate while the MMU is enabled, dispatch, and report
//!    faults to the engine's abort entry point.

use tracing::{error, warn};

use crate::common::constants::RESET_VECTOR;
use crate::common::{AccessFlags, ConfigError, Fault, PhysAddr, ReadResult, SystemError, VirtAddr};
use crate::config::Config;
use crate::engine::CpuEngine;
use crate::mmu::Mmu;
use crate::soc::devices::{
    Console, ExitPort, MmuControlPort, PageTableWindow, ResetVector, Rom,
    TracePort,
};
use crate::soc::interconnect::Bus;
use crate::soc::memory::PhysicalMemory;

/// The whole memory subsystem: MMU, bus, devices and physical memory.
///
/// One instance per emulated machine; nothing is process-global, so tests can
/// build as many as they like.
#[derive(Debug)]
pub struct MemorySystem {
    /// Address translator.
    mmu: Mmu,
    /// Physical dispatcher and memory.
    bus: Bus,
    config: Config,
}

impl MemorySystem {
    /// Builds a system whose console is attached to the host's stdio.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error, if any.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let console = Console::stdio(config.console_registers());
        Ok(Self::assemble(config, console))
    }

    /// Builds a system around a caller-supplied console.
    ///
    /// # Errors
    ///
    /// Returns the configuration's validation error, if any.
    pub fn with_console(config: &Config, console: Console) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, console))
    }

    fn assemble(config: &Config, console: Console) -> Self {
        let memory = PhysicalMemory::new(config.memory.mem_size);
        let d = &config.devices;
        let mut bus = Bus::new(memory, d.io_hole);

        bus.add_device(Box::new(console));
        if let Some(addr) = d.trace_toggle {
            bus.add_device(Box::new(TracePort::new(addr)));
        }
        if let Some(addr) = d.exit_trigger {
            bus.add_device(Box::new(ExitPort::new(addr)));
        }
        if let Some(target) = d.reset_vector {
            bus.add_device(Box::new(ResetVector::new(RESET_VECTOR, target)));
        }
        if config.translation {
            bus.add_device(Box::new(MmuControlPort::new(d.mmu_control)));
            bus.add_device(Box::new(PageTableWindow::new(
                d.mmu_table,
                config.memory.mmu_entries,
            )));
        }
        if let Some((base, size)) = d.rom {
            bus.add_device(Box::new(Rom::new(base, size)));
        }

        Self {
            mmu: Mmu::new(config.memory.mem_size, config.memory.mmu_entries),
            bus,
            config: config.clone(),
        }
    }

    /// Configuration the system was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Address translator.
    pub const fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    /// Mutable address translator, for setting up mappings directly.
    pub const fn mmu_mut(&mut self) -> &mut Mmu {
        &mut self.mmu
    }

    /// Physical bus.
    pub const fn bus(&self) -> &Bus {
        &self.bus
    }

    /// Mutable physical bus.
    pub const fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    /// True if accesses currently go through the translator.
    pub const fn translating(&self) -> bool {
        self.config.translation && self.mmu.enabled()
    }

    /// Reads one byte on behalf of the CPU engine.
    ///
    /// The address is reduced modulo the memory size. While translating, the
    /// MMU maps and checks it and may change mode; otherwise it is used as a
    /// physical address. A fault is reported through [`CpuEngine::abort`]
    /// before returning; the returned value is then 0, or NOP for a forbidden
    /// opcode fetched in user mode.
    pub fn read(
        &mut self,
        engine: &mut dyn CpuEngine,
        vaddr: impl Into<VirtAddr>,
        flags: AccessFlags,
    ) -> ReadResult {
        let vaddr = vaddr.into().wrap(self.config.memory.mem_size);

        let result = if self.translating() {
            match self.mmu.translate_read(vaddr, flags) {
                Ok(paddr) => {
                    let value = self.bus.read_u8(paddr, &mut self.mmu, engine);
                    self.mmu.post_fetch(vaddr, value, flags)
                }
                Err(fault) => ReadResult::fault(0, fault),
            }
        } else {
            ReadResult::ok(self.bus.read_u8(vaddr.into(), &mut self.mmu, engine))
        };

        if let Some(fault) = &result.fault {
            warn!(%fault, flags = ?flags, "read fault");
            engine.abort(fault);
        }
        result
    }

    /// Writes one byte on behalf of the CPU engine.
    ///
    /// # Errors
    ///
    /// Returns the fault raised by the translator, after reporting it through
    /// [`CpuEngine::abort`]. A faulting write never reaches memory or devices.
    pub fn write(
        &mut self,
        engine: &mut dyn CpuEngine,
        vaddr: impl Into<VirtAddr>,
        val: u8,
    ) -> Result<(), Fault> {
        let vaddr = vaddr.into().wrap(self.config.memory.mem_size);

        let paddr = if self.translating() {
            match self.mmu.translate_write(vaddr) {
                Ok(paddr) => paddr,
                Err(fault) => {
                    warn!(%fault, "write fault");
                    engine.abort(&fault);
                    return Err(fault);
                }
            }
        } else {
            vaddr.into()
        };

        self.bus.write_u8(paddr, val, &mut self.mmu, engine);
        Ok(())
    }

    /// Reads raw physical memory, bypassing the MMU and every device.
    pub fn peek(&self, paddr: impl Into<PhysAddr>) -> u8 {
        let paddr = paddr.into().val() % self.config.memory.mem_size;
        self.bus.memory().read_u8(paddr)
    }

    /// Raw physical bytes of a diagnostic window, paired with their addresses.
    pub fn dump_window(&self, base: u32, len: u32) -> Vec<(PhysAddr, u8)> {
        let base = base % self.config.memory.mem_size;
        self.bus
            .memory()
            .slice(base, len)
            .iter()
            .zip(base..)
            .map(|(&byte, addr)| (PhysAddr::new(addr), byte))
            .collect()
    }

    /// Entry for the engine's WDM special-opcode trap. No WDM signatures are
    /// defined, so every one is fatal.
    ///
    /// # Errors
    ///
    /// Always returns [`SystemError::UnhandledWdm`].
    pub fn handle_wdm(&self, opcode: u8) -> Result<(), SystemError> {
        error!("unhandled WDM opcode {opcode:#04x}");
        Err(SystemError::UnhandledWdm { opcode })
    }
}
