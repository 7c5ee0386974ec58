//! MMU control state.
//!
//! Four independent booleans, each exposed as one register in the control
//! window. Reads return 0/1; writes take bit 0.

/// Register offsets within the control window.
pub mod reg {
    /// Translation enable.
    pub const ENABLE: u32 = 0;
    /// Supervisor mode.
    pub const SUPERVISOR: u32 = 1;
    /// Shadow the upper bank-0 page on privileged fetches.
    pub const SHADOW_UPPER_BANK0: u32 = 2;
    /// Drop to user mode on the next supervisor RTI fetch.
    pub const RTI_TO_USER: u32 = 3;
}

/// The MMU's mode and feature switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MmuControl {
    /// Translation and protection are active.
    pub enabled: bool,
    /// Current privilege level is supervisor.
    pub supervisor: bool,
    /// Redirect privileged fetches from the upper bank-0 page to the last entry.
    pub shadow_upper_bank0: bool,
    /// A supervisor RTI fetch demotes to user mode.
    pub rti_to_user: bool,
}

impl Default for MmuControl {
    /// Power-on state: translation off, supervisor mode.
    fn default() -> Self {
        Self {
            enabled: false,
            supervisor: true,
            shadow_upper_bank0: false,
            rti_to_user: false,
        }
    }
}

impl MmuControl {
    /// Reads the register at `offset`; unknown offsets read 0.
    pub const fn read(&self, offset: u32) -> u8 {
        let bit = match offset {
            reg::ENABLE => self.enabled,
            reg::SUPERVISOR => self.supervisor,
            reg::SHADOW_UPPER_BANK0 => self.shadow_upper_bank0,
            reg::RTI_TO_USER => self.rti_to_user,
            _ => false,
        };
        bit as u8
    }

    /// Writes bit 0 of `val` into the register at `offset`; unknown offsets
    /// are ignored.
    pub const fn write(&mut self, offset: u32, val: u8) {
        let bit = val & 1 == 1;
        match offset {
            reg::ENABLE => self.enabled = bit,
            reg::SUPERVISOR => self.supervisor = bit,
            reg::SHADOW_UPPER_BANK0 => self.shadow_upper_bank0 = bit,
            reg::RTI_TO_USER => self.rti_to_user = bit,
            _ => {}
        }
    }
}
