//! Memory Management Unit (MMU).
//!
//! This module implements the address translator that sits between the CPU
//! engine and the physical bus. It provides:
//! 1. **Translation:** One-level lookup of a 1024-entry page table (16 KiB pages).
//! 2. **Protection:** Present, writable and user checks per page.
//! 3. **Mode Transitions:** Supervisor forced on vector pulls, dropped on user
//!    code fetches and, optionally, on RTI.
//! 4. **Shadowing:** The upper bank-0 page can be served from the last table
//!    entry for privileged fetches, keeping the vector page stable.
//!
//! The translator is bypassed entirely while `enabled` is clear.

/// MMU control registers.
pub mod control;

/// Page-table entry layout.
pub mod entry;

/// Page table storage and paging geometry.
pub mod table;

use tracing::debug;

use crate::common::constants::{OP_NOP, OP_RTI, USER_FORBIDDEN_OPCODES};
use crate::common::{AccessFlags, Fault, PhysAddr, PrivilegeCause, ReadResult, VirtAddr};

pub use self::control::MmuControl;
pub use self::entry::PageTableEntry;
pub use self::table::{PageGeometry, PageTable};

/// The address translator: control state, page table and geometry.
#[derive(Clone, Debug)]
pub struct Mmu {
    /// Mode and feature switches.
    pub control: MmuControl,
    table: PageTable,
    geometry: PageGeometry,
}

impl Mmu {
    /// Creates an MMU in its power-on state with an empty table.
    ///
    /// # Arguments
    ///
    /// * `mem_size` - Size of the physical space in bytes.
    /// * `entries` - Number of table entries.
    pub fn new(mem_size: u32, entries: u32) -> Self {
        Self {
            control: MmuControl::default(),
            table: PageTable::new(entries as usize),
            geometry: PageGeometry::new(mem_size, entries),
        }
    }

    /// Paging geometry.
    pub const fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Page table.
    pub const fn table(&self) -> &PageTable {
        &self.table
    }

    /// Mutable page table.
    pub const fn table_mut(&mut self) -> &mut PageTable {
        &mut self.table
    }

    /// Convenience for `table_mut().set(index, entry)`.
    pub fn map(&mut self, index: usize, entry: PageTableEntry) {
        self.table.set(index, entry);
    }

    /// True if translation is active.
    pub const fn enabled(&self) -> bool {
        self.control.enabled
    }

    /// True in supervisor mode.
    pub const fn supervisor(&self) -> bool {
        self.control.supervisor
    }

    /// Translates a read.
    ///
    /// Applies the vector-pull and user-fetch mode transitions, the
    /// upper-bank-0 shadow, and the present and privilege checks. Mode changes
    /// made before a check fails are kept.
    ///
    /// # Errors
    ///
    /// [`Fault::PageNotPresent`], [`Fault::PrivilegeViolation`] for a user
    /// access to a supervisor page, or [`Fault::FrameOutOfRange`].
    pub fn translate_read(&mut self, vaddr: VirtAddr, flags: AccessFlags) -> Result<PhysAddr, Fault> {
        if flags.is_vector_pull() && !self.control.supervisor {
            debug!(vaddr = vaddr.val(), "vector pull: entering supervisor mode");
        }
        if flags.is_vector_pull() {
            self.control.supervisor = true;
        }

        let mut index = self.geometry.index(vaddr);
        if self.control.supervisor
            && flags.is_fetch()
            && self.control.shadow_upper_bank0
            && index == self.geometry.upper_bank0_page()
        {
            index = self.geometry.shadow_entry();
        }

        let entry = self.table.get(index)?;
        if !entry.present() {
            return Err(Fault::PageNotPresent {
                vaddr: vaddr.val(),
                index,
            });
        }

        if entry.user() && flags.is_program_fetch() && self.control.supervisor {
            debug!(vaddr = vaddr.val(), index, "fetch from user page: entering user mode");
            self.control.supervisor = false;
        }

        if !self.control.supervisor && !entry.user() {
            let cause = if flags.is_program_fetch() {
                PrivilegeCause::Fetch
            } else {
                PrivilegeCause::DataRead
            };
            return Err(Fault::PrivilegeViolation {
                vaddr: vaddr.val(),
                cause,
            });
        }

        self.physical(vaddr, index, entry)
    }

    /// Translates a write.
    ///
    /// # Errors
    ///
    /// [`Fault::ReadOnlyViolation`], [`Fault::PrivilegeViolation`] for a user
    /// write to a supervisor page, or [`Fault::FrameOutOfRange`].
    pub fn translate_write(&self, vaddr: VirtAddr) -> Result<PhysAddr, Fault> {
        let index = self.geometry.index(vaddr);
        let entry = self.table.get(index)?;

        if !entry.writable() {
            return Err(Fault::ReadOnlyViolation {
                vaddr: vaddr.val(),
                index,
            });
        }
        if !self.control.supervisor && !entry.user() {
            return Err(Fault::PrivilegeViolation {
                vaddr: vaddr.val(),
                cause: PrivilegeCause::Write,
            });
        }

        self.physical(vaddr, index, entry)
    }

    /// Applies the post-read rules to a byte fetched through the translator.
    ///
    /// Only program fetches are inspected. A supervisor RTI fetch demotes to
    /// user mode when `rti_to_user` is set; a forbidden opcode fetched in user
    /// mode is faulted and replaced by NOP.
    pub fn post_fetch(&mut self, vaddr: VirtAddr, value: u8, flags: AccessFlags) -> ReadResult {
        if !flags.is_program_fetch() {
            return ReadResult::ok(value);
        }

        if self.control.supervisor {
            if value == OP_RTI && self.control.rti_to_user {
                debug!(vaddr = vaddr.val(), "RTI fetched: returning to user mode");
                self.control.supervisor = false;
            }
            ReadResult::ok(value)
        } else if USER_FORBIDDEN_OPCODES.contains(&value) {
            let fault = Fault::PrivilegeViolation {
                vaddr: vaddr.val(),
                cause: PrivilegeCause::ForbiddenOpcode(value),
            };
            debug!(%fault, "forbidden opcode replaced by NOP");
            ReadResult::fault(OP_NOP, fault)
        } else {
            ReadResult::ok(value)
        }
    }

    fn physical(&self, vaddr: VirtAddr, index: usize, entry: PageTableEntry) -> Result<PhysAddr, Fault> {
        let frame = entry.frame();
        if u32::from(frame) >= self.geometry.entries() {
            return Err(Fault::FrameOutOfRange {
                index,
                frame,
                frames: self.geometry.entries(),
            });
        }
        let base = u32::from(frame) * self.geometry.page_size();
        Ok(PhysAddr::new(base | self.geometry.offset(vaddr)))
    }
}
