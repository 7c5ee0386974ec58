//! Page table and paging geometry.
//!
//! The table is held by the MMU and exposed twice: as translator state, and as
//! a little-endian byte array in the page-table window on the bus.

use crate::common::constants::BANK0_SIZE;
use crate::common::{Fault, VirtAddr};

use super::entry::PageTableEntry;

/// Page size and table size of a configured machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageGeometry {
    page_size: u32,
    page_shift: u32,
    entries: u32,
}

impl PageGeometry {
    /// Derives the geometry from the physical space size and table size.
    ///
    /// Both must be powers of two with `entries <= mem_size`; see
    /// [`crate::config::Config::validate`].
    pub const fn new(mem_size: u32, entries: u32) -> Self {
        let page_size = mem_size / entries;
        Self {
            page_size,
            page_shift: page_size.trailing_zeros(),
            entries,
        }
    }

    /// Page size in bytes.
    #[inline(always)]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of table entries (and of physical frames).
    #[inline(always)]
    pub const fn entries(&self) -> u32 {
        self.entries
    }

    /// Page index of `vaddr`, using exactly `log2(entries)` bits.
    #[inline]
    pub const fn index(&self, vaddr: VirtAddr) -> usize {
        ((vaddr.val() >> self.page_shift) & (self.entries - 1)) as usize
    }

    /// Byte offset of `vaddr` within its page.
    #[inline]
    pub const fn offset(&self, vaddr: VirtAddr) -> u32 {
        vaddr.val() & (self.page_size - 1)
    }

    /// Index of the last page of bank 0, the one shadowed on privileged
    /// fetches.
    #[inline]
    pub const fn upper_bank0_page(&self) -> usize {
        (BANK0_SIZE / self.page_size - 1) as usize
    }

    /// Index of the entry that stands in for the upper bank-0 page.
    #[inline]
    pub const fn shadow_entry(&self) -> usize {
        (self.entries - 1) as usize
    }
}

/// Fixed-size page table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageTable {
    entries: Box<[PageTableEntry]>,
}

impl PageTable {
    /// Creates a table of `len` empty entries.
    pub fn new(len: usize) -> Self {
        Self {
            entries: vec![PageTableEntry::EMPTY; len].into_boxed_slice(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::TableIndexOutOfRange`] if `index` is past the end.
    pub fn get(&self, index: usize) -> Result<PageTableEntry, Fault> {
        self.entries
            .get(index)
            .copied()
            .ok_or(Fault::TableIndexOutOfRange {
                index,
                entries: self.entries.len(),
            })
    }

    /// Replaces the entry at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, entry: PageTableEntry) {
        if let Some(slot) = self.entries.get_mut(index) {
            *slot = entry;
        }
    }

    /// Reads one byte of the table's window image.
    ///
    /// Offsets past the window read 0.
    pub fn read_byte(&self, offset: u32) -> u8 {
        let index = (offset / 2) as usize;
        match self.entries.get(index) {
            Some(entry) if offset % 2 == 0 => entry.low(),
            Some(entry) => entry.high(),
            None => 0,
        }
    }

    /// Writes one byte of the window image, leaving the other half of the
    /// entry untouched. Offsets past the window are ignored.
    pub fn write_byte(&mut self, offset: u32, val: u8) {
        let index = (offset / 2) as usize;
        if let Some(entry) = self.entries.get_mut(index) {
            *entry = if offset % 2 == 0 {
                entry.with_low(val)
            } else {
                entry.with_high(val)
            };
        }
    }
}
