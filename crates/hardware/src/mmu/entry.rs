//! Page-table entry layout.
//!
//! ```text
//!  15   14   13   12 11  10                     0
//! +----+----+----+-----+-------------------------+
//! | P  | W  | U  | rsv |          frame          |
//! +----+----+----+-----+-------------------------+
//! ```
//!
//! Reserved bits are kept verbatim so that byte-wise writes through the
//! table window read back unchanged.

use crate::common::constants::{PTE_FRAME_MASK, PTE_PRESENT, PTE_USER, PTE_WRITE};

/// A 16-bit page-table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PageTableEntry(pub u16);

impl PageTableEntry {
    /// An entry with every bit clear (not present).
    pub const EMPTY: Self = Self(0);

    /// Builds an entry mapping `frame` with the given permissions.
    ///
    /// `frame` is truncated to the 11-bit field.
    pub const fn new(frame: u16, present: bool, writable: bool, user: bool) -> Self {
        let mut bits = frame & PTE_FRAME_MASK;
        if present {
            bits |= PTE_PRESENT;
        }
        if writable {
            bits |= PTE_WRITE;
        }
        if user {
            bits |= PTE_USER;
        }
        Self(bits)
    }

    /// Raw 16-bit value.
    #[inline(always)]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Physical page number.
    #[inline(always)]
    pub const fn frame(self) -> u16 {
        self.0 & PTE_FRAME_MASK
    }

    /// Page is accessible from user mode.
    #[inline(always)]
    pub const fn user(self) -> bool {
        self.0 & PTE_USER != 0
    }

    /// Page accepts writes.
    #[inline(always)]
    pub const fn writable(self) -> bool {
        self.0 & PTE_WRITE != 0
    }

    /// Mapping is valid.
    #[inline(always)]
    pub const fn present(self) -> bool {
        self.0 & PTE_PRESENT != 0
    }

    /// Low byte, as seen at the even address of the table window.
    #[inline]
    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    /// High byte, as seen at the odd address of the table window.
    #[inline]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Replaces the low byte, keeping the high byte.
    #[inline]
    pub const fn with_low(self, val: u8) -> Self {
        Self((self.0 & 0xFF00) | val as u16)
    }

    /// Replaces the high byte, keeping the low byte.
    #[inline]
    pub const fn with_high(self, val: u8) -> Self {
        Self(((val as u16) << 8) | (self.0 & 0x00FF))
    }
}

impl From<u16> for PageTableEntry {
    fn from(bits: u16) -> Self {
        Self(bits)
    }
}
