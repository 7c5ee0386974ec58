//! Physical and Virtual Address types.
//!
//! This module defines strong types for the two address spaces seen by the bus:
//! 1. **Virtual:** The address as issued by the CPU engine, before translation.
//! 2. **Physical:** The offset into the flat memory/device space, after translation.
//!
//! Both wrap a `u32`; the 65816 drives 24 address lines, and the bus reduces every
//! address modulo the configured memory size before use.

/// A virtual address issued by the CPU engine.
///
/// Virtual addresses are translated through the MMU while it is enabled and
/// used verbatim as physical addresses otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtAddr(pub u32);

/// A physical address on the system bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PhysAddr(pub u32);

impl VirtAddr {
    /// Creates a new virtual address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Reduces the address modulo `mem_size`.
    ///
    /// `mem_size` must be non-zero; configurations are validated before a
    /// system is built.
    #[inline]
    pub const fn wrap(self, mem_size: u32) -> Self {
        Self(self.0 % mem_size)
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }
}

impl From<VirtAddr> for PhysAddr {
    /// Identity mapping, used while translation is off.
    fn from(vaddr: VirtAddr) -> Self {
        Self(vaddr.0)
    }
}

impl From<u32> for VirtAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl From<u32> for PhysAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}
