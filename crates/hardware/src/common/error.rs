//! Fault and error definitions.
//!
//! This module defines the error handling for the memory subsystem. It provides:
//! 1. **Faults:** Synchronous protection and translation violations raised by the MMU.
//! 2. **Read Results:** The value handed back to the CPU engine together with any fault.
//! 3. **Host Errors:** Configuration, image loading and special-opcode trap failures.

use std::path::PathBuf;

use thiserror::Error;

/// Why a privilege check failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrivilegeCause {
    /// User-mode data read of a supervisor-only page.
    DataRead,
    /// User-mode opcode or operand fetch from a supervisor-only page.
    Fetch,
    /// User-mode write to a supervisor-only page.
    Write,
    /// User-mode fetch of an opcode reserved to supervisor mode.
    ForbiddenOpcode(u8),
}

/// MMU faults.
///
/// Every fault is reported to the CPU engine through its abort entry point at
/// the point of violation. Faults are never retried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The selected page-table entry has `present` clear.
    #[error("page not present: vaddr {vaddr:#08x} (entry {index})")]
    PageNotPresent {
        /// Faulting virtual address.
        vaddr: u32,
        /// Page-table entry consulted.
        index: usize,
    },

    /// User mode touched a supervisor page or fetched a forbidden opcode.
    #[error("privilege violation: vaddr {vaddr:#08x} ({cause:?})")]
    PrivilegeViolation {
        /// Faulting virtual address.
        vaddr: u32,
        /// What was attempted.
        cause: PrivilegeCause,
    },

    /// Write through an entry with `writable` clear.
    #[error("read-only violation: vaddr {vaddr:#08x} (entry {index})")]
    ReadOnlyViolation {
        /// Faulting virtual address.
        vaddr: u32,
        /// Page-table entry consulted.
        index: usize,
    },

    /// The entry's frame lies beyond physical memory.
    #[error("frame {frame:#x} out of range (entry {index}, {frames} frames)")]
    FrameOutOfRange {
        /// Page-table entry consulted.
        index: usize,
        /// Frame number stored in the entry.
        frame: u16,
        /// Number of physical frames.
        frames: u32,
    },

    /// A computed page index does not address a table entry.
    #[error("page index {index} exceeds table of {entries} entries")]
    TableIndexOutOfRange {
        /// Computed index.
        index: usize,
        /// Table size.
        entries: usize,
    },
}

/// Outcome of a bus read.
///
/// A faulting read still carries a value: 0 when the access was refused, or
/// the safe substitute opcode when a forbidden instruction was fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadResult {
    /// Byte handed back to the CPU engine.
    pub value: u8,
    /// Fault raised by the access, if any.
    pub fault: Option<Fault>,
}

impl ReadResult {
    /// Creates a successful read result.
    #[inline]
    pub const fn ok(value: u8) -> Self {
        Self { value, fault: None }
    }

    /// Creates a read result carrying a fault and the value to return.
    #[inline]
    pub const fn fault(value: u8, fault: Fault) -> Self {
        Self {
            value,
            fault: Some(fault),
        }
    }

    /// Returns true if the read raised a fault.
    #[inline]
    pub const fn is_fault(&self) -> bool {
        self.fault.is_some()
    }
}

/// Configuration rejected by [`crate::config::Config::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A size that must be a power of two is not.
    #[error("{what} must be a non-zero power of two, got {value:#x}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        what: &'static str,
        /// Value supplied.
        value: u32,
    },

    /// Physical memory does not cover bank 0.
    #[error("mem_size {mem_size:#x} is smaller than bank 0")]
    MemoryBelowBank0 {
        /// Configured memory size.
        mem_size: u32,
    },

    /// Memory cannot be divided into the requested number of pages.
    #[error("page size {page_size:#x} does not fit bank 0")]
    PageLargerThanBank0 {
        /// Derived page size.
        page_size: u32,
    },

    /// The page table has more entries than the frame field can address.
    #[error("{entries} table entries exceed the 11-bit frame field")]
    TooManyEntries {
        /// Configured entry count.
        entries: u32,
    },

    /// A device or load window does not fit where it has to.
    #[error("{what} window {start:#06x}..{end:#06x} is out of range")]
    WindowOutOfRange {
        /// Name of the window.
        what: &'static str,
        /// First address.
        start: u32,
        /// One past the last address.
        end: u32,
    },

    /// Two device windows share an address.
    #[error("{first} and {second} windows overlap at {addr:#06x}")]
    WindowsOverlap {
        /// Device registered first.
        first: &'static str,
        /// Device registered second.
        second: &'static str,
        /// First shared address.
        addr: u32,
    },

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Failure while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image could not be opened or read.
    #[error("could not read image '{}': {source}", path.display())]
    Open {
        /// Image path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Fatal conditions raised on behalf of the CPU engine.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SystemError {
    /// The engine executed a WDM special opcode with no handler.
    #[error("unhandled WDM opcode {opcode:#04x}")]
    UnhandledWdm {
        /// WDM signature byte.
        opcode: u8,
    },
}
