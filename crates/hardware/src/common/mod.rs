//! Common utilities and types used throughout the memory subsystem.
//!
//! This module provides the building blocks shared by the MMU, the dispatcher and
//! the loader. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Constants:** Geometry, address map and opcode values of the reference machine.
//! 3. **Access Kinds:** The bus signals accompanying every read.
//! 4. **Error Handling:** Faults, read results and host-side errors.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Geometry, address map and opcode constants.
pub mod constants;

/// Access-kind flags.
pub mod data;

/// Faults and error types.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use constants::{MEMSIZE, MMU_ENTRIES, PAGE_SIZE};
pub use data::AccessFlags;
pub use error::{ConfigError, Fault, LoadError, PrivilegeCause, ReadResult, SystemError};
