//! System-on-Chip (SoC) Components.
//!
//! This module organizes the components behind the CPU engine's bus: physical
//! memory, the bank-0 dispatcher, the devices, and the builder that assembles
//! them into a [`MemorySystem`].

/// Memory system builder and bus façade.
pub mod builder;

/// Memory-mapped I/O device implementations.
pub mod devices;

/// Physical-address dispatcher.
pub mod interconnect;

/// Flat physical memory.
pub mod memory;

/// Device trait definitions for MMIO access.
pub mod traits;

pub use builder::MemorySystem;
