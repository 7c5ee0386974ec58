//! 65816 memory subsystem library.
//!
//! This crate implements everything a 65816-class CPU engine sees on its bus:
//! 1. **MMU:** Paged translation with per-page protection and supervisor/user modes.
//! 2. **SoC:** Bank-0 device dispatch (console, trace toggle, MMU windows, boot ROM).
//! 3. **Façade:** The byte-wide `read`/`write` pair the engine calls for every access.
//! 4. **Simulation:** Configuration profiles and program image loading.
//!
//! The instruction decoder/executor is not part of this crate; it plugs in through
//! [`engine::CpuEngine`].

/// Common types and constants (addresses, access flags, faults).
pub mod common;
/// Machine configuration (profiles, geometry, device map, load window).
pub mod config;
/// Callback interface implemented by the CPU engine.
pub mod engine;
/// Address translator (control registers, page table, protection).
pub mod mmu;
/// Program image loading.
pub mod sim;
/// System-on-chip (builder, bus, devices, memory, traits).
pub mod soc;

/// Access kind accompanying every read.
pub use crate::common::AccessFlags;
/// MMU fault and read outcome types.
pub use crate::common::{Fault, ReadResult};
/// Root configuration type; use `Config::paged()`, `Config::unpaged()` or `Config::from_json`.
pub use crate::config::Config;
/// Engine callbacks.
pub use crate::engine::CpuEngine;
/// Address translator.
pub use crate::mmu::Mmu;
/// Top-level memory system; construct with `MemorySystem::new`.
pub use crate::soc::MemorySystem;
