//! Simulation utilities and program loading.
//!
//! Provides the loader that places a program image into physical memory
//! before the CPU engine is reset.

pub mod loader;

pub use loader::{load_bytes, load_image};
