//! Program image loader.
//!
//! This module places a raw binary image into physical memory. It performs:
//! 1. **Image reading:** Reads the whole file from disk into a byte buffer.
//! 2. **Placement:** Copies it to the configured load offset, straight into memory
//!    so that ROM and device windows do not interfere.
//! 3. **Truncation:** Bytes past the load limit are dropped with a warning.
//!
//! Paged machines load at `0xF000`, which places the image in the boot ROM and
//! its vectors at the top of bank 0. Unpaged machines load at `0x1000`.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::common::LoadError;
use crate::soc::MemorySystem;

/// Reads the image at `path` and loads it with [`load_bytes`].
///
/// # Errors
///
/// Returns [`LoadError::Open`] if the file cannot be read. A file that is
/// empty or longer than the load window is not an error.
///
/// # Returns
///
/// The number of bytes placed in memory.
pub fn load_image(system: &mut MemorySystem, path: impl AsRef<Path>) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), size = data.len(), "loading image");
    Ok(load_bytes(system, &data))
}

/// Copies `data` into physical memory at the configured load offset.
///
/// Returns the number of bytes placed; anything past the load limit is
/// dropped.
pub fn load_bytes(system: &mut MemorySystem, data: &[u8]) -> usize {
    let loader = system.config().loader;
    let placed = system
        .bus_mut()
        .memory_mut()
        .load(loader.offset, loader.limit, data);

    if placed < data.len() {
        warn!(
            offset = loader.offset,
            limit = loader.limit,
            size = data.len(),
            dropped = data.len() - placed,
            "image truncated at load limit"
        );
    }
    info!(offset = loader.offset, bytes = placed, "image loaded");
    placed
}
