//! Physical System Memory.
//!
//! A flat byte array covering the whole physical space. It backs plain RAM, the
//! boot ROM contents and every address no device claims. Addresses handed to it
//! have already been reduced modulo its size by the bus façade; anything out of
//! range reads 0 and drops writes.

/// Physical memory: RAM plus the storage behind the ROM window.
#[derive(Clone, PartialEq, Eq)]
pub struct PhysicalMemory {
    data: Box<[u8]>,
}

impl std::fmt::Debug for PhysicalMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicalMemory")
            .field("size", &self.data.len())
            .finish_non_exhaustive()
    }
}

impl PhysicalMemory {
    /// Allocates `size` zeroed bytes.
    pub fn new(size: u32) -> Self {
        Self {
            data: vec![0u8; size as usize].into_boxed_slice(),
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> u32 {
        self.data.len() as u32
    }

    /// Returns true if no memory is backing the space.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads one byte.
    #[inline]
    pub fn read_u8(&self, paddr: u32) -> u8 {
        self.data.get(paddr as usize).copied().unwrap_or(0)
    }

    /// Writes one byte.
    #[inline]
    pub fn write_u8(&mut self, paddr: u32, val: u8) {
        if let Some(slot) = self.data.get_mut(paddr as usize) {
            *slot = val;
        }
    }

    /// Copies `data` to `offset`, stopping at `limit` (exclusive) or at the
    /// end of memory, whichever comes first.
    ///
    /// # Returns
    ///
    /// Number of bytes copied.
    pub fn load(&mut self, offset: u32, limit: u32, data: &[u8]) -> usize {
        let start = offset as usize;
        let end = (limit as usize).min(self.data.len());
        if start >= end {
            return 0;
        }
        let count = data.len().min(end - start);
        self.data[start..start + count].copy_from_slice(&data[..count]);
        count
    }

    /// Borrows `len` bytes starting at `base`, clamped to the end of memory.
    pub fn slice(&self, base: u32, len: u32) -> &[u8] {
        let start = (base as usize).min(self.data.len());
        let end = start.saturating_add(len as usize).min(self.data.len());
        &self.data[start..end]
    }
}
