//! Memory Access Kinds.
//!
//! Every read issued by the CPU engine carries a set of bus signals describing
//! why the byte is being fetched. The translator consumes them to:
//! 1. **Force supervisor mode** on vector pulls.
//! 2. **Shadow** the upper bank-0 page on privileged fetches.
//! 3. **Drive mode transitions** on opcode fetches (privilege drop, RTI, forbidden opcodes).

use bitflags::bitflags;

bitflags! {
    /// Access-kind flags accompanying a bus read.
    ///
    /// An empty set is an ordinary data access. Writes carry no flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u8 {
        /// Valid program address: the byte is an opcode or operand fetch.
        const VPA = 1 << 0;
        /// Vector pull: the byte belongs to a reset or interrupt vector.
        const VP = 1 << 1;
    }
}

impl AccessFlags {
    /// Returns true for instruction-stream fetches.
    #[inline]
    pub const fn is_program_fetch(self) -> bool {
        self.contains(Self::VPA)
    }

    /// Returns true for vector pulls.
    #[inline]
    pub const fn is_vector_pull(self) -> bool {
        self.contains(Self::VP)
    }

    /// Returns true if the access is a privileged fetch (program or vector).
    #[inline]
    pub const fn is_fetch(self) -> bool {
        self.intersects(Self::VPA.union(Self::VP))
    }
}
