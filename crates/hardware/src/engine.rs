//! CPU engine capability interface.
//!
//! The instruction decoder/executor is not part of this crate. The memory
//! subsystem only needs three things from it: somewhere to report faults, a
//! way to toggle instruction tracing, and a way to end the session when the
//! program asks for it.

use crate::common::Fault;

/// Services the memory subsystem calls back into while handling an access.
///
/// Every call happens synchronously inside a bus access, before the access
/// returns to the engine.
pub trait CpuEngine {
    /// Abort entry point. Called once per faulting access, before the
    /// (possibly substituted) value is returned.
    fn abort(&mut self, fault: &Fault);

    /// Instruction trace enable, driven by the trace-toggle register.
    fn set_trace(&mut self, enabled: bool);

    /// Program-requested termination with the given status (unpaged exit
    /// trigger).
    fn exit(&mut self, code: u8);
}
