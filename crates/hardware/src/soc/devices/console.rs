//! Serial console.
//!
//! Three byte-wide registers backed by the host's stdio:
//! * output: write emits the byte and flushes; read returns 0.
//! * status: read returns 1 if an input byte is pending, else 0.
//! * input: read pops the next pending byte, or 0 if none. Never blocks.
//!
//! Input is gathered by a background thread that forwards stdin bytes over a
//! channel; polling the channel is the non-blocking "input available" check.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Read, Write};
use std::sync::mpsc::{Receiver, channel};
use std::thread;

use tracing::warn;

use crate::soc::traits::{Device, DeviceContext};

/// Physical addresses of the console registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsoleRegisters {
    /// Output register.
    pub out: u32,
    /// Input-pending register.
    pub status: Option<u32>,
    /// Non-blocking input register.
    pub input: Option<u32>,
}

impl ConsoleRegisters {
    /// Addresses of the registers present in this layout.
    pub fn addresses(&self) -> impl Iterator<Item = u32> {
        [Some(self.out), self.status, self.input].into_iter().flatten()
    }

    /// True if `paddr` is one of the registers.
    pub fn contains(&self, paddr: u32) -> bool {
        self.addresses().any(|addr| addr == paddr)
    }

    fn span(&self) -> (u32, u32) {
        let lo = self.addresses().min().unwrap_or(self.out);
        let hi = self.addresses().max().unwrap_or(self.out);
        (lo, hi - lo + 1)
    }
}

/// Console device.
pub struct Console {
    regs: ConsoleRegisters,
    base_addr: u32,
    size: u32,
    /// Bytes drained from the input channel but not yet read.
    rx_queue: VecDeque<u8>,
    rx_receiver: Receiver<u8>,
    output: Box<dyn Write + Send>,
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("regs", &self.regs)
            .field("rx_queue", &self.rx_queue)
            .finish_non_exhaustive()
    }
}

impl Console {
    /// Creates a console reading from `input` and writing to `output`.
    pub fn new(regs: ConsoleRegisters, output: Box<dyn Write + Send>, input: Receiver<u8>) -> Self {
        let (base_addr, size) = regs.span();
        Self {
            regs,
            base_addr,
            size,
            rx_queue: VecDeque::new(),
            rx_receiver: input,
            output,
        }
    }

    /// Creates a console attached to the host's stdin and stdout.
    ///
    /// Spawns a background thread to read from stdin.
    pub fn stdio(regs: ConsoleRegisters) -> Self {
        let (tx, rx) = channel();

        // Detached: the thread ends when stdin closes or the console is dropped.
        let _reader = thread::spawn(move || {
            let mut buffer = [0u8; 1];
            let stdin = io::stdin();
            let mut handle = stdin.lock();
            while handle.read_exact(&mut buffer).is_ok() {
                if tx.send(buffer[0]).is_err() {
                    break;
                }
            }
        });

        Self::new(regs, Box::new(io::stdout()), rx)
    }

    /// Drains the input channel into the RX queue.
    fn check_input(&mut self) {
        while let Ok(byte) = self.rx_receiver.try_recv() {
            self.rx_queue.push_back(byte);
        }
    }

    /// Returns true if input is available without blocking.
    pub fn input_pending(&mut self) -> bool {
        self.check_input();
        !self.rx_queue.is_empty()
    }

    fn read_input(&mut self) -> u8 {
        self.check_input();
        self.rx_queue.pop_front().unwrap_or(0)
    }

    fn emit(&mut self, val: u8) {
        let result = self
            .output
            .write_all(&[val])
            .and_then(|()| self.output.flush());
        if let Err(err) = result {
            warn!(%err, "console output failed");
        }
    }
}

impl Device for Console {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn address_range(&self) -> (u32, u32) {
        (self.base_addr, self.size)
    }

    /// Only the registers themselves; the gaps inside the span stay RAM.
    fn claims(&self, paddr: u32) -> Option<u32> {
        self.regs
            .contains(paddr)
            .then(|| paddr - self.base_addr)
    }

    fn read_u8(&mut self, offset: u32, _ctx: &mut DeviceContext<'_>) -> u8 {
        let addr = self.base_addr + offset;
        if Some(addr) == self.regs.status {
            u8::from(self.input_pending())
        } else if Some(addr) == self.regs.input {
            self.read_input()
        } else {
            0
        }
    }

    fn write_u8(&mut self, offset: u32, val: u8, _ctx: &mut DeviceContext<'_>) {
        if self.base_addr + offset == self.regs.out {
            self.emit(val);
        }
    }
}
