//! mmu816 memory image inspector.
//!
//! This binary builds a memory system from a profile or configuration file and
//! loads a program image into it. It performs:
//! 1. **Inspect:** Loads the image and reports the 65816 vectors as a CPU engine
//!    would pull them after reset.
//! 2. **Dump:** Loads the image and prints a raw physical window.
//!
//! Logging goes to stderr through `tracing`; set `RUST_LOG` to change the level.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc::channel;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use mmu816_core::config::Profile;
use mmu816_core::sim::loader;
use mmu816_core::soc::devices::Console;
use mmu816_core::{AccessFlags, Config, CpuEngine, Fault, MemorySystem};

#[derive(Parser, Debug)]
#[command(
    name = "mmu816",
    author,
    version,
    about = "Inspect program images on a 65816 memory system",
    long_about = "Load a raw image the way the machine would and look at it through the bus.\n\nExamples:\n  mmu816 inspect rom.bin\n  mmu816 --profile unpaged inspect prog.bin\n  mmu816 --config machine.json dump rom.bin --base 0xffe0 --len 32"
)]
struct Cli {
    /// Reference machine to build.
    #[arg(long, value_enum, global = true, default_value_t = ProfileArg::Paged)]
    profile: ProfileArg,

    /// JSON configuration file; takes precedence over --profile.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load an image and print the vectors the engine would pull.
    Inspect {
        /// Raw binary image.
        image: PathBuf,
    },

    /// Load an image and print a window of physical memory.
    Dump {
        /// Raw binary image.
        image: PathBuf,

        /// First physical address (hex with 0x prefix, or decimal). Defaults
        /// to 32 bytes below the top of physical memory, or of bank 0 when
        /// translation is off.
        #[arg(long, value_parser = parse_addr)]
        base: Option<u32>,

        /// Number of bytes.
        #[arg(long, default_value_t = 32)]
        len: u32,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProfileArg {
    Paged,
    Unpaged,
}

impl From<ProfileArg> for Profile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::Paged => Self::Paged,
            ProfileArg::Unpaged => Self::Unpaged,
        }
    }
}

/// Engine stand-in: nothing executes, so callbacks are only logged.
#[derive(Debug, Default)]
struct HostEngine {
    faults: usize,
}

impl CpuEngine for HostEngine {
    fn abort(&mut self, fault: &Fault) {
        self.faults += 1;
        warn!(%fault, "abort");
    }

    fn set_trace(&mut self, enabled: bool) {
        debug!(enabled, "trace toggled");
    }

    fn exit(&mut self, code: u8) {
        info!(code, "exit requested");
    }
}

/// Emulation and native mode vectors, as (name, address of the low byte).
const VECTORS: [(&str, u32); 9] = [
    ("NMI", 0xFFFA),
    ("RESET", 0xFFFC),
    ("IRQ/BRK", 0xFFFE),
    ("COP (native)", 0xFFE4),
    ("BRK (native)", 0xFFE6),
    ("ABORT (native)", 0xFFE8),
    ("NMI (native)", 0xFFEA),
    ("RESERVED (native)", 0xFFEC),
    ("IRQ (native)", 0xFFEE),
];

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            error!("{msg}");
            eprintln!("[!] {msg}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let config = load_config(cli)?;

    // Nothing executes, so the console never needs host stdin.
    let (_tx, rx) = channel();
    let console = Console::new(config.console_registers(), Box::new(io::stdout()), rx);
    let mut system = MemorySystem::with_console(&config, console).map_err(|e| e.to_string())?;

    match &cli.command {
        Commands::Inspect { image } => {
            let placed = loader::load_image(&mut system, image).map_err(|e| e.to_string())?;
            println!(
                "{} bytes at {:#06x} ({:?} profile, devices: {})",
                placed,
                config.loader.offset,
                config.profile,
                system.bus().device_names().join(", ")
            );
            inspect_vectors(&mut system);
        }
        Commands::Dump { image, base, len } => {
            let _placed = loader::load_image(&mut system, image).map_err(|e| e.to_string())?;
            let base = base.unwrap_or_else(|| default_dump_base(&config));
            dump(&system, base, *len);
        }
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let Some(path) = &cli.config else {
        return Ok(Config::for_profile(cli.profile.into()));
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("could not read config '{}': {e}", path.display()))?;
    Config::from_json(&text).map_err(|e| format!("{}: {e}", path.display()))
}

fn inspect_vectors(system: &mut MemorySystem) {
    let mut engine = HostEngine::default();
    for (name, addr) in VECTORS {
        let lo = system.read(&mut engine, addr, AccessFlags::VP).value;
        let hi = system.read(&mut engine, addr + 1, AccessFlags::VP).value;
        println!("{name:<18} {addr:#06x} -> {:#06x}", u16::from_le_bytes([lo, hi]));
    }
    if engine.faults > 0 {
        warn!(faults = engine.faults, "vector pulls faulted");
    }
}

/// Top 32 bytes of bank 0 on an unpaged machine, of the whole space otherwise.
fn default_dump_base(config: &Config) -> u32 {
    let top = if config.translation {
        config.memory.mem_size
    } else {
        0x1_0000
    };
    top - 32
}

fn dump(system: &MemorySystem, base: u32, len: u32) {
    let window = system.dump_window(base, len);
    for row in window.chunks(16) {
        let Some((start, _)) = row.first() else {
            continue;
        };
        let bytes: Vec<String> = row.iter().map(|(_, b)| format!("{b:02x}")).collect();
        println!("{:#08x}: {}", start.val(), bytes.join(" "));
    }
}

fn parse_addr(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address '{s}': {e}"))
}
