//! Configuration system for the memory subsystem.
//!
//! This module defines the structures used to parameterize a [`crate::MemorySystem`]. It provides:
//! 1. **Defaults:** The reference address maps of the paged and unpaged machines.
//! 2. **Structures:** Memory geometry, device address map and image load window.
//! 3. **Overrides:** A JSON format that starts from a profile and replaces individual fields.
//!
//! Both profiles share one dispatcher; they differ only in whether translation is
//! available and where the devices sit.

use serde::Deserialize;

use crate::common::ConfigError;
use crate::soc::devices::ConsoleRegisters;
use crate::common::constants::{
    BANK0_SIZE, CONSOLE_IN, CONSOLE_OUT, CONSOLE_STATUS, IO_END, IO_START, LOAD_LIMIT, MEMSIZE,
    MMU_CONTROL_BASE, MMU_CONTROL_SIZE, MMU_ENTRIES, MMU_TABLE_BASE, PAGED_LOAD_OFFSET,
    PTE_FRAME_MASK, RESET_VECTOR, ROM_BASE, ROM_SIZE, TRACE_TOGGLE, UNPAGED_CONSOLE_OUT,
    UNPAGED_CONSOLE_STATUS, UNPAGED_EXIT, UNPAGED_LOAD_OFFSET, UNPAGED_RESET_TARGET,
};

/// Machine profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Profile {
    /// MMU-equipped machine: boot ROM at `0xF000`, MMU registers in the I/O hole.
    #[default]
    Paged,
    /// Flat machine: no translation, console and exit trigger at the top of bank 0.
    Unpaged,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use mmu816_core::config::{Config, Profile};
///
/// let config = Config::default();
/// assert_eq!(config.profile, Profile::Paged);
/// assert!(config.translation);
/// assert_eq!(config.page_size(), 16 * 1024);
///
/// let json = r#"{ "profile": "Unpaged", "loader": { "offset": 8192 } }"#;
/// let config = Config::from_json(json).unwrap();
/// assert!(!config.translation);
/// assert_eq!(config.loader.offset, 0x2000);
/// assert_eq!(config.devices.exit_trigger, Some(0xFFFF));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Profile the remaining fields were derived from.
    pub profile: Profile,
    /// Whether the MMU sits on the access path at all.
    pub translation: bool,
    /// Physical memory and page-table geometry.
    pub memory: MemoryConfig,
    /// Device address map.
    pub devices: DeviceMap,
    /// Image load window.
    pub loader: LoaderConfig,
}

/// Physical memory and page-table geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Size of the physical address space in bytes.
    pub mem_size: u32,
    /// Number of page-table entries.
    pub mmu_entries: u32,
}

/// Physical addresses of memory-mapped devices.
///
/// Every device lives in bank 0. `None` removes the device from the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceMap {
    /// Console output register.
    pub console_out: u32,
    /// Console input-pending register.
    pub console_status: Option<u32>,
    /// Console non-blocking input register.
    pub console_in: Option<u32>,
    /// Trace toggle register.
    pub trace_toggle: Option<u32>,
    /// Process-exit trigger.
    pub exit_trigger: Option<u32>,
    /// Base of the four MMU control registers.
    pub mmu_control: u32,
    /// Base of the page-table window.
    pub mmu_table: u32,
    /// Read-only boot ROM window as (base, size).
    pub rom: Option<(u32, u32)>,
    /// I/O hole as (first, last): unclaimed addresses read 0 and drop writes.
    pub io_hole: Option<(u32, u32)>,
    /// Fixed reset vector reported at `0xFFFC`.
    pub reset_vector: Option<u16>,
}

/// Image load window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Physical address of the first image byte.
    pub offset: u32,
    /// End (exclusive) of the window; the rest of the image is dropped.
    pub limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::paged()
    }
}

impl Config {
    /// Reference MMU-equipped machine.
    pub const fn paged() -> Self {
        Self {
            profile: Profile::Paged,
            translation: true,
            memory: MemoryConfig::reference(),
            devices: DeviceMap {
                console_out: CONSOLE_OUT,
                console_status: Some(CONSOLE_STATUS),
                console_in: Some(CONSOLE_IN),
                trace_toggle: Some(TRACE_TOGGLE),
                exit_trigger: None,
                mmu_control: MMU_CONTROL_BASE,
                mmu_table: MMU_TABLE_BASE,
                rom: Some((ROM_BASE, ROM_SIZE)),
                io_hole: Some((IO_START, IO_END)),
                reset_vector: None,
            },
            loader: LoaderConfig {
                offset: PAGED_LOAD_OFFSET,
                limit: LOAD_LIMIT,
            },
        }
    }

    /// Reference flat machine with the MMU permanently disabled.
    pub const fn unpaged() -> Self {
        Self {
            profile: Profile::Unpaged,
            translation: false,
            memory: MemoryConfig::reference(),
            devices: DeviceMap {
                console_out: UNPAGED_CONSOLE_OUT,
                console_status: Some(UNPAGED_CONSOLE_STATUS),
                console_in: None,
                trace_toggle: Some(TRACE_TOGGLE),
                exit_trigger: Some(UNPAGED_EXIT),
                mmu_control: MMU_CONTROL_BASE,
                mmu_table: MMU_TABLE_BASE,
                rom: None,
                io_hole: Some((IO_START, IO_END)),
                reset_vector: Some(UNPAGED_RESET_TARGET),
            },
            loader: LoaderConfig {
                offset: UNPAGED_LOAD_OFFSET,
                limit: LOAD_LIMIT,
            },
        }
    }

    /// Returns the reference configuration for `profile`.
    pub const fn for_profile(profile: Profile) -> Self {
        match profile {
            Profile::Paged => Self::paged(),
            Profile::Unpaged => Self::unpaged(),
        }
    }

    /// Parses a JSON configuration and validates it.
    ///
    /// The document names a profile and may override any field of it; absent
    /// fields keep the profile's reference value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = serde_json::from_str(json)?;
        let config = file.resolve();
        config.validate()?;
        Ok(config)
    }

    /// Console register layout of this configuration.
    pub const fn console_registers(&self) -> ConsoleRegisters {
        ConsoleRegisters {
            out: self.devices.console_out,
            status: self.devices.console_status,
            input: self.devices.console_in,
        }
    }

    /// Page size implied by the geometry.
    pub const fn page_size(&self) -> u32 {
        self.memory.mem_size / self.memory.mmu_entries
    }

    /// Checks that the geometry and address map are consistent.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let MemoryConfig {
            mem_size,
            mmu_entries,
        } = self.memory;

        if !mem_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                what: "mem_size",
                value: mem_size,
            });
        }
        if mem_size < BANK0_SIZE {
            return Err(ConfigError::MemoryBelowBank0 { mem_size });
        }
        if !mmu_entries.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                what: "mmu_entries",
                value: mmu_entries,
            });
        }
        if mmu_entries > u32::from(PTE_FRAME_MASK) + 1 {
            return Err(ConfigError::TooManyEntries {
                entries: mmu_entries,
            });
        }
        let page_size = mem_size / mmu_entries;
        if page_size == 0 || page_size > BANK0_SIZE {
            return Err(ConfigError::PageLargerThanBank0 { page_size });
        }

        let d = &self.devices;
        if self.translation {
            check_bank0("mmu control", d.mmu_control, MMU_CONTROL_SIZE)?;
            check_bank0("page table", d.mmu_table, mmu_entries * 2)?;
        }
        if let Some((base, size)) = d.rom {
            check_bank0("rom", base, size)?;
        }
        if let Some((first, last)) = d.io_hole {
            if first > last {
                return Err(ConfigError::WindowOutOfRange {
                    what: "io hole",
                    start: first,
                    end: last,
                });
            }
            check_bank0("io hole", first, last - first + 1)?;
        }
        for (what, addr) in [
            ("console out", Some(d.console_out)),
            ("console status", d.console_status),
            ("console in", d.console_in),
            ("trace toggle", d.trace_toggle),
            ("exit trigger", d.exit_trigger),
        ] {
            if let Some(addr) = addr {
                check_bank0(what, addr, 1)?;
            }
        }

        check_overlaps(&self.device_windows())?;

        let LoaderConfig { offset, limit } = self.loader;
        if offset >= limit || limit > mem_size {
            return Err(ConfigError::WindowOutOfRange {
                what: "load",
                start: offset,
                end: limit,
            });
        }
        Ok(())
    }
}

impl Config {
    /// (name, base, size) of every window the bus will decode, in
    /// registration order. Console registers are listed one by one.
    fn device_windows(&self) -> Vec<(&'static str, u32, u32)> {
        let d = &self.devices;
        let mut windows = vec![("console out", d.console_out, 1)];
        let singles = [
            ("console status", d.console_status),
            ("console in", d.console_in),
            ("trace toggle", d.trace_toggle),
            ("exit trigger", d.exit_trigger),
        ];
        windows.extend(
            singles
                .into_iter()
                .filter_map(|(what, addr)| addr.map(|addr| (what, addr, 1))),
        );
        if d.reset_vector.is_some() {
            windows.push(("reset vector", RESET_VECTOR, 2));
        }
        if self.translation {
            windows.push(("mmu control", d.mmu_control, MMU_CONTROL_SIZE));
            windows.push(("page table", d.mmu_table, self.memory.mmu_entries * 2));
        }
        if let Some((base, size)) = d.rom {
            windows.push(("rom", base, size));
        }
        windows
    }
}

impl MemoryConfig {
    /// 16 MiB split into 1024 pages of 16 KiB.
    pub const fn reference() -> Self {
        Self {
            mem_size: MEMSIZE,
            mmu_entries: MMU_ENTRIES,
        }
    }
}

fn check_bank0(what: &'static str, start: u32, size: u32) -> Result<(), ConfigError> {
    let end = start.saturating_add(size);
    if end > BANK0_SIZE {
        return Err(ConfigError::WindowOutOfRange { what, start, end });
    }
    Ok(())
}

fn check_overlaps(windows: &[(&'static str, u32, u32)]) -> Result<(), ConfigError> {
    for (i, &(first, a_base, a_size)) in windows.iter().enumerate() {
        for &(second, b_base, b_size) in &windows[i + 1..] {
            let start = a_base.max(b_base);
            let end = (a_base + a_size).min(b_base + b_size);
            if start < end {
                return Err(ConfigError::WindowsOverlap {
                    first,
                    second,
                    addr: start,
                });
            }
        }
    }
    Ok(())
}

/// On-disk configuration: a profile plus per-field overrides.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    profile: Profile,
    #[serde(default)]
    translation: Option<bool>,
    #[serde(default)]
    memory: MemoryOverrides,
    #[serde(default)]
    devices: DeviceOverrides,
    #[serde(default)]
    loader: LoaderOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MemoryOverrides {
    mem_size: Option<u32>,
    mmu_entries: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeviceOverrides {
    console_out: Option<u32>,
    console_status: Option<u32>,
    console_in: Option<u32>,
    trace_toggle: Option<u32>,
    exit_trigger: Option<u32>,
    mmu_control: Option<u32>,
    mmu_table: Option<u32>,
    rom_base: Option<u32>,
    rom_size: Option<u32>,
    reset_vector: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoaderOverrides {
    offset: Option<u32>,
    limit: Option<u32>,
}

impl ConfigFile {
    fn resolve(self) -> Config {
        let mut config = Config::for_profile(self.profile);
        if let Some(translation) = self.translation {
            config.translation = translation;
        }

        let m = &mut config.memory;
        m.mem_size = self.memory.mem_size.unwrap_or(m.mem_size);
        m.mmu_entries = self.memory.mmu_entries.unwrap_or(m.mmu_entries);

        let o = self.devices;
        let d = &mut config.devices;
        d.console_out = o.console_out.unwrap_or(d.console_out);
        d.console_status = o.console_status.or(d.console_status);
        d.console_in = o.console_in.or(d.console_in);
        d.trace_toggle = o.trace_toggle.or(d.trace_toggle);
        d.exit_trigger = o.exit_trigger.or(d.exit_trigger);
        d.mmu_control = o.mmu_control.unwrap_or(d.mmu_control);
        d.mmu_table = o.mmu_table.unwrap_or(d.mmu_table);
        d.reset_vector = o.reset_vector.or(d.reset_vector);
        if o.rom_base.is_some() || o.rom_size.is_some() {
            let (base, size) = d.rom.unwrap_or((ROM_BASE, ROM_SIZE));
            d.rom = Some((o.rom_base.unwrap_or(base), o.rom_size.unwrap_or(size)));
        }

        let l = &mut config.loader;
        l.offset = self.loader.offset.unwrap_or(l.offset);
        l.limit = self.loader.limit.unwrap_or(l.limit);

        config
    }
}
