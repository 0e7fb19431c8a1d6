//! Sixtyfive: a cycle-counting 6502 interpreter for NES programs, written in Rust.
//!
//! Runs the NES CPU's instruction set against a flat 64 KiB memory, as
//! documented on the [NESdev Wiki](https://www.nesdev.org/wiki/CPU).
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – flat 64 KiB memory behind the [`bus::Bus`] trait; [zero page and
//!   stack](https://www.nesdev.org/wiki/CPU_memory_map) helpers
//! - **cartridge** – [iNES](https://www.nesdev.org/wiki/INES) loading, PRG ROM placed like
//!   [NROM](https://www.nesdev.org/wiki/NROM)
//! - **config** – command-line run options
//! - **cpu** – [6502](https://www.nesdev.org/wiki/CPU) / 2A03: official and stable undocumented
//!   opcodes, cycle counts, nestest-style trace

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;

use log::info;
use thiserror::Error;

use crate::{
    bus::{Bus, LoadError, Memory},
    cartridge::cartridge::{Cartridge, CartridgeError},
    config::{ConfigError, Entry, RunConfig},
    cpu::cpu::{CPU, CpuError, RESET_VECTOR},
};

/// Any failure from loading a program to running it.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Cartridge(#[from] CartridgeError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Cpu(#[from] CpuError),
}

/// Build a CPU with `cart` installed and registers set up per `config`.
pub fn boot(cart: &Cartridge, config: &RunConfig) -> Result<CPU<Memory>, Error> {
    let mut memory = Memory::new();
    cart.install(&mut memory)?;

    let mut cpu = CPU::new(memory);
    cpu.pc = match config.entry {
        Entry::Address(addr) => addr,
        Entry::ResetVector => cpu.bus.read_word(RESET_VECTOR),
    };
    cpu.status = config.status;

    info!(
        "booted {} KiB PRG ROM, entry ${:04X}, P=${:02X}",
        cart.prg_rom.len() / 1024,
        cpu.pc,
        cpu.status
    );
    Ok(cpu)
}
