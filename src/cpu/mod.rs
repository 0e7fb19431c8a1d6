//! 6502 CPU core as found in the NES 2A03.
//!
//! Official instruction set plus the stable undocumented opcodes; decimal
//! mode is not implemented. The CPU talks to memory only through the
//! [`Bus`](crate::bus::Bus) trait.

pub mod addressing;
pub mod cpu;
pub mod flags;
mod instructions;
pub mod opcodes;
