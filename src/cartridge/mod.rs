//! NES cartridge loading.
//!
//! - **cartridge**: parses iNES (.nes) images and places PRG-ROM in the CPU
//!   address space the way an NROM board wires it.

pub mod cartridge;
