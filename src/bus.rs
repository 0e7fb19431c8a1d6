//! Memory bus for the CPU.
//!
//! The interpreter runs against a single flat 64 KiB address space with no
//! banking or mirroring: zero page ($0000–$00FF) and the stack page
//! ($0100–$01FF) are plain regions of the same buffer.

use thiserror::Error;

/// Size of the 6502 address space.
pub const MEMORY_SIZE: usize = 0x10000;

/// Trait for memory access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Little-endian word at `addr`, high byte from `addr + 1` (16-bit wrap).
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// A program image that does not fit the address space.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("{len} bytes at ${base:04X} run past the end of the 64 KiB address space")]
    OutOfRange { base: u16, len: usize },
}

/// Flat 64 KiB RAM.
pub struct Memory {
    data: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Zero-filled memory.
    pub fn new() -> Self {
        Self {
            data: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Copy `program` verbatim to `base..base + len`. Nothing is written if
    /// the image would run past $FFFF.
    pub fn load(&mut self, base: u16, program: &[u8]) -> Result<(), LoadError> {
        let start = base as usize;
        let end = start + program.len();
        if end > MEMORY_SIZE {
            return Err(LoadError::OutOfRange {
                base,
                len: program.len(),
            });
        }
        self.data[start..end].copy_from_slice(program);
        Ok(())
    }

    /// Whole address space, for inspection.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Address of stack slot `sp`: always inside page $01.
pub const fn stack_address(sp: u8) -> u16 {
    0x0100 | sp as u16
}

/// `base + index` wrapped inside page $00.
pub const fn zero_page_address(base: u8, index: u8) -> u16 {
    base.wrapping_add(index) as u16
}

impl Bus for Memory {
    fn read(&mut self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.data[addr as usize] = data;
    }
}
