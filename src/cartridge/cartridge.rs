//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper, etc.), then an optional
//! 512-byte trainer, then PRG ROM, then CHR ROM. Only the PRG ROM reaches the CPU; it is laid out
//! like [NROM](https://www.nesdev.org/wiki/NROM) whatever mapper the header names.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::bus::{LoadError, Memory};

pub const HEADER_SIZE: usize = 16;
pub const TRAINER_SIZE: usize = 512;
pub const PRG_BANK_SIZE: usize = 16 * 1024;
pub const CHR_BANK_SIZE: usize = 8 * 1024;

/// CPU address PRG ROM is mapped at.
pub const PRG_ROM_START: u16 = 0x8000;
/// Second half of the PRG window, where a single 16 KiB bank is mirrored.
pub const PRG_ROM_MIRROR: u16 = 0xC000;

const MAGIC: &[u8; 4] = b"NES\x1A";
const FLAG6_TRAINER: u8 = 1 << 2;

#[derive(Debug, Error)]
pub enum CartridgeError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("iNES image is truncated: expected at least {expected} bytes, found {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("not an iNES image (missing \"NES\\x1A\" magic)")]
    BadMagic,
}

/// PRG ROM plus the header fields worth keeping around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cartridge {
    pub prg_rom: Vec<u8>,
    /// CHR ROM size in 8 KiB banks. Nothing reads CHR data.
    pub chr_banks: u8,
    /// Mapper number from header bytes 6–7.
    pub mapper: u8,
}

impl Cartridge {
    /// Read and parse an iNES file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CartridgeError> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| CartridgeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("read {} bytes from {}", data.len(), path.display());
        Self::from_bytes(&data)
    }

    /// Parse an in-memory iNES image.
    pub fn from_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_SIZE {
            return Err(CartridgeError::TooShort {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }
        if &data[0..4] != MAGIC {
            return Err(CartridgeError::BadMagic);
        }

        let prg_rom_size = data[4] as usize * PRG_BANK_SIZE;
        let chr_banks = data[5];
        // Mapper number: high nibble of byte 6 | high nibble of byte 7.
        let mapper = (data[6] >> 4) | (data[7] & 0xF0);

        let prg_start = if data[6] & FLAG6_TRAINER != 0 {
            HEADER_SIZE + TRAINER_SIZE
        } else {
            HEADER_SIZE
        };
        let prg_end = prg_start + prg_rom_size;
        if data.len() < prg_end {
            return Err(CartridgeError::TooShort {
                expected: prg_end,
                actual: data.len(),
            });
        }

        debug!(
            "iNES: {} KiB PRG, {} KiB CHR, mapper {}",
            prg_rom_size / 1024,
            chr_banks as usize * CHR_BANK_SIZE / 1024,
            mapper
        );
        if mapper != 0 {
            warn!("mapper {mapper} is not supported; PRG ROM will be laid out like NROM");
        }

        Ok(Self {
            prg_rom: data[prg_start..prg_end].to_vec(),
            chr_banks,
            mapper,
        })
    }

    /// Copy PRG ROM to $8000. A single 16 KiB bank is mirrored at $C000 so the
    /// vectors at $FFFA–$FFFF resolve.
    pub fn install(&self, memory: &mut Memory) -> Result<(), LoadError> {
        memory.load(PRG_ROM_START, &self.prg_rom)?;
        if self.prg_rom.len() == PRG_BANK_SIZE {
            memory.load(PRG_ROM_MIRROR, &self.prg_rom)?;
        }
        Ok(())
    }
}
