//! Run options, parsed from the command line.

use std::path::PathBuf;

use log::LevelFilter;
use thiserror::Error;

use crate::cartridge::cartridge::PRG_ROM_START;
use crate::cpu::cpu::RESET_STATUS;

pub const USAGE: &str = "\
usage: sixtyfive [OPTIONS] <ROM.nes>

options:
  --entry <HEX>      entry PC (default 8000)
  --reset-vector     start from the word at $FFFC instead of --entry
  --status <HEX>     initial processor status (default 24)
  --limit <N>        stop after N instructions
  --trace            log every instruction
  --verbose          debug logging";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no ROM path given")]
    MissingRom,
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("option `{0}` needs a value")]
    MissingValue(&'static str),
    #[error("invalid value `{value}` for `{option}`")]
    InvalidValue { option: &'static str, value: String },
}

/// Where execution starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entry {
    Address(u16),
    /// The word stored at $FFFC.
    ResetVector,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub rom: PathBuf,
    pub entry: Entry,
    pub status: u8,
    pub limit: Option<u64>,
    pub log_level: LevelFilter,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rom: PathBuf::new(),
            entry: Entry::Address(PRG_ROM_START),
            status: RESET_STATUS,
            limit: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl RunConfig {
    /// Parse arguments, program name excluded.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut rom = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--entry" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--entry"))?;
                    config.entry = Entry::Address(parse_hex("--entry", &value)?);
                }
                "--reset-vector" => config.entry = Entry::ResetVector,
                "--status" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--status"))?;
                    let status = parse_hex("--status", &value)?;
                    config.status = u8::try_from(status).map_err(|_| ConfigError::InvalidValue {
                        option: "--status",
                        value,
                    })?;
                }
                "--limit" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--limit"))?;
                    let limit = value.parse().map_err(|_| ConfigError::InvalidValue {
                        option: "--limit",
                        value,
                    })?;
                    config.limit = Some(limit);
                }
                "--trace" => config.log_level = LevelFilter::Trace,
                "--verbose" => config.log_level = config.log_level.max(LevelFilter::Debug),
                option if option.starts_with("--") => {
                    return Err(ConfigError::UnknownOption(arg));
                }
                _ if rom.is_none() => rom = Some(PathBuf::from(arg)),
                _ => return Err(ConfigError::UnexpectedArgument(arg)),
            }
        }

        config.rom = rom.ok_or(ConfigError::MissingRom)?;
        Ok(config)
    }
}

/// 16-bit hex with an optional `$` or `0x` prefix.
fn parse_hex(option: &'static str, value: &str) -> Result<u16, ConfigError> {
    let digits = value
        .strip_prefix('$')
        .or_else(|| value.strip_prefix("0x"))
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    u16::from_str_radix(digits, 16).map_err(|_| ConfigError::InvalidValue {
        option,
        value: value.to_string(),
    })
}
