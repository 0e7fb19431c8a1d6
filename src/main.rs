//! Interpreter entry point.
//!
//! Loads a cartridge and runs the CPU until BRK, JAM or the instruction limit.
//! Usage: sixtyfive [OPTIONS] path/to/game.nes

use std::env;
use std::error::Error as _;
use std::process::ExitCode;

use ansi_term::Colour::{Blue, Green, Purple, Red, Yellow};
use log::{Level, Log, Metadata, Record, error, info};

use sixtyfive::{
    Error, boot,
    cartridge::cartridge::Cartridge,
    config::{RunConfig, USAGE},
    cpu::cpu::RunSummary,
};

/// Writes log records to stderr with a coloured level tag.
struct ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let tag = match record.level() {
            Level::Error => Red.bold().paint("ERROR"),
            Level::Warn => Yellow.bold().paint("WARN "),
            Level::Info => Green.bold().paint("INFO "),
            Level::Debug => Blue.bold().paint("DEBUG"),
            Level::Trace => Purple.paint("TRACE"),
        };
        eprintln!("{} {}", tag, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn main() -> ExitCode {
    let config = match RunConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}\n\n{}", Red.bold().paint("ERROR"), err, USAGE);
            return ExitCode::from(2);
        }
    };

    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(config.log_level);
    }

    match run(&config) {
        Ok(summary) => {
            if summary.halted {
                info!(
                    "halted at ${:04X} after {} instructions, {} cycles",
                    summary.pc, summary.instructions, summary.cycles
                );
            } else {
                info!(
                    "stopped at ${:04X} after the {} instruction limit, {} cycles",
                    summary.pc, summary.instructions, summary.cycles
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            let mut message = err.to_string();
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RunConfig) -> Result<RunSummary, Error> {
    let cart = Cartridge::load(&config.rom)?;
    let mut cpu = boot(&cart, config)?;
    Ok(cpu.run(config.limit)?)
}
