//! End-to-end runs: iNES image in, halted CPU out.

use std::fs;

use sixtyfive::{
    Error, boot,
    bus::Bus,
    cartridge::cartridge::{Cartridge, CartridgeError, HEADER_SIZE, PRG_BANK_SIZE},
    config::{Entry, RunConfig},
    cpu::cpu::CpuError,
};

/// 16 KiB NROM image with `code` at $8000 and the given reset vector.
fn nrom_image(code: &[(u16, Vec<u8>)], reset: u16) -> Vec<u8> {
    let mut data = vec![b'N', b'E', b'S', 0x1A, 1, 0, 0, 0];
    data.resize(HEADER_SIZE, 0);

    let mut prg = vec![0xEA; PRG_BANK_SIZE];
    for (addr, bytes) in code {
        let offset = (*addr - 0x8000) as usize;
        prg[offset..offset + bytes.len()].copy_from_slice(bytes);
    }
    prg[0x3FFC] = reset as u8;
    prg[0x3FFD] = (reset >> 8) as u8;
    prg[0x3FFE] = 0x00;
    prg[0x3FFF] = 0x00;

    data.extend(prg);
    data
}

fn subroutine_program() -> Vec<u8> {
    nrom_image(
        &[
            // LDA #$10; STA $0200; JSR $8010; BRK
            (0x8000, vec![0xA9, 0x10, 0x8D, 0x00, 0x02, 0x20, 0x10, 0x80, 0x00]),
            // INC $0200; RTS
            (0x8010, vec![0xEE, 0x00, 0x02, 0x60]),
        ],
        0x8000,
    )
}

#[test]
fn runs_subroutine_until_brk() {
    let cart = Cartridge::from_bytes(&subroutine_program()).unwrap();
    let mut cpu = boot(&cart, &RunConfig::default()).unwrap();

    let summary = cpu.run(None).unwrap();

    assert!(summary.halted);
    assert_eq!(summary.instructions, 6);
    assert_eq!(summary.cycles, 2 + 4 + 6 + 6 + 6 + 7);
    assert_eq!(cpu.bus.read(0x0200), 0x11);
    assert_eq!(cpu.a, 0x10);
    // BRK frame: return address $8009, then P with B set.
    assert_eq!(cpu.bus.read(0x01FD), 0x80);
    assert_eq!(cpu.bus.read(0x01FC), 0x09);
    assert_eq!(cpu.bus.read(0x01FB), 0x34);
    assert_eq!(cpu.pc, 0x0000);
}

#[test]
fn reset_vector_entry_starts_in_mirror() {
    let image = nrom_image(&[(0x8100, vec![0xA2, 0x07, 0x00])], 0xC100); // LDX #7; BRK
    let cart = Cartridge::from_bytes(&image).unwrap();
    let config = RunConfig {
        entry: Entry::ResetVector,
        ..RunConfig::default()
    };

    let mut cpu = boot(&cart, &config).unwrap();
    assert_eq!(cpu.pc, 0xC100);

    cpu.run(None).unwrap();
    assert_eq!(cpu.x, 7);
}

#[test]
fn instruction_limit_stops_early() {
    let cart = Cartridge::from_bytes(&nrom_image(&[], 0x8000)).unwrap();
    let config = RunConfig {
        limit: Some(10),
        ..RunConfig::default()
    };
    let mut cpu = boot(&cart, &config).unwrap();

    let summary = cpu.run(config.limit).unwrap();

    assert!(!summary.halted);
    assert_eq!(summary.instructions, 10);
    assert_eq!(summary.pc, 0x800A);
    assert_eq!(summary.cycles, 20);
}

#[test]
fn unknown_opcode_surfaces_as_cpu_error() {
    let image = nrom_image(&[(0x8000, vec![0xA9, 0x01, 0x8B, 0x00])], 0x8000);
    let cart = Cartridge::from_bytes(&image).unwrap();
    let mut cpu = boot(&cart, &RunConfig::default()).unwrap();

    let err: Error = cpu.run(None).unwrap_err().into();

    assert!(matches!(
        err,
        Error::Cpu(CpuError::UnknownOpcode {
            opcode: 0x8B,
            pc: 0x8002
        })
    ));
    assert_eq!(cpu.pc, 0x8002);
    assert_eq!(cpu.cycles, 2);
}

#[test]
fn loads_image_from_disk() {
    let path = std::env::temp_dir().join(format!("sixtyfive-{}.nes", std::process::id()));
    fs::write(&path, subroutine_program()).unwrap();

    let cart = Cartridge::load(&path);
    fs::remove_file(&path).unwrap();

    let cart = cart.unwrap();
    assert_eq!(cart.prg_rom.len(), PRG_BANK_SIZE);
    assert_eq!(cart.mapper, 0);
}

#[test]
fn truncated_file_is_rejected() {
    let mut image = subroutine_program();
    image.truncate(HEADER_SIZE + 100);

    let err = Cartridge::from_bytes(&image).unwrap_err();

    assert!(matches!(
        err,
        CartridgeError::TooShort {
            expected: 16400,
            actual: 116
        }
    ));
}
