//! Tests for the compare and logic instructions.
//!
//! Tests cover:
//! - CMP, CPX, CPY carry/zero/negative semantics
//! - N taken from bit 7 of the 8-bit difference
//! - AND, ORA, EOR
//! - BIT on memory and the 65C02 immediate form

use sim6502::{Bus, Cpu, CpuBehavior, Memory, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000 over 64 KB RAM
fn setup_cpu(behavior: CpuBehavior) -> (Cpu, Bus) {
    let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
    bus.add_device(Box::new(Memory::ram(0x0000, 0x10000).unwrap()))
        .unwrap();
    bus.load(0xFFFC, &[0x00, 0x80]).unwrap();
    let mut cpu = Cpu::new(behavior);
    cpu.reset(&mut bus).unwrap();
    (cpu, bus)
}

// ========== Compare ==========

#[test]
fn test_cmp_equal() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.load(0x8000, &[0xC9, 0x42]).unwrap();
    cpu.set_a(0x42);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn test_cmp_greater_and_less() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.load(0x8000, &[0xC9, 0x10, 0xC9, 0x50]).unwrap();
    cpu.set_a(0x30);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n()); // 0x20

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n()); // 0xE0
}

#[test]
fn test_cmp_negative_from_difference() {
    // 0x80 - 0xFF = 0x81; the register is smaller yet N is set
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.load(0x8000, &[0xC9, 0xFF]).unwrap();
    cpu.set_a(0x80);

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
}

#[test]
fn test_cmp_absolute() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.write(0x1234, 0x01).unwrap();
    bus.load(0x8000, &[0xCD, 0x34, 0x12]).unwrap();
    cpu.set_a(0x01);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_cpx_and_cpy() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.write(0x0010, 0x05).unwrap();
    bus.load(0x8000, &[0xE4, 0x10, 0xC0, 0x06]).unwrap(); // CPX $10; CPY #$06
    cpu.set_x(0x05);
    cpu.set_y(0x05);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_cmp_zero_page_indirect_cmos() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Cmos6502);
    bus.load(0x0020, &[0x00, 0x40]).unwrap();
    bus.write(0x4000, 0x99).unwrap();
    bus.load(0x8000, &[0xD2, 0x20]).unwrap(); // CMP ($20)
    cpu.set_a(0x99);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.flag_z());
    assert!(!cpu.op_trap());
}

// ========== Logic ==========

#[test]
fn test_and_ora_eor() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    // AND #$0F; ORA #$80; EOR #$FF
    bus.load(0x8000, &[0x29, 0x0F, 0x09, 0x80, 0x49, 0xFF]).unwrap();
    cpu.set_a(0xF3);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.a(), 0x03);
    assert!(!cpu.flag_n());

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.a(), 0x83);
    assert!(cpu.flag_n());

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.a(), 0x7C);
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_and_zero_result() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.load(0x8000, &[0x29, 0x00]).unwrap();
    cpu.set_a(0xFF);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_bit_memory_copies_n_and_v() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.write(0x0040, 0xC0).unwrap();
    bus.load(0x8000, &[0x24, 0x40]).unwrap(); // BIT $40
    cpu.set_a(0x01);

    cpu.step(&mut bus).unwrap();
    assert!(cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_bit_immediate_only_touches_z() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Cmos6502);
    bus.load(0x8000, &[0x89, 0xC0]).unwrap(); // BIT #$C0
    cpu.set_a(0x40);

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}
