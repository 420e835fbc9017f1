//! Tests for the ADC (Add with Carry) and SBC (Subtract with Carry)
//! instructions.
//!
//! Tests cover:
//! - Binary addition and subtraction with carry in and out
//! - Signed overflow detection
//! - Decimal mode (BCD) on both instructions
//! - Addressing modes that read memory

use sim6502::{Bus, Cpu, CpuBehavior, Memory, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000 over 64 KB RAM
fn setup_cpu() -> (Cpu, Bus) {
    let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
    bus.add_device(Box::new(Memory::ram(0x0000, 0x10000).unwrap()))
        .unwrap();
    bus.load(0xFFFC, &[0x00, 0x80]).unwrap();
    let mut cpu = Cpu::new(CpuBehavior::Nmos6502);
    cpu.reset(&mut bus).unwrap();
    (cpu, bus)
}

/// Runs one `opcode #operand` with the given accumulator and carry.
fn run_immediate(opcode: u8, a: u8, operand: u8, carry: bool, decimal: bool) -> Cpu {
    let (mut cpu, mut bus) = setup_cpu();
    bus.load(0x8000, &[opcode, operand]).unwrap();
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.set_flag_d(decimal);
    cpu.step(&mut bus).unwrap();
    cpu
}

// ========== Binary ADC ==========

#[test]
fn test_adc_immediate_basic() {
    let cpu = run_immediate(0x69, 0x10, 0x05, false, false);

    assert_eq!(cpu.a(), 0x15);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_adc_carry_in() {
    let cpu = run_immediate(0x69, 0x10, 0x05, true, false);
    assert_eq!(cpu.a(), 0x16);
}

#[test]
fn test_adc_carry_out_and_zero() {
    let cpu = run_immediate(0x69, 0xFF, 0x01, false, false);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_positive_overflow() {
    // 0x7F + 0x01 = 0x80: two positives make a negative
    let cpu = run_immediate(0x69, 0x7F, 0x01, false, false);

    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_negative_overflow() {
    // 0x80 + 0xFF = 0x17F: two negatives make a positive
    let cpu = run_immediate(0x69, 0x80, 0xFF, false, false);

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_mixed_signs_never_overflow() {
    let cpu = run_immediate(0x69, 0x50, 0xD0, false, false);

    assert_eq!(cpu.a(), 0x20);
    assert!(!cpu.flag_v());
    assert!(cpu.flag_c());
}

#[test]
fn test_adc_zero_page_x_wraps() {
    let (mut cpu, mut bus) = setup_cpu();
    bus.write(0x007F, 0x22).unwrap();
    bus.load(0x8000, &[0x75, 0x80]).unwrap(); // ADC $80,X
    cpu.set_x(0xFF);
    cpu.set_a(0x01);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.a(), 0x23);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_adc_indirect_indexed_y() {
    let (mut cpu, mut bus) = setup_cpu();
    bus.load(0x0040, &[0x00, 0x30]).unwrap();
    bus.write(0x3010, 0x05).unwrap();
    bus.load(0x8000, &[0x71, 0x40]).unwrap(); // ADC ($40),Y
    cpu.set_y(0x10);
    cpu.set_a(0x01);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.a(), 0x06);
}

// ========== Binary SBC ==========

#[test]
fn test_sbc_basic() {
    let cpu = run_immediate(0xE9, 0x10, 0x05, true, false);

    assert_eq!(cpu.a(), 0x0B);
    assert!(cpu.flag_c()); // no borrow
    assert!(!cpu.flag_v());
}

#[test]
fn test_sbc_borrow_in() {
    let cpu = run_immediate(0xE9, 0x10, 0x05, false, false);
    assert_eq!(cpu.a(), 0x0A);
}

#[test]
fn test_sbc_borrow_out() {
    let cpu = run_immediate(0xE9, 0x05, 0x10, true, false);

    assert_eq!(cpu.a(), 0xF5);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_sbc_overflow() {
    // 0x80 - 0x01 = 0x7F: negative minus positive gives positive
    let cpu = run_immediate(0xE9, 0x80, 0x01, true, false);

    assert_eq!(cpu.a(), 0x7F);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_matches_adc_of_complement() {
    for &(a, m, c) in &[(0x00, 0x00, false), (0x50, 0xB0, true), (0xFF, 0x7F, false)] {
        let sbc = run_immediate(0xE9, a, m, c, false);
        let adc = run_immediate(0x69, a, !m, c, false);
        assert_eq!(sbc.a(), adc.a());
        assert_eq!(sbc.status(), adc.status());
    }
}

// ========== Decimal Mode ==========

#[test]
fn test_adc_decimal_simple() {
    let cpu = run_immediate(0x69, 0x49, 0x01, false, true);

    assert_eq!(cpu.a(), 0x50);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_adc_decimal_carry_out() {
    let cpu = run_immediate(0x69, 0x58, 0x46, true, true);

    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());
}

#[test]
fn test_adc_decimal_99_plus_1() {
    let cpu = run_immediate(0x69, 0x99, 0x01, false, true);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_decimal_never_sets_n_or_v() {
    // 0x79 + 0x01 = 0x80 in BCD; binary rules would set N and V
    let cpu = run_immediate(0x69, 0x79, 0x01, false, true);

    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}

#[test]
fn test_sbc_decimal() {
    let cpu = run_immediate(0xE9, 0x46, 0x12, true, true);

    assert_eq!(cpu.a(), 0x34);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_borrow() {
    let cpu = run_immediate(0xE9, 0x46, 0x12, false, true);
    assert_eq!(cpu.a(), 0x33);

    let cpu = run_immediate(0xE9, 0x10, 0x20, true, true);
    assert_eq!(cpu.a(), 0x90);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_n());
}
