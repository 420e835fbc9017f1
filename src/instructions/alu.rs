//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic
//! - CMP, CPX, CPY: Compare
//! - BIT: Bit test
//!
//! Binary SBC is ADC of the one's complement of the operand and goes through
//! the same adder, so both share one carry and overflow computation. Decimal
//! mode follows the NMOS adder: N and V are always cleared.

use crate::addressing::AddressingMode;
use crate::bus::MemoryBus;
use crate::cpu::Cpu;
use crate::devices::MemoryAccessError;

/// Executes the ADC (Add with Carry) instruction.
pub(crate) fn execute_adc<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    if cpu.flag_d {
        decimal_add(cpu, value);
    } else {
        binary_add(cpu, value);
    }
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
pub(crate) fn execute_sbc<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    if cpu.flag_d {
        decimal_subtract(cpu, value);
    } else {
        binary_add(cpu, !value);
    }
    Ok(())
}

/// 8-bit add with carry.
///
/// Overflow is the carry out of bit 7 XOR the carry out of bit 6, the latter
/// taken from the 7-bit partial sum.
fn binary_add(cpu: &mut Cpu, value: u8) {
    let carry_in = cpu.flag_c as u16;
    let sum = cpu.a as u16 + value as u16 + carry_in;
    let carry6 = ((cpu.a & 0x7F) as u16 + (value & 0x7F) as u16 + carry_in) & 0x80 != 0;

    cpu.flag_c = sum > 0xFF;
    cpu.flag_v = cpu.flag_c ^ carry6;
    cpu.a = sum as u8;
    cpu.set_nz(cpu.a);
}

fn decimal_add(cpu: &mut Cpu, value: u8) {
    let a = cpu.a as u16;
    let m = value as u16;

    let mut lo = (a & 0x0F) + (m & 0x0F) + cpu.flag_c as u16;
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = (a >> 4) + (m >> 4) + (lo > 0x0F) as u16;
    if hi > 0x09 {
        hi += 0x06;
    }

    cpu.a = ((lo & 0x0F) | (hi << 4)) as u8;
    cpu.flag_c = hi > 0x0F;
    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = false;
    cpu.flag_v = false;
}

fn decimal_subtract(cpu: &mut Cpu, value: u8) {
    let a = cpu.a as i16;
    let m = value as i16;
    let borrow = !cpu.flag_c as i16;

    let mut lo = (a & 0x0F) - (m & 0x0F) - borrow;
    if lo & 0x10 != 0 {
        lo -= 0x06;
    }
    let mut hi = (a >> 4) - (m >> 4) - ((lo & 0x10 != 0) as i16);
    if hi & 0x10 != 0 {
        hi -= 0x06;
    }

    cpu.a = (((lo & 0x0F) | (hi << 4)) & 0xFF) as u8;
    cpu.flag_c = (hi & 0xFF) < 0x0F;
    cpu.flag_z = cpu.a == 0;
    cpu.flag_n = false;
    cpu.flag_v = false;
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    cpu.a &= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    cpu.a |= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    cpu.a ^= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Sets C, Z and N as the comparison `register - value`.
///
/// N is bit 7 of the 8-bit difference, not a signed comparison: 0x80 vs 0xFF
/// leaves N set.
fn compare(cpu: &mut Cpu, register: u8, value: u8) {
    cpu.flag_c = register >= value;
    cpu.set_nz(register.wrapping_sub(value));
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    let register = cpu.a;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    let register = cpu.x;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    let register = cpu.y;
    compare(cpu, register, value);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z reflects `A & M`. N and V copy bits 7 and 6 of the operand, except for
/// the 65C02 immediate form, which only touches Z.
pub(crate) fn execute_bit<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let value = cpu.get_operand_value(bus, mode)?;
    cpu.flag_z = cpu.a & value == 0;
    if mode != AddressingMode::Immediate {
        cpu.flag_n = value & 0x80 != 0;
        cpu.flag_v = value & 0x40 != 0;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::CpuBehavior;

    fn cpu_with(a: u8, carry: bool, decimal: bool) -> Cpu {
        let mut cpu = Cpu::new(CpuBehavior::Nmos6502);
        cpu.a = a;
        cpu.flag_c = carry;
        cpu.flag_d = decimal;
        cpu
    }

    #[test]
    fn test_binary_add_overflow() {
        // 0x50 + 0x50 = 0xA0: positive + positive = negative
        let mut cpu = cpu_with(0x50, false, false);
        binary_add(&mut cpu, 0x50);
        assert_eq!(cpu.a, 0xA0);
        assert!(cpu.flag_v);
        assert!(cpu.flag_n);
        assert!(!cpu.flag_c);

        // 0xD0 + 0x90 = 0x160: negative + negative = positive
        let mut cpu = cpu_with(0xD0, false, false);
        binary_add(&mut cpu, 0x90);
        assert_eq!(cpu.a, 0x60);
        assert!(cpu.flag_v);
        assert!(cpu.flag_c);
    }

    #[test]
    fn test_decimal_add() {
        let mut cpu = cpu_with(0x49, false, true);
        decimal_add(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x50);
        assert!(!cpu.flag_c && !cpu.flag_z && !cpu.flag_n && !cpu.flag_v);

        let mut cpu = cpu_with(0x99, false, true);
        decimal_add(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.flag_c);
        assert!(cpu.flag_z);

        let mut cpu = cpu_with(0x58, true, true);
        decimal_add(&mut cpu, 0x46);
        assert_eq!(cpu.a, 0x05);
        assert!(cpu.flag_c);
    }

    #[test]
    fn test_decimal_subtract() {
        let mut cpu = cpu_with(0x50, true, true);
        decimal_subtract(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x49);
        assert!(cpu.flag_c);

        // Borrow out of 00
        let mut cpu = cpu_with(0x00, true, true);
        decimal_subtract(&mut cpu, 0x01);
        assert_eq!(cpu.a, 0x99);
        assert!(!cpu.flag_c);

        // Borrow in
        let mut cpu = cpu_with(0x46, false, true);
        decimal_subtract(&mut cpu, 0x12);
        assert_eq!(cpu.a, 0x33);
        assert!(cpu.flag_c);
    }

    #[test]
    fn test_compare_negative_is_bit_7() {
        let mut cpu = cpu_with(0x80, false, false);
        compare(&mut cpu, 0x80, 0xFF);
        assert!(!cpu.flag_c);
        assert!(!cpu.flag_z);
        assert!(cpu.flag_n); // 0x80 - 0xFF = 0x81

        compare(&mut cpu, 0x10, 0x10);
        assert!(cpu.flag_c && cpu.flag_z && !cpu.flag_n);

        compare(&mut cpu, 0xFF, 0x01);
        assert!(cpu.flag_c);
        assert!(cpu.flag_n); // 0xFE
    }
}
