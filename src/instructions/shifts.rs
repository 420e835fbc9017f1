//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left
//! - ROR: Rotate Right
//!
//! Each works on the accumulator or on memory (read-modify-write). Carry
//! receives the bit shifted out; N and Z follow the result.
//!
//! On the pre-June-1976 NMOS part ROR is broken: it shifts left, fills bit 0
//! with zero and leaves carry alone.

use crate::addressing::AddressingMode;
use crate::bus::MemoryBus;
use crate::cpu::Cpu;
use crate::devices::MemoryAccessError;

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, mode, |cpu, value| {
        cpu.flag_c = value & 0x80 != 0;
        let result = value << 1;
        cpu.set_nz(result);
        result
    })
}

/// Executes the LSR (Logical Shift Right) instruction.
pub(crate) fn execute_lsr<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, mode, |cpu, value| {
        cpu.flag_c = value & 0x01 != 0;
        let result = value >> 1;
        cpu.set_nz(result);
        result
    })
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, mode, |cpu, value| {
        let result = (value << 1) | cpu.flag_c as u8;
        cpu.flag_c = value & 0x80 != 0;
        cpu.set_nz(result);
        result
    })
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    let ror_bug = cpu.behavior.has_ror_bug();
    cpu.modify(bus, mode, |cpu, value| {
        let result = if ror_bug {
            value << 1
        } else {
            let result = (value >> 1) | ((cpu.flag_c as u8) << 7);
            cpu.flag_c = value & 0x01 != 0;
            result
        };
        cpu.set_nz(result);
        result
    })
}
