//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! - BPL, BMI: on Negative
//! - BVC, BVS: on Overflow
//! - BCC, BCS: on Carry
//! - BNE, BEQ: on Zero
//! - BRA: always (65C02)
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! from the address of the next instruction. Only base cycles are counted;
//! taken-branch and page-crossing penalties are not modelled. No flags are
//! affected.

use crate::addressing::rel_address;
use crate::cpu::Cpu;
use crate::devices::MemoryAccessError;

/// Executes the branch selected by `opcode`.
pub(crate) fn execute_branch(cpu: &mut Cpu, opcode: u8) -> Result<(), MemoryAccessError> {
    let taken = match opcode {
        0x10 => !cpu.flag_n,
        0x30 => cpu.flag_n,
        0x50 => !cpu.flag_v,
        0x70 => cpu.flag_v,
        0x90 => !cpu.flag_c,
        0xB0 => cpu.flag_c,
        0xD0 => !cpu.flag_z,
        0xF0 => cpu.flag_z,
        _ => true, // BRA
    };

    if taken {
        cpu.pc = rel_address(cpu.pc, cpu.operands[0]);
    }
    Ok(())
}
