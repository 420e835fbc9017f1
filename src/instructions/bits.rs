//! # 65C02 Bit Manipulation Instructions
//!
//! - TSB, TRB: test A against memory (Z = `A & M == 0`), then set or reset
//!   the bits of A in memory
//! - RMBn, SMBn: reset or set bit n of a zero-page byte, no flags
//! - BBRn, BBSn: branch if bit n of a zero-page byte is reset or set
//!
//! The bit number comes from the opcode's high nibble.

use crate::addressing::{rel_address, AddressingMode};
use crate::bus::MemoryBus;
use crate::cpu::Cpu;
use crate::devices::MemoryAccessError;

/// Executes the TSB (Test and Set Bits) instruction.
pub(crate) fn execute_tsb<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, mode, |cpu, value| {
        cpu.flag_z = cpu.a & value == 0;
        value | cpu.a
    })
}

/// Executes the TRB (Test and Reset Bits) instruction.
pub(crate) fn execute_trb<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, mode, |cpu, value| {
        cpu.flag_z = cpu.a & value == 0;
        value & !cpu.a
    })
}

/// Executes RMBn (Reset Memory Bit `bit`).
pub(crate) fn execute_rmb<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    bit: u8,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, AddressingMode::ZeroPage, |_, value| value & !(1 << bit))
}

/// Executes SMBn (Set Memory Bit `bit`).
pub(crate) fn execute_smb<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    bit: u8,
) -> Result<(), MemoryAccessError> {
    cpu.modify(bus, AddressingMode::ZeroPage, |_, value| value | (1 << bit))
}

/// Executes BBRn (Branch on Bit `bit` Reset).
pub(crate) fn execute_bbr<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    bit: u8,
) -> Result<(), MemoryAccessError> {
    let value = bus.read(cpu.operands[0] as u16)?;
    if value & (1 << bit) == 0 {
        cpu.pc = rel_address(cpu.pc, cpu.operands[1]);
    }
    Ok(())
}

/// Executes BBSn (Branch on Bit `bit` Set).
pub(crate) fn execute_bbs<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    bit: u8,
) -> Result<(), MemoryAccessError> {
    let value = bus.read(cpu.operands[0] as u16)?;
    if value & (1 << bit) != 0 {
        cpu.pc = rel_address(cpu.pc, cpu.operands[1]);
    }
    Ok(())
}
