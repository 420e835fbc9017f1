//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX update N and Z from the copied value. TXS does
//! not touch any flag.

use crate::cpu::Cpu;
use crate::devices::MemoryAccessError;

pub(crate) fn execute_tax(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.x = cpu.a;
    cpu.set_nz(cpu.x);
    Ok(())
}

pub(crate) fn execute_tay(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.y = cpu.a;
    cpu.set_nz(cpu.y);
    Ok(())
}

pub(crate) fn execute_txa(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.a = cpu.x;
    cpu.set_nz(cpu.a);
    Ok(())
}

pub(crate) fn execute_tya(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.a = cpu.y;
    cpu.set_nz(cpu.a);
    Ok(())
}

pub(crate) fn execute_tsx(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.x = cpu.sp;
    cpu.set_nz(cpu.x);
    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
pub(crate) fn execute_txs(cpu: &mut Cpu) -> Result<(), MemoryAccessError> {
    cpu.sp = cpu.x;
    Ok(())
}
