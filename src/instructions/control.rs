//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - BRK: Force Interrupt
//! - JMP: Jump (absolute, indirect, and 65C02 absolute-indexed-indirect)
//! - JSR, RTS: Subroutine call and return
//! - RTI: Return from Interrupt
//!
//! BRK is a software interrupt that:
//! 1. Pushes the BRK address + 2 to the stack (high byte first, then low byte)
//! 2. Pushes processor status to stack with B flag set
//! 3. Sets the I (interrupt disable) flag (65C02 also clears D)
//! 4. Loads PC from IRQ vector at $FFFE/F
//!
//! BRK is only honoured while I is clear; with I set it is a one-byte no-op.

use crate::addressing::AddressingMode;
use crate::bus::MemoryBus;
use crate::cpu::{Cpu, FLAG_B, IRQ_VECTOR};
use crate::devices::MemoryAccessError;

/// Executes the BRK (Force Interrupt) instruction.
pub(crate) fn execute_brk<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    if cpu.flag_i {
        return Ok(());
    }

    // The byte after BRK is a padding byte skipped on return
    let return_address = cpu.instruction_address.wrapping_add(2);
    cpu.push_word(bus, return_address)?;
    cpu.push(bus, cpu.status() | FLAG_B)?;

    cpu.flag_i = true;
    if cpu.behavior.is_cmos() {
        cpu.flag_d = false;
    }
    cpu.pc = cpu.read_word(bus, IRQ_VECTOR)?;
    Ok(())
}

/// Executes the JMP (Jump) instruction.
///
/// The indirect form reproduces the NMOS page-wrap bug when the behaviour
/// has it: `JMP ($34FF)` takes its high byte from `$3400`.
pub(crate) fn execute_jmp<B: MemoryBus>(
    cpu: &mut Cpu,
    bus: &mut B,
    mode: AddressingMode,
) -> Result<(), MemoryAccessError> {
    cpu.pc = cpu.get_effective_address(bus, mode)?;
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR, so RTS must add one.
pub(crate) fn execute_jsr<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    let target = cpu.get_effective_address(bus, AddressingMode::Absolute)?;
    cpu.push_word(bus, cpu.pc.wrapping_sub(1))?;
    cpu.pc = target;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    cpu.pc = cpu.pop_word(bus)?.wrapping_add(1);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pops status, then PC low and high. Unlike RTS the address is used as is.
pub(crate) fn execute_rti<B: MemoryBus>(cpu: &mut Cpu, bus: &mut B) -> Result<(), MemoryAccessError> {
    let status = cpu.pop(bus)?;
    cpu.set_status(status);
    cpu.pc = cpu.pop_word(bus)?;
    Ok(())
}
