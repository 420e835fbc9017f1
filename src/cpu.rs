//! # CPU State and Execution
//!
//! This module contains the [`Cpu`] struct representing the processor state
//! and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields)
//! - **Instruction register** (IR) plus the operands of the last instruction
//! - **Cycle counter**: u64 monotonically increasing base-cycle count
//!
//! ## Memory
//!
//! The CPU does not own memory. Every method that touches memory borrows a
//! [`MemoryBus`] for the duration of the call, so one driver can own both the
//! CPU and the [`Bus`](crate::Bus) without either referring to the other.
//!
//! ## Execution Model
//!
//! - [`Cpu::step`]: execute one instruction, or enter one pending interrupt
//! - [`Cpu::step_n`]: execute `n` sequential steps
//!
//! Bus faults propagate out of `step` unchanged. An opcode that does not
//! decode on the selected [`CpuBehavior`] is not a fault: it sets the op-trap
//! flag and otherwise behaves as a no-op of its table size.

use crate::addressing::{self, AddressingMode};
use crate::bus::MemoryBus;
use crate::devices::MemoryAccessError;
use crate::disassembler::disassemble_op;
use crate::instructions::{
    alu, bits, branches, control, flags, inc_dec, load_store, shifts, stack, transfer,
};
use crate::opcodes::{is_legal, OPCODE_TABLE};

/// NMI vector (low byte; high byte at +1).
pub const NMI_VECTOR: u16 = 0xFFFA;
/// Reset vector.
pub const RESET_VECTOR: u16 = 0xFFFC;
/// IRQ and BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

pub(crate) const STACK_BASE: u16 = 0x0100;

// Status register bits
pub(crate) const FLAG_C: u8 = 0b0000_0001;
pub(crate) const FLAG_Z: u8 = 0b0000_0010;
pub(crate) const FLAG_I: u8 = 0b0000_0100;
pub(crate) const FLAG_D: u8 = 0b0000_1000;
pub(crate) const FLAG_B: u8 = 0b0001_0000;
pub(crate) const FLAG_UNUSED: u8 = 0b0010_0000;
pub(crate) const FLAG_V: u8 = 0b0100_0000;
pub(crate) const FLAG_N: u8 = 0b1000_0000;

/// Cycles taken by the interrupt entry sequence.
const INTERRUPT_CYCLES: u64 = 7;

/// Silicon variant the CPU emulates.
///
/// The behaviour decides which opcodes decode and which historical bugs are
/// reproduced. It never changes the register layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuBehavior {
    /// Production NMOS 6502, including the indirect JMP page-wrap bug.
    Nmos6502,
    /// Pre-June-1976 NMOS part whose ROR behaves as a zero-filling ASL.
    NmosWithRorBug,
    /// NMOS 6502 with the indirect JMP page-wrap bug.
    #[default]
    NmosWithIndirectJmpBug,
    /// NMOS 6502 with a correct indirect JMP.
    NmosWithoutIndirectJmpBug,
    /// WDC/Rockwell 65C02.
    Cmos6502,
    /// 65C816 in emulation mode. Decodes like the 65C02.
    Cmos65816,
}

impl CpuBehavior {
    /// Returns true for the CMOS parts.
    pub fn is_cmos(self) -> bool {
        matches!(self, CpuBehavior::Cmos6502 | CpuBehavior::Cmos65816)
    }

    /// Returns true if `JMP ($xxFF)` reads its high byte from `$xx00`.
    pub fn has_indirect_jmp_bug(self) -> bool {
        matches!(
            self,
            CpuBehavior::Nmos6502 | CpuBehavior::NmosWithRorBug | CpuBehavior::NmosWithIndirectJmpBug
        )
    }

    /// Returns true if ROR is the broken early-silicon shift.
    pub fn has_ror_bug(self) -> bool {
        self == CpuBehavior::NmosWithRorBug
    }
}

/// 6502-family CPU state and execution context.
///
/// # Examples
///
/// ```
/// use sim6502::{Bus, Cpu, CpuBehavior, Memory, MemoryBus};
///
/// let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
/// bus.add_device(Box::new(Memory::ram(0x0000, 0x10000).unwrap())).unwrap();
/// bus.load(0xFFFC, &[0x00, 0x02]).unwrap(); // reset vector
/// bus.load(0x0200, &[0xA9, 0x42, 0xAA]).unwrap(); // LDA #$42; TAX
///
/// let mut cpu = Cpu::new(CpuBehavior::Nmos6502);
/// cpu.reset(&mut bus).unwrap();
/// assert_eq!(cpu.pc(), 0x0200);
///
/// cpu.step_n(&mut bus, 2).unwrap();
/// assert_eq!(cpu.x(), 0x42);
/// assert_eq!(cpu.cycles(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Cpu {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next byte to fetch)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Instruction register (last fetched opcode)
    pub(crate) ir: u8,

    pub(crate) flag_n: bool,
    pub(crate) flag_v: bool,
    pub(crate) flag_b: bool,
    pub(crate) flag_d: bool,
    pub(crate) flag_i: bool,
    pub(crate) flag_z: bool,
    pub(crate) flag_c: bool,

    pub(crate) behavior: CpuBehavior,

    /// Set when the last step hit an opcode that does not decode
    pub(crate) op_trap: bool,

    /// Address of the last fetched opcode
    pub(crate) instruction_address: u16,

    /// Operand bytes of the last instruction (unused bytes are zero)
    pub(crate) operands: [u8; 2],

    /// Total base cycles executed
    pub(crate) cycles: u64,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(CpuBehavior::default())
    }
}

impl Cpu {
    /// Creates a CPU in the power-on state: registers and flags zero, SP
    /// 0xFF, PC 0x0000.
    ///
    /// Call [`reset`](Cpu::reset) to load PC from the reset vector.
    pub fn new(behavior: CpuBehavior) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            y: 0x00,
            pc: 0x0000,
            sp: 0xFF,
            ir: 0x00,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            behavior,
            op_trap: false,
            instruction_address: 0x0000,
            operands: [0; 2],
            cycles: 0,
        }
    }

    /// Resets the CPU.
    ///
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian)
    /// - SP is set to 0xFF
    /// - A, X, Y and IR are zeroed
    /// - Every status flag is cleared, I included
    /// - The op-trap, the cycle counter and any latched NMI are cleared
    pub fn reset<B: MemoryBus>(&mut self, bus: &mut B) -> Result<(), MemoryAccessError> {
        self.pc = self.read_word(bus, RESET_VECTOR)?;
        self.sp = 0xFF;
        self.a = 0x00;
        self.x = 0x00;
        self.y = 0x00;
        self.ir = 0x00;
        self.set_status(0x00);
        self.op_trap = false;
        self.instruction_address = self.pc;
        self.operands = [0; 2];
        self.cycles = 0;
        bus.take_nmi();
        log::debug!("CPU reset ({:?}), PC=${:04X}", self.behavior, self.pc);
        Ok(())
    }

    /// Executes one step.
    ///
    /// A step is the entry sequence of a pending interrupt (a latched NMI, or
    /// an active IRQ line while I is clear) if there is one, and otherwise
    /// exactly one instruction:
    ///
    /// 1. Record PC as the instruction address and fetch the opcode
    /// 2. Fetch the operand bytes the opcode table declares, advancing PC
    ///    after each (wrapping 0xFFFF to 0x0000)
    /// 3. Clear the op-trap, add the base cycles
    /// 4. Execute, or set the op-trap if the opcode does not decode
    ///
    /// # Errors
    ///
    /// Any bus fault, returned as soon as it happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{Bus, Cpu, CpuBehavior, Memory, MemoryBus};
    ///
    /// let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
    /// bus.add_device(Box::new(Memory::ram(0x0000, 0x8000).unwrap())).unwrap();
    ///
    /// let mut cpu = Cpu::new(CpuBehavior::Nmos6502);
    /// cpu.set_pc(0x0200);
    /// bus.load(0x0200, &[0x8D, 0x00, 0x90]).unwrap(); // STA $9000 (unmapped)
    /// assert!(cpu.step(&mut bus).is_err());
    /// ```
    pub fn step<B: MemoryBus>(&mut self, bus: &mut B) -> Result<(), MemoryAccessError> {
        self.op_trap = false;

        if bus.take_nmi() {
            return self.interrupt(bus, NMI_VECTOR);
        }
        if !self.flag_i && bus.irq_active() {
            return self.interrupt(bus, IRQ_VECTOR);
        }

        self.instruction_address = self.pc;
        let opcode = self.fetch(bus)?;
        self.ir = opcode;

        let metadata = &OPCODE_TABLE[opcode as usize];
        self.operands = [0; 2];
        for i in 0..(metadata.size_bytes as usize - 1) {
            self.operands[i] = self.fetch(bus)?;
        }
        self.cycles += metadata.cycles(self.behavior) as u64;

        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{:04X}  {}",
                self.instruction_address,
                disassemble_op(
                    self.instruction_address,
                    opcode,
                    &self.operands[..metadata.size_bytes as usize - 1],
                    self.behavior
                )
            );
        }

        if !is_legal(opcode, self.behavior) {
            self.op_trap = true;
            return Ok(());
        }

        self.execute(bus, opcode, metadata.addressing_mode)
    }

    /// Executes `n` sequential steps, stopping at the first fault.
    pub fn step_n<B: MemoryBus>(&mut self, bus: &mut B, n: usize) -> Result<(), MemoryAccessError> {
        for _ in 0..n {
            self.step(bus)?;
        }
        Ok(())
    }

    /// Enters the NMI handler now.
    pub fn nmi<B: MemoryBus>(&mut self, bus: &mut B) -> Result<(), MemoryAccessError> {
        self.interrupt(bus, NMI_VECTOR)
    }

    /// Enters the IRQ handler now unless I is set. Returns whether it did.
    pub fn irq<B: MemoryBus>(&mut self, bus: &mut B) -> Result<bool, MemoryAccessError> {
        if self.flag_i {
            return Ok(false);
        }
        self.interrupt(bus, IRQ_VECTOR)?;
        Ok(true)
    }

    /// Reads the top-of-stack byte without moving SP.
    pub fn stack_peek<B: MemoryBus>(&self, bus: &B) -> Result<u8, MemoryAccessError> {
        bus.peek(STACK_BASE | self.sp.wrapping_add(1) as u16)
    }

    /// Disassembles the instruction at PC without side effects.
    pub fn disassemble_next_op<B: MemoryBus>(&self, bus: &B) -> Result<String, MemoryAccessError> {
        let opcode = bus.peek(self.pc)?;
        let size = OPCODE_TABLE[opcode as usize].size_bytes as u16;
        let mut operands = Vec::with_capacity(2);
        for i in 1..size {
            operands.push(bus.peek(self.pc.wrapping_add(i))?);
        }
        Ok(disassemble_op(self.pc, opcode, &operands, self.behavior))
    }

    // ========== Dispatch ==========

    fn execute<B: MemoryBus>(
        &mut self,
        bus: &mut B,
        opcode: u8,
        mode: AddressingMode,
    ) -> Result<(), MemoryAccessError> {
        match opcode {
            // Arithmetic and logic
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 | 0x72 => {
                alu::execute_adc(self, bus, mode)
            }
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 | 0xF2 => {
                alu::execute_sbc(self, bus, mode)
            }
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 | 0x32 => {
                alu::execute_and(self, bus, mode)
            }
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 | 0x12 => {
                alu::execute_ora(self, bus, mode)
            }
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 | 0x52 => {
                alu::execute_eor(self, bus, mode)
            }
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 | 0xD2 => {
                alu::execute_cmp(self, bus, mode)
            }
            0xE0 | 0xE4 | 0xEC => alu::execute_cpx(self, bus, mode),
            0xC0 | 0xC4 | 0xCC => alu::execute_cpy(self, bus, mode),
            0x24 | 0x2C | 0x34 | 0x3C | 0x89 => alu::execute_bit(self, bus, mode),

            // Shifts and rotates
            0x0A | 0x06 | 0x16 | 0x0E | 0x1E => shifts::execute_asl(self, bus, mode),
            0x4A | 0x46 | 0x56 | 0x4E | 0x5E => shifts::execute_lsr(self, bus, mode),
            0x2A | 0x26 | 0x36 | 0x2E | 0x3E => shifts::execute_rol(self, bus, mode),
            0x6A | 0x66 | 0x76 | 0x6E | 0x7E => shifts::execute_ror(self, bus, mode),

            // Increments and decrements
            0x1A | 0xE6 | 0xF6 | 0xEE | 0xFE => inc_dec::execute_inc(self, bus, mode),
            0x3A | 0xC6 | 0xD6 | 0xCE | 0xDE => inc_dec::execute_dec(self, bus, mode),
            0xE8 => inc_dec::execute_inx(self),
            0xC8 => inc_dec::execute_iny(self),
            0xCA => inc_dec::execute_dex(self),
            0x88 => inc_dec::execute_dey(self),

            // Loads and stores
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 | 0xB2 => {
                load_store::execute_lda(self, bus, mode)
            }
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => load_store::execute_ldx(self, bus, mode),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => load_store::execute_ldy(self, bus, mode),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 | 0x92 => {
                load_store::execute_sta(self, bus, mode)
            }
            0x86 | 0x96 | 0x8E => load_store::execute_stx(self, bus, mode),
            0x84 | 0x94 | 0x8C => load_store::execute_sty(self, bus, mode),
            0x64 | 0x74 | 0x9C | 0x9E => load_store::execute_stz(self, bus, mode),

            // Register transfers
            0xAA => transfer::execute_tax(self),
            0xA8 => transfer::execute_tay(self),
            0x8A => transfer::execute_txa(self),
            0x98 => transfer::execute_tya(self),
            0xBA => transfer::execute_tsx(self),
            0x9A => transfer::execute_txs(self),

            // Stack
            0x48 => stack::execute_pha(self, bus),
            0x08 => stack::execute_php(self, bus),
            0x68 => stack::execute_pla(self, bus),
            0x28 => stack::execute_plp(self, bus),
            0xDA => stack::execute_phx(self, bus),
            0x5A => stack::execute_phy(self, bus),
            0xFA => stack::execute_plx(self, bus),
            0x7A => stack::execute_ply(self, bus),

            // Flags
            0x18 | 0x38 | 0x58 | 0x78 | 0xB8 | 0xD8 | 0xF8 => {
                flags::execute_flag(self, opcode);
                Ok(())
            }

            // Branches
            0x10 | 0x30 | 0x50 | 0x70 | 0x90 | 0xB0 | 0xD0 | 0xF0 | 0x80 => {
                branches::execute_branch(self, opcode)
            }

            // Control flow
            0x00 => control::execute_brk(self, bus),
            0x4C | 0x6C | 0x7C => control::execute_jmp(self, bus, mode),
            0x20 => control::execute_jsr(self, bus),
            0x60 => control::execute_rts(self, bus),
            0x40 => control::execute_rti(self, bus),
            0xEA => Ok(()),

            // 65C02 bit manipulation
            0x04 | 0x0C => bits::execute_tsb(self, bus, mode),
            0x14 | 0x1C => bits::execute_trb(self, bus, mode),
            0x07 | 0x17 | 0x27 | 0x37 | 0x47 | 0x57 | 0x67 | 0x77 => {
                bits::execute_rmb(self, bus, opcode >> 4)
            }
            0x87 | 0x97 | 0xA7 | 0xB7 | 0xC7 | 0xD7 | 0xE7 | 0xF7 => {
                bits::execute_smb(self, bus, (opcode >> 4) & 0x07)
            }
            0x0F | 0x1F | 0x2F | 0x3F | 0x4F | 0x5F | 0x6F | 0x7F => {
                bits::execute_bbr(self, bus, opcode >> 4)
            }
            0x8F | 0x9F | 0xAF | 0xBF | 0xCF | 0xDF | 0xEF | 0xFF => {
                bits::execute_bbs(self, bus, (opcode >> 4) & 0x07)
            }

            // Undefined slots never reach dispatch
            0x02 | 0x22 | 0x42 | 0x62 | 0x82 | 0xC2 | 0xE2 | 0x44 | 0x54 | 0xD4 | 0xF4 | 0x5C
            | 0xDC | 0xFC | 0x03 | 0x13 | 0x23 | 0x33 | 0x43 | 0x53 | 0x63 | 0x73 | 0x83
            | 0x93 | 0xA3 | 0xB3 | 0xC3 | 0xD3 | 0xE3 | 0xF3 | 0x0B | 0x1B | 0x2B | 0x3B
            | 0x4B | 0x5B | 0x6B | 0x7B | 0x8B | 0x9B | 0xAB | 0xBB | 0xCB | 0xDB | 0xEB
            | 0xFB => {
                self.op_trap = true;
                Ok(())
            }
        }
    }

    // ========== Bus Helpers ==========

    fn fetch<B: MemoryBus>(&mut self, bus: &mut B) -> Result<u8, MemoryAccessError> {
        let value = bus.read(self.pc)?;
        self.pc = self.pc.wrapping_add(1);
        Ok(value)
    }

    /// Reads a little-endian word at `addr` and `addr + 1`.
    pub(crate) fn read_word<B: MemoryBus>(
        &self,
        bus: &mut B,
        addr: u16,
    ) -> Result<u16, MemoryAccessError> {
        let lo = bus.read(addr)?;
        let hi = bus.read(addr.wrapping_add(1))?;
        Ok(addressing::address(lo, hi))
    }

    /// Reads a pointer from zero page; the high byte wraps to $00.
    fn read_zp_word<B: MemoryBus>(&self, bus: &mut B, zp: u8) -> Result<u16, MemoryAccessError> {
        let lo = bus.read(zp as u16)?;
        let hi = bus.read(zp.wrapping_add(1) as u16)?;
        Ok(addressing::address(lo, hi))
    }

    /// Resolves the effective address of the current instruction.
    ///
    /// Only called for modes that address memory.
    pub(crate) fn get_effective_address<B: MemoryBus>(
        &self,
        bus: &mut B,
        mode: AddressingMode,
    ) -> Result<u16, MemoryAccessError> {
        use AddressingMode::*;
        let [lo, hi] = self.operands;
        let addr = match mode {
            ZeroPage | ZeroPageRelative => lo as u16,
            ZeroPageX => addressing::zpx_address(lo, self.x),
            ZeroPageY => addressing::zpy_address(lo, self.y),
            Absolute => addressing::address(lo, hi),
            AbsoluteX => addressing::x_address(lo, hi, self.x),
            AbsoluteY => addressing::y_address(lo, hi, self.y),
            ZeroPageIndirect => self.read_zp_word(bus, lo)?,
            IndexedIndirectX => self.read_zp_word(bus, lo.wrapping_add(self.x))?,
            IndirectIndexedY => self.read_zp_word(bus, lo)?.wrapping_add(self.y as u16),
            AbsoluteIndirect => {
                let ptr = addressing::address(lo, hi);
                if self.behavior.has_indirect_jmp_bug() && lo == 0xFF {
                    let lo = bus.read(ptr)?;
                    let hi = bus.read(ptr & 0xFF00)?;
                    addressing::address(lo, hi)
                } else {
                    self.read_word(bus, ptr)?
                }
            }
            AbsoluteXIndirect => self.read_word(bus, addressing::x_address(lo, hi, self.x))?,
            Relative => addressing::rel_address(self.pc, lo),
            Accumulator | Immediate | Implied | Null => {
                unreachable!("{:?} has no effective address", mode)
            }
        };
        Ok(addr)
    }

    /// Reads the operand of the current instruction.
    pub(crate) fn get_operand_value<B: MemoryBus>(
        &self,
        bus: &mut B,
        mode: AddressingMode,
    ) -> Result<u8, MemoryAccessError> {
        match mode {
            AddressingMode::Immediate => Ok(self.operands[0]),
            AddressingMode::Accumulator => Ok(self.a),
            _ => {
                let addr = self.get_effective_address(bus, mode)?;
                bus.read(addr)
            }
        }
    }

    /// Read-modify-write on the accumulator or on memory.
    pub(crate) fn modify<B: MemoryBus>(
        &mut self,
        bus: &mut B,
        mode: AddressingMode,
        op: impl FnOnce(&mut Cpu, u8) -> u8,
    ) -> Result<(), MemoryAccessError> {
        if mode == AddressingMode::Accumulator {
            let value = self.a;
            self.a = op(self, value);
        } else {
            let addr = self.get_effective_address(bus, mode)?;
            let value = bus.read(addr)?;
            let result = op(self, value);
            bus.write(addr, result)?;
        }
        Ok(())
    }

    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    // ========== Stack ==========

    pub(crate) fn push<B: MemoryBus>(&mut self, bus: &mut B, value: u8) -> Result<(), MemoryAccessError> {
        bus.write(STACK_BASE | self.sp as u16, value)?;
        self.sp = self.sp.wrapping_sub(1);
        Ok(())
    }

    pub(crate) fn pop<B: MemoryBus>(&mut self, bus: &mut B) -> Result<u8, MemoryAccessError> {
        self.sp = self.sp.wrapping_add(1);
        bus.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes high byte then low byte.
    pub(crate) fn push_word<B: MemoryBus>(&mut self, bus: &mut B, value: u16) -> Result<(), MemoryAccessError> {
        self.push(bus, (value >> 8) as u8)?;
        self.push(bus, value as u8)
    }

    /// Pops low byte then high byte.
    pub(crate) fn pop_word<B: MemoryBus>(&mut self, bus: &mut B) -> Result<u16, MemoryAccessError> {
        let lo = self.pop(bus)?;
        let hi = self.pop(bus)?;
        Ok(addressing::address(lo, hi))
    }

    /// Hardware interrupt entry: push PC and status (B clear), set I, jump
    /// through `vector`.
    fn interrupt<B: MemoryBus>(&mut self, bus: &mut B, vector: u16) -> Result<(), MemoryAccessError> {
        self.push_word(bus, self.pc)?;
        self.push(bus, self.status() & !FLAG_B)?;
        self.flag_i = true;
        if self.behavior.is_cmos() {
            self.flag_d = false;
        }
        self.pc = self.read_word(bus, vector)?;
        self.cycles += INTERRUPT_CYCLES;
        log::trace!("Interrupt via ${:04X} to ${:04X}", vector, self.pc);
        Ok(())
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the last fetched opcode.
    pub fn ir(&self) -> u8 {
        self.ir
    }

    /// Returns the operand bytes of the last instruction.
    pub fn operands(&self) -> [u8; 2] {
        self.operands
    }

    /// Returns the address the last instruction was fetched from.
    pub fn instruction_address(&self) -> u16 {
        self.instruction_address
    }

    /// Returns true if the last step hit an opcode that does not decode.
    pub fn op_trap(&self) -> bool {
        self.op_trap
    }

    pub fn behavior(&self) -> CpuBehavior {
        self.behavior
    }

    /// Returns the total number of base cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Returns the status register as a packed byte.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{Cpu, CpuBehavior};
    ///
    /// let mut cpu = Cpu::new(CpuBehavior::Nmos6502);
    /// cpu.set_status(0xC3);
    /// assert!(cpu.flag_n() && cpu.flag_v() && cpu.flag_z() && cpu.flag_c());
    /// assert_eq!(cpu.status(), 0xE3);
    /// ```
    pub fn status(&self) -> u8 {
        let mut status = FLAG_UNUSED;
        for (flag, bit) in [
            (self.flag_n, FLAG_N),
            (self.flag_v, FLAG_V),
            (self.flag_b, FLAG_B),
            (self.flag_d, FLAG_D),
            (self.flag_i, FLAG_I),
            (self.flag_z, FLAG_Z),
            (self.flag_c, FLAG_C),
        ] {
            if flag {
                status |= bit;
            }
        }
        status
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Switches the emulated silicon. Takes effect from the next step.
    pub fn set_behavior(&mut self, behavior: CpuBehavior) {
        self.behavior = behavior;
    }

    /// Unpacks a status byte into the flags. Bit 5 is ignored.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & FLAG_N != 0;
        self.flag_v = value & FLAG_V != 0;
        self.flag_b = value & FLAG_B != 0;
        self.flag_d = value & FLAG_D != 0;
        self.flag_i = value & FLAG_I != 0;
        self.flag_z = value & FLAG_Z != 0;
        self.flag_c = value & FLAG_C != 0;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }
}
