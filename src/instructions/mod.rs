//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 6502 and 65C02
//! instructions, organized by category. Each instruction is a standalone
//! function taking the CPU, the bus and (where it matters) the addressing
//! mode. By the time one runs, [`Cpu::step`](crate::Cpu::step) has already
//! fetched the operands, advanced PC past the instruction and charged its
//! base cycles.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **bits**: 65C02 bit manipulation (TSB, TRB, RMB, SMB, BBR, BBS)
//! - **branches**: Conditional branches and BRA
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP, PHX, PHY, PLX, PLY)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod bits;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;
