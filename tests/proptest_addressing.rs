//! Property-based tests for addressing mode calculations.
//!
//! These tests verify effective addresses through the CPU, including
//! zero-page wraparound, 16-bit wraparound of absolute indexing and signed
//! branch offsets.

use proptest::prelude::*;
use sim6502::addressing::{rel_address, x_address, zpx_address, zpy_address};
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

// ========== Zero Page ==========

proptest! {
    /// Property: indexed zero-page addresses never leave page zero
    #[test]
    fn prop_zero_page_index_stays_in_page_zero(zp in any::<u8>(), index in any::<u8>()) {
        prop_assert!(zpx_address(zp, index) <= 0x00FF);
        prop_assert!(zpy_address(zp, index) <= 0x00FF);
        prop_assert_eq!(zpx_address(zp, index), ((zp as u16 + index as u16) & 0xFF));
    }

    /// Property: LDA zp,X reads the wrapped page-zero byte
    #[test]
    fn prop_lda_zero_page_x(zp in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let (mut cpu, mut bus) = setup_cpu();
        let target = zpx_address(zp, x);
        bus.write(target, value).unwrap();
        bus.load(0x8000, &[0xB5, zp]).unwrap();
        cpu.set_x(x);

        cpu.step(&mut bus).unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_z(), value == 0);
        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
    }

    /// Property: the (zp,X) pointer is fetched from page zero, wrapping
    #[test]
    fn prop_indexed_indirect_pointer_wraps(zp in any::<u8>(), x in any::<u8>(), page in 0x10u8..0x7F) {
        let (mut cpu, mut bus) = setup_cpu();
        let ptr = zp.wrapping_add(x);
        bus.write(ptr as u16, 0x44).unwrap();
        bus.write(ptr.wrapping_add(1) as u16, page).unwrap();
        let target = ((page as u16) << 8) | 0x44;
        bus.write(target, 0xA5).unwrap();
        bus.load(0x8000, &[0xA1, zp]).unwrap();
        cpu.set_x(x);

        cpu.step(&mut bus).unwrap();

        prop_assert_eq!(cpu.a(), 0xA5);
    }
}

// ========== Absolute ==========

proptest! {
    /// Property: absolute,X wraps at 16 bits
    #[test]
    fn prop_absolute_x_wraps(base in any::<u16>(), x in any::<u8>()) {
        let [lo, hi] = base.to_le_bytes();
        prop_assert_eq!(x_address(lo, hi, x), base.wrapping_add(x as u16));
    }

    /// Property: STA abs,Y stores exactly where the index points
    #[test]
    fn prop_sta_absolute_y(base in 0x0200u16..0x7000, y in any::<u8>(), value in any::<u8>()) {
        let (mut cpu, mut bus) = setup_cpu();
        let [lo, hi] = base.to_le_bytes();
        bus.load(0x8000, &[0x99, lo, hi]).unwrap();
        cpu.set_a(value);
        cpu.set_y(y);

        cpu.step(&mut bus).unwrap();

        prop_assert_eq!(bus.peek(base + y as u16).unwrap(), value);
    }
}

// ========== Relative ==========

proptest! {
    /// Property: branch offsets are signed bytes from the next instruction
    #[test]
    fn prop_rel_address_signed(pc in any::<u16>(), offset in any::<u8>()) {
        let target = rel_address(pc, offset);
        let expected = (pc as i32 + offset as i8 as i32).rem_euclid(0x10000) as u16;
        prop_assert_eq!(target, expected);
    }

    /// Property: a taken BEQ lands on rel_address(pc + 2, offset)
    #[test]
    fn prop_taken_branch_target(start in 0x0100u16..0x7F00, offset in any::<u8>()) {
        let (mut cpu, mut bus) = setup_cpu();
        bus.load(start, &[0xF0, offset]).unwrap();
        cpu.set_pc(start);
        cpu.set_flag_z(true);

        cpu.step(&mut bus).unwrap();

        prop_assert_eq!(cpu.pc(), rel_address(start + 2, offset));
        prop_assert_eq!(cpu.cycles(), 2);
    }
}
