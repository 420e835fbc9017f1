//! Tests for the branch instructions and flag instructions.
//!
//! Tests cover:
//! - Every conditional branch, taken and not taken
//! - Backward branches and branches across $0000
//! - BRA on the 65C02, trapped on NMOS
//! - CLC/SEC/CLI/SEI/CLV/CLD/SED

use sim6502::{Bus, Cpu, CpuBehavior, Memory, MemoryBus};

/// Helper function to create a CPU with reset vector at 0x8000 over 64 KB RAM
fn setup_cpu(behavior: CpuBehavior) -> (Cpu, Bus) {
    let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
    bus.add_device(Box::new(Memory::ram(0x0000, 0x10000).unwrap()))
        .unwrap();
    bus.load(0xFFFC, &[0x00, 0x80]).unwrap();
    let mut cpu = Cpu::new(behavior);
    cpu.reset(&mut bus).unwrap();
    (cpu, bus)
}

/// Runs `opcode +$10` at 0x8000 with the given status byte and returns PC.
fn branch_target(opcode: u8, status: u8) -> u16 {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.load(0x8000, &[opcode, 0x10]).unwrap();
    cpu.set_status(status);
    cpu.step(&mut bus).unwrap();
    cpu.pc()
}

// ========== Conditional Branches ==========

#[test]
fn test_conditional_branches() {
    const TAKEN: u16 = 0x8012;
    const NOT_TAKEN: u16 = 0x8002;
    let n = 0x80;
    let v = 0x40;
    let z = 0x02;
    let c = 0x01;

    let cases = [
        (0x10, 0x00, TAKEN, n, NOT_TAKEN), // BPL
        (0x30, n, TAKEN, 0x00, NOT_TAKEN), // BMI
        (0x50, 0x00, TAKEN, v, NOT_TAKEN), // BVC
        (0x70, v, TAKEN, 0x00, NOT_TAKEN), // BVS
        (0x90, 0x00, TAKEN, c, NOT_TAKEN), // BCC
        (0xB0, c, TAKEN, 0x00, NOT_TAKEN), // BCS
        (0xD0, 0x00, TAKEN, z, NOT_TAKEN), // BNE
        (0xF0, z, TAKEN, 0x00, NOT_TAKEN), // BEQ
    ];

    for (opcode, take_status, taken, skip_status, not_taken) in cases {
        assert_eq!(branch_target(opcode, take_status), taken, "0x{:02X}", opcode);
        assert_eq!(branch_target(opcode, skip_status), not_taken, "0x{:02X}", opcode);
    }
}

#[test]
fn test_branch_backward() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    // LDX #$03; loop: DEX; BNE loop
    bus.load(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD]).unwrap();

    cpu.step_n(&mut bus, 1 + 3 * 2).unwrap();
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.pc(), 0x8005);
}

#[test]
fn test_branch_wraps_address_space() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.load(0x0002, &[0xF0, 0xF0]).unwrap(); // BEQ -16
    cpu.set_pc(0x0002);
    cpu.set_flag_z(true);

    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), 0xFFF4);
}

#[test]
fn test_bra_cmos_only() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Cmos6502);
    bus.load(0x8000, &[0x80, 0x7F]).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), 0x8081);
    assert_eq!(cpu.cycles(), 3);

    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.load(0x8000, &[0x80, 0x7F]).unwrap();
    cpu.step(&mut bus).unwrap();
    assert_eq!(cpu.pc(), 0x8002);
    assert!(cpu.op_trap());
}

// ========== Flag Instructions ==========

#[test]
fn test_flag_instructions() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    // SEC; SED; SEI; CLC; CLD; CLI
    bus.load(0x8000, &[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58]).unwrap();

    cpu.step_n(&mut bus, 3).unwrap();
    assert!(cpu.flag_c() && cpu.flag_d() && cpu.flag_i());
    assert_eq!(cpu.status(), 0x2D);

    cpu.step_n(&mut bus, 3).unwrap();
    assert_eq!(cpu.status(), 0x20);
}

#[test]
fn test_clv() {
    let (mut cpu, mut bus) = setup_cpu(CpuBehavior::Nmos6502);
    bus.write(0x8000, 0xB8).unwrap();
    cpu.set_flag_v(true);
    cpu.set_flag_n(true);

    cpu.step(&mut bus).unwrap();
    assert!(!cpu.flag_v());
    assert!(cpu.flag_n());
}
