//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary CPU state, behaviour and memory image on a full 64 KB
//! RAM bus, then executes a few steps. Any panic is a bug; bus faults are
//! impossible with every address mapped, so a returned error is one too.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{Bus, Cpu, CpuBehavior, Memory, MemoryBus};

#[derive(Debug, Arbitrary)]
enum FuzzBehavior {
    Nmos6502,
    NmosWithRorBug,
    NmosWithIndirectJmpBug,
    NmosWithoutIndirectJmpBug,
    Cmos6502,
    Cmos65816,
}

impl From<FuzzBehavior> for CpuBehavior {
    fn from(b: FuzzBehavior) -> Self {
        match b {
            FuzzBehavior::Nmos6502 => CpuBehavior::Nmos6502,
            FuzzBehavior::NmosWithRorBug => CpuBehavior::NmosWithRorBug,
            FuzzBehavior::NmosWithIndirectJmpBug => CpuBehavior::NmosWithIndirectJmpBug,
            FuzzBehavior::NmosWithoutIndirectJmpBug => CpuBehavior::NmosWithoutIndirectJmpBug,
            FuzzBehavior::Cmos6502 => CpuBehavior::Cmos6502,
            FuzzBehavior::Cmos65816 => CpuBehavior::Cmos65816,
        }
    }
}

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,
    behavior: FuzzBehavior,
}

/// Memory regions for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instruction stream)
    instruction_bytes: [u8; 8],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// Region at $4000 for absolute addressing
    main_memory: [u8; 256],
    irq: bool,
    nmi: bool,
}

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
    bus.add_device(Box::new(Memory::ram(0x0000, 0x10000).unwrap()))
        .unwrap();

    bus.load(0x0000, &input.memory.zero_page).unwrap();
    bus.load(0x0100, &input.memory.stack_page).unwrap();
    bus.load(0x4000, &input.memory.main_memory).unwrap();
    bus.load(input.cpu_state.pc, &input.memory.instruction_bytes)
        .unwrap();

    let mut cpu = Cpu::new(input.cpu_state.behavior.into());
    cpu.set_pc(input.cpu_state.pc);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    if input.memory.irq {
        bus.assert_irq();
    }
    if input.memory.nmi {
        bus.assert_nmi();
    }

    for _ in 0..4 {
        let before = cpu.cycles();
        cpu.step(&mut bus).unwrap();
        assert!(cpu.cycles() >= before);
        assert_eq!(cpu.status() & 0x20, 0x20);
        // Step never leaves the bus in an inconsistent state
        assert!(bus.peek(cpu.pc()).is_ok());
    }
});
