//! Integration tests for the ACIA serial adapter on a bus.
//!
//! Tests cover:
//! - Overrun latch and the two status read paths
//! - Receive and transmit interrupts reaching the bus IRQ line
//! - Both register layouts driven by CPU programs
//! - Programmed and bus-wide reset

use sim6502::{Acia, AciaModel, Bus, Cpu, CpuBehavior, Memory, MemoryBus};

const ACIA_BASE: u16 = 0x8000;

fn setup_bus(model: AciaModel) -> Bus {
    let mut bus = Bus::new(0x0000, 0xFFFF).unwrap();
    bus.add_device(Box::new(Memory::ram(0x0000, 0x8000).unwrap()))
        .unwrap();
    bus.add_device(Box::new(Acia::new(ACIA_BASE, model).unwrap()))
        .unwrap();
    bus.add_device(Box::new(Memory::ram(0xC000, 0x4000).unwrap()))
        .unwrap();
    bus
}

fn acia(bus: &mut Bus) -> &mut Acia {
    bus.device_mut::<Acia>(ACIA_BASE).unwrap()
}

// ========== Overrun And Read Paths ==========

#[test]
fn test_overrun_and_window_read() {
    let mut bus = setup_bus(AciaModel::Mos6551);
    bus.write(ACIA_BASE + 2, 0x09).unwrap(); // DTR, receive IRQ enabled

    acia(&mut bus).rx_write(b'a');
    acia(&mut bus).rx_write(b'b');

    // Window read: overrun and IRQ visible, nothing cleared
    let status = bus.peek(ACIA_BASE + 1).unwrap();
    assert_eq!(status & 0x84, 0x84);
    assert_eq!(bus.peek(ACIA_BASE + 1).unwrap(), status);
    assert!(bus.irq_active());
    assert_eq!(bus.peek(ACIA_BASE).unwrap(), b'a');
    assert_eq!(acia(&mut bus).rx_len(), 2);

    // CPU read: same bits reported, interrupt acknowledged
    assert_eq!(bus.read(ACIA_BASE + 1).unwrap(), status);
    assert!(!bus.irq_active());
    assert_eq!(bus.peek(ACIA_BASE + 1).unwrap() & 0x84, 0x04);

    // Overrun stays latched until data is read
    assert_eq!(bus.read(ACIA_BASE).unwrap(), b'a');
    assert_eq!(bus.peek(ACIA_BASE + 1).unwrap() & 0x04, 0x00);
    assert_eq!(bus.read(ACIA_BASE).unwrap(), b'b');
}

#[test]
fn test_overrun_6850_bit() {
    let mut bus = setup_bus(AciaModel::Mc6850);
    acia(&mut bus).rx_write(0x01);
    acia(&mut bus).rx_write(0x02);

    let status = bus.peek(ACIA_BASE).unwrap();
    assert_eq!(status & 0x21, 0x21); // overrun, RDRF
    assert_eq!(status & 0x80, 0x00); // interrupts not enabled
}

#[test]
fn test_empty_receive_is_local() {
    let mut bus = setup_bus(AciaModel::Mos6551);
    assert!(acia(&mut bus).rx_read().is_err());

    // The CPU path does not fault; the data register keeps its last value
    acia(&mut bus).rx_write(0x41);
    assert_eq!(bus.read(ACIA_BASE).unwrap(), 0x41);
    assert_eq!(bus.read(ACIA_BASE).unwrap(), 0x41);
}

// ========== Interrupts ==========

#[test]
fn test_transmit_interrupt_after_drain() {
    let mut bus = setup_bus(AciaModel::Mos6551);
    bus.write(ACIA_BASE + 2, 0x07).unwrap(); // DTR, RX IRQ off, TX IRQ on
    bus.write(ACIA_BASE, b'x').unwrap();
    assert!(!bus.irq_active());

    assert_eq!(acia(&mut bus).tx_read(), Ok(b'x'));
    assert!(bus.irq_active());

    bus.read(ACIA_BASE + 1).unwrap();
    assert!(!bus.irq_active());
}

#[test]
fn test_6850_receive_interrupt() {
    let mut bus = setup_bus(AciaModel::Mc6850);
    bus.write(ACIA_BASE, 0x95).unwrap(); // RX IRQ, /16, 8N1
    acia(&mut bus).rx_write(0x33);
    assert!(bus.irq_active());

    assert_eq!(bus.read(ACIA_BASE + 1).unwrap(), 0x33);
    // Status read acknowledges
    assert_eq!(bus.read(ACIA_BASE).unwrap() & 0x80, 0x80);
    assert!(!bus.irq_active());
}

// ========== CPU Programs ==========

#[test]
fn test_cpu_echo_6551() {
    let mut bus = setup_bus(AciaModel::Mos6551);
    // loop: LDA $8001; AND #$08; BEQ loop; LDA $8000; STA $8000; JMP loop
    bus.load(
        0x0200,
        &[
            0xAD, 0x01, 0x80, 0x29, 0x08, 0xF0, 0xF9, 0xAD, 0x00, 0x80, 0x8D, 0x00, 0x80, 0x4C,
            0x00, 0x02,
        ],
    )
    .unwrap();
    let mut cpu = Cpu::new(CpuBehavior::Nmos6502);
    cpu.set_pc(0x0200);

    // Nothing waiting: the poll loop spins
    cpu.step_n(&mut bus, 6).unwrap();
    assert_eq!(cpu.pc(), 0x0200);

    for &byte in b"ok" {
        acia(&mut bus).rx_write(byte);
    }
    cpu.step_n(&mut bus, 2 * 6).unwrap();
    assert_eq!(acia(&mut bus).drain_tx(), b"ok".to_vec());
}

#[test]
fn test_cpu_transmit_6850() {
    let mut bus = setup_bus(AciaModel::Mc6850);
    // LDA #$03; STA $8000 (master reset); LDA #$15; STA $8000; LDA #'Q; STA $8001
    bus.load(
        0x0200,
        &[
            0xA9, 0x03, 0x8D, 0x00, 0x80, 0xA9, 0x15, 0x8D, 0x00, 0x80, 0xA9, 0x51, 0x8D, 0x01,
            0x80,
        ],
    )
    .unwrap();
    let mut cpu = Cpu::new(CpuBehavior::Cmos6502);
    cpu.set_pc(0x0200);

    cpu.step_n(&mut bus, 6).unwrap();
    assert_eq!(acia(&mut bus).tx_read(), Ok(b'Q'));
}

// ========== Reset ==========

#[test]
fn test_programmed_reset_via_status_write() {
    let mut bus = setup_bus(AciaModel::Mos6551);
    bus.write(ACIA_BASE + 2, 0x09).unwrap();
    acia(&mut bus).rx_write(1);
    acia(&mut bus).rx_write(2);
    assert!(bus.irq_active());

    bus.write(ACIA_BASE + 1, 0x00).unwrap();
    assert!(!bus.irq_active());
    assert_eq!(bus.peek(ACIA_BASE + 1).unwrap() & 0x04, 0x00);
    assert_eq!(bus.peek(ACIA_BASE + 2).unwrap(), 0x00);
    // Received data survives
    assert_eq!(acia(&mut bus).rx_len(), 2);
}

#[test]
fn test_bus_reset_clears_acia() {
    let mut bus = setup_bus(AciaModel::Mos6551);
    bus.write(ACIA_BASE + 2, 0x09).unwrap();
    bus.write(ACIA_BASE, b'z').unwrap();
    acia(&mut bus).rx_write(b'y');

    bus.reset();
    let device = acia(&mut bus);
    assert!(!device.has_rx_char());
    assert!(!device.has_tx_char());
    assert!(!device.receive_irq_enabled());
    assert!(!bus.irq_active());
}
