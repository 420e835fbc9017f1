//! ACIA serial adapter device.
//!
//! One core (receive/transmit FIFOs, interrupt flags, baud-rate throttling)
//! behind two register layouts:
//!
//! ## MOS 6551 (4 registers)
//!
//! | Offset | Read | Write |
//! |--------|------|-------|
//! | 0 | Receive data | Transmit data |
//! | 1 | Status | Programmed reset |
//! | 2 | Command | Command |
//! | 3 | Control | Control |
//!
//! Status bits: 7 IRQ, 4 TDRE, 3 RDRF, 2 overrun.
//! Command bits: 0 DTR (receiver and interrupts enabled), 1 receive IRQ
//! *disable*, 3-2 transmit control (`01` = transmit IRQ enabled).
//! Control bits 3-0 select the baud rate from [`BAUD_RATES_6551`].
//!
//! ## Motorola 6850 (2 registers)
//!
//! | Offset | Read | Write |
//! |--------|------|-------|
//! | 0 | Status | Control |
//! | 1 | Receive data | Transmit data |
//!
//! Status bits: 7 IRQ, 5 overrun, 1 TDRE, 0 RDRF.
//! Control bits: 7 receive IRQ enable, 6-5 transmit control (`01` = transmit
//! IRQ enabled), 1-0 counter divide (`11` = master reset).
//!
//! ## Two read paths
//!
//! A CPU read of the status register acknowledges the interrupt; a window
//! read through [`Device::peek`] shows the same bits and changes nothing.

use super::fifo::{Fifo, FifoUnderrun};
use super::{Device, MemoryAccessError};
use crate::memory_range::{MemoryRange, MemoryRangeError};
use std::any::Any;
use std::time::{Duration, Instant};

/// Default receive/transmit FIFO capacity in bytes.
pub const DEFAULT_FIFO_CAPACITY: usize = 256;

/// 6551 control-register baud table, indexed by the low nibble.
///
/// Entry 0 is the 16x external clock; its rate is unknown to the device, so
/// it runs unthrottled.
pub const BAUD_RATES_6551: [u32; 16] = [
    0, 50, 75, 110, 135, 150, 300, 600, 1200, 1800, 2400, 3600, 4800, 7200, 9600, 19200,
];

/// Bits per character on the wire: start, 8 data, stop.
const BITS_PER_CHAR: u64 = 10;

/// Register layout of an [`Acia`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AciaModel {
    /// MOS 6551: data, status, command, control.
    Mos6551,
    /// Motorola 6850: status/control, data.
    Mc6850,
}

impl AciaModel {
    /// Number of bytes the layout occupies on the bus.
    pub fn size(self) -> usize {
        match self {
            AciaModel::Mos6551 => 4,
            AciaModel::Mc6850 => 2,
        }
    }

    fn name(self) -> &'static str {
        match self {
            AciaModel::Mos6551 => "ACIA 6551",
            AciaModel::Mc6850 => "ACIA 6850",
        }
    }
}

// 6551 registers
const DATA_6551: u16 = 0;
const STATUS_6551: u16 = 1;
const COMMAND_6551: u16 = 2;
const CONTROL_6551: u16 = 3;

// 6850 registers
const STATUS_CONTROL_6850: u16 = 0;
const DATA_6850: u16 = 1;

/// Asynchronous communications interface adapter.
///
/// The CPU side talks to it through the [`Device`] trait. The host side (a
/// terminal, a test) feeds received bytes with [`rx_write`](Acia::rx_write)
/// and collects transmitted bytes with [`tx_read`](Acia::tx_read).
///
/// # Example
///
/// ```rust
/// use sim6502::{Acia, AciaModel, Device};
///
/// let mut acia = Acia::new(0x8800, AciaModel::Mos6551).unwrap();
///
/// // Terminal sends 'A'
/// acia.rx_write(b'A');
/// assert_eq!(acia.peek(1).unwrap() & 0x08, 0x08); // RDRF
/// assert_eq!(acia.read(0).unwrap(), b'A');
///
/// // Program prints 'B'
/// acia.write(0, b'B').unwrap();
/// assert_eq!(acia.tx_read(), Ok(b'B'));
/// ```
pub struct Acia {
    range: MemoryRange,
    model: AciaModel,

    rx: Fifo,
    tx: Fifo,
    last_rx_byte: u8,

    command: u8,
    control: u8,
    receive_irq_enabled: bool,
    transmit_irq_enabled: bool,

    overrun: bool,
    interrupt: bool,

    baud_rate: u32,
    baud_delay: Duration,
    last_rx_read: Option<Instant>,
    last_tx_write: Option<Instant>,
}

impl Acia {
    /// Creates an ACIA at `base` with [`DEFAULT_FIFO_CAPACITY`] byte FIFOs.
    pub fn new(base: u16, model: AciaModel) -> Result<Self, MemoryRangeError> {
        Self::with_capacity(base, model, DEFAULT_FIFO_CAPACITY)
    }

    /// Creates an ACIA at `base` whose FIFOs hold `capacity` bytes each.
    pub fn with_capacity(
        base: u16,
        model: AciaModel,
        capacity: usize,
    ) -> Result<Self, MemoryRangeError> {
        let range = MemoryRange::with_size(base, model.size())?;
        Ok(Self {
            range,
            model,
            rx: Fifo::new(capacity),
            tx: Fifo::new(capacity),
            last_rx_byte: 0x00,
            command: 0x00,
            control: 0x00,
            receive_irq_enabled: false,
            transmit_irq_enabled: false,
            overrun: false,
            interrupt: false,
            baud_rate: 0,
            baud_delay: Duration::ZERO,
            last_rx_read: None,
            last_tx_write: None,
        })
    }

    pub fn model(&self) -> AciaModel {
        self.model
    }

    /// Current baud rate; 0 means unthrottled.
    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    /// Sets the line rate used to throttle the ready bits. 0 disables
    /// throttling.
    pub fn set_baud_rate(&mut self, rate: u32) {
        self.baud_rate = rate;
        self.baud_delay = if rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(BITS_PER_CHAR * 1_000_000_000 / rate as u64)
        };
    }

    /// Minimum time between accesses before a ready bit is reported.
    pub fn baud_delay(&self) -> Duration {
        self.baud_delay
    }

    pub fn receive_irq_enabled(&self) -> bool {
        self.receive_irq_enabled
    }

    pub fn transmit_irq_enabled(&self) -> bool {
        self.transmit_irq_enabled
    }

    pub fn overrun(&self) -> bool {
        self.overrun
    }

    pub fn interrupt_pending(&self) -> bool {
        self.interrupt
    }

    /// Returns true if the receive FIFO holds unread data.
    pub fn has_rx_char(&self) -> bool {
        !self.rx.is_empty()
    }

    /// Returns true if the program has transmitted data the host has not
    /// collected yet.
    pub fn has_tx_char(&self) -> bool {
        !self.tx.is_empty()
    }

    pub fn rx_len(&self) -> usize {
        self.rx.len()
    }

    pub fn tx_len(&self) -> usize {
        self.tx.len()
    }

    /// Host side: a byte arrives on the serial line.
    ///
    /// Arriving while earlier data is still unread latches the overrun flag.
    /// A byte that finds the FIFO full is dropped.
    pub fn rx_write(&mut self, byte: u8) {
        if !self.rx.is_empty() {
            self.overrun = true;
        }
        if !self.rx.push(byte) {
            log::warn!(
                "{} at {}: receive FIFO full, dropped 0x{:02X}",
                self.model.name(),
                self.range,
                byte
            );
        }
        if self.receive_irq_enabled {
            self.interrupt = true;
        }
    }

    /// Host side: dequeue a received byte without going through the CPU
    /// register path.
    pub fn rx_read(&mut self) -> Result<u8, FifoUnderrun> {
        let byte = self.rx.pop()?;
        self.last_rx_byte = byte;
        Ok(byte)
    }

    /// Host side: collect the oldest transmitted byte.
    ///
    /// Emptying the transmit FIFO raises the interrupt when transmit
    /// interrupts are enabled.
    pub fn tx_read(&mut self) -> Result<u8, FifoUnderrun> {
        let byte = self.tx.pop()?;
        if self.tx.is_empty() && self.transmit_irq_enabled {
            self.interrupt = true;
        }
        Ok(byte)
    }

    /// Host side: collect every transmitted byte, oldest first.
    pub fn drain_tx(&mut self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.tx.len());
        while let Ok(byte) = self.tx_read() {
            out.push(byte);
        }
        out
    }

    /// Status register as the selected layout presents it.
    pub fn status(&self) -> u8 {
        let rx_full = !self.rx.is_empty() && self.elapsed_since(self.last_rx_read);
        let tx_empty = !self.tx.is_full() && self.elapsed_since(self.last_tx_write);

        let mut status = 0;
        match self.model {
            AciaModel::Mos6551 => {
                if self.overrun {
                    status |= 0x04;
                }
                if rx_full {
                    status |= 0x08;
                }
                if tx_empty {
                    status |= 0x10;
                }
            }
            AciaModel::Mc6850 => {
                if rx_full {
                    status |= 0x01;
                }
                if tx_empty {
                    status |= 0x02;
                }
                if self.overrun {
                    status |= 0x20;
                }
            }
        }
        if self.interrupt {
            status |= 0x80;
        }
        status
    }

    fn elapsed_since(&self, last: Option<Instant>) -> bool {
        match last {
            Some(at) if !self.baud_delay.is_zero() => at.elapsed() >= self.baud_delay,
            _ => true,
        }
    }

    // Unthrottled devices never touch the clock.
    fn timestamp(&self) -> Option<Instant> {
        if self.baud_delay.is_zero() {
            None
        } else {
            Some(Instant::now())
        }
    }

    fn cpu_read_data(&mut self) -> u8 {
        match self.rx.pop() {
            Ok(byte) => {
                self.last_rx_byte = byte;
                self.overrun = false;
                self.last_rx_read = self.timestamp();
                byte
            }
            // Empty: the data register still holds the last character.
            Err(FifoUnderrun) => self.last_rx_byte,
        }
    }

    fn cpu_write_data(&mut self, value: u8) {
        if !self.tx.push(value) {
            log::warn!(
                "{} at {}: transmit FIFO full, dropped 0x{:02X}",
                self.model.name(),
                self.range,
                value
            );
        }
        self.last_tx_write = self.timestamp();
    }

    fn set_command_6551(&mut self, value: u8) {
        self.command = value;
        let dtr = value & 0x01 != 0;
        self.receive_irq_enabled = dtr && value & 0x02 == 0;
        self.transmit_irq_enabled = dtr && value & 0x0C == 0x04;
        if !self.receive_irq_enabled && !self.transmit_irq_enabled {
            self.interrupt = false;
        }
    }

    fn set_control_6551(&mut self, value: u8) {
        self.control = value;
        self.set_baud_rate(BAUD_RATES_6551[(value & 0x0F) as usize]);
    }

    fn set_control_6850(&mut self, value: u8) {
        if value & 0x03 == 0x03 {
            self.master_reset();
            return;
        }
        self.control = value;
        self.receive_irq_enabled = value & 0x80 != 0;
        self.transmit_irq_enabled = value & 0x60 == 0x20;
        if !self.receive_irq_enabled && !self.transmit_irq_enabled {
            self.interrupt = false;
        }
    }

    // 6551 write to the status register: clears error and interrupt state and
    // the low five command bits, leaving data and control alone.
    fn programmed_reset(&mut self) {
        self.overrun = false;
        self.interrupt = false;
        self.set_command_6551(self.command & 0xE0);
    }

    fn master_reset(&mut self) {
        self.rx.clear();
        self.tx.clear();
        self.last_rx_byte = 0x00;
        self.command = 0x00;
        self.control = 0x00;
        self.receive_irq_enabled = false;
        self.transmit_irq_enabled = false;
        self.overrun = false;
        self.interrupt = false;
        self.last_rx_read = None;
        self.last_tx_write = None;
        self.set_baud_rate(0);
    }

    fn invalid(&self, offset: u16) -> MemoryAccessError {
        MemoryAccessError::InvalidRegister {
            device: self.model.name().to_string(),
            offset,
        }
    }
}

impl Device for Acia {
    fn range(&self) -> MemoryRange {
        self.range
    }

    fn name(&self) -> &str {
        self.model.name()
    }

    fn read(&mut self, offset: u16) -> Result<u8, MemoryAccessError> {
        match (self.model, offset) {
            (AciaModel::Mos6551, DATA_6551) | (AciaModel::Mc6850, DATA_6850) => {
                Ok(self.cpu_read_data())
            }
            (AciaModel::Mos6551, STATUS_6551) | (AciaModel::Mc6850, STATUS_CONTROL_6850) => {
                let status = self.status();
                self.interrupt = false;
                Ok(status)
            }
            (AciaModel::Mos6551, COMMAND_6551) => Ok(self.command),
            (AciaModel::Mos6551, CONTROL_6551) => Ok(self.control),
            _ => Err(self.invalid(offset)),
        }
    }

    fn peek(&self, offset: u16) -> Result<u8, MemoryAccessError> {
        match (self.model, offset) {
            (AciaModel::Mos6551, DATA_6551) | (AciaModel::Mc6850, DATA_6850) => {
                Ok(self.rx.peek().unwrap_or(self.last_rx_byte))
            }
            (AciaModel::Mos6551, STATUS_6551) | (AciaModel::Mc6850, STATUS_CONTROL_6850) => {
                Ok(self.status())
            }
            (AciaModel::Mos6551, COMMAND_6551) => Ok(self.command),
            (AciaModel::Mos6551, CONTROL_6551) => Ok(self.control),
            _ => Err(self.invalid(offset)),
        }
    }

    fn write(&mut self, offset: u16, value: u8) -> Result<(), MemoryAccessError> {
        match (self.model, offset) {
            (AciaModel::Mos6551, DATA_6551) | (AciaModel::Mc6850, DATA_6850) => {
                self.cpu_write_data(value)
            }
            (AciaModel::Mos6551, STATUS_6551) => self.programmed_reset(),
            (AciaModel::Mos6551, COMMAND_6551) => self.set_command_6551(value),
            (AciaModel::Mos6551, CONTROL_6551) => self.set_control_6551(value),
            (AciaModel::Mc6850, STATUS_CONTROL_6850) => self.set_control_6850(value),
            _ => return Err(self.invalid(offset)),
        }
        Ok(())
    }

    fn irq_pending(&self) -> bool {
        self.interrupt
    }

    fn reset(&mut self) {
        self.master_reset();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
