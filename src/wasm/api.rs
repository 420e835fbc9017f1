//! WASM API for the simulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! memory access and disassembly. Bytes the program transmits through the
//! ACIA are forwarded to a JS callback after every step.

use crate::disassembler::formatter::format_instruction;
use crate::{disassemble, CpuBehavior, MachineConfig, MemoryBus, Simulator};
use std::sync::atomic::AtomicBool;
use wasm_bindgen::prelude::*;

/// Program load address used until `load_program` says otherwise.
const DEFAULT_PROGRAM_START: u16 = 0x0600;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl<E: std::error::Error> From<E> for JsError {
    fn from(e: E) -> Self {
        JsError::new(&e.to_string())
    }
}

/// One disassembled instruction
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator {
    sim: Simulator,
    on_transmit: js_sys::Function,
    program_start: u16,
    program_end: u16,
}

#[wasm_bindgen]
impl Emulator {
    /// Create an emulator with the default memory map. `on_transmit` is
    /// called with a one-character string for every byte the program sends.
    ///
    /// `cmos` selects the 65C02 instead of the NMOS part.
    #[wasm_bindgen(constructor)]
    pub fn new(on_transmit: js_sys::Function, cmos: bool) -> Result<Emulator, JsError> {
        let behavior = if cmos {
            CpuBehavior::Cmos6502
        } else {
            CpuBehavior::default()
        };
        let config = MachineConfig {
            behavior,
            ..MachineConfig::default()
        };
        let mut sim = Simulator::new(config)?;

        // Reset vector at the top of ROM points at the program area
        sim.load_rom(&[
            0x00,
            0x00,
            DEFAULT_PROGRAM_START as u8,
            (DEFAULT_PROGRAM_START >> 8) as u8,
            0x00,
            0x00,
        ])?;
        sim.reset()?;

        Ok(Emulator {
            sim,
            on_transmit,
            program_start: DEFAULT_PROGRAM_START,
            program_end: DEFAULT_PROGRAM_START,
        })
    }

    /// Execute a single step
    pub fn step(&mut self) -> Result<(), JsError> {
        let result = self.sim.step();
        self.flush_output()?;
        result.map_err(JsError::from)
    }

    /// Execute up to `steps` steps and return how many ran
    pub fn run(&mut self, steps: u32) -> Result<u32, JsError> {
        let stop = AtomicBool::new(false);
        let result = self.sim.run(steps as usize, &stop);
        self.flush_output()?;
        Ok(result? as u32)
    }

    /// Reset devices and CPU. RAM contents survive.
    pub fn reset(&mut self) -> Result<(), JsError> {
        self.sim.reset()?;
        Ok(())
    }

    /// Install a ROM image ending at $FFFF
    pub fn load_rom(&mut self, image: &[u8]) -> Result<(), JsError> {
        self.sim.load_rom(image)?;
        Ok(())
    }

    /// Load a program into memory and set PC
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) -> Result<(), JsError> {
        self.sim.load_program(start_addr, program)?;
        self.program_start = start_addr;
        self.program_end = start_addr.wrapping_add(program.len() as u16);
        Ok(())
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.sim.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.sim.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.sim.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.sim.cpu().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.sim.cpu().sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.sim.cpu().status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.sim.cpu().cycles() as f64 // Convert u64 to f64 for JavaScript
    }

    #[wasm_bindgen(getter)]
    pub fn op_trap(&self) -> bool {
        self.sim.cpu().op_trap()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.sim.cpu_mut().set_pc(addr);
    }

    // Serial and interrupt lines

    /// Receive a character from the terminal into the ACIA
    pub fn receive_char(&mut self, byte: u8) -> Result<(), JsError> {
        self.sim.receive(byte)?;
        Ok(())
    }

    pub fn assert_irq(&mut self) {
        self.sim.bus_mut().assert_irq();
    }

    pub fn clear_irq(&mut self) {
        self.sim.bus_mut().clear_irq();
    }

    pub fn assert_nmi(&mut self) {
        self.sim.bus_mut().assert_nmi();
    }

    // Memory access methods

    /// Read a byte without device side effects. Unmapped addresses read 0.
    pub fn peek_memory(&self, addr: u16) -> u8 {
        self.sim.bus().peek(addr).unwrap_or(0)
    }

    /// Write a single byte through the bus
    pub fn write_memory(&mut self, addr: u16, value: u8) -> Result<(), JsError> {
        self.sim.bus_mut().write(addr, value)?;
        Ok(())
    }

    /// Read a 256-byte page (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as u16) << 8;
        (0..256).map(|i| self.peek_memory(start + i)).collect()
    }

    /// Disassemble `count` instructions starting at an address
    pub fn disassemble(&self, start_addr: u16, count: u32) -> Vec<JsValue> {
        // Three bytes per instruction is always enough
        let bytes: Vec<u8> = (0..count.saturating_mul(3).min(0x10000))
            .map(|i| self.peek_memory(start_addr.wrapping_add(i as u16)))
            .collect();

        disassemble(&bytes, start_addr, self.sim.cpu().behavior())
            .iter()
            .take(count as usize)
            .map(|instr| {
                let mut bytes = vec![instr.opcode];
                bytes.extend_from_slice(&instr.operand_bytes);
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes,
                    text: format_instruction(instr),
                })
            })
            .collect()
    }

    /// Get the program start address
    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u16 {
        self.program_start
    }

    /// Get the program end address
    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u16 {
        self.program_end
    }
}

impl Emulator {
    fn flush_output(&mut self) -> Result<(), JsError> {
        for byte in self.sim.drain_output()? {
            let text = char::from(byte).to_string();
            // A throwing callback must not stop the machine
            let _ = self.on_transmit.call1(&JsValue::NULL, &JsValue::from_str(&text));
        }
        Ok(())
    }
}
