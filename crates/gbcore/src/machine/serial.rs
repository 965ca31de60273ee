use std::any::Any;

use crate::io::{Interrupts, IoRegisters, Peripheral};

pub const SB: u16 = 0xFF01;
pub const SC: u16 = 0xFF02;

/// 8 bits at 8192 Hz on a 4.19 MHz clock.
const TRANSFER_CYCLES: u32 = 8 * 512;

/// Serial port modelled via SB/SC with no link partner attached.
///
/// Starting a transfer on SC (bit 7 set while bit 0 selects the internal
/// clock) captures the current SB byte into `output`, which is how the
/// CPU test ROMs report results. After a full byte time SB reads 0xFF,
/// the start bit clears and the serial interrupt is requested.
#[derive(Default)]
pub struct SerialPort {
    output: Vec<u8>,
    /// Cycles left in the transfer in flight, if any.
    remaining: Option<u32>,
}

impl SerialPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes sent since the last reset.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }

    pub fn transfer_in_progress(&self) -> bool {
        self.remaining.is_some()
    }
}

impl Peripheral for SerialPort {
    fn name(&self) -> &'static str {
        "serial"
    }

    fn register(&self, registrar: &mut dyn FnMut(u16)) {
        registrar(SB);
        registrar(SC);
    }

    fn reset(&mut self, _regs: &mut IoRegisters) {
        self.output.clear();
        self.remaining = None;
    }

    fn tick(&mut self, cycles: u32, regs: &mut IoRegisters) {
        let Some(remaining) = self.remaining else {
            return;
        };
        if remaining > cycles {
            self.remaining = Some(remaining - cycles);
            return;
        }

        self.remaining = None;
        regs.set(SB, 0xFF);
        regs.set(SC, regs.get(SC) & !0x80);
        regs.request_interrupt(Interrupts::SERIAL);
    }

    fn on_write(&mut self, addr: u16, value: u8, regs: &mut IoRegisters) {
        if addr != SC {
            return;
        }
        // Internal clock & start bit set?
        if (value & 0x81) == 0x81 && self.remaining.is_none() {
            let byte = regs.get(SB);
            self.output.push(byte);
            self.remaining = Some(TRANSFER_CYCLES);
            log::trace!("serial out 0x{byte:02X} ({:?})", byte as char);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
