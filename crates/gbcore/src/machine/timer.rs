use std::any::Any;

use crate::io::{Interrupts, IoRegisters, Peripheral};

pub const TIMA: u16 = 0xFF05;
pub const TMA: u16 = 0xFF06;
pub const TAC: u16 = 0xFF07;

/// TAC bits 7-3 are unused and read back as 1.
const TAC_UNUSED: u8 = 0b1111_1000;

/// Programmable timer (TIMA/TMA/TAC).
///
/// While TAC bit 2 is set TIMA counts up at the rate selected by
/// TAC[1:0]; on overflow it reloads from TMA and requests INT $50. The
/// registers themselves live in the window, so values seeded with a
/// direct write take effect on the next tick.
#[derive(Default)]
pub struct Timer {
    /// Cycles accumulated towards the next TIMA increment.
    phase: u32,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// T-cycles per TIMA increment for TAC[1:0]:
    /// - 00 → 1024 (4096 Hz)
    /// - 01 → 16 (262144 Hz)
    /// - 10 → 64 (65536 Hz)
    /// - 11 → 256 (16384 Hz)
    #[inline]
    pub fn period(tac: u8) -> u32 {
        match tac & 0x03 {
            0x00 => 1024,
            0x01 => 16,
            0x02 => 64,
            _ => 256,
        }
    }

    #[inline]
    fn enabled(tac: u8) -> bool {
        (tac & 0x04) != 0
    }

    /// Apply `steps` TIMA increments. Every overflow reloads TMA, so after
    /// the first one TIMA cycles through TMA..=0xFF.
    fn advance(steps: u32, regs: &mut IoRegisters) {
        if steps == 0 {
            return;
        }
        let tima = regs.get(TIMA) as u32;
        let to_overflow = 0x100 - tima;
        if steps < to_overflow {
            regs.set(TIMA, (tima + steps) as u8);
            return;
        }

        let tma = regs.get(TMA) as u32;
        let after_reload = (steps - to_overflow) % (0x100 - tma);
        regs.set(TIMA, (tma + after_reload) as u8);
        regs.request_interrupt(Interrupts::TIMER);
    }
}

impl Peripheral for Timer {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn register(&self, registrar: &mut dyn FnMut(u16)) {
        registrar(TIMA);
        registrar(TMA);
        registrar(TAC);
    }

    fn reset(&mut self, _regs: &mut IoRegisters) {
        self.phase = 0;
    }

    fn tick(&mut self, cycles: u32, regs: &mut IoRegisters) {
        let tac = regs.get(TAC);
        if !Self::enabled(tac) {
            return;
        }

        let period = Self::period(tac);
        let total = self.phase + cycles % period;
        let increments = cycles / period + total / period;
        self.phase = total % period;
        Self::advance(increments, regs);
    }

    fn on_read(&mut self, addr: u16, regs: &mut IoRegisters) {
        if addr == TAC {
            regs.set(TAC, regs.get(TAC) | TAC_UNUSED);
        }
    }

    fn on_write(&mut self, addr: u16, value: u8, regs: &mut IoRegisters) {
        if addr == TAC {
            regs.set(TAC, value | TAC_UNUSED);
            if !Self::enabled(value) {
                self.phase = 0;
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
