use std::any::Any;

use bitflags::bitflags;

use crate::io::{Interrupts, IoRegisters, Peripheral};

pub const P1: u16 = 0xFF00;

bitflags! {
    /// Joypad buttons. The low nibble is the d-pad group, the high nibble
    /// the action group, each in P1 bit order.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u8 {
        const RIGHT = 0x01;
        const LEFT = 0x02;
        const UP = 0x04;
        const DOWN = 0x08;
        const A = 0x10;
        const B = 0x20;
        const SELECT = 0x40;
        const START = 0x80;
    }
}

/// Joypad input register (P1).
///
/// Bits 5 (buttons) and 4 (d-pad) select a group when written as 0. The
/// low nibble is computed on every read: a pressed button in a selected
/// group reads as 0. Bits 7-6 always read as 1.
#[derive(Default)]
pub struct Joypad {
    pressed: Buttons,
    /// A press happened since the last tick; the interrupt is raised then.
    irq_pending: bool,
}

impl Joypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_pressed(&mut self, buttons: Buttons, pressed: bool) {
        if pressed && !self.pressed.contains(buttons) {
            self.irq_pending = true;
        }
        self.pressed.set(buttons, pressed);
    }

    pub fn pressed(&self) -> Buttons {
        self.pressed
    }

    fn compose(&self, select: u8) -> u8 {
        let select = select & 0x30;
        let mut low = 0x0F;
        // D-pad group selected?
        if (select & 0x10) == 0 {
            low &= !self.pressed.bits() & 0x0F;
        }
        // Buttons group selected?
        if (select & 0x20) == 0 {
            low &= !(self.pressed.bits() >> 4) & 0x0F;
        }
        0xC0 | select | low
    }
}

impl Peripheral for Joypad {
    fn name(&self) -> &'static str {
        "joypad"
    }

    fn register(&self, registrar: &mut dyn FnMut(u16)) {
        registrar(P1);
    }

    fn reset(&mut self, _regs: &mut IoRegisters) {
        self.pressed = Buttons::empty();
        self.irq_pending = false;
    }

    fn tick(&mut self, _cycles: u32, regs: &mut IoRegisters) {
        if std::mem::take(&mut self.irq_pending) {
            regs.request_interrupt(Interrupts::JOYPAD);
        }
    }

    fn on_read(&mut self, _addr: u16, regs: &mut IoRegisters) {
        let value = self.compose(regs.get(P1));
        regs.set(P1, value);
    }

    fn on_write(&mut self, _addr: u16, value: u8, regs: &mut IoRegisters) {
        // Only the select bits are writable.
        regs.set(P1, self.compose(value));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
