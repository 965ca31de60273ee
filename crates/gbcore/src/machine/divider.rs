use std::any::Any;

use crate::io::{IoRegisters, Peripheral};

pub const DIV: u16 = 0xFF04;

/// DIV increments at 16384 Hz, i.e. once every 256 T-cycles.
const DIV_PERIOD: u32 = 256;

/// Free-running divider register.
///
/// The visible DIV byte lives in the window; only the sub-256 phase is
/// kept here. Any write clears both.
#[derive(Default)]
pub struct Divider {
    phase: u32,
}

impl Divider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Peripheral for Divider {
    fn name(&self) -> &'static str {
        "divider"
    }

    fn register(&self, registrar: &mut dyn FnMut(u16)) {
        registrar(DIV);
    }

    fn reset(&mut self, _regs: &mut IoRegisters) {
        self.phase = 0;
    }

    fn tick(&mut self, cycles: u32, regs: &mut IoRegisters) {
        let total = self.phase + cycles % DIV_PERIOD;
        let steps = cycles / DIV_PERIOD + total / DIV_PERIOD;
        self.phase = total % DIV_PERIOD;
        if steps != 0 {
            let div = regs.get(DIV).wrapping_add(steps as u8);
            regs.set(DIV, div);
        }
    }

    fn on_write(&mut self, _addr: u16, _value: u8, regs: &mut IoRegisters) {
        self.phase = 0;
        regs.set(DIV, 0);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
