use super::{Cpu, Reg16};

impl Cpu {
    /// INC rr. Wraps at 0xFFFF and leaves every flag alone.
    pub fn inc16(&mut self, pair: Reg16) {
        let value = self.regs.read16(pair).wrapping_add(1);
        self.regs.write16(pair, value);
    }

    /// DEC rr. Wraps at 0x0000 and leaves every flag alone.
    pub fn dec16(&mut self, pair: Reg16) {
        let value = self.regs.read16(pair).wrapping_sub(1);
        self.regs.write16(pair, value);
    }
}
