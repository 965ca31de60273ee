use super::{Bus, Cpu, Reg16};

impl Cpu {
    /// PUSH rr: pre-decrement SP by two, then store the pair as a word so
    /// memory[SP] = low and memory[SP+1] = high.
    pub fn push<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.regs.read16(pair);
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write16(self.regs.sp, value);
    }

    /// POP rr: load the word at SP, then post-increment SP by two.
    pub fn pop<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = bus.read16(self.regs.sp);
        self.regs.write16(pair, value);
        self.regs.sp = self.regs.sp.wrapping_add(2);
    }
}
