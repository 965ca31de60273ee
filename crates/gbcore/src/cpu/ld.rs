use super::{Bus, Cpu, Reg16, Reg8};

// None of the loads touch the flags. Immediate operands are read relative
// to PC+1; advancing PC past them is the decoder's job.
impl Cpu {
    /// Copy `src` into `dst`.
    pub fn ld8_reg_to_reg(&mut self, dst: Reg8, src: Reg8) {
        let value = self.regs.read8(src);
        self.regs.write8(dst, value);
    }

    /// Load the byte at the address held in `pair` into `reg`.
    pub fn ld8_indirect_to_reg<B: Bus>(&mut self, bus: &mut B, reg: Reg8, pair: Reg16) {
        let value = bus.read8(self.regs.read16(pair));
        self.regs.write8(reg, value);
    }

    /// Store `reg` at the address held in `pair`.
    pub fn ld8_reg_to_indirect<B: Bus>(&mut self, bus: &mut B, pair: Reg16, reg: Reg8) {
        bus.write8(self.regs.read16(pair), self.regs.read8(reg));
    }

    pub fn ld8_addr_to_reg<B: Bus>(&mut self, bus: &mut B, reg: Reg8, addr: u16) {
        let value = bus.read8(addr);
        self.regs.write8(reg, value);
    }

    pub fn ld8_reg_to_addr<B: Bus>(&mut self, bus: &mut B, addr: u16, reg: Reg8) {
        bus.write8(addr, self.regs.read8(reg));
    }

    /// LD r, d8.
    pub fn ld8_imm_to_reg<B: Bus>(&mut self, bus: &mut B, reg: Reg8) {
        let value = bus.read8(self.regs.pc.wrapping_add(1));
        self.regs.write8(reg, value);
    }

    /// LD (rr), d8.
    pub fn ld8_imm_to_indirect<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = bus.read8(self.regs.pc.wrapping_add(1));
        bus.write8(self.regs.read16(pair), value);
    }

    /// LD r, (a16).
    pub fn ld8_imm_addr_to_reg<B: Bus>(&mut self, bus: &mut B, reg: Reg8) {
        let addr = bus.read16(self.regs.pc.wrapping_add(1));
        self.ld8_addr_to_reg(bus, reg, addr);
    }

    /// LD (a16), r.
    pub fn ld8_reg_to_imm_addr<B: Bus>(&mut self, bus: &mut B, reg: Reg8) {
        let addr = bus.read16(self.regs.pc.wrapping_add(1));
        self.ld8_reg_to_addr(bus, addr, reg);
    }

    pub fn ld16(&mut self, pair: Reg16, value: u16) {
        self.regs.write16(pair, value);
    }

    /// LD rr, d16.
    pub fn ld16_imm<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = bus.read16(self.regs.pc.wrapping_add(1));
        self.ld16(pair, value);
    }
}
