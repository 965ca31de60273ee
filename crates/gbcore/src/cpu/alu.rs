use super::{Cpu, Flags, Reg8};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// The carry-in takes part in both the half and full carry checks.
    fn alu_add(&mut self, value: u8, carry_in: u8) {
        let a = self.regs.a;

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = a as u16 + value as u16 + carry_in as u16;
        let result = full as u8;

        self.regs.a = result;

        self.regs.clear_flags();
        self.set_flag(Flags::Z, result == 0);
        self.set_flag(Flags::H, half > 0x0F);
        self.set_flag(Flags::C, full > 0xFF);
    }

    /// Core 8-bit SUB/SBC/CP operation. Returns the result without
    /// storing it so CP can share the flag logic.
    fn alu_sub_flags(&mut self, value: u8, carry_in: u8) -> u8 {
        let a = self.regs.a;

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in as i16;
        let full = a as i16 - value as i16 - carry_in as i16;
        let result = full as u8;

        self.regs.clear_flags();
        self.set_flag(Flags::Z, result == 0);
        self.set_flag(Flags::N, true);
        self.set_flag(Flags::H, half < 0);
        self.set_flag(Flags::C, full < 0);
        result
    }

    #[inline]
    fn carry_in(&self) -> u8 {
        u8::from(self.flag(Flags::C))
    }

    /// ADD A, value.
    pub fn add(&mut self, value: u8) {
        self.alu_add(value, 0);
    }

    /// ADC A, value.
    pub fn adc(&mut self, value: u8) {
        let carry = self.carry_in();
        self.alu_add(value, carry);
    }

    /// SUB A, value.
    pub fn sub(&mut self, value: u8) {
        self.regs.a = self.alu_sub_flags(value, 0);
    }

    /// SBC A, value. Same subtract core as SUB with the carry as an
    /// extra borrow.
    pub fn sbc(&mut self, value: u8) {
        let carry = self.carry_in();
        self.regs.a = self.alu_sub_flags(value, carry);
    }

    /// CP A, value: flags as SUB, A untouched.
    pub fn cp(&mut self, value: u8) {
        self.alu_sub_flags(value, 0);
    }

    pub fn and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        self.regs.clear_flags();
        self.set_flag(Flags::Z, result == 0);
        // H always reads back set after AND.
        self.set_flag(Flags::H, true);
    }

    pub fn or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        self.regs.clear_flags();
        self.set_flag(Flags::Z, result == 0);
    }

    pub fn xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.regs.clear_flags();
        self.set_flag(Flags::Z, result == 0);
    }

    pub fn add_reg(&mut self, reg: Reg8) {
        self.add(self.regs.read8(reg));
    }

    pub fn adc_reg(&mut self, reg: Reg8) {
        self.adc(self.regs.read8(reg));
    }

    pub fn sub_reg(&mut self, reg: Reg8) {
        self.sub(self.regs.read8(reg));
    }

    pub fn sbc_reg(&mut self, reg: Reg8) {
        self.sbc(self.regs.read8(reg));
    }

    pub fn cp_reg(&mut self, reg: Reg8) {
        self.cp(self.regs.read8(reg));
    }

    pub fn and_reg(&mut self, reg: Reg8) {
        self.and(self.regs.read8(reg));
    }

    pub fn or_reg(&mut self, reg: Reg8) {
        self.or(self.regs.read8(reg));
    }

    pub fn xor_reg(&mut self, reg: Reg8) {
        self.xor(self.regs.read8(reg));
    }
}
