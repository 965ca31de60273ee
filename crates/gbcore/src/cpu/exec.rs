use super::{Bus, Cpu, Operand, Reg16, Reg8};

impl Cpu {
    /// Execute the instruction at PC and return the number of T-cycles it
    /// took.
    ///
    /// Only the load, ALU, 16-bit inc/dec, stack and plain jump families are
    /// decoded. Anything else locks the CPU.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.locked {
            return 0;
        }
        let opcode = bus.read8(self.regs.pc);
        self.exec_opcode(bus, opcode)
    }

    #[inline]
    fn advance_pc(&mut self, len: u16) {
        self.regs.pc = self.regs.pc.wrapping_add(len);
    }

    fn exec_opcode<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        match opcode {
            // NOP
            0x00 => {
                self.advance_pc(1);
                4
            }

            // LD rr, d16
            0x01 | 0x11 | 0x21 | 0x31 => {
                self.ld16_imm(bus, Reg16::from_rp(opcode >> 4));
                self.advance_pc(3);
                12
            }

            // LD (BC/DE/HL+/HL-), A
            0x02 | 0x12 | 0x22 | 0x32 => {
                let pair = if opcode < 0x20 { Reg16::from_rp(opcode >> 4) } else { Reg16::HL };
                self.ld8_reg_to_indirect(bus, pair, Reg8::A);
                self.post_hl_adjust(opcode);
                self.advance_pc(1);
                8
            }

            // LD A, (BC/DE/HL+/HL-)
            0x0A | 0x1A | 0x2A | 0x3A => {
                let pair = if opcode < 0x20 { Reg16::from_rp(opcode >> 4) } else { Reg16::HL };
                self.ld8_indirect_to_reg(bus, Reg8::A, pair);
                self.post_hl_adjust(opcode);
                self.advance_pc(1);
                8
            }

            // INC rr
            0x03 | 0x13 | 0x23 | 0x33 => {
                self.inc16(Reg16::from_rp(opcode >> 4));
                self.advance_pc(1);
                8
            }

            // DEC rr
            0x0B | 0x1B | 0x2B | 0x3B => {
                self.dec16(Reg16::from_rp(opcode >> 4));
                self.advance_pc(1);
                8
            }

            // LD r, d8 (and LD (HL), d8)
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                let cycles = match Operand::from_index((opcode >> 3) & 0x07) {
                    Operand::Reg(reg) => {
                        self.ld8_imm_to_reg(bus, reg);
                        8
                    }
                    Operand::Indirect(pair) => {
                        self.ld8_imm_to_indirect(bus, pair);
                        12
                    }
                    Operand::Imm => unreachable!(),
                };
                self.advance_pc(2);
                cycles
            }

            // JR r8
            0x18 => {
                let offset = bus.read8(self.regs.pc.wrapping_add(1)) as i8;
                self.advance_pc(2);
                self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
                12
            }

            // HALT
            0x76 => {
                self.halted = true;
                self.advance_pc(1);
                4
            }

            // LD r1, r2
            0x40..=0x7F => {
                let dst = Operand::from_index((opcode >> 3) & 0x07);
                let src = Operand::from_index(opcode & 0x07);
                let cycles = match (dst, src) {
                    (Operand::Reg(dst), Operand::Reg(src)) => {
                        self.ld8_reg_to_reg(dst, src);
                        4
                    }
                    (Operand::Indirect(pair), Operand::Reg(src)) => {
                        self.ld8_reg_to_indirect(bus, pair, src);
                        8
                    }
                    (Operand::Reg(dst), Operand::Indirect(pair)) => {
                        self.ld8_indirect_to_reg(bus, dst, pair);
                        8
                    }
                    // 0x76 is HALT, handled above.
                    _ => unreachable!(),
                };
                self.advance_pc(1);
                cycles
            }

            // ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, r / (HL)
            0x80..=0xBF => {
                let operand = Operand::from_index(opcode & 0x07);
                let value = self.resolve(bus, operand);
                self.alu_group((opcode >> 3) & 0x07, value);
                self.advance_pc(1);
                if matches!(operand, Operand::Indirect(_)) { 8 } else { 4 }
            }

            // ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, d8
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                let value = self.resolve(bus, Operand::Imm);
                self.alu_group((opcode >> 3) & 0x07, value);
                self.advance_pc(2);
                8
            }

            // POP rr
            0xC1 | 0xD1 | 0xE1 | 0xF1 => {
                self.pop(bus, Reg16::from_rp2(opcode >> 4));
                self.advance_pc(1);
                12
            }

            // PUSH rr
            0xC5 | 0xD5 | 0xE5 | 0xF5 => {
                self.push(bus, Reg16::from_rp2(opcode >> 4));
                self.advance_pc(1);
                16
            }

            // JP a16
            0xC3 => {
                self.regs.pc = bus.read16(self.regs.pc.wrapping_add(1));
                16
            }

            // LDH (a8), A / LDH A, (a8)
            0xE0 | 0xF0 => {
                let addr = 0xFF00 | self.resolve(bus, Operand::Imm) as u16;
                if opcode == 0xE0 {
                    self.ld8_reg_to_addr(bus, addr, Reg8::A);
                } else {
                    self.ld8_addr_to_reg(bus, Reg8::A, addr);
                }
                self.advance_pc(2);
                12
            }

            // LDH (C), A / LDH A, (C)
            0xE2 | 0xF2 => {
                let addr = 0xFF00 | self.regs.c as u16;
                if opcode == 0xE2 {
                    self.ld8_reg_to_addr(bus, addr, Reg8::A);
                } else {
                    self.ld8_addr_to_reg(bus, Reg8::A, addr);
                }
                self.advance_pc(1);
                8
            }

            // LD (a16), A
            0xEA => {
                self.ld8_reg_to_imm_addr(bus, Reg8::A);
                self.advance_pc(3);
                16
            }

            // LD A, (a16)
            0xFA => {
                self.ld8_imm_addr_to_reg(bus, Reg8::A);
                self.advance_pc(3);
                16
            }

            _ => {
                log::error!(
                    "CPU locked: unsupported opcode 0x{opcode:02X} at PC=0x{pc:04X} (SP=0x{sp:04X} AF=0x{af:04X} BC=0x{bc:04X} DE=0x{de:04X} HL=0x{hl:04X})",
                    pc = self.regs.pc,
                    sp = self.regs.sp,
                    af = self.regs.af(),
                    bc = self.regs.bc(),
                    de = self.regs.de(),
                    hl = self.regs.hl(),
                );
                self.locked = true;
                0
            }
        }
    }

    /// Run the ALU operation selected by bits 5..3 of an ALU opcode.
    fn alu_group(&mut self, operation: u8, value: u8) {
        match operation {
            0 => self.add(value),
            1 => self.adc(value),
            2 => self.sub(value),
            3 => self.sbc(value),
            4 => self.and(value),
            5 => self.xor(value),
            6 => self.or(value),
            7 => self.cp(value),
            _ => unreachable!(),
        }
    }

    /// HL post-increment/decrement for the `(HL+)` / `(HL-)` forms.
    fn post_hl_adjust(&mut self, opcode: u8) {
        match opcode >> 4 {
            2 => self.inc16(Reg16::HL),
            3 => self.dec16(Reg16::HL),
            _ => {}
        }
    }
}
