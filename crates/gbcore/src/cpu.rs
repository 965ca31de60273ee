mod alu;
mod bus;
mod exec;
mod incdec;
mod ld;
mod regs;
mod stack;

pub use bus::Bus;
pub use regs::{Flags, Reg16, Reg8, Registers, RESET_VECTOR};

/// Where an 8-bit ALU/load operand comes from.
///
/// The executor resolves this to a plain byte before running the
/// operation, so the flag logic never cares about the source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg8),
    /// Byte following the opcode (PC+1).
    Imm,
    /// Byte pointed to by a register pair.
    Indirect(Reg16),
}

impl Operand {
    /// Decode the 3-bit register field used by opcode tables:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    ///
    /// Panics on indices above 7; a decoder handing one in is broken.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Operand::Reg(Reg8::B),
            1 => Operand::Reg(Reg8::C),
            2 => Operand::Reg(Reg8::D),
            3 => Operand::Reg(Reg8::E),
            4 => Operand::Reg(Reg8::H),
            5 => Operand::Reg(Reg8::L),
            6 => Operand::Indirect(Reg16::HL),
            7 => Operand::Reg(Reg8::A),
            _ => panic!("invalid 8-bit operand index {index}"),
        }
    }
}

/// Game Boy CPU core.
///
/// Holds the register file plus the two run-state latches the decode step
/// needs. The arithmetic, load and stack primitives live in the submodules
/// and are public so a decoder can call them directly.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    pub halted: bool,
    /// Set after an opcode the decoder does not implement; `step` then
    /// returns 0 cycles until reset.
    locked: bool,
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self::default();
        cpu.reset();
        cpu
    }

    /// Reset the CPU: all registers zero, PC at the reset vector.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.halted = false;
        self.locked = false;
    }

    /// Load the register values the DMG boot ROM leaves behind when it
    /// hands control to cartridge code at 0x0100.
    pub fn apply_dmg_boot_state(&mut self) {
        self.regs.a = 0x01;
        self.regs.f = 0xB0; // Z, N, H, C = 1,0,1,1
        self.regs.b = 0x00;
        self.regs.c = 0x13;
        self.regs.d = 0x00;
        self.regs.e = 0xD8;
        self.regs.h = 0x01;
        self.regs.l = 0x4D;
        self.regs.sp = 0xFFFE;
        self.regs.pc = 0x0100;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.regs.set_flag(flag, value);
    }

    /// Resolve an operand to the byte it names.
    pub fn resolve<B: Bus>(&self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.read8(reg),
            Operand::Imm => bus.read8(self.regs.pc.wrapping_add(1)),
            Operand::Indirect(pair) => bus.read8(self.regs.read16(pair)),
        }
    }
}
