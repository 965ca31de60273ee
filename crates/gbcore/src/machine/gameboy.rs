use crate::cpu::{Bus, Cpu};
use crate::io::{Interrupts, IoCoordinator, IoMapError, IF_ADDR};

use super::{dmg_devices, init, Buttons, Joypad, MachineConfig, Mmu, SerialPort, IE_ADDR};

/// High-level Game Boy machine.
///
/// Owns the CPU core and the address space, and runs the instruction loop:
/// execute one instruction, then report its cycles to the I/O coordinator.
pub struct GameBoy {
    pub cpu: Cpu,
    pub mmu: Mmu,
    config: MachineConfig,
}

impl GameBoy {
    /// Build a machine with the DMG peripheral set.
    pub fn new(config: MachineConfig) -> Result<Self, IoMapError> {
        let io = IoCoordinator::new(dmg_devices())?;
        let mut gb = Self {
            cpu: Cpu::new(),
            mmu: Mmu::new(io),
            config,
        };
        gb.reset();
        Ok(gb)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Reset CPU, memory and peripherals. RAM contents are lost; reload
    /// the program afterwards.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.mmu.reset();

        if self.config.skip_boot {
            self.cpu.apply_dmg_boot_state();
            init::apply_dmg_initial_io_state(&mut self.mmu.io);
        }
        if let Some(pc) = self.config.entry_point {
            self.cpu.regs.pc = pc;
        }
    }

    /// Copy a program image to the configured load address.
    pub fn load(&mut self, program: &[u8]) {
        self.mmu.load(self.config.load_address, program);
        log::debug!(
            "Loaded {} bytes at 0x{:04X}, PC=0x{:04X}",
            program.len(),
            self.config.load_address,
            self.cpu.regs.pc
        );
    }

    /// Interrupts both requested (IF) and enabled (IE).
    pub fn pending_interrupts(&mut self) -> Interrupts {
        let ie = self.mmu.read8(IE_ADDR);
        let iflags = self.mmu.io.registers().get(IF_ADDR);
        Interrupts::from_bits_truncate(ie & iflags)
    }

    /// Execute one instruction (or one idle M-cycle while halted) and
    /// advance the peripherals by the cycles it took.
    ///
    /// Interrupt dispatch is not modelled: a pending interrupt only wakes
    /// the CPU from HALT.
    pub fn step(&mut self) -> u32 {
        let cycles = if self.cpu.halted {
            if !self.pending_interrupts().is_empty() {
                self.cpu.halted = false;
            }
            4
        } else {
            self.cpu.step(&mut self.mmu)
        };

        self.mmu.io.sync(cycles);
        cycles
    }

    /// Step until the CPU locks up or `max_steps` instructions have run.
    /// Returns the total number of T-cycles executed.
    pub fn run(&mut self, max_steps: u64) -> u64 {
        let mut total = 0u64;
        for _ in 0..max_steps {
            if self.cpu.is_locked() {
                break;
            }
            total += self.step() as u64;
        }
        total
    }

    /// Bytes written out over the serial port.
    pub fn serial_output(&self) -> &[u8] {
        self.mmu
            .io
            .device::<SerialPort>()
            .map(SerialPort::output)
            .unwrap_or_default()
    }

    pub fn set_button(&mut self, buttons: Buttons, pressed: bool) {
        if let Some(joypad) = self.mmu.io.device_mut::<Joypad>() {
            joypad.set_pressed(buttons, pressed);
        }
    }
}
