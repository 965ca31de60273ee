use crate::cpu::Bus;
use crate::io::{IoCoordinator, IoRegisters};

use super::MEMORY_SIZE;

pub const DMA: u16 = 0xFF46;
const OAM_BASE: u16 = 0xFE00;
const OAM_SIZE: u16 = 0xA0;

/// Flat 64 KiB address space with the I/O window delegated to the
/// coordinator.
///
/// Everything outside 0xFF00–0xFF4B is plain RAM: cartridge banking and
/// the VRAM/OAM access restrictions are not modelled here.
pub struct Mmu {
    memory: Box<[u8]>,
    pub io: IoCoordinator,
}

impl Mmu {
    pub fn new(io: IoCoordinator) -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE].into_boxed_slice(),
            io,
        }
    }

    /// Copy `bytes` into memory starting at `addr`, wrapping at 0xFFFF.
    /// The I/O window is written directly, bypassing peripheral hooks.
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            let target = addr.wrapping_add(i as u16);
            if IoRegisters::contains(target) {
                self.io.direct_write(target, byte);
            } else {
                self.memory[target as usize] = byte;
            }
        }
    }

    /// Zero RAM and reset the I/O side.
    pub fn reset(&mut self) {
        self.memory.fill(0);
        self.io.reset();
    }

    fn do_oam_dma(&mut self, value: u8) {
        // OAM DMA: copy 160 bytes from source XX00..XX9F to FE00..FE9F.
        // The 160 M-cycle transfer time and bus conflicts are ignored.
        let base = (value as u16) << 8;
        for i in 0..OAM_SIZE {
            let byte = self.read8(base.wrapping_add(i));
            self.memory[(OAM_BASE + i) as usize] = byte;
        }
        log::trace!("OAM DMA from 0x{base:04X}");
    }
}

impl Bus for Mmu {
    fn read8(&mut self, addr: u16) -> u8 {
        if IoRegisters::contains(addr) {
            self.io.read(addr)
        } else {
            self.memory[addr as usize]
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if IoRegisters::contains(addr) {
            self.io.write(addr, value);
            if addr == DMA {
                self.do_oam_dma(value);
            }
        } else {
            self.memory[addr as usize] = value;
        }
    }
}
