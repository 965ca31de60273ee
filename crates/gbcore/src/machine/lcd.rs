use std::any::Any;

use crate::io::{Interrupts, IoRegisters, Peripheral};

pub const LCDC: u16 = 0xFF40;
pub const STAT: u16 = 0xFF41;
pub const SCY: u16 = 0xFF42;
pub const SCX: u16 = 0xFF43;
pub const LY: u16 = 0xFF44;
pub const LYC: u16 = 0xFF45;
pub const BGP: u16 = 0xFF47;
pub const OBP0: u16 = 0xFF48;
pub const OBP1: u16 = 0xFF49;
pub const WY: u16 = 0xFF4A;
pub const WX: u16 = 0xFF4B;

const DOTS_PER_LINE: u32 = 456;
const LINES_PER_FRAME: u32 = 154;
const DOTS_PER_FRAME: u32 = DOTS_PER_LINE * LINES_PER_FRAME;
const VBLANK_LINE: u32 = 144;
/// Mode 2 (OAM search) ends here; mode 3 (transfer) runs until `HBLANK_START`.
const OAM_SCAN_END: u32 = 80;
const HBLANK_START: u32 = OAM_SCAN_END + 172;

/// LCD controller timing and status registers.
///
/// This is only the register side of the display: LY/STAT progression,
/// the VBlank and STAT interrupts, and storage for the scroll, palette and
/// window registers. Pixel output belongs to a renderer that polls the
/// window. DMA (0xFF46) is handled by the address space, not here.
#[derive(Default)]
pub struct Lcd {
    /// Position within the frame, in dots.
    frame_dot: u32,
    /// Logical OR of all enabled STAT interrupt sources, for edge detection.
    stat_line: bool,
}

impl Lcd {
    pub fn new() -> Self {
        Self::default()
    }

    fn ly(&self) -> u32 {
        self.frame_dot / DOTS_PER_LINE
    }

    fn mode(&self, lcd_enabled: bool) -> u8 {
        if !lcd_enabled {
            return 0;
        }
        if self.ly() >= VBLANK_LINE {
            return 1;
        }
        match self.frame_dot % DOTS_PER_LINE {
            dot if dot < OAM_SCAN_END => 2,
            dot if dot < HBLANK_START => 3,
            _ => 0,
        }
    }

    /// Dots until the next point where LY or the mode can change.
    fn dots_to_next_event(&self) -> u32 {
        let line_dot = self.frame_dot % DOTS_PER_LINE;
        let boundary = if self.ly() >= VBLANK_LINE {
            DOTS_PER_LINE
        } else if line_dot < OAM_SCAN_END {
            OAM_SCAN_END
        } else if line_dot < HBLANK_START {
            HBLANK_START
        } else {
            DOTS_PER_LINE
        };
        boundary - line_dot
    }

    /// Recompute LY and STAT bits 0-2 and raise INT $48 on a rising edge
    /// of the STAT line.
    fn update_status(&mut self, regs: &mut IoRegisters) {
        let lcd_enabled = (regs.get(LCDC) & 0x80) != 0;
        let ly = self.ly() as u8;
        let mode = self.mode(lcd_enabled);
        let coincidence = ly == regs.get(LYC);

        regs.set(LY, ly);
        let mut stat = 0x80 | (regs.get(STAT) & 0x78) | mode;
        if coincidence {
            stat |= 0x04;
        }
        regs.set(STAT, stat);

        if !lcd_enabled {
            self.stat_line = false;
            return;
        }

        let line = ((stat & 0x40) != 0 && coincidence)
            || ((stat & 0x20) != 0 && mode == 2)
            || ((stat & 0x10) != 0 && mode == 1)
            || ((stat & 0x08) != 0 && mode == 0);

        if !self.stat_line && line {
            regs.request_interrupt(Interrupts::LCD_STAT);
            log::trace!("LCD: STAT IRQ rising edge (STAT=0x{stat:02X} LY={ly} mode={mode})");
        }
        self.stat_line = line;
    }

    fn restart(&mut self) {
        self.frame_dot = 0;
        self.stat_line = false;
    }
}

impl Peripheral for Lcd {
    fn name(&self) -> &'static str {
        "lcd"
    }

    fn register(&self, registrar: &mut dyn FnMut(u16)) {
        for addr in [LCDC, STAT, SCY, SCX, LY, LYC, BGP, OBP0, OBP1, WY, WX] {
            registrar(addr);
        }
    }

    fn reset(&mut self, _regs: &mut IoRegisters) {
        self.restart();
    }

    fn tick(&mut self, cycles: u32, regs: &mut IoRegisters) {
        if (regs.get(LCDC) & 0x80) == 0 {
            if self.frame_dot != 0 || regs.get(LY) != 0 {
                self.restart();
                self.update_status(regs);
            }
            return;
        }

        let mut remaining = cycles;
        while remaining != 0 {
            let step = remaining.min(self.dots_to_next_event());
            let old_ly = self.ly();
            self.frame_dot = (self.frame_dot + step) % DOTS_PER_FRAME;
            remaining -= step;

            if old_ly < VBLANK_LINE && self.ly() >= VBLANK_LINE {
                regs.request_interrupt(Interrupts::VBLANK);
                log::trace!("LCD: VBlank edge (LY {old_ly}->{})", self.ly());
            }
            self.update_status(regs);
        }
    }

    fn on_read(&mut self, addr: u16, regs: &mut IoRegisters) {
        // STAT bit 7 is unused and reads 1, even before the first update.
        if addr == STAT {
            regs.set(STAT, regs.get(STAT) | 0x80);
        }
    }

    fn on_write(&mut self, addr: u16, value: u8, regs: &mut IoRegisters) {
        match addr {
            LCDC => {
                if (value & 0x80) == 0 {
                    // LCD off: LY and timing go back to the top of the frame.
                    self.restart();
                }
                self.update_status(regs);
            }
            // Bits 0-2 are read-only; update_status rebuilds them around
            // the newly written select bits.
            STAT | LYC => self.update_status(regs),
            LY => {
                // Writing LY restarts the frame.
                self.restart();
                self.update_status(regs);
            }
            _ => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
