use super::divider::DIV;
use super::joypad::P1;
use super::lcd::{LCDC, LY, LYC, STAT};
use super::serial::{SB, SC};
use super::timer::{TAC, TIMA, TMA};
use super::*;
use crate::cpu::Bus;
use crate::io::{Interrupts, IoCoordinator, IF_ADDR};

fn dmg_io() -> IoCoordinator {
    IoCoordinator::new(dmg_devices()).unwrap()
}

fn if_flags(io: &IoCoordinator) -> Interrupts {
    Interrupts::from_bits_truncate(io.registers().get(IF_ADDR))
}

fn bare_machine() -> GameBoy {
    let config = MachineConfig::builder()
        .skip_boot(false)
        .load_address(0x0000)
        .build();
    GameBoy::new(config).unwrap()
}

#[test]
fn dmg_devices_own_their_registers() {
    let io = dmg_io();
    assert_eq!(io.owner_of(P1), Some("joypad"));
    assert_eq!(io.owner_of(SB), Some("serial"));
    assert_eq!(io.owner_of(SC), Some("serial"));
    assert_eq!(io.owner_of(DIV), Some("divider"));
    assert_eq!(io.owner_of(TIMA), Some("timer"));
    assert_eq!(io.owner_of(TAC), Some("timer"));
    assert_eq!(io.owner_of(LCDC), Some("lcd"));
    assert_eq!(io.owner_of(0xFF4B), Some("lcd"));
    assert_eq!(io.owner_of(IF_ADDR), None);
    assert_eq!(io.owner_of(mmu::DMA), None);
}

#[test]
fn divider_counts_every_256_cycles_and_clears_on_write() {
    let mut io = dmg_io();
    io.sync(255);
    assert_eq!(io.read(DIV), 0);
    io.sync(1);
    assert_eq!(io.read(DIV), 1);
    io.sync(256 * 3 + 100);
    assert_eq!(io.read(DIV), 4);

    io.write(DIV, 0x5A);
    assert_eq!(io.read(DIV), 0);
    // Sub-counter was cleared too.
    io.sync(200);
    assert_eq!(io.read(DIV), 0);
    io.sync(56);
    assert_eq!(io.read(DIV), 1);
}

#[test]
fn timer_disabled_does_not_count() {
    let mut io = dmg_io();
    io.write(TAC, 0x01);
    io.sync(10_000);
    assert_eq!(io.read(TIMA), 0);
}

#[test]
fn timer_counts_at_selected_rate() {
    let mut io = dmg_io();
    io.write(TAC, 0x05); // enabled, 16 cycles
    io.sync(16 * 10 + 8);
    assert_eq!(io.read(TIMA), 10);

    // Disabling drops the partial period.
    io.write(TAC, 0x00);
    io.write(TAC, 0x04); // enabled, 1024 cycles
    io.write(TIMA, 0);
    io.sync(1023);
    assert_eq!(io.read(TIMA), 0);
    io.sync(1);
    assert_eq!(io.read(TIMA), 1);
}

#[test]
fn huge_tick_wraps_counters_instead_of_overflowing() {
    let mut io = dmg_io();
    io.write(TAC, 0x05);
    io.sync(100);
    assert_eq!(io.read(TIMA), 6);

    io.tick(u32::MAX);
    // 2^24 DIV steps and 2^28 TIMA increments both land back where they
    // started, with one overflow on the way.
    assert_eq!(io.read(DIV), 0);
    assert_eq!(io.read(TIMA), 6);
    assert!(if_flags(&io).contains(Interrupts::TIMER));

    io.sync(157);
    assert_eq!(io.read(DIV), 1);
    assert_eq!(io.read(TIMA), 16);
}

#[test]
fn timer_overflow_with_many_increments_cycles_through_tma() {
    let mut io = dmg_io();
    io.write(TMA, 0xFC);
    io.write(TIMA, 0xFE);
    io.write(TAC, 0x05);

    // 2 increments to the first overflow, then 4 per reload period.
    io.sync(16 * (2 + 4 * 3 + 1));
    assert_eq!(io.read(TIMA), 0xFD);
    assert!(if_flags(&io).contains(Interrupts::TIMER));
}

#[test]
fn tac_reads_back_with_unused_bits_set() {
    let mut io = dmg_io();
    io.write(TAC, 0x05);
    assert_eq!(io.read(TAC), 0xFD);
}

#[test]
fn timer_overflow_reloads_from_tma_and_requests_interrupt() {
    let mut io = dmg_io();
    io.write(TMA, 0xF0);
    io.write(TIMA, 0xFE);
    io.write(TAC, 0x05);

    io.sync(16);
    assert_eq!(io.read(TIMA), 0xFF);
    assert!(!if_flags(&io).contains(Interrupts::TIMER));

    io.sync(16);
    assert_eq!(io.read(TIMA), 0xF0);
    assert!(if_flags(&io).contains(Interrupts::TIMER));
}

#[test]
fn serial_transfer_completes_after_a_byte_time() {
    let mut io = dmg_io();
    io.write(SB, b'O');
    io.write(SC, 0x81);

    assert_eq!(io.device::<SerialPort>().map(SerialPort::output), Some(&b"O"[..]));
    assert!(io.device::<SerialPort>().is_some_and(SerialPort::transfer_in_progress));

    io.sync(4095);
    assert_eq!(io.read(SC), 0x81);
    assert!(!if_flags(&io).contains(Interrupts::SERIAL));

    io.sync(1);
    assert_eq!(io.read(SC), 0x01);
    assert_eq!(io.read(SB), 0xFF);
    assert!(if_flags(&io).contains(Interrupts::SERIAL));
}

#[test]
fn serial_external_clock_never_completes() {
    let mut io = dmg_io();
    io.write(SB, 0x12);
    io.write(SC, 0x80);
    io.sync(100_000);
    assert_eq!(io.read(SC), 0x80);
    assert!(io.device::<SerialPort>().is_some_and(|s| s.output().is_empty()));
}

#[test]
fn lcd_off_keeps_ly_at_zero() {
    let mut io = dmg_io();
    io.sync(456 * 10);
    assert_eq!(io.read(LY), 0);
}

#[test]
fn lcd_advances_ly_and_raises_vblank() {
    let mut io = dmg_io();
    io.write(LCDC, 0x80);

    io.sync(455);
    assert_eq!(io.read(LY), 0);
    io.sync(1);
    assert_eq!(io.read(LY), 1);

    io.sync(456 * 142);
    assert_eq!(io.read(LY), 143);
    assert!(!if_flags(&io).contains(Interrupts::VBLANK));

    io.sync(456);
    assert_eq!(io.read(LY), 144);
    assert_eq!(io.read(STAT) & 0x03, 1);
    assert!(if_flags(&io).contains(Interrupts::VBLANK));

    io.sync(456 * 10);
    assert_eq!(io.read(LY), 0);
}

#[test]
fn lcd_mode_follows_line_position() {
    let mut io = dmg_io();
    io.write(LCDC, 0x80);
    io.sync(4);
    assert_eq!(io.read(STAT) & 0x03, 2);
    io.sync(80);
    assert_eq!(io.read(STAT) & 0x03, 3);
    io.sync(172);
    assert_eq!(io.read(STAT) & 0x03, 0);
}

#[test]
fn stat_select_bits_are_writable_but_mode_bits_are_not() {
    let mut io = dmg_io();
    io.write(LCDC, 0x80);
    io.write(STAT, 0x07);
    assert_eq!(io.read(STAT), 0x80 | 0x04 | 0x02); // LY == LYC == 0, mode 2
    io.write(STAT, 0x78);
    assert_eq!(io.read(STAT) & 0x78, 0x78);
}

#[test]
fn lyc_match_raises_stat_interrupt_when_enabled() {
    let mut io = dmg_io();
    io.write(LYC, 2);
    io.write(STAT, 0x40);
    io.write(LCDC, 0x80);
    assert!(!if_flags(&io).contains(Interrupts::LCD_STAT));

    io.sync(456 * 2);
    assert_eq!(io.read(LY), 2);
    assert_ne!(io.read(STAT) & 0x04, 0);
    assert!(if_flags(&io).contains(Interrupts::LCD_STAT));
}

#[test]
fn ly_write_restarts_frame_and_lcdc_off_resets() {
    let mut io = dmg_io();
    io.write(LCDC, 0x80);
    io.sync(456 * 5);
    io.write(LY, 0x42);
    assert_eq!(io.read(LY), 0);

    io.sync(456 * 3);
    io.write(LCDC, 0x00);
    assert_eq!(io.read(LY), 0);
    assert_eq!(io.read(STAT) & 0x03, 0);
}

#[test]
fn joypad_reports_pressed_buttons_of_selected_group() {
    let mut io = dmg_io();
    if let Some(joypad) = io.device_mut::<Joypad>() {
        joypad.set_pressed(Buttons::START | Buttons::LEFT, true);
    }

    io.write(P1, 0x10); // select buttons
    assert_eq!(io.read(P1), 0xC0 | 0x10 | 0x07);

    io.write(P1, 0x20); // select d-pad
    assert_eq!(io.read(P1), 0xC0 | 0x20 | 0x0D);

    io.write(P1, 0x30); // nothing selected
    assert_eq!(io.read(P1), 0xFF);
}

#[test]
fn joypad_press_requests_interrupt_on_next_tick() {
    let mut io = dmg_io();
    if let Some(joypad) = io.device_mut::<Joypad>() {
        joypad.set_pressed(Buttons::A, true);
    }
    assert!(!if_flags(&io).contains(Interrupts::JOYPAD));
    io.sync(4);
    assert!(if_flags(&io).contains(Interrupts::JOYPAD));
}

#[test]
fn machine_reset_applies_boot_state() {
    let mut gb = GameBoy::new(MachineConfig::default()).unwrap();
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert_eq!(gb.cpu.regs.af(), 0x01B0);
    assert_eq!(gb.cpu.regs.sp, 0xFFFE);
    assert_eq!(gb.mmu.read8(DIV), 0xAB);
    assert_eq!(gb.mmu.read8(LCDC), 0x91);
    assert_eq!(gb.mmu.read8(IF_ADDR), 0xE1);
}

#[test]
fn bare_machine_starts_at_reset_vector_with_zero_window() {
    let gb = bare_machine();
    assert_eq!(gb.cpu.regs.pc, 0x0000);
    assert!(gb.mmu.io.registers().as_slice().iter().all(|&b| b == 0));
}

#[test]
fn bare_machine_reads_unused_register_bits_as_one() {
    let mut gb = bare_machine();
    assert_eq!(gb.mmu.read8(TAC), 0xF8);
    assert_eq!(gb.mmu.read8(STAT), 0x80);

    gb.mmu.io.sync(4);
    assert_eq!(gb.mmu.read8(TAC) & 0xF8, 0xF8);
    assert_eq!(gb.mmu.read8(STAT) & 0x80, 0x80);
}

#[test]
fn default_config_loads_program_where_it_starts() {
    let mut gb = GameBoy::new(MachineConfig::default()).unwrap();
    gb.load(&[0x3E, 0x42]); // LD A, 0x42

    gb.step();

    assert_eq!(gb.cpu.regs.a, 0x42);
    assert_eq!(gb.cpu.regs.pc, 0x0102);
}

#[test]
fn reset_discards_serial_output() {
    let mut gb = bare_machine();
    gb.mmu.write8(SB, b'x');
    gb.mmu.write8(SC, 0x81);
    assert_eq!(gb.serial_output(), b"x");

    gb.reset();

    assert!(gb.serial_output().is_empty());
}

#[test]
fn loads_and_stores_route_through_io_window() {
    let mut gb = bare_machine();
    // LD A, 0x05 ; LD (0xFF07), A ; LD A, 0x48 ; LDH (0x01), A ; LD A, 0x81 ; LDH (0x02), A ; HALT
    gb.load(&[
        0x3E, 0x05, 0xEA, 0x07, 0xFF, 0x3E, 0x48, 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, 0x76,
    ]);

    gb.run(7);

    assert_eq!(gb.mmu.io.registers().get(TAC), 0xFD);
    assert_eq!(gb.serial_output(), b"H");
    assert!(gb.cpu.halted);
}

#[test]
fn step_reports_cycles_to_io_coordinator() {
    let mut gb = bare_machine();
    gb.load(&[0x00, 0x01, 0x34, 0x12, 0x03]); // NOP ; LD BC, 0x1234 ; INC BC

    let cycles = gb.run(3);

    assert_eq!(cycles, 4 + 12 + 8);
    assert_eq!(gb.mmu.io.get_and_clear_synced_cycles(), 24);
    assert_eq!(gb.cpu.regs.bc(), 0x1235);
}

#[test]
fn halt_wakes_on_enabled_interrupt() {
    let mut gb = bare_machine();
    // LD A, 0x05 ; LDH (0x07), A ; HALT ; NOP
    gb.load(&[0x3E, 0x05, 0xE0, 0x07, 0x76, 0x00]);
    gb.mmu.write8(IE_ADDR, Interrupts::TIMER.bits());

    gb.run(3);
    assert!(gb.cpu.halted);

    // TIMA needs 256 increments of 16 cycles to overflow.
    let mut steps = 0;
    while gb.cpu.halted && steps < 10_000 {
        gb.step();
        steps += 1;
    }
    assert!(!gb.cpu.halted);
    assert!(gb.pending_interrupts().contains(Interrupts::TIMER));
    gb.step();
    assert_eq!(gb.cpu.regs.pc, 0x0006);
}

#[test]
fn oam_dma_copies_160_bytes() {
    let mut gb = bare_machine();
    for i in 0..0xA0u16 {
        gb.mmu.write8(0xC000 + i, i as u8);
    }
    gb.mmu.write8(mmu::DMA, 0xC0);
    assert_eq!(gb.mmu.read8(0xFE00), 0x00);
    assert_eq!(gb.mmu.read8(0xFE9F), 0x9F);
    assert_eq!(gb.mmu.read8(mmu::DMA), 0xC0);
}

#[test]
fn set_button_reaches_joypad() {
    let mut gb = bare_machine();
    gb.set_button(Buttons::DOWN, true);
    gb.mmu.write8(P1, 0x20);
    assert_eq!(gb.mmu.read8(P1) & 0x0F, 0x07);
    gb.set_button(Buttons::DOWN, false);
    assert_eq!(gb.mmu.read8(P1) & 0x0F, 0x0F);
}

#[test]
fn word_access_wraps_at_top_of_memory() {
    let mut gb = bare_machine();
    gb.mmu.write16(0xFFFF, 0xABCD);
    assert_eq!(gb.mmu.read8(0xFFFF), 0xCD);
    assert_eq!(gb.mmu.read8(0x0000), 0xAB);
    assert_eq!(gb.mmu.read16(0xFFFF), 0xABCD);
}
