use crate::io::IoCoordinator;

/// Seed I/O registers to match the DMG/MGB state at PC=0x0100.
///
/// Values go in with `direct_write` so no peripheral reacts to them; each
/// device picks its register up from the window on its next tick or access.
pub(super) fn apply_dmg_initial_io_state(io: &mut IoCoordinator) {
    const DMG_IO: &[(u16, u8)] = &[
        (0xFF00, 0xCF), // P1
        (0xFF01, 0x00), // SB
        (0xFF02, 0x7E), // SC
        (0xFF04, 0xAB), // DIV
        (0xFF05, 0x00), // TIMA
        (0xFF06, 0x00), // TMA
        (0xFF07, 0xF8), // TAC
        // IF's upper 3 bits read as 1; VBlank happens to be pending.
        (0xFF0F, 0xE1),
        // Sound registers. The APU is not emulated, but software can see
        // these defaults.
        (0xFF10, 0x80),
        (0xFF11, 0xBF),
        (0xFF12, 0xF3),
        (0xFF13, 0xFF),
        (0xFF14, 0xBF),
        (0xFF16, 0x3F),
        (0xFF17, 0x00),
        (0xFF18, 0xFF),
        (0xFF19, 0xBF),
        (0xFF1A, 0x7F),
        (0xFF1B, 0xFF),
        (0xFF1C, 0x9F),
        (0xFF1D, 0xFF),
        (0xFF1E, 0xBF),
        (0xFF20, 0xFF),
        (0xFF21, 0x00),
        (0xFF22, 0x00),
        (0xFF23, 0xBF),
        (0xFF24, 0x77),
        (0xFF25, 0xF3),
        (0xFF26, 0xF1),
        // PPU registers. OBP0/OBP1 are officially uninitialised; left at 0.
        (0xFF40, 0x91), // LCDC
        (0xFF41, 0x85), // STAT
        (0xFF42, 0x00), // SCY
        (0xFF43, 0x00), // SCX
        (0xFF44, 0x00), // LY
        (0xFF45, 0x00), // LYC
        (0xFF46, 0xFF), // DMA
        (0xFF47, 0xFC), // BGP
        (0xFF4A, 0x00), // WY
        (0xFF4B, 0x00), // WX
    ];

    for &(addr, value) in DMG_IO {
        io.direct_write(addr, value);
    }
}
