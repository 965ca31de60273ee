mod config;
mod divider;
mod gameboy;
mod init;
mod joypad;
mod lcd;
mod mmu;
mod serial;
mod timer;

pub use config::MachineConfig;
pub use divider::Divider;
pub use gameboy::GameBoy;
pub use joypad::{Buttons, Joypad};
pub use lcd::Lcd;
pub use mmu::Mmu;
pub use serial::SerialPort;
pub use timer::Timer;

use crate::io::Peripheral;

/// Total addressable memory for the Game Boy (64 KiB).
const MEMORY_SIZE: usize = 0x10000;

/// Interrupt enable register; outside the I/O window, so plain memory.
pub const IE_ADDR: u16 = 0xFFFF;

/// The DMG peripheral set, in tick order.
///
/// The divider is registered ahead of the timer so a tick leaves DIV and
/// TIMA advanced by the same slice of time before anything downstream
/// looks at them.
pub fn dmg_devices() -> Vec<Box<dyn Peripheral>> {
    vec![
        Box::new(SerialPort::new()),
        Box::new(Divider::new()),
        Box::new(Timer::new()),
        Box::new(Lcd::new()),
        Box::new(Joypad::new()),
    ]
}

#[cfg(test)]
mod tests;
