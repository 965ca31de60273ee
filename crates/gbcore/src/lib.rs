//! Execution primitives and memory-mapped I/O core for a Game Boy (SM83)
//! emulator.
//!
//! [`cpu`] holds the register file and the ALU/load/stack primitives an
//! opcode table is built from, [`io`] the register window shared by the
//! peripherals, and [`machine`] wires both into a runnable DMG.

pub mod cpu;
pub mod io;
pub mod machine;

pub use cpu::{Bus, Cpu, Flags, Operand, Reg16, Reg8, Registers};
pub use io::{IoCoordinator, IoMapError, Peripheral};
pub use machine::{GameBoy, MachineConfig};
