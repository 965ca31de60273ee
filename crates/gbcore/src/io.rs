//! Memory-mapped I/O register window and the coordinator that routes it.
//!
//! The window covers 0xFF00–0xFF4B. Each byte is either plain storage or
//! owned by exactly one [`Peripheral`]; ownership is fixed when the
//! coordinator is built. Time reaches the peripherals through [`IoCoordinator::sync`],
//! which the instruction loop calls once per executed instruction.

mod error;
mod peripheral;

use bitflags::bitflags;

pub use error::IoMapError;
pub use peripheral::Peripheral;

/// First address of the I/O window.
pub const IO_BASE: u16 = 0xFF00;
/// Number of bytes in the I/O window (0xFF00–0xFF4B).
pub const IO_SIZE: usize = 0x4C;
/// Interrupt request register. Lives inside the window but is never owned
/// by a peripheral; devices raise requests through [`IoRegisters::request_interrupt`].
pub const IF_ADDR: u16 = 0xFF0F;

bitflags! {
    /// Interrupt request bits in IF (0xFF0F) and IE (0xFFFF).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Interrupts: u8 {
        const VBLANK = 0x01;
        const LCD_STAT = 0x02;
        const TIMER = 0x04;
        const SERIAL = 0x08;
        const JOYPAD = 0x10;
    }
}

/// Backing bytes of the I/O window.
///
/// This is the handle peripherals receive in their hooks; it never runs
/// hooks itself, so writes through it behave like
/// [`IoCoordinator::direct_write`].
#[derive(Clone, Debug)]
pub struct IoRegisters {
    mem: [u8; IO_SIZE],
}

impl Default for IoRegisters {
    fn default() -> Self {
        Self { mem: [0; IO_SIZE] }
    }
}

impl IoRegisters {
    /// Whether `addr` falls inside the I/O window.
    #[inline]
    pub fn contains(addr: u16) -> bool {
        addr >= IO_BASE && ((addr - IO_BASE) as usize) < IO_SIZE
    }

    #[inline]
    fn offset(addr: u16) -> usize {
        assert!(
            Self::contains(addr),
            "address 0x{addr:04X} is outside the I/O window"
        );
        (addr - IO_BASE) as usize
    }

    #[inline]
    pub fn get(&self, addr: u16) -> u8 {
        self.mem[Self::offset(addr)]
    }

    #[inline]
    pub fn set(&mut self, addr: u16, value: u8) {
        self.mem[Self::offset(addr)] = value;
    }

    /// Set bits in IF.
    pub fn request_interrupt(&mut self, irq: Interrupts) {
        let flags = self.get(IF_ADDR) | irq.bits();
        self.set(IF_ADDR, flags);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.mem
    }

    fn clear(&mut self) {
        self.mem.fill(0);
    }
}

/// Routes I/O window accesses to their owning peripheral and keeps the
/// peripherals' clocks in step with the CPU.
///
/// Peripherals are ticked, reset and registered in the order they were
/// handed to [`IoCoordinator::new`]. A device whose tick logic observes
/// another device's post-tick state must come after it.
pub struct IoCoordinator {
    regs: IoRegisters,
    /// Offset -> index into `devices`.
    owners: [Option<usize>; IO_SIZE],
    devices: Vec<Box<dyn Peripheral>>,
    cycles_synced: u32,
}

impl IoCoordinator {
    /// Build a coordinator and establish the ownership table.
    ///
    /// Fails if two peripherals claim the same address, or a peripheral
    /// claims an address outside the window.
    pub fn new(devices: Vec<Box<dyn Peripheral>>) -> Result<Self, IoMapError> {
        let mut owners: [Option<usize>; IO_SIZE] = [None; IO_SIZE];

        for (index, device) in devices.iter().enumerate() {
            let mut claims = Vec::new();
            device.register(&mut |addr| claims.push(addr));

            for addr in claims {
                if !IoRegisters::contains(addr) {
                    return Err(IoMapError::OutOfWindow {
                        addr,
                        claimant: device.name(),
                    });
                }
                let slot = &mut owners[(addr - IO_BASE) as usize];
                if let Some(owner) = *slot {
                    return Err(IoMapError::Conflict {
                        addr,
                        owner: devices[owner].name(),
                        claimant: device.name(),
                    });
                }
                *slot = Some(index);
                log::trace!("I/O 0x{addr:04X} owned by {}", device.name());
            }
        }

        log::debug!(
            "I/O coordinator ready: {} devices, {} owned registers",
            devices.len(),
            owners.iter().filter(|owner| owner.is_some()).count()
        );

        Ok(Self {
            regs: IoRegisters::default(),
            owners,
            devices,
            cycles_synced: 0,
        })
    }

    /// Zero the window, reset every peripheral in registration order and
    /// drop any cycles not yet collected.
    pub fn reset(&mut self) {
        self.regs.clear();
        for device in &mut self.devices {
            device.reset(&mut self.regs);
        }
        self.cycles_synced = 0;
    }

    /// Advance every peripheral by `cycles_elapsed` T-cycles.
    pub fn tick(&mut self, cycles_elapsed: u32) {
        for device in &mut self.devices {
            device.tick(cycles_elapsed, &mut self.regs);
        }
    }

    /// Record `cycles` as consumed by the CPU and tick the peripherals.
    pub fn sync(&mut self, cycles: u32) {
        self.cycles_synced = self.cycles_synced.wrapping_add(cycles);
        self.tick(cycles);
    }

    /// Cycles synced since the previous call.
    pub fn get_and_clear_synced_cycles(&mut self) -> u32 {
        std::mem::take(&mut self.cycles_synced)
    }

    /// Read a window byte. The owner's read hook runs first and may change
    /// the value returned.
    pub fn read(&mut self, addr: u16) -> u8 {
        let offset = IoRegisters::offset(addr);
        if let Some(index) = self.owners[offset] {
            self.devices[index].on_read(addr, &mut self.regs);
        }
        self.regs.mem[offset]
    }

    /// Write a window byte. The value is stored before the owner's write
    /// hook runs, so the hook sees it and may override it.
    pub fn write(&mut self, addr: u16, value: u8) {
        let offset = IoRegisters::offset(addr);
        self.regs.mem[offset] = value;
        if let Some(index) = self.owners[offset] {
            self.devices[index].on_write(addr, value, &mut self.regs);
        }
    }

    /// Store a window byte without running any hook.
    pub fn direct_write(&mut self, addr: u16, value: u8) {
        self.regs.set(addr, value);
    }

    /// Window contents, for debuggers and tests.
    pub fn registers(&self) -> &IoRegisters {
        &self.regs
    }

    /// Name of the peripheral owning `addr`, if any.
    pub fn owner_of(&self, addr: u16) -> Option<&'static str> {
        let index = self.owners[IoRegisters::offset(addr)]?;
        Some(self.devices[index].name())
    }

    /// First registered peripheral of type `T`.
    pub fn device<T: Peripheral>(&self) -> Option<&T> {
        self.devices
            .iter()
            .find_map(|device| device.as_any().downcast_ref::<T>())
    }

    pub fn device_mut<T: Peripheral>(&mut self) -> Option<&mut T> {
        self.devices
            .iter_mut()
            .find_map(|device| device.as_any_mut().downcast_mut::<T>())
    }
}
