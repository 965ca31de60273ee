use std::any::Any;

use super::IoRegisters;

/// A device that owns part of the I/O window.
///
/// Architecturally visible register values live in the window; a
/// peripheral keeps only its hidden state (sub-cycle counters, pending
/// transfers, input latches) and reaches the window through the
/// [`IoRegisters`] handle passed to each hook.
pub trait Peripheral: Any {
    /// Short name used in logs and ownership errors.
    fn name(&self) -> &'static str;

    /// Claim addresses by calling `registrar` once per owned address.
    /// Called exactly once, while the coordinator is being built.
    fn register(&self, registrar: &mut dyn FnMut(u16));

    /// Return to power-on state. The window has already been zeroed.
    fn reset(&mut self, regs: &mut IoRegisters);

    /// Advance by `cycles` T-cycles.
    fn tick(&mut self, cycles: u32, regs: &mut IoRegisters);

    /// Runs before an owned register is read; may rewrite the byte the
    /// CPU is about to see.
    fn on_read(&mut self, _addr: u16, _regs: &mut IoRegisters) {}

    /// Runs after `value` has been stored at an owned address.
    fn on_write(&mut self, addr: u16, value: u8, regs: &mut IoRegisters);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
