use crate::Bus;

/// A CPU that can execute instructions.
///
/// The type parameter `B` is the bus type this CPU operates on. `reset`
/// takes no bus: per-family reset behavior (e.g. loading PC from a vector)
/// is left to the host, which can read the reset vector itself and call
/// `set_pc` before the first `step`.
pub trait Cpu<B: Bus> {
    /// Execute one instruction (or service a pending interrupt). Returns
    /// cycles consumed.
    fn step(&mut self, bus: &mut B) -> u64;

    /// Reset the CPU to its initial (all-zero) state.
    fn reset(&mut self);

    /// Signal a maskable interrupt request. Edge-triggered: the request
    /// is latched and serviced at the start of the next `step` if unmasked.
    fn request_irq(&mut self);

    /// Signal a non-maskable interrupt request.
    fn request_nmi(&mut self);

    /// Get the current program counter.
    fn pc(&self) -> u16;
}
