use crate::core::bus::{Bus, BusMaster};

/// A clocked piece of hardware advanced one step at a time by the scheduler.
pub trait Component {
    /// Advance by one unit of work. Returns true if the component did something
    /// observable (used by devices that can idle).
    fn tick(&mut self) -> bool;

    /// Number of base clock ticks this component consumes per `tick()`.
    fn clock_divider(&self) -> u64 {
        1
    }
}

/// A component that needs bus access while it ticks (the CPU, DMA engines).
pub trait BusMasterComponent: Component {
    type Bus: Bus + ?Sized;

    fn tick_with_bus(&mut self, bus: &mut Self::Bus, master_id: BusMaster) -> bool;
}
