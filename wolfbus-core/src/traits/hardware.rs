//! Hardware interface trait
//!
//! A hardware interface owns the state of one bus device and implements
//! the per-cycle read and write steps against the register bus. Errors
//! propagate out of the tick; the loop performs no retries.

/// Per-cycle read/write steps for one bus device
///
/// `now_us` is the timestamp of the current cycle and `period_us` the
/// elapsed time since the previous one. The read step receives the
/// previous cycle's values, matching the read-then-remeasure order of
/// the control loop.
pub trait HardwareInterface<B> {
    type Error: core::fmt::Debug;

    /// Read device state from the bus
    fn read(&mut self, bus: &mut B, now_us: u64, period_us: u64) -> Result<(), Self::Error>;

    /// Write pending device state to the bus
    fn write(&mut self, bus: &mut B, now_us: u64, period_us: u64) -> Result<(), Self::Error>;
}
