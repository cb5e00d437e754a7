//! Controller set trait
//!
//! The controller framework that decides which registered controllers run
//! is an external collaborator. The loop only invokes the update step once
//! per cycle (after the first, when a valid period exists) and triggers the
//! one-shot bulk activation after startup.

/// The controller-update step invoked once per control cycle
pub trait ControllerSet {
    /// Run all active controllers for this cycle
    fn update(&mut self, now_us: u64, period_us: u64);

    /// Complete the one-shot bulk activation handshake
    ///
    /// Called once after the framework has seen its first update. The
    /// default is a no-op for controller sets that are always active.
    fn activate(&mut self) {}
}
