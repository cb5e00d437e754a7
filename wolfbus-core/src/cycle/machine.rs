//! Control loop lifecycle state machine

/// Lifecycle states of the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopState {
    /// Hardware construction and one-time registration
    Initializing,
    /// Fixed-rate ticking
    Running,
    /// Shutdown requested; ticking continues through the grace window
    Draining,
    /// Loop exited; hardware released
    Stopped,
}

/// Events that move the loop between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoopEvent {
    /// Hardware and service registration succeeded
    InitComplete,
    /// Hardware setup failed; fatal, no ticking happens
    InitFailed,
    /// External shutdown signal received
    ShutdownRequested,
    /// The drain grace window has elapsed
    GraceElapsed,
}

impl LoopState {
    /// Check if the loop executes ticks in this state
    pub fn is_ticking(&self) -> bool {
        matches!(self, LoopState::Running | LoopState::Draining)
    }

    /// Check if this is the final state
    pub fn is_stopped(&self) -> bool {
        matches!(self, LoopState::Stopped)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LoopEvent) -> Self {
        use LoopEvent::*;
        use LoopState::*;

        match (self, event) {
            (Initializing, InitComplete) => Running,
            (Initializing, InitFailed) => Stopped,

            (Running, ShutdownRequested) => Draining,

            (Draining, GraceElapsed) => Stopped,

            // Default: stay in current state
            _ => self,
        }
    }
}
