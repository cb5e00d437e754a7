//! Control cycle logic
//!
//! The fixed-rate read/update/write loop: its lifecycle state machine,
//! the per-tick orchestration and the bus health monitor. All logic is
//! driven by caller-supplied timestamps so it runs identically under the
//! firmware ticker and in host tests.

pub mod driver;
pub mod health;
pub mod machine;

pub use driver::{ControlLoop, TickOutcome, SHUTDOWN_GRACE_US};
pub use health::{BusHealth, HealthLevel, RateMonitor, HEALTH_REPORT_INTERVAL};
pub use machine::{LoopEvent, LoopState};
