//! Bus health monitoring
//!
//! The loop reports bus health on a fixed cycle cadence: OK while the
//! measured cycle time stays under twice the target period, WARN once it
//! does not.

/// A health report is produced every this many cycles
pub const HEALTH_REPORT_INTERVAL: u32 = 100;

/// Severity of a health report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HealthLevel {
    Ok,
    Warn,
}

/// Periodic bus health report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusHealth {
    pub level: HealthLevel,
    pub message: &'static str,
}

/// Tracks cycle timing and emits periodic health reports
#[derive(Debug, Clone)]
pub struct RateMonitor {
    target_period_us: u64,
    cycle_count: u32,
}

impl RateMonitor {
    /// Create a monitor for the given target cycle period
    pub fn new(target_period_us: u64) -> Self {
        Self {
            target_period_us,
            cycle_count: 0,
        }
    }

    /// Record one cycle's measured duration
    ///
    /// Returns a report on the first cycle and every
    /// [`HEALTH_REPORT_INTERVAL`]th cycle after it, `None` otherwise.
    /// A slow cycle is a warning, never an error: the loop keeps running.
    pub fn record(&mut self, cycle_us: u64) -> Option<BusHealth> {
        let due = self.cycle_count % HEALTH_REPORT_INTERVAL == 0;
        self.cycle_count = self.cycle_count.wrapping_add(1);

        if !due {
            return None;
        }

        Some(if cycle_us < 2 * self.target_period_us {
            BusHealth {
                level: HealthLevel::Ok,
                message: "",
            }
        } else {
            BusHealth {
                level: HealthLevel::Warn,
                message: "bus is not running at the configured cycle rate",
            }
        })
    }

    /// Number of cycles recorded so far
    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }
}
