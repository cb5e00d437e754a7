//! Fixed-rate control loop driver
//!
//! Each tick runs read, update, write in that order against a hardware
//! interface and a controller set, measures the achieved cycle period and
//! feeds it to the [`RateMonitor`]. The driver itself never sleeps: the
//! caller owns the timer and supplies monotonic timestamps.

use crate::cycle::health::{BusHealth, RateMonitor};
use crate::cycle::machine::{LoopEvent, LoopState};
use crate::config::{ConfigError, LoopConfig};
use crate::traits::{ControllerSet, HardwareInterface};

/// How long the loop keeps ticking after a shutdown request
pub const SHUTDOWN_GRACE_US: u64 = 5_000_000;

/// Result of a single completed tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Measured time since the previous tick (or since init on the first)
    pub period_us: u64,
    /// Whether the controller update stage ran
    pub ran_update: bool,
    /// Health report, when one was due this tick
    pub health: Option<BusHealth>,
}

/// Drives the read-update-write cycle at a fixed target rate
#[derive(Debug)]
pub struct ControlLoop {
    state: LoopState,
    target_period_us: u64,
    last_tick_us: u64,
    last_period_us: u64,
    first_update: bool,
    drain_started_us: Option<u64>,
    monitor: RateMonitor,
}

impl ControlLoop {
    /// Create a loop for the given configuration
    ///
    /// The config is validated first: the period math divides by the
    /// frequency, so a zero rate must be rejected before it.
    pub fn new(config: &LoopConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let target_period_us = config.period_us();
        Ok(Self {
            state: LoopState::Initializing,
            target_period_us,
            last_tick_us: 0,
            last_period_us: target_period_us,
            first_update: true,
            drain_started_us: None,
            monitor: RateMonitor::new(target_period_us),
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn target_period_us(&self) -> u64 {
        self.target_period_us
    }

    /// Hardware came up. Seeds the cycle clock so the first measured
    /// period is not counted from time zero.
    pub fn init_complete(&mut self, now_us: u64) {
        self.last_tick_us = now_us;
        self.state = self.state.transition(LoopEvent::InitComplete);
    }

    /// Hardware failed to come up. The loop never starts.
    pub fn init_failed(&mut self) {
        self.state = self.state.transition(LoopEvent::InitFailed);
    }

    /// Ask the loop to stop. Ticking continues for [`SHUTDOWN_GRACE_US`]
    /// so pending writes still reach the hardware. Repeated requests do
    /// not extend the grace window.
    pub fn request_shutdown(&mut self, now_us: u64) {
        if self.drain_started_us.is_none() {
            self.drain_started_us = Some(now_us);
        }
        self.state = self.state.transition(LoopEvent::ShutdownRequested);
    }

    /// Whether the grace window has fully elapsed
    pub fn should_stop(&self, now_us: u64) -> bool {
        match self.drain_started_us {
            Some(start) => now_us.saturating_sub(start) >= SHUTDOWN_GRACE_US,
            None => false,
        }
    }

    /// Finalize after the grace window. No further ticks after this.
    pub fn stop(&mut self) {
        self.state = self.state.transition(LoopEvent::GraceElapsed);
    }

    /// Run one read-update-write cycle
    ///
    /// The controller update is skipped on the very first tick: there is
    /// no previous cycle to compute a delta against.
    pub fn tick<B, H, C>(
        &mut self,
        now_us: u64,
        bus: &mut B,
        hardware: &mut H,
        controllers: &mut C,
    ) -> Result<TickOutcome, H::Error>
    where
        H: HardwareInterface<B>,
        C: ControllerSet,
    {
        hardware.read(bus, self.last_tick_us, self.last_period_us)?;

        let period_us = now_us.saturating_sub(self.last_tick_us);
        let ran_update = if self.first_update {
            self.first_update = false;
            false
        } else {
            controllers.update(now_us, period_us);
            true
        };

        hardware.write(bus, now_us, period_us)?;

        let health = self.monitor.record(period_us);
        self.last_tick_us = now_us;
        self.last_period_us = period_us;

        Ok(TickOutcome {
            period_us,
            ran_update,
            health,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::health::HealthLevel;

    struct NoopHardware;

    impl HardwareInterface<()> for NoopHardware {
        type Error = core::convert::Infallible;

        fn read(&mut self, _bus: &mut (), _now_us: u64, _period_us: u64) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, _bus: &mut (), _now_us: u64, _period_us: u64) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingControllers {
        updates: u32,
        activations: u32,
    }

    impl ControllerSet for CountingControllers {
        fn update(&mut self, _now_us: u64, _period_us: u64) {
            self.updates += 1;
        }

        fn activate(&mut self) {
            self.activations += 1;
        }
    }

    fn running_loop(now_us: u64) -> ControlLoop {
        let mut cl = ControlLoop::new(&LoopConfig::default()).unwrap();
        cl.init_complete(now_us);
        cl
    }

    #[test]
    fn test_zero_frequency_rejected_at_construction() {
        // Rejected before any period math can divide by the rate
        assert!(matches!(
            ControlLoop::new(&LoopConfig { frequency_hz: 0 }),
            Err(ConfigError::ZeroFrequency)
        ));
    }

    #[test]
    fn test_first_tick_skips_update() {
        let mut cl = running_loop(0);
        let mut controllers = CountingControllers::default();

        let outcome = cl
            .tick(1000, &mut (), &mut NoopHardware, &mut controllers)
            .unwrap();
        assert!(!outcome.ran_update);
        assert_eq!(controllers.updates, 0);

        let outcome = cl
            .tick(2000, &mut (), &mut NoopHardware, &mut controllers)
            .unwrap();
        assert!(outcome.ran_update);
        assert_eq!(controllers.updates, 1);
    }

    #[test]
    fn test_measured_period() {
        let mut cl = running_loop(5_000);
        let mut controllers = CountingControllers::default();

        let outcome = cl
            .tick(6_000, &mut (), &mut NoopHardware, &mut controllers)
            .unwrap();
        assert_eq!(outcome.period_us, 1_000);

        let outcome = cl
            .tick(8_500, &mut (), &mut NoopHardware, &mut controllers)
            .unwrap();
        assert_eq!(outcome.period_us, 2_500);
    }

    #[test]
    fn test_slow_loop_warns_on_report() {
        let mut cl = running_loop(0);
        let mut controllers = CountingControllers::default();

        // 3ms cycles against a 1ms target
        let outcome = cl
            .tick(3_000, &mut (), &mut NoopHardware, &mut controllers)
            .unwrap();
        let health = outcome.health.unwrap();
        assert_eq!(health.level, HealthLevel::Warn);
    }

    #[test]
    fn test_shutdown_grace_window() {
        let mut cl = running_loop(0);

        cl.request_shutdown(10_000);
        assert_eq!(cl.state(), LoopState::Draining);

        assert!(!cl.should_stop(10_000));
        assert!(!cl.should_stop(10_000 + SHUTDOWN_GRACE_US - 1));
        assert!(cl.should_stop(10_000 + SHUTDOWN_GRACE_US));

        cl.stop();
        assert_eq!(cl.state(), LoopState::Stopped);
    }

    #[test]
    fn test_repeated_shutdown_does_not_extend_grace() {
        let mut cl = running_loop(0);

        cl.request_shutdown(10_000);
        cl.request_shutdown(4_000_000);
        assert!(cl.should_stop(10_000 + SHUTDOWN_GRACE_US));
    }

    #[test]
    fn test_ticking_continues_while_draining() {
        let mut cl = running_loop(0);
        let mut controllers = CountingControllers::default();

        cl.tick(1_000, &mut (), &mut NoopHardware, &mut controllers)
            .unwrap();
        cl.request_shutdown(1_500);
        assert!(cl.state().is_ticking());

        let outcome = cl
            .tick(2_000, &mut (), &mut NoopHardware, &mut controllers)
            .unwrap();
        assert!(outcome.ran_update);
    }

    #[test]
    fn test_init_failure_never_runs() {
        let mut cl = ControlLoop::new(&LoopConfig::default()).unwrap();
        cl.init_failed();
        assert_eq!(cl.state(), LoopState::Stopped);
        assert!(!cl.state().is_ticking());
    }
}
