//! Configuration type definitions
//!
//! Startup parameters for the control loop and the LED head board. The
//! firmware currently bakes these in; the host may override them at link
//! setup in a later revision.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default control loop rate
pub const DEFAULT_LOOP_HZ: u32 = 1000;

/// Configuration errors detected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Loop frequency must be non-zero
    ZeroFrequency,
}

/// Control loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoopConfig {
    /// Target tick rate in Hz
    pub frequency_hz: u32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frequency_hz: DEFAULT_LOOP_HZ,
        }
    }
}

impl LoopConfig {
    /// Target cycle period in microseconds
    pub const fn period_us(&self) -> u64 {
        1_000_000 / self.frequency_hz as u64
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        Ok(())
    }
}

/// LED head board configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LedBoardConfig {
    /// Bus device identifier of the head board
    pub device_id: u8,
    /// Number of LEDs on the board
    pub led_count: u8,
}

impl Default for LedBoardConfig {
    fn default() -> Self {
        Self {
            device_id: 42,
            led_count: 3,
        }
    }
}

/// Which controllers the host framework loads at startup
///
/// Reduced sets exist for bench setups where only one sensor path is
/// wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControllerSelection {
    /// Joint state, IMU and actuator controllers
    #[default]
    Full,
    /// IMU sensor controller only
    ImuOnly,
    /// Pressure sensors only; no controllers are loaded, the raw
    /// readings are published by the hardware interface itself
    PressureOnly,
}

impl ControllerSelection {
    /// Derive the selection from the startup flags
    ///
    /// IMU-only takes precedence when both flags are set.
    pub const fn from_flags(only_imu: bool, only_pressure: bool) -> Self {
        if only_imu {
            ControllerSelection::ImuOnly
        } else if only_pressure {
            ControllerSelection::PressureOnly
        } else {
            ControllerSelection::Full
        }
    }

    /// Names of the controllers this selection loads
    pub const fn controller_names(&self) -> &'static [&'static str] {
        match self {
            ControllerSelection::Full => &[
                "joint_state_controller",
                "imu_sensor_controller",
                "actuator_controller",
            ],
            ControllerSelection::ImuOnly => &["imu_sensor_controller"],
            ControllerSelection::PressureOnly => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_config_default() {
        let config = LoopConfig::default();
        assert_eq!(config.frequency_hz, 1000);
        assert_eq!(config.period_us(), 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_loop_config_rejects_zero_frequency() {
        let config = LoopConfig { frequency_hz: 0 };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrequency));
    }

    #[test]
    fn test_period_at_reduced_rate() {
        let config = LoopConfig { frequency_hz: 500 };
        assert_eq!(config.period_us(), 2000);
    }

    #[test]
    fn test_led_board_defaults() {
        let config = LedBoardConfig::default();
        assert_eq!(config.led_count, 3);
    }

    #[test]
    fn test_selection_from_flags() {
        assert_eq!(
            ControllerSelection::from_flags(false, false),
            ControllerSelection::Full
        );
        assert_eq!(
            ControllerSelection::from_flags(true, false),
            ControllerSelection::ImuOnly
        );
        assert_eq!(
            ControllerSelection::from_flags(false, true),
            ControllerSelection::PressureOnly
        );
        // IMU wins when both are set
        assert_eq!(
            ControllerSelection::from_flags(true, true),
            ControllerSelection::ImuOnly
        );
    }

    #[test]
    fn test_controller_names_per_selection() {
        assert_eq!(ControllerSelection::Full.controller_names().len(), 3);
        assert_eq!(
            ControllerSelection::ImuOnly.controller_names(),
            &["imu_sensor_controller"]
        );
        assert!(ControllerSelection::PressureOnly
            .controller_names()
            .is_empty());
    }
}
