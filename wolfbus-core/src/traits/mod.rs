//! Hardware abstraction traits
//!
//! These traits define the seams between the control loop and its
//! external collaborators: the actuator bus driver, per-device hardware
//! interfaces, and the host's controller framework.

pub mod bus;
pub mod controllers;
pub mod hardware;

pub use bus::{LedRegister, RegisterBus};
pub use controllers::ControllerSet;
pub use hardware::HardwareInterface;
