//! Controller set for the robot bus adapter
//!
//! Controllers start inactive: the loop ticks from the moment hardware
//! init completes, but the update stage only does work once activation
//! arrives from the supervisor task.

use defmt::*;

use wolfbus_core::config::ControllerSelection;
use wolfbus_core::traits::ControllerSet;

pub struct RobotControllers {
    selection: ControllerSelection,
    active: bool,
    updates: u32,
}

impl RobotControllers {
    pub fn new(selection: ControllerSelection) -> Self {
        Self {
            selection,
            active: false,
            updates: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl ControllerSet for RobotControllers {
    fn update(&mut self, _now_us: u64, _period_us: u64) {
        if !self.active {
            return;
        }
        self.updates = self.updates.wrapping_add(1);
    }

    fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        for name in self.selection.controller_names() {
            info!("Controller activated: {}", name);
        }
    }
}
