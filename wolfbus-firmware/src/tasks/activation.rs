//! Controller activation task
//!
//! Controllers are activated out of band once the loop is already
//! ticking, so a stuck activation can never block the cycle itself.

use defmt::*;

use crate::channels::{CONTROLLERS_ACTIVE, LOOP_STARTED};

/// Activation task - arms the controller set once the loop is up
#[embassy_executor::task]
pub async fn activation_task() {
    LOOP_STARTED.wait().await;
    info!("Loop running, activating controllers");
    CONTROLLERS_ACTIVE.signal(());
}
