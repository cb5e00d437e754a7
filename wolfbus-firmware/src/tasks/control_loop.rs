//! Control loop task
//!
//! Owns the LED board and the actuator bus, and drives the
//! read-update-write cycle at the configured rate. Host requests are
//! serviced inside the tick so the bank is never mutated mid-flush.
//!
//! Once the drain window has elapsed, pending and late LED requests are
//! dropped rather than rejected: shutdown is host-initiated, so the host
//! already knows no further replies are coming.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use wolfbus_core::config::{ControllerSelection, LedBoardConfig, LoopConfig};
use wolfbus_core::cycle::ControlLoop;
use wolfbus_core::traits::ControllerSet;
use wolfbus_drivers::LedBoard;

use crate::bus::UartRegisterBus;
use crate::channels::{
    CONTROLLERS_ACTIVE, DIAGNOSTICS, LOOP_STARTED, SET_LEDS_REPLIES, SET_LEDS_REQUESTS, SHUTDOWN,
};
use crate::controllers::RobotControllers;

/// Control loop task - read, update, write at the configured rate
#[embassy_executor::task]
pub async fn control_loop_task(
    mut bus: UartRegisterBus,
    loop_config: LoopConfig,
    board_config: LedBoardConfig,
    selection: ControllerSelection,
) {
    let mut control = match ControlLoop::new(&loop_config) {
        Ok(control) => control,
        Err(e) => {
            // Fatal: the loop never starts
            error!("Invalid loop config: {:?}", e);
            return;
        }
    };

    let mut board = LedBoard::new(&board_config);
    let mut controllers = RobotControllers::new(selection);

    control.init_complete(Instant::now().as_micros());
    LOOP_STARTED.signal(());
    info!(
        "Control loop started at {} Hz ({} us period)",
        loop_config.frequency_hz,
        control.target_period_us()
    );

    let mut ticker = Ticker::every(Duration::from_micros(control.target_period_us()));

    loop {
        ticker.next().await;
        let now_us = Instant::now().as_micros();

        if SHUTDOWN.signaled() {
            SHUTDOWN.reset();
            info!("Shutdown requested, draining");
            control.request_shutdown(now_us);
        }

        if control.should_stop(now_us) {
            control.stop();
            break;
        }

        if CONTROLLERS_ACTIVE.signaled() {
            CONTROLLERS_ACTIVE.reset();
            controllers.activate();
        }

        // Service pending host requests before the flush
        while let Ok(colors) = SET_LEDS_REQUESTS.try_receive() {
            let reply = board.set_all(&colors);
            if let Err(ref e) = reply {
                warn!("Set-LEDs request rejected: {:?}", e);
            }
            if SET_LEDS_REPLIES.try_send(reply).is_err() {
                warn!("Reply channel full, dropping reply");
            }
        }

        match control.tick(now_us, &mut bus, &mut board, &mut controllers) {
            Ok(outcome) => {
                if let Some(health) = outcome.health {
                    if DIAGNOSTICS.try_send(health).is_err() {
                        warn!("Diagnostic channel full, dropping report");
                    }
                }
            }
            Err(e) => {
                warn!("Bus write failed: {:?}", e);
            }
        }
    }

    // See the module doc: late requests are dropped on purpose
    while SET_LEDS_REQUESTS.try_receive().is_ok() {
        warn!("Dropping LED request received after stop");
    }

    info!("Control loop stopped");
}
