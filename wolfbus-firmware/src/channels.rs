//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use wolfbus_core::cycle::BusHealth;
use wolfbus_core::led::{Color, SetLedsError, MAX_LEDS};

/// Channel capacity for pending LED requests from the host
const LED_REQUEST_CHANNEL_SIZE: usize = 4;

/// Channel capacity for request replies back to the host
const LED_REPLY_CHANNEL_SIZE: usize = 4;

/// Channel capacity for health reports
const DIAGNOSTIC_CHANNEL_SIZE: usize = 4;

/// Set-LEDs requests from the host link, serviced by the control loop
pub static SET_LEDS_REQUESTS: Channel<
    CriticalSectionRawMutex,
    Vec<Color, MAX_LEDS>,
    LED_REQUEST_CHANNEL_SIZE,
> = Channel::new();

/// Replies for serviced set-LEDs requests (previous colors on success)
pub static SET_LEDS_REPLIES: Channel<
    CriticalSectionRawMutex,
    Result<Vec<Color, MAX_LEDS>, SetLedsError>,
    LED_REPLY_CHANNEL_SIZE,
> = Channel::new();

/// Periodic bus health reports from the control loop
pub static DIAGNOSTICS: Channel<CriticalSectionRawMutex, BusHealth, DIAGNOSTIC_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the host requested shutdown
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that a heartbeat (PING) was received from the host
pub static PING_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal that the control loop is up and ticking
pub static LOOP_STARTED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Signal instructing the loop to activate its controller set
pub static CONTROLLERS_ACTIVE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
