//! LED bank state and register packing
//!
//! The bank is the authoritative copy of the head board's LED colors.
//! External set-all requests validate against it, and the bus-write step
//! drains it through the dirty flag.

pub mod bank;
pub mod pack;

pub use bank::{LedBank, SetLedsError};
pub use pack::color_to_word;
pub use wolfbus_protocol::{Color, MAX_LEDS};
