//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in wolfbus-core for the peripherals hanging off the robot bus:
//!
//! - LED board (register-mapped RGB head LEDs)

#![no_std]
#![deny(unsafe_code)]

pub mod led_board;

pub use led_board::LedBoard;
