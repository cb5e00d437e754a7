//! Host Link Protocol
//!
//! This crate defines the UART-based protocol between the host computer and
//! the Wolfbus bridge board that drives the robot's actuator/LED bus.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬──────┬────────┬─────────────┬──────────┐
//! │ START │ TYPE │ LENGTH │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B   │ 1B     │ 0–192B      │ 1B       │
//! └───────┴──────┴────────┴─────────────┴──────────┘
//! ```
//!
//! The board is intentionally dumb: it holds the LED bank, forwards register
//! writes to the bus, and reports bus health. All motion and controller
//! logic remains on the host.

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod frame;
pub mod messages;

pub use color::{Color, MAX_LEDS};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{BoardMessage, DiagnosticLevel, HostCommand, SetLedsErrorCode};
