//! Board-agnostic core logic for the Wolfbus bus controller
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (register bus, hardware interface,
//!   controller set)
//! - LED bank state and register packing
//! - Control-cycle state machine, timing and bus health monitoring
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod led;
pub mod traits;
