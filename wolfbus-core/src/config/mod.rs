//! Configuration types

pub mod types;

pub use types::{
    ConfigError, ControllerSelection, LedBoardConfig, LoopConfig, DEFAULT_LOOP_HZ,
};
