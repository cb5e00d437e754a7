//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod activation;
pub mod command_rx;
pub mod control_loop;
pub mod diag_tx;

pub use activation::activation_task;
pub use command_rx::command_rx_task;
pub use control_loop::control_loop_task;
pub use diag_tx::diag_tx_task;
