//! Controller domain - the swap form state machine

mod swap_controller;

pub use swap_controller::{FormSnapshot, Notification, Phase, SwapController};
