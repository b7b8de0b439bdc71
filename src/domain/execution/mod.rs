//! Execution domain - swap submission

mod swap_submitter;

pub use swap_submitter::SwapSubmitter;
