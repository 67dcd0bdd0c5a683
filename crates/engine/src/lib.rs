//! Price normalization and cross-exchange difference engine.
//!
//! This crate contains the core logic: converting heterogeneous exchange
//! quotes onto the reference fiat currency, computing per-symbol deviation
//! percentages against the reference exchange, and driving the debounced
//! alert state machine.

pub mod alerting;
pub mod board;
pub mod diff;
pub mod fee;
pub mod normalizer;
pub mod rounding;

pub use alerting::*;
pub use board::*;
pub use diff::*;
pub use fee::*;
pub use normalizer::*;
pub use rounding::*;
