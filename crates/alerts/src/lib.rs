//! Alert delivery.

pub mod pushover;

pub use pushover::{NotifyError, PushoverConfig, PushoverNotifier};
