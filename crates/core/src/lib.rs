//! Core data types for the quotewatch price monitor.

pub mod currency;
pub mod exchange;
pub mod quote;
pub mod symbol;

pub use currency::*;
pub use exchange::*;
pub use quote::*;
pub use symbol::*;
