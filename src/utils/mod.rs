//! ## Utils
//!
//! crate utilities

pub mod fmt;
pub mod path;
