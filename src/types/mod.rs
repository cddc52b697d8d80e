//! Type definitions for pagestats

mod config;
mod error;
mod report;

pub use config::*;
pub use error::*;
pub use report::*;
