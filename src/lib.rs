//! pagestats: ranks site pages from the Google Analytics reporting API
//! into trending and most-read JSON tables.

pub mod cli;
pub mod services;
pub mod types;
