//! The polling loop: fetch, classify, diff, notify, report.

mod config;
mod counters;
mod report;
mod runner;

pub use config::*;
pub use counters::*;
pub use report::*;
pub use runner::*;
