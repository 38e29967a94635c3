//! Data models for healthprobe

mod attempt;
mod verdict;

pub use attempt::*;
pub use verdict::*;
