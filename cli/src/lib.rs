//! Host side of the sales inquiry reader.
//!
//! Parses configuration, performs the HTTP round-trips the core describes,
//! and installs the tracing subscriber that receives every step's outcome.

pub mod config;
pub mod logging;
pub mod transport;

pub use config::{Args, RunPlan};
pub use transport::UreqTransport;
