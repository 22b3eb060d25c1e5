//! A trace-driven simulator for a two-level adaptive (GAp) branch predictor.

pub mod branch;
pub mod error;
pub mod history;
pub mod predictor;
pub mod sim;
pub mod stats;
pub mod trace;

pub use branch::*;
pub use error::*;
pub use history::*;
pub use predictor::*;
pub use sim::*;
pub use stats::*;
pub use trace::*;
