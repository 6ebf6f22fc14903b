//! Solution chemistry engine: pH/concentration/quantity conversions, a mixing
//! and draining model for a single beaker, the quantities derived from it, and
//! the logarithmic graph mapping used to edit pH interactively.

pub mod analysis;
pub mod beaker;
pub mod constants;
pub mod derived;
pub mod error;
pub mod flow;
pub mod graph;
pub mod logger;
pub mod ph_model;
pub mod simulation;
pub mod solute;
pub mod solution;
pub mod water;

pub use error::PhScaleError;
