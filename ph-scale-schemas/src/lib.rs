//! Serializable data definitions shared by the pH scale engine and its drivers.
//!
//! Nothing in this crate carries behaviour: the types here describe solutes,
//! scenarios and the commands a scenario schedules, exactly as they appear in
//! YAML files on disk.

pub mod color;
pub mod command;
pub mod file_formats;
pub mod graph;
pub mod measurement;
pub mod rule;
pub mod scenario;
pub mod solute;
