// src/lib.rs
//! MLB team stats and payroll extraction: find the tables on a season page,
//! turn them into plain records, settle team names, write one file per table.

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod log;
pub mod pipeline;
pub mod progress;
pub mod specs;
pub mod store;
pub mod table;
pub mod teams;
