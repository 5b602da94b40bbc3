//! # Printer Module
//!
//! Printer geometry and generator settings.
//!
//! ## Modules
//!
//! - [`config`]: Paper profiles, column capacity and [`GeneratorConfig`]

pub mod config;

pub use config::{GeneratorConfig, PaperSize, column_capacity};
