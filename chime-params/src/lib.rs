//! Named epidemiological and hospital capacity model parameters.
//!
//! The catalog groups parameter definitions (label, stable key, data type and
//! the distribution family assumed for the quantity) so that forms, labels and
//! downstream samplers can be generated from a single document.
pub mod arguments;
pub mod catalog;
pub mod config;
pub mod error;
pub mod prelude;
