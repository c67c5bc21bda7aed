//! Civic Grid Core - Domain models, reference data, SLA rules and configuration
//!
//! This crate contains the complaint domain types shared by every other crate,
//! the static zone/SLA reference tables and the layered configuration.

pub mod config;
pub mod error;
pub mod models;
pub mod reference;
pub mod sla;

pub use error::{CivicError, Result};
pub use reference::{canonical_code, ReferenceData, SlaTable, ZoneDirectory};
pub use sla::{compute_sla, SlaCalculator, SlaTerms};
