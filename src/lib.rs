//! Time and payroll accounting engine for CLT employment in Brazil
//!
//! This crate turns clock punches into worked hours and banked-hour
//! balances, and computes monthly payslips, vacation entitlement and pay,
//! and termination (TRCT) settlements from plain employee records.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;

pub use engine::PontoEngine;
pub use error::{EngineError, EngineResult};
