//! Configuration loading and management for the Ponto Engine.
//!
//! This module loads the rule parameters (working calendar, overtime
//! ceiling, flat deduction rates) and the dated INSS/IRRF tax tables from
//! YAML files. Built-in defaults reproduce the portal's historical rules.
//!
//! # Example
//!
//! ```no_run
//! use ponto_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/clt").unwrap();
//! println!("Overtime ceiling: {}h", config.engine().overtime.daily_ceiling_hours);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, InssBracket, InssTable, IrrfBracket, IrrfTable, IrrfTop, OvertimeConfig,
    PayrollConfig, PontoConfig, SeveranceConfig, TaxTable, VacationConfig, WorkweekConfig,
};
