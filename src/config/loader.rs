//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading rule
//! parameters and tax tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, PontoConfig, TaxTable};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/clt/
/// ├── engine.yaml          # Workweek, overtime ceiling, flat rates
/// └── tax_tables/
///     └── 2025-05-01.yaml  # INSS/IRRF tables effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use ponto_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/clt").unwrap();
/// let date = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
/// let table = loader.tax_table_for(date).unwrap();
/// println!("INSS ceiling: {}", table.inss.ceiling);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PontoConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `engine.yaml` or the `tax_tables` directory is
    /// missing, if any file contains invalid YAML, or if no tax table is
    /// present.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let engine = Self::load_yaml::<EngineConfig>(&path.join("engine.yaml"))?;
        let tax_tables = Self::load_tax_tables(&path.join("tax_tables"))?;

        Ok(Self {
            config: PontoConfig::new(engine, tax_tables),
        })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: PontoConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all tax tables from the tax_tables directory.
    fn load_tax_tables(dir: &Path) -> EngineResult<Vec<TaxTable>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                tables.push(Self::load_yaml::<TaxTable>(&path)?);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax tables found)", dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PontoConfig {
        &self.config
    }

    /// Returns the rule parameters.
    pub fn engine(&self) -> &EngineConfig {
        self.config.engine()
    }

    /// Gets the tax table in force on `date`: the most recent table whose
    /// effective date is on or before it.
    ///
    /// Dates before the oldest table use the oldest table. Only an empty
    /// table set yields `TaxTableNotFound`.
    pub fn tax_table_for(&self, date: NaiveDate) -> EngineResult<&TaxTable> {
        let tables = self.config.tax_tables();
        tables
            .iter()
            .rfind(|t| t.effective_date <= date)
            .or_else(|| tables.first())
            .ok_or(EngineError::TaxTableNotFound { date })
    }
}
