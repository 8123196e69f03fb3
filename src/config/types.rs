//! Configuration types for hour and payroll rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every type also has a
//! `Default` that reproduces the rules the portal has always applied.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Working-calendar parameters used to derive standard workloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkweekConfig {
    /// Working days in a month; the monthly quota is divided by this.
    pub working_days_per_month: u32,
    /// Working days in a week; the daily standard is multiplied by this.
    pub working_days_per_week: u32,
}

impl Default for WorkweekConfig {
    fn default() -> Self {
        Self {
            working_days_per_month: 22,
            working_days_per_week: 5,
        }
    }
}

/// Daily overtime ceiling applied by the hours aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeConfig {
    /// Maximum overtime credited per day, in hours (CLT art. 59).
    pub daily_ceiling_hours: u32,
}

impl OvertimeConfig {
    /// Returns the daily ceiling as a duration.
    pub fn daily_ceiling(&self) -> Duration {
        Duration::hours(i64::from(self.daily_ceiling_hours))
    }
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            daily_ceiling_hours: 2,
        }
    }
}

/// Monthly payroll (holerite) rates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Multiplier applied to the hourly rate for overtime hours.
    pub overtime_premium: Decimal,
    /// Flat INSS rate applied to gross pay.
    pub inss_rate: Decimal,
    /// Flat transport-voucher rate applied to gross pay.
    pub vt_rate: Decimal,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            overtime_premium: Decimal::new(15, 1),
            inss_rate: Decimal::new(8, 2),
            vt_rate: Decimal::new(5, 2),
        }
    }
}

/// Vacation accrual and payment parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationConfig {
    /// Days accrued for each completed year of service.
    pub days_per_year: u32,
    /// Days accrued for each month of an incomplete year.
    pub accrual_per_month: Decimal,
    /// Maximum days paid in a single vacation payment.
    pub max_days_per_payment: u32,
    /// Transport-voucher rate applied to vacation gross pay.
    pub vt_rate: Decimal,
    /// Fraction of the monthly salary paid as 13th-salary advance.
    pub advance_13_fraction: Decimal,
}

impl Default for VacationConfig {
    fn default() -> Self {
        Self {
            days_per_year: 30,
            accrual_per_month: Decimal::new(25, 1),
            max_days_per_payment: 30,
            vt_rate: Decimal::new(6, 2),
            advance_13_fraction: Decimal::new(5, 1),
        }
    }
}

/// Termination settlement (TRCT) parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveranceConfig {
    /// Monthly FGTS deposit rate over the salary.
    pub fgts_rate: Decimal,
    /// Penalty over the FGTS balance on dismissal without cause.
    pub fgts_penalty_rate: Decimal,
    /// Flat INSS rate over the salary.
    pub inss_rate: Decimal,
    /// Flat transport-voucher rate over the salary.
    pub vt_rate: Decimal,
    /// Tenure in days from which overdue vacation is owed in full.
    pub overdue_vacation_tenure_days: i64,
}

impl Default for SeveranceConfig {
    fn default() -> Self {
        Self {
            fgts_rate: Decimal::new(8, 2),
            fgts_penalty_rate: Decimal::new(4, 1),
            inss_rate: Decimal::new(8, 2),
            vt_rate: Decimal::new(5, 2),
            overdue_vacation_tenure_days: 365,
        }
    }
}

/// Rule parameters for every calculator, as found in `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Working calendar.
    #[serde(default)]
    pub workweek: WorkweekConfig,
    /// Daily overtime ceiling.
    #[serde(default)]
    pub overtime: OvertimeConfig,
    /// Monthly payroll rates.
    #[serde(default)]
    pub payroll: PayrollConfig,
    /// Vacation parameters.
    #[serde(default)]
    pub vacation: VacationConfig,
    /// Termination parameters.
    #[serde(default)]
    pub severance: SeveranceConfig,
}

/// One INSS bracket: amounts up to `up_to` pay `rate` on the whole amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InssBracket {
    /// Inclusive upper bound of the bracket.
    pub up_to: Decimal,
    /// Rate applied to the whole amount.
    pub rate: Decimal,
}

/// INSS table used for vacation payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InssTable {
    /// Brackets sorted by `up_to`.
    pub brackets: Vec<InssBracket>,
    /// Flat contribution for amounts above the last bracket.
    pub ceiling: Decimal,
}

impl InssTable {
    /// Returns the index of the bracket containing `amount`, or `None` when
    /// the amount is above every bracket and the ceiling applies.
    pub fn bracket_index(&self, amount: Decimal) -> Option<usize> {
        self.brackets.iter().position(|b| amount <= b.up_to)
    }
}

/// One IRRF bracket: `base * rate - deduction` for bases up to `up_to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfBracket {
    /// Inclusive upper bound of the bracket.
    pub up_to: Decimal,
    /// Rate applied to the base.
    pub rate: Decimal,
    /// Amount subtracted after applying the rate.
    pub deduction: Decimal,
}

/// Rate and deduction for bases above every IRRF bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfTop {
    /// Rate applied to the base.
    pub rate: Decimal,
    /// Amount subtracted after applying the rate.
    pub deduction: Decimal,
}

/// IRRF withholding table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrfTable {
    /// Brackets sorted by `up_to`.
    pub brackets: Vec<IrrfBracket>,
    /// The open-ended top bracket.
    pub top: IrrfTop,
}

impl IrrfTable {
    /// Returns the index of the bracket containing `base`; the top bracket
    /// is reported as `brackets.len()`.
    pub fn bracket_index(&self, base: Decimal) -> usize {
        self.brackets
            .iter()
            .position(|b| base <= b.up_to)
            .unwrap_or(self.brackets.len())
    }

    /// Returns `(rate, deduction)` for the bracket containing `base`.
    pub fn rate_for(&self, base: Decimal) -> (Decimal, Decimal) {
        match self.brackets.get(self.bracket_index(base)) {
            Some(bracket) => (bracket.rate, bracket.deduction),
            None => (self.top.rate, self.top.deduction),
        }
    }
}

/// Tax tables in force from `effective_date`, as found in `tax_tables/*.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTable {
    /// First day this table applies.
    pub effective_date: NaiveDate,
    /// INSS brackets.
    pub inss: InssTable,
    /// IRRF brackets.
    pub irrf: IrrfTable,
}

impl TaxTable {
    pub(crate) fn sort_brackets(&mut self) {
        self.inss.brackets.sort_by(|a, b| a.up_to.cmp(&b.up_to));
        self.irrf.brackets.sort_by(|a, b| a.up_to.cmp(&b.up_to));
    }
}

impl Default for TaxTable {
    /// The 2025 tables the portal has been using.
    fn default() -> Self {
        Self {
            effective_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap_or_default(),
            inss: InssTable {
                brackets: vec![
                    InssBracket {
                        up_to: Decimal::new(151800, 2),
                        rate: Decimal::new(75, 3),
                    },
                    InssBracket {
                        up_to: Decimal::new(279388, 2),
                        rate: Decimal::new(9, 2),
                    },
                    InssBracket {
                        up_to: Decimal::new(419083, 2),
                        rate: Decimal::new(12, 2),
                    },
                    InssBracket {
                        up_to: Decimal::new(815741, 2),
                        rate: Decimal::new(14, 2),
                    },
                ],
                ceiling: Decimal::new(95158, 2),
            },
            irrf: IrrfTable {
                brackets: vec![
                    IrrfBracket {
                        up_to: Decimal::new(242880, 2),
                        rate: Decimal::ZERO,
                        deduction: Decimal::ZERO,
                    },
                    IrrfBracket {
                        up_to: Decimal::new(282665, 2),
                        rate: Decimal::new(75, 3),
                        deduction: Decimal::new(18216, 2),
                    },
                    IrrfBracket {
                        up_to: Decimal::new(375105, 2),
                        rate: Decimal::new(15, 2),
                        deduction: Decimal::new(39416, 2),
                    },
                    IrrfBracket {
                        up_to: Decimal::new(466468, 2),
                        rate: Decimal::new(225, 3),
                        deduction: Decimal::new(67549, 2),
                    },
                ],
                top: IrrfTop {
                    rate: Decimal::new(275, 3),
                    deduction: Decimal::new(90873, 2),
                },
            },
        }
    }
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct PontoConfig {
    /// Rule parameters.
    engine: EngineConfig,
    /// Tax tables by effective date (sorted oldest first).
    tax_tables: Vec<TaxTable>,
}

impl PontoConfig {
    /// Creates a new PontoConfig from its component parts.
    pub fn new(engine: EngineConfig, tax_tables: Vec<TaxTable>) -> Self {
        let mut sorted_tables = tax_tables;
        for table in &mut sorted_tables {
            table.sort_brackets();
        }
        sorted_tables.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            engine,
            tax_tables: sorted_tables,
        }
    }

    /// Returns the rule parameters.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns all tax tables.
    pub fn tax_tables(&self) -> &[TaxTable] {
        &self.tax_tables
    }
}

impl Default for PontoConfig {
    fn default() -> Self {
        Self::new(EngineConfig::default(), vec![TaxTable::default()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_engine_config_matches_legacy_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.workweek.working_days_per_month, 22);
        assert_eq!(config.overtime.daily_ceiling(), Duration::hours(2));
        assert_eq!(config.payroll.overtime_premium, dec("1.5"));
        assert_eq!(config.payroll.inss_rate, dec("0.08"));
        assert_eq!(config.vacation.vt_rate, dec("0.06"));
        assert_eq!(config.severance.fgts_penalty_rate, dec("0.4"));
    }

    #[test]
    fn test_inss_bracket_index_boundaries_are_inclusive() {
        let table = TaxTable::default();
        assert_eq!(table.inss.bracket_index(dec("1518.00")), Some(0));
        assert_eq!(table.inss.bracket_index(dec("1518.01")), Some(1));
        assert_eq!(table.inss.bracket_index(dec("8157.41")), Some(3));
        assert_eq!(table.inss.bracket_index(dec("8157.42")), None);
    }

    #[test]
    fn test_irrf_rate_for_top_bracket() {
        let table = TaxTable::default();
        assert_eq!(table.irrf.bracket_index(dec("2428.80")), 0);
        assert_eq!(
            table.irrf.rate_for(dec("10000")),
            (dec("0.275"), dec("908.73"))
        );
    }

    #[test]
    fn test_ponto_config_sorts_tables_by_effective_date() {
        let mut older = TaxTable::default();
        older.effective_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let newer = TaxTable::default();

        let config = PontoConfig::new(EngineConfig::default(), vec![newer, older]);
        assert_eq!(
            config.tax_tables()[0].effective_date,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_engine_config_sections_default_when_missing() {
        let yaml = "overtime:\n  daily_ceiling_hours: 3\n";
        let config: EngineConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.overtime.daily_ceiling_hours, 3);
        assert_eq!(config.payroll, PayrollConfig::default());
    }
}
