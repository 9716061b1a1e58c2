use serde::{Deserialize, Serialize};

use crate::errors::{LoanError, Result};

/// engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub cutoff: CutoffPolicy,
    #[serde(default)]
    pub portfolio: PortfolioPolicy,
}

/// cutoff date rules used by the delinquency classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutoffPolicy {
    /// days of tolerance added to the loan day for open-ended loans
    pub indefinido_grace_days: u32,
    /// mid-month cutoff day for semi-monthly loans
    pub quincena_mid_day: u32,
    /// last reference day that still maps to the mid-month cutoff
    pub early_window_last_day: u32,
    /// first reference day that rolls the cutoff into the next month
    pub rollover_first_day: u32,
}

impl CutoffPolicy {
    /// rules used by the lending desk
    pub fn standard() -> Self {
        Self {
            indefinido_grace_days: 2,
            quincena_mid_day: 15,
            early_window_last_day: 9,
            rollover_first_day: 25,
        }
    }

    /// no tolerance on open-ended loans
    pub fn strict() -> Self {
        Self {
            indefinido_grace_days: 0,
            ..Self::standard()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.early_window_last_day == 0 {
            return Err(LoanError::InvalidConfiguration {
                message: "early_window_last_day must be at least 1".to_string(),
            });
        }

        if self.early_window_last_day >= self.quincena_mid_day {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "early_window_last_day {} must precede quincena_mid_day {}",
                    self.early_window_last_day, self.quincena_mid_day
                ),
            });
        }

        if self.quincena_mid_day >= self.rollover_first_day {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "quincena_mid_day {} must precede rollover_first_day {}",
                    self.quincena_mid_day, self.rollover_first_day
                ),
            });
        }

        // every month has at least 28 days
        if self.rollover_first_day > 28 {
            return Err(LoanError::InvalidConfiguration {
                message: format!("rollover_first_day {} exceeds 28", self.rollover_first_day),
            });
        }

        Ok(())
    }
}

/// dashboard rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioPolicy {
    /// days ahead of today in which an upcoming cutoff counts as due soon
    pub due_soon_days: u32,
}

impl PortfolioPolicy {
    pub fn validate(&self) -> Result<()> {
        if self.due_soon_days > 366 {
            return Err(LoanError::InvalidConfiguration {
                message: format!("due_soon_days {} exceeds a year", self.due_soon_days),
            });
        }
        Ok(())
    }
}

impl Default for PortfolioPolicy {
    fn default() -> Self {
        Self { due_soon_days: 7 }
    }
}

impl Default for CutoffPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl EngineConfig {
    pub fn new(cutoff: CutoffPolicy) -> Self {
        Self {
            cutoff,
            portfolio: PortfolioPolicy::default(),
        }
    }

    pub fn with_portfolio(mut self, portfolio: PortfolioPolicy) -> Self {
        self.portfolio = portfolio;
        self
    }

    /// load from a json document, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| LoanError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.cutoff.validate()?;
        self.portfolio.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_is_default() {
        let config = EngineConfig::default();
        assert_eq!(config.cutoff, CutoffPolicy::standard());
        assert_eq!(config.cutoff.indefinido_grace_days, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{"cutoff": {"indefinido_grace_days": 5}}"#).unwrap();
        assert_eq!(config.cutoff.indefinido_grace_days, 5);
        assert_eq!(config.cutoff.quincena_mid_day, 15);

        let empty = EngineConfig::from_json("{}").unwrap();
        assert_eq!(empty, EngineConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_windows() {
        let result = EngineConfig::from_json(r#"{"cutoff": {"quincena_mid_day": 26}}"#);
        assert!(matches!(result, Err(LoanError::InvalidConfiguration { .. })));

        let result = EngineConfig::from_json(r#"{"cutoff": {"rollover_first_day": 30}}"#);
        assert!(result.is_err());

        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_strict_policy() {
        let strict = CutoffPolicy::strict();
        assert_eq!(strict.indefinido_grace_days, 0);
        assert_eq!(strict.rollover_first_day, 25);
    }

    #[test]
    fn test_portfolio_window() {
        let config = EngineConfig::from_json(r#"{"portfolio": {"due_soon_days": 3}}"#).unwrap();
        assert_eq!(config.portfolio.due_soon_days, 3);
        assert_eq!(config.cutoff, CutoffPolicy::standard());
        assert_eq!(EngineConfig::default().portfolio.due_soon_days, 7);

        let result = EngineConfig::from_json(r#"{"portfolio": {"due_soon_days": 400}}"#);
        assert!(matches!(result, Err(LoanError::InvalidConfiguration { .. })));
    }
}
