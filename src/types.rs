use serde::{Deserialize, Serialize};
use std::fmt;

/// identifier assigned to a loan by the remote api
pub type LoanId = u64;

/// loan product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanType {
    /// fixed term, fixed schedule
    #[serde(rename = "Cápsula", alias = "Capsula")]
    Capsula,
    /// open ended, interest due each month, capital at the payer's discretion
    Indefinido,
}

impl LoanType {
    pub fn is_fixed_term(&self) -> bool {
        matches!(self, LoanType::Capsula)
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanType::Capsula => write!(f, "Cápsula"),
            LoanType::Indefinido => write!(f, "Indefinido"),
        }
    }
}

/// period unit of a fixed-term loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// monthly periods
    #[default]
    Meses,
    /// semi-monthly periods, half the monthly rate
    Quincenas,
}

impl Modality {
    /// singular period name used in status text
    pub fn period_name(&self) -> &'static str {
        match self {
            Modality::Meses => "mes",
            Modality::Quincenas => "quincena",
        }
    }
}

/// lifecycle state owned by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    #[default]
    Active,
    Paid,
    Overdue,
    Cancelled,
}

/// how often a payment is expected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Mensual,
    Quincenal,
}

impl fmt::Display for PaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentFrequency::Mensual => write!(f, "Mensual"),
            PaymentFrequency::Quincenal => write!(f, "Quincenal"),
        }
    }
}
