pub mod classifier;
pub mod cutoff;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{LoanId, Modality};

pub use classifier::StatusClassifier;
pub use cutoff::CutoffCalculator;

/// display classification of a loan, distinct from the server's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisplayStatus {
    /// fully paid, terminal
    Paid,
    /// past the cutoff without a recorded payment
    Overdue,
    /// paid before the next cutoff
    Current,
    /// no payment yet and the first cutoff has not passed
    WaitingFirstPayment,
}

impl DisplayStatus {
    /// short status text shown in the loan list
    pub fn label(&self, modality: Modality) -> String {
        match self {
            DisplayStatus::Paid => "Pagado".to_string(),
            DisplayStatus::Overdue => "Adeudo".to_string(),
            DisplayStatus::Current => "Al corriente".to_string(),
            DisplayStatus::WaitingFirstPayment => format!("1º {}", modality.period_name()),
        }
    }

    pub fn tooltip(&self) -> &'static str {
        match self {
            DisplayStatus::Paid => "Préstamo completamente pagado",
            DisplayStatus::Overdue => "Adeudo - Ya pasó la fecha de corte sin registrar pago",
            DisplayStatus::Current => "Al corriente - Pago realizado a tiempo",
            DisplayStatus::WaitingFirstPayment => "Esperando primer pago",
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, DisplayStatus::Overdue)
    }
}

/// classification plus the dates behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub loan_id: Option<LoanId>,
    pub status: DisplayStatus,
    pub label: String,
    pub next_cutoff: NaiveDate,
    pub days_since_last_payment: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(DisplayStatus::Paid.label(Modality::Meses), "Pagado");
        assert_eq!(DisplayStatus::Overdue.label(Modality::Meses), "Adeudo");
        assert_eq!(DisplayStatus::Current.label(Modality::Quincenas), "Al corriente");
        assert_eq!(DisplayStatus::WaitingFirstPayment.label(Modality::Quincenas), "1º quincena");
        assert_eq!(DisplayStatus::WaitingFirstPayment.label(Modality::Meses), "1º mes");
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&DisplayStatus::WaitingFirstPayment).unwrap(),
            r#""WAITING_FIRST_PAYMENT""#
        );
    }
}
