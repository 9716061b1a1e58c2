use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::amortization::Projection;
use crate::decimal::Money;
use crate::engine::LoanEngine;
use crate::loan::Loan;
use crate::status::DisplayStatus;
use crate::types::{LoanId, LoanStatus, LoanType};

/// serializable per-loan view for list and detail screens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanView {
    pub id: Option<LoanId>,
    pub loan_type: LoanType,
    pub status: LoanStatus,
    pub display_status: DisplayStatus,
    pub label: String,
    pub tooltip: String,
    pub next_cutoff: NaiveDate,
    pub financial: FinancialView,
    /// absent when the stored terms cannot be projected
    pub projection: Option<Projection>,
    /// regular payment to pre-fill; absent for paid loans
    pub suggested_payment: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialView {
    pub amount: Money,
    pub current_balance: Money,
    pub total_paid: Money,
    pub total_capital_paid: Money,
    pub total_interest_paid: Money,
    pub payment_progress: Decimal,
    pub months_paid: u32,
    pub overdue_periods_count: u32,
}

impl LoanView {
    pub fn build(engine: &LoanEngine, loan: &Loan, today: NaiveDate) -> Self {
        let display_status = engine.classify(loan, today);

        let projection = match engine.project_loan(loan) {
            Ok(projection) => Some(projection),
            Err(e) => {
                warn!(loan_id = ?loan.id, error = %e, "loan terms cannot be projected");
                None
            }
        };

        let suggested_payment = if loan.is_paid() {
            None
        } else {
            engine.suggested_payment(loan, 0).ok()
        };

        LoanView {
            id: loan.id,
            loan_type: loan.loan_type,
            status: loan.status,
            display_status,
            label: display_status.label(loan.effective_modality()),
            tooltip: display_status.tooltip().to_string(),
            next_cutoff: engine.next_cutoff(loan),
            financial: FinancialView {
                amount: loan.amount,
                current_balance: loan.current_balance,
                total_paid: loan.total_paid(),
                total_capital_paid: loan.total_capital_paid,
                total_interest_paid: loan.total_interest_paid,
                payment_progress: loan.payment_progress(),
                months_paid: loan.months_paid,
                overdue_periods_count: loan.overdue_periods_count,
            },
            projection,
            suggested_payment,
        }
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
