use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimal::Money;
use crate::engine::LoanEngine;
use crate::loan::Loan;
use crate::types::{LoanId, LoanStatus, LoanType};

/// dashboard figures across a set of loan snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_loaned: Money,
    pub capital_recovered: Money,
    pub interest_collected: Money,
    pub extra_charges_collected: Money,
    /// principal still out on active loans
    pub capital_in_transit: Money,
    /// interest expected for the current period on active loans
    pub monthly_interest: Money,
    pub overdue_count: u32,
    pub overdue_amount: Money,
    pub active_loans: u32,
    pub total_loans: u32,
    pub completed_loans: u32,
    /// everything collected on fixed-term loans
    pub collected_capsula: Money,
    /// everything collected on open-ended loans
    pub collected_indefinido: Money,
    pub overdue_loans: Vec<OverdueLoan>,
    /// active loans whose next cutoff falls inside the due-soon window
    pub due_soon_loans: Vec<DueSoonLoan>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueLoan {
    pub loan_id: Option<LoanId>,
    pub customer_id: Option<u64>,
    pub current_balance: Money,
    pub days_since_last_payment: u64,
    pub last_payment_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueSoonLoan {
    pub loan_id: Option<LoanId>,
    pub customer_id: Option<u64>,
    pub current_balance: Money,
    pub next_cutoff: NaiveDate,
    pub days_until_cutoff: u64,
}

impl PortfolioSummary {
    pub fn from_loans(engine: &LoanEngine, loans: &[Loan], today: NaiveDate) -> Self {
        let due_soon_days = i64::from(engine.config().portfolio.due_soon_days);
        let mut summary = PortfolioSummary {
            total_loans: u32::try_from(loans.len()).unwrap_or(u32::MAX),
            ..Default::default()
        };

        for loan in loans {
            if loan.status != LoanStatus::Cancelled {
                summary.total_loaned += loan.amount;
            }
            if loan.is_paid() {
                summary.completed_loans = summary.completed_loans.saturating_add(1);
            }
            summary.capital_recovered += loan.total_capital_paid;
            summary.interest_collected += loan.total_interest_paid;
            summary.extra_charges_collected += loan.total_extra_charges_paid;

            match loan.loan_type {
                LoanType::Capsula => summary.collected_capsula += loan.total_paid(),
                LoanType::Indefinido => summary.collected_indefinido += loan.total_paid(),
            }

            if !is_active(loan) {
                continue;
            }

            summary.active_loans = summary.active_loans.saturating_add(1);
            summary.capital_in_transit += loan.current_balance;

            match engine.outstanding_interest(loan) {
                Ok(interest) => summary.monthly_interest += interest,
                Err(e) => warn!(loan_id = ?loan.id, error = %e, "skipping interest for invalid loan"),
            }

            let report = engine.report(loan, today);
            if report.status.is_overdue() {
                summary.overdue_count = summary.overdue_count.saturating_add(1);
                summary.overdue_amount += loan.current_balance;
                summary.overdue_loans.push(OverdueLoan {
                    loan_id: loan.id,
                    customer_id: loan.customer_id,
                    current_balance: loan.current_balance,
                    days_since_last_payment: report.days_since_last_payment,
                    last_payment_date: loan.last_payment_date,
                });
                continue;
            }

            let days_until_cutoff = (report.next_cutoff - today).num_days();
            if (0..=due_soon_days).contains(&days_until_cutoff) {
                summary.due_soon_loans.push(DueSoonLoan {
                    loan_id: loan.id,
                    customer_id: loan.customer_id,
                    current_balance: loan.current_balance,
                    next_cutoff: report.next_cutoff,
                    days_until_cutoff: days_until_cutoff.unsigned_abs(),
                });
            }
        }

        debug!(
            total_loans = summary.total_loans,
            active_loans = summary.active_loans,
            overdue_count = summary.overdue_count,
            due_soon = summary.due_soon_loans.len(),
            "summarized portfolio"
        );

        summary
    }

    /// share of lent principal already repaid
    pub fn recovery_percentage(&self) -> Decimal {
        whole_percentage(self.capital_recovered.as_decimal(), self.total_loaned.as_decimal()).unwrap_or(Decimal::ZERO)
    }

    /// share of active loans that are not overdue
    pub fn punctuality_percentage(&self) -> Decimal {
        let punctual = self.active_loans.saturating_sub(self.overdue_count);
        whole_percentage(Decimal::from(punctual), Decimal::from(self.active_loans))
            .unwrap_or(Decimal::ONE_HUNDRED)
    }

    /// interest earned per unit of capital recovered
    pub fn profit_margin(&self) -> Decimal {
        whole_percentage(self.interest_collected.as_decimal(), self.capital_recovered.as_decimal())
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total_collected(&self) -> Money {
        self.capital_recovered + self.interest_collected + self.extra_charges_collected
    }
}

/// loans still being collected on
fn is_active(loan: &Loan) -> bool {
    matches!(loan.status, LoanStatus::Active | LoanStatus::Overdue) && loan.current_balance.is_positive()
}

fn whole_percentage(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    Some((part / whole * Decimal::ONE_HUNDRED).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}
