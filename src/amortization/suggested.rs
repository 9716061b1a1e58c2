use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::amortization::ProjectionCalculator;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::loan::Loan;
use crate::types::LoanType;

/// everything the payment screen pre-fills for a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuggestion {
    pub loan_type: LoanType,
    /// regular payment for one period
    pub period_payment: Money,
    /// interest owed for the current period
    pub outstanding_interest: Money,
    /// overdue periods being settled, zero for a regular payment
    pub overdue_periods: u32,
    /// amount to collect
    pub suggested_amount: Money,
    /// most capital an open-ended loan can take in one payment
    pub max_capital: Money,
}

/// payment-time calculations against a loan snapshot
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestedPaymentCalculator {
    projections: ProjectionCalculator,
}

impl SuggestedPaymentCalculator {
    pub fn new() -> Self {
        Self {
            projections: ProjectionCalculator::new(),
        }
    }

    /// interest owed for the current period
    ///
    /// Open-ended loans accrue on the current balance; fixed-term loans owe
    /// the flat per-period interest on the original principal.
    pub fn outstanding_interest(&self, loan: &Loan) -> Result<Money> {
        match loan.loan_type {
            LoanType::Indefinido => {
                loan.validate()?;
                Ok(loan
                    .current_balance
                    .max(Money::ZERO)
                    .ceil_mul(loan.monthly_interest_rate.as_decimal()))
            }
            LoanType::Capsula => Ok(self.projections.project_loan(loan)?.interest_amount_for_period),
        }
    }

    /// regular payment for one period
    ///
    /// Fixed-term loans repeat the origination period payment over the full
    /// original term; paid periods do not shrink it.
    pub fn period_payment(&self, loan: &Loan) -> Result<Money> {
        match loan.loan_type {
            LoanType::Capsula => Ok(self.projections.project_loan(loan)?.estimated_payment),
            LoanType::Indefinido => self.outstanding_interest(loan),
        }
    }

    /// amount to collect when settling `overdue_periods` at once (zero for a regular payment)
    pub fn suggested_payment(&self, loan: &Loan, overdue_periods: u32) -> Result<Money> {
        if overdue_periods > loan.overdue_periods_count {
            return Err(LoanError::OverduePeriodsOutOfRange {
                requested: overdue_periods,
                available: loan.overdue_periods_count,
            });
        }

        let period_payment = self.period_payment(loan)?;
        let amount = if overdue_periods == 0 {
            period_payment.ceil()
        } else {
            period_payment.ceil_mul(Decimal::from(overdue_periods))
        };

        debug!(
            loan_id = ?loan.id,
            loan_type = %loan.loan_type,
            overdue_periods,
            amount = %amount,
            "suggested payment"
        );

        Ok(amount)
    }

    /// overdue period counts a payer may choose to settle
    pub fn overdue_period_options(&self, loan: &Loan) -> Vec<u32> {
        (1..=loan.overdue_periods_count).collect()
    }

    /// all pre-filled values for the payment screen
    pub fn suggest(&self, loan: &Loan, overdue_periods: u32) -> Result<PaymentSuggestion> {
        Ok(PaymentSuggestion {
            loan_type: loan.loan_type,
            period_payment: self.period_payment(loan)?,
            outstanding_interest: self.outstanding_interest(loan)?,
            overdue_periods,
            suggested_amount: self.suggested_payment(loan, overdue_periods)?,
            max_capital: loan.current_balance.max(Money::ZERO),
        })
    }
}
