pub mod history;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::loan::Loan;
use crate::types::{LoanId, LoanType};

pub use history::{total_collected, PaymentRecord};

/// how a submitted payment is broken down, by loan product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaymentBreakdown {
    /// single amount against the period schedule (fixed-term loans)
    #[serde(rename_all = "camelCase")]
    Scheduled {
        amount: Money,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        overdue_periods_paid: Option<u32>,
    },
    /// separate capital and interest (open-ended loans)
    #[serde(rename_all = "camelCase")]
    Split {
        capital_amount: Money,
        interest_amount: Money,
    },
}

/// payment submission handed to the payments api
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub loan_id: LoanId,
    pub payment_date: NaiveDate,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub late_interest: Money,
    #[serde(flatten)]
    pub breakdown: PaymentBreakdown,
}

impl PaymentRequest {
    /// scheduled payment for a fixed-term loan
    pub fn scheduled(
        loan: &Loan,
        payment_date: NaiveDate,
        amount: Money,
        overdue_periods_paid: Option<u32>,
        payment_method: impl Into<String>,
    ) -> Result<Self> {
        let loan_id = require_product(loan, LoanType::Capsula)?;

        if !amount.is_positive() {
            return Err(LoanError::InvalidPaymentAmount { amount });
        }

        if let Some(periods) = overdue_periods_paid {
            if periods > loan.overdue_periods_count {
                return Err(LoanError::OverduePeriodsOutOfRange {
                    requested: periods,
                    available: loan.overdue_periods_count,
                });
            }
        }

        Ok(Self {
            loan_id,
            payment_date,
            payment_method: payment_method.into(),
            notes: None,
            late_interest: Money::ZERO,
            breakdown: PaymentBreakdown::Scheduled {
                amount,
                overdue_periods_paid: overdue_periods_paid.filter(|p| *p > 0),
            },
        })
    }

    /// capital and interest payment for an open-ended loan
    pub fn split(
        loan: &Loan,
        payment_date: NaiveDate,
        capital_amount: Money,
        interest_amount: Money,
        payment_method: impl Into<String>,
    ) -> Result<Self> {
        let loan_id = require_product(loan, LoanType::Indefinido)?;

        if capital_amount.is_negative() {
            return Err(LoanError::InvalidPaymentAmount {
                amount: capital_amount,
            });
        }

        if interest_amount.is_negative() {
            return Err(LoanError::InvalidPaymentAmount {
                amount: interest_amount,
            });
        }

        if !capital_amount.is_positive() && !interest_amount.is_positive() {
            return Err(LoanError::EmptyPayment);
        }

        if capital_amount > loan.current_balance {
            return Err(LoanError::CapitalExceedsBalance {
                balance: loan.current_balance,
                requested: capital_amount,
            });
        }

        Ok(Self {
            loan_id,
            payment_date,
            payment_method: payment_method.into(),
            notes: None,
            late_interest: Money::ZERO,
            breakdown: PaymentBreakdown::Split {
                capital_amount,
                interest_amount,
            },
        })
    }

    /// charge interest for paying late
    pub fn with_late_interest(mut self, late_interest: Money) -> Result<Self> {
        if late_interest.is_negative() {
            return Err(LoanError::InvalidPaymentAmount {
                amount: late_interest,
            });
        }
        self.late_interest = late_interest;
        Ok(self)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// everything collected by this payment
    pub fn total(&self) -> Money {
        let base = match &self.breakdown {
            PaymentBreakdown::Scheduled { amount, .. } => *amount,
            PaymentBreakdown::Split {
                capital_amount,
                interest_amount,
            } => *capital_amount + *interest_amount,
        };
        base + self.late_interest
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn require_product(loan: &Loan, expected: LoanType) -> Result<LoanId> {
    if loan.loan_type != expected {
        return Err(LoanError::InvalidLoanParameters {
            message: format!("{} loans cannot take a {} payment", loan.loan_type, expected),
        });
    }

    loan.id.ok_or_else(|| LoanError::InvalidLoanParameters {
        message: "loan has no id".to_string(),
    })
}
