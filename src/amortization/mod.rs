pub mod projection;
pub mod suggested;

use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{LoanType, Modality, PaymentFrequency};

pub use projection::ProjectionCalculator;
pub use suggested::{PaymentSuggestion, SuggestedPaymentCalculator};

/// expected payments for a loan at origination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub loan_type: LoanType,
    pub amount: Money,
    pub monthly_interest_rate: Rate,
    pub payment_frequency: PaymentFrequency,
    /// payment expected each period, whole currency units
    pub estimated_payment: Money,
    /// interest actually collected over the term; none for open-ended loans
    pub total_interest: Option<Money>,
    /// sum of every period payment; none for open-ended loans
    pub total_payments: Option<Money>,
    pub total_capital: Money,
    pub terms: Option<u32>,
    pub modality: Modality,
    /// interest charged on the principal for one period
    pub interest_amount_for_period: Money,
    /// rate-based interest before the period payment is rounded up
    pub theoretical_interest: Option<Money>,
}

impl Projection {
    /// amount the borrower commits to at origination
    pub fn total_to_pay(&self) -> Money {
        self.total_payments.unwrap_or_else(|| self.amount.ceil())
    }

    /// what the per-period rounding adds on top of the theoretical interest
    pub fn rounding_surplus(&self) -> Money {
        match (self.total_interest, self.theoretical_interest) {
            (Some(actual), Some(theoretical)) => actual - theoretical,
            _ => Money::ZERO,
        }
    }
}
