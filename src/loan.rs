use chrono::{DateTime, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::{LoanId, LoanStatus, LoanType, Modality};

/// origination terms of a loan, enough to quote it before it exists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub loan_type: LoanType,
    pub amount: Money,
    pub monthly_interest_rate: Rate,
    pub term: Option<u32>,
    pub modality: Modality,
}

impl LoanTerms {
    /// fixed-term terms
    pub fn capsula(amount: Money, monthly_interest_rate: Rate, term: u32, modality: Modality) -> Self {
        Self {
            loan_type: LoanType::Capsula,
            amount,
            monthly_interest_rate,
            term: Some(term),
            modality,
        }
    }

    /// open-ended terms, always monthly and without a term
    pub fn indefinido(amount: Money, monthly_interest_rate: Rate) -> Self {
        Self {
            loan_type: LoanType::Indefinido,
            amount,
            monthly_interest_rate,
            term: None,
            modality: Modality::Meses,
        }
    }

    /// reject inputs the amortization formulas are undefined for
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_positive() {
            return Err(LoanError::InvalidLoanParameters {
                message: format!("amount must be positive, got {}", self.amount),
            });
        }

        if self.monthly_interest_rate.is_negative() {
            return Err(LoanError::InvalidLoanParameters {
                message: format!(
                    "monthly interest rate must not be negative, got {}",
                    self.monthly_interest_rate
                ),
            });
        }

        if self.loan_type == LoanType::Capsula {
            match self.term {
                Some(term) if term > 0 => {}
                Some(_) => {
                    return Err(LoanError::InvalidLoanParameters {
                        message: "term must be at least one period".to_string(),
                    })
                }
                None => {
                    return Err(LoanError::InvalidLoanParameters {
                        message: "fixed-term loans require a term".to_string(),
                    })
                }
            }
        }

        Ok(())
    }

    /// period unit actually in effect; open-ended loans are always monthly
    pub fn effective_modality(&self) -> Modality {
        match self.loan_type {
            LoanType::Capsula => self.modality,
            LoanType::Indefinido => Modality::Meses,
        }
    }

    /// interest rate charged per period
    pub fn period_rate(&self) -> Rate {
        match self.effective_modality() {
            Modality::Quincenas => self.monthly_interest_rate.half(),
            Modality::Meses => self.monthly_interest_rate,
        }
    }

    /// number of periods for a fixed-term loan
    pub fn number_of_periods(&self) -> Result<u32> {
        self.validate()?;
        match (self.loan_type, self.term) {
            (LoanType::Capsula, Some(term)) => Ok(term),
            _ => Err(LoanError::InvalidLoanParameters {
                message: "open-ended loans have no fixed number of periods".to_string(),
            }),
        }
    }
}

/// snapshot of a loan as returned by the remote api
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LoanId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,

    // origination terms
    pub loan_type: LoanType,
    pub amount: Money,
    #[serde(default)]
    pub monthly_interest_rate: Rate,
    #[serde(default)]
    pub term: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modality: Modality,
    #[serde(deserialize_with = "wire_date::deserialize")]
    pub loan_date: NaiveDate,

    // running totals
    #[serde(default)]
    pub current_balance: Money,
    #[serde(default)]
    pub total_interest_paid: Money,
    #[serde(default)]
    pub total_capital_paid: Money,
    #[serde(default)]
    pub total_extra_charges_paid: Money,

    // status
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: LoanStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub months_paid: u32,
    #[serde(default, deserialize_with = "wire_date::deserialize_option")]
    pub last_payment_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overdue_periods_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Loan {
    /// new fixed-term loan with no payments recorded
    pub fn capsula(
        amount: Money,
        monthly_interest_rate: Rate,
        term: u32,
        modality: Modality,
        loan_date: NaiveDate,
    ) -> Self {
        Self::from_terms(
            LoanTerms::capsula(amount, monthly_interest_rate, term, modality),
            loan_date,
        )
    }

    /// new open-ended loan with no payments recorded
    pub fn indefinido(amount: Money, monthly_interest_rate: Rate, loan_date: NaiveDate) -> Self {
        Self::from_terms(LoanTerms::indefinido(amount, monthly_interest_rate), loan_date)
    }

    /// new loan from origination terms, balance starts at the principal
    pub fn from_terms(terms: LoanTerms, loan_date: NaiveDate) -> Self {
        Self {
            id: None,
            customer_id: None,
            loan_type: terms.loan_type,
            amount: terms.amount,
            monthly_interest_rate: terms.monthly_interest_rate,
            term: terms.term,
            modality: terms.modality,
            loan_date,
            current_balance: terms.amount,
            total_interest_paid: Money::ZERO,
            total_capital_paid: Money::ZERO,
            total_extra_charges_paid: Money::ZERO,
            status: LoanStatus::Active,
            months_paid: 0,
            last_payment_date: None,
            overdue_periods_count: 0,
            notes: None,
        }
    }

    /// parse a snapshot from the api's json
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LoanError::InvalidLoanParameters {
            message: e.to_string(),
        })
    }

    pub fn with_id(mut self, id: LoanId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_status(mut self, status: LoanStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_balance(mut self, balance: Money) -> Self {
        self.current_balance = balance;
        self
    }

    /// record that `periods_paid` periods have been paid, the last on `last_payment`
    pub fn with_payments(mut self, periods_paid: u32, last_payment: NaiveDate) -> Self {
        self.months_paid = periods_paid;
        self.last_payment_date = Some(last_payment);
        self
    }

    pub fn with_overdue_periods(mut self, count: u32) -> Self {
        self.overdue_periods_count = count;
        self
    }

    /// origination terms of this loan
    pub fn terms(&self) -> LoanTerms {
        LoanTerms {
            loan_type: self.loan_type,
            amount: self.amount,
            monthly_interest_rate: self.monthly_interest_rate,
            term: match self.loan_type {
                LoanType::Capsula => self.term,
                LoanType::Indefinido => None,
            },
            modality: self.effective_modality(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.terms().validate()
    }

    /// period unit actually in effect; open-ended loans are always monthly
    pub fn effective_modality(&self) -> Modality {
        match self.loan_type {
            LoanType::Capsula => self.modality,
            LoanType::Indefinido => Modality::Meses,
        }
    }

    /// last payment date, or the loan date when nothing has been paid
    pub fn reference_date(&self) -> NaiveDate {
        self.last_payment_date.unwrap_or(self.loan_date)
    }

    pub fn has_payments(&self) -> bool {
        self.months_paid > 0
    }

    pub fn is_paid(&self) -> bool {
        self.status == LoanStatus::Paid
    }

    /// interest, capital and extra charges collected so far
    pub fn total_paid(&self) -> Money {
        self.total_interest_paid + self.total_capital_paid + self.total_extra_charges_paid
    }

    /// whole percentage of the principal already repaid
    pub fn payment_progress(&self) -> Decimal {
        if !self.amount.is_positive() {
            return Decimal::ZERO;
        }
        (self.total_capital_paid.as_decimal() / self.amount.as_decimal() * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// dates arrive either as "2024-01-10" or as full rfc 3339 timestamps
pub(crate) mod wire_date {
    use super::*;
    use serde::de::Error;

    pub fn parse(input: &str) -> std::result::Result<NaiveDate, String> {
        let trimmed = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|dt| dt.date_naive())
            .map_err(|e| format!("{:?}: {}", input, e))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub fn deserialize_option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}

/// parse a wire date the same way snapshots do
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    wire_date::parse(input).map_err(|message| LoanError::InvalidDate { message })
}
