use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid loan parameters: {message}")]
    InvalidLoanParameters {
        message: String,
    },

    #[error("invalid currency value: {input:?}")]
    InvalidCurrency {
        input: String,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("payment must include capital or interest")]
    EmptyPayment,

    #[error("capital exceeds balance: balance {balance}, requested {requested}")]
    CapitalExceedsBalance {
        balance: Money,
        requested: Money,
    },

    #[error("overdue periods out of range: requested {requested}, available {available}")]
    OverduePeriodsOutOfRange {
        requested: u32,
        available: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
