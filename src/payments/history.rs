use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::loan::wire_date;

/// a recorded payment as returned by the payments api
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "wire_date::deserialize")]
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub interest_paid: Money,
    #[serde(default)]
    pub capital_paid: Money,
    #[serde(default)]
    pub late_interest: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_balance: Option<Money>,
}

impl PaymentRecord {
    /// interest, capital and late interest applied by this payment
    pub fn total(&self) -> Money {
        self.interest_paid + self.capital_paid + self.late_interest
    }
}

/// sum of every recorded payment
pub fn total_collected(records: &[PaymentRecord]) -> Money {
    records.iter().map(PaymentRecord::total).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_history_from_api_json() {
        let json = r#"[
            {"id": 1, "paymentDate": "2024-02-10T18:30:00.000Z", "amount": "2167.00",
             "interestPaid": "500.00", "capitalPaid": "1667.00", "lateInterest": 50,
             "paymentMethod": "CASH", "newBalance": "8333.00"},
            {"id": 2, "paymentDate": "2024-03-10", "amount": "2167.00",
             "interestPaid": "$500.00", "capitalPaid": "1,667.00", "lateInterest": null}
        ]"#;

        let records: Vec<PaymentRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].payment_date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(records[0].total(), Money::from_major(2217));
        assert_eq!(records[0].new_balance, Some(Money::from_major(8333)));
        assert_eq!(records[1].total(), Money::from_major(2167));
        assert_eq!(total_collected(&records), Money::from_decimal(dec!(4384.00)));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(total_collected(&[]), Money::ZERO);
    }
}
