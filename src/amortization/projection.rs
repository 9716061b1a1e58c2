use rust_decimal::Decimal;
use tracing::debug;

use crate::amortization::Projection;
use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::{Loan, LoanTerms};
use crate::types::{LoanType, Modality, PaymentFrequency};

/// projects expected payments from origination terms
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionCalculator;

impl ProjectionCalculator {
    pub fn new() -> Self {
        Self
    }

    /// project an existing loan from its original terms
    pub fn project_loan(&self, loan: &Loan) -> Result<Projection> {
        self.project(&loan.terms())
    }

    /// project a quote
    pub fn project(&self, terms: &LoanTerms) -> Result<Projection> {
        terms.validate()?;

        let projection = match terms.loan_type {
            LoanType::Indefinido => self.project_open_ended(terms),
            LoanType::Capsula => self.project_fixed_term(terms)?,
        };

        debug!(
            loan_type = %terms.loan_type,
            amount = %terms.amount,
            estimated_payment = %projection.estimated_payment,
            total_payments = ?projection.total_payments,
            "projected loan"
        );

        Ok(projection)
    }

    /// interest only, no fixed horizon
    fn project_open_ended(&self, terms: &LoanTerms) -> Projection {
        let interest = terms.amount.ceil_mul(terms.monthly_interest_rate.as_decimal());

        Projection {
            loan_type: LoanType::Indefinido,
            amount: terms.amount,
            monthly_interest_rate: terms.monthly_interest_rate,
            payment_frequency: PaymentFrequency::Mensual,
            estimated_payment: interest,
            total_interest: None,
            total_payments: None,
            total_capital: terms.amount,
            terms: None,
            modality: Modality::Meses,
            interest_amount_for_period: interest,
            theoretical_interest: None,
        }
    }

    /// flat interest spread over equal, rounded-up period payments
    fn project_fixed_term(&self, terms: &LoanTerms) -> Result<Projection> {
        let periods = terms.number_of_periods()?;
        let n = Decimal::from(periods);
        let period_rate = terms.period_rate().as_decimal();

        let interest_amount_for_period = terms.amount.ceil_mul(period_rate);
        let theoretical_interest = terms.amount.ceil_mul(period_rate * n);
        let estimated_payment = (terms.amount + theoretical_interest).ceil_div(n);

        // the total is always an exact multiple of the period payment
        let total_payments = estimated_payment * n;
        let total_interest = total_payments - terms.amount;

        let modality = terms.effective_modality();
        let payment_frequency = match modality {
            Modality::Quincenas => PaymentFrequency::Quincenal,
            Modality::Meses => PaymentFrequency::Mensual,
        };

        Ok(Projection {
            loan_type: LoanType::Capsula,
            amount: terms.amount,
            monthly_interest_rate: terms.monthly_interest_rate,
            payment_frequency,
            estimated_payment,
            total_interest: Some(total_interest),
            total_payments: Some(total_payments),
            total_capital: terms.amount,
            terms: Some(periods),
            modality,
            interest_amount_for_period,
            theoretical_interest: Some(theoretical_interest),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::errors::LoanError;
    use rust_decimal_macros::dec;

    fn capsula(amount: i64, rate: Decimal, term: u32, modality: Modality) -> LoanTerms {
        LoanTerms::capsula(Money::from_major(amount), Rate::from_percentage(rate), term, modality)
    }

    #[test]
    fn test_capsula_monthly_projection() {
        let projection = ProjectionCalculator::new()
            .project(&capsula(10_000, dec!(5), 6, Modality::Meses))
            .unwrap();

        assert_eq!(projection.payment_frequency, PaymentFrequency::Mensual);
        assert_eq!(projection.interest_amount_for_period, Money::from_major(500));
        assert_eq!(projection.theoretical_interest, Some(Money::from_major(3000)));
        assert_eq!(projection.estimated_payment, Money::from_major(2167));
        assert_eq!(projection.total_payments, Some(Money::from_major(13_002)));
        assert_eq!(projection.total_interest, Some(Money::from_major(3002)));
        assert_eq!(projection.rounding_surplus(), Money::from_major(2));
        assert_eq!(projection.total_to_pay(), Money::from_major(13_002));
    }

    #[test]
    fn test_capsula_semi_monthly_projection() {
        let projection = ProjectionCalculator::new()
            .project(&capsula(10_000, dec!(5), 6, Modality::Quincenas))
            .unwrap();

        assert_eq!(projection.payment_frequency, PaymentFrequency::Quincenal);
        assert_eq!(projection.interest_amount_for_period, Money::from_major(250));
        assert_eq!(projection.theoretical_interest, Some(Money::from_major(1500)));
        assert_eq!(projection.estimated_payment, Money::from_major(1917));
        assert_eq!(projection.total_payments, Some(Money::from_major(11_502)));
        assert_eq!(projection.total_interest, Some(Money::from_major(1502)));
    }

    #[test]
    fn test_indefinido_projection() {
        let terms = LoanTerms::indefinido(Money::from_major(50_000), Rate::from_percentage(dec!(4)));
        let projection = ProjectionCalculator::new().project(&terms).unwrap();

        assert_eq!(projection.payment_frequency, PaymentFrequency::Mensual);
        assert_eq!(projection.estimated_payment, Money::from_major(2000));
        assert_eq!(projection.interest_amount_for_period, Money::from_major(2000));
        assert_eq!(projection.total_interest, None);
        assert_eq!(projection.total_payments, None);
        assert_eq!(projection.terms, None);
        assert_eq!(projection.total_to_pay(), Money::from_major(50_000));
    }

    #[test]
    fn test_fractional_amounts_round_up() {
        // 1234.50 * 0.035 = 43.2075 -> 44
        let terms = LoanTerms::indefinido(
            Money::from_decimal(dec!(1234.50)),
            Rate::from_percentage(dec!(3.5)),
        );
        let projection = ProjectionCalculator::new().project(&terms).unwrap();
        assert_eq!(projection.estimated_payment, Money::from_major(44));
        assert_eq!(projection.total_to_pay(), Money::from_major(1235));
    }

    #[test]
    fn test_three_decimal_rate_from_wire_is_charged_exactly() {
        let loan = Loan::from_json(
            r#"{"loanType": "Indefinido", "amount": 100000, "monthlyInterestRate": "2.625", "loanDate": "2024-01-10"}"#,
        )
        .unwrap();
        let projection = ProjectionCalculator::new().project_loan(&loan).unwrap();
        assert_eq!(projection.estimated_payment, Money::from_major(2625));

        let loan = Loan::from_json(
            r#"{"loanType": "Indefinido", "amount": 100000, "monthlyInterestRate": 2.625, "loanDate": "2024-01-10"}"#,
        )
        .unwrap();
        let projection = ProjectionCalculator::new().project_loan(&loan).unwrap();
        assert_eq!(projection.interest_amount_for_period, Money::from_major(2625));
    }

    #[test]
    fn test_sub_centavo_principal_never_rounds_down() {
        let loan = Loan::from_json(
            r#"{"loanType": "Cápsula", "amount": "1000.005", "monthlyInterestRate": 0, "term": 1, "loanDate": "2024-01-10"}"#,
        )
        .unwrap();
        let projection = ProjectionCalculator::new().project_loan(&loan).unwrap();
        assert_eq!(projection.estimated_payment, Money::from_major(1001));
    }

    #[test]
    fn test_zero_rate_capsula() {
        let projection = ProjectionCalculator::new()
            .project(&capsula(1000, dec!(0), 3, Modality::Meses))
            .unwrap();
        assert_eq!(projection.estimated_payment, Money::from_major(334));
        assert_eq!(projection.total_payments, Some(Money::from_major(1002)));
        assert_eq!(projection.theoretical_interest, Some(Money::ZERO));
    }

    #[test]
    fn test_zero_term_is_rejected() {
        let result = ProjectionCalculator::new().project(&capsula(10_000, dec!(5), 0, Modality::Meses));
        assert!(matches!(result, Err(LoanError::InvalidLoanParameters { .. })));
    }

    #[test]
    fn test_project_loan_uses_original_amount() {
        let loan = Loan::capsula(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(5)),
            6,
            Modality::Meses,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .with_balance(Money::from_major(4_000));

        let projection = ProjectionCalculator::new().project_loan(&loan).unwrap();
        assert_eq!(projection.estimated_payment, Money::from_major(2167));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decimal::Rate;
    use proptest::prelude::*;

    fn modality_strategy() -> impl Strategy<Value = Modality> {
        prop_oneof![Just(Modality::Meses), Just(Modality::Quincenas)]
    }

    proptest! {
        #[test]
        fn total_payments_is_exact_multiple_of_period_payment(
            amount_minor in 100i64..100_000_000i64,
            rate_bps in 0i64..2_000i64,
            term in 1u32..120u32,
            modality in modality_strategy()
        ) {
            let terms = LoanTerms::capsula(
                Money::from_minor(amount_minor),
                Rate::from_percentage(Decimal::new(rate_bps, 2)),
                term,
                modality,
            );
            let projection = ProjectionCalculator::new().project(&terms).unwrap();
            let n = Decimal::from(term);

            prop_assert_eq!(projection.total_payments, Some(projection.estimated_payment * n));

            let period_rate = terms.period_rate().as_decimal();
            let expected = (terms.amount + terms.amount.ceil_mul(period_rate * n)).ceil_div(n);
            prop_assert_eq!(projection.estimated_payment, expected);

            prop_assert!(projection.estimated_payment.is_whole());
            prop_assert!(projection.interest_amount_for_period.is_whole());
            prop_assert!(projection.total_payments.unwrap() >= terms.amount);
        }

        #[test]
        fn quincenas_charge_half_the_monthly_rate(
            rate_bps in 0i64..2_000i64,
        ) {
            let rate = Rate::from_percentage(Decimal::new(rate_bps, 2));
            let semi = LoanTerms::capsula(Money::from_major(1000), rate, 4, Modality::Quincenas);
            let monthly = LoanTerms::capsula(Money::from_major(1000), rate, 4, Modality::Meses);

            prop_assert_eq!(semi.period_rate(), rate.half());
            prop_assert_eq!(monthly.period_rate(), rate);
        }
    }
}
