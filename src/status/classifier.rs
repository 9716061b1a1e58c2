use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use tracing::{debug, warn};

use crate::config::CutoffPolicy;
use crate::loan::Loan;
use crate::status::{CutoffCalculator, DisplayStatus, StatusReport};

/// classifies loans for display from a snapshot and an explicit "today"
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier {
    cutoff: CutoffCalculator,
}

impl StatusClassifier {
    pub fn new(policy: CutoffPolicy) -> Self {
        Self {
            cutoff: CutoffCalculator::new(policy),
        }
    }

    pub fn cutoff(&self) -> &CutoffCalculator {
        &self.cutoff
    }

    /// true once the next cutoff has passed without a recorded payment
    pub fn is_overdue(&self, loan: &Loan, today: NaiveDate) -> bool {
        self.cutoff.is_past_cutoff(loan, today)
    }

    /// display state, checked in priority order
    pub fn classify(&self, loan: &Loan, today: NaiveDate) -> DisplayStatus {
        let next_cutoff = self.cutoff.next_cutoff(loan);

        let status = if loan.is_paid() {
            DisplayStatus::Paid
        } else if today > next_cutoff {
            DisplayStatus::Overdue
        } else if loan.has_payments() && loan.last_payment_date.is_some() {
            DisplayStatus::Current
        } else if !loan.has_payments() {
            DisplayStatus::WaitingFirstPayment
        } else {
            warn!(
                loan_id = ?loan.id,
                months_paid = loan.months_paid,
                "payments recorded without a last payment date, treating as overdue"
            );
            DisplayStatus::Overdue
        };

        debug!(
            loan_id = ?loan.id,
            loan_type = %loan.loan_type,
            %today,
            cutoff = %next_cutoff,
            ?status,
            "classified loan"
        );

        status
    }

    /// classify using the provider's current date
    pub fn classify_with_time(&self, loan: &Loan, time: &SafeTimeProvider) -> DisplayStatus {
        self.classify(loan, time.now().date_naive())
    }

    /// classification with its cutoff and label
    pub fn report(&self, loan: &Loan, today: NaiveDate) -> StatusReport {
        let status = self.classify(loan, today);
        let days_since_last_payment = (today - loan.reference_date()).num_days().unsigned_abs();

        StatusReport {
            loan_id: loan.id,
            status,
            label: status.label(loan.effective_modality()),
            next_cutoff: self.cutoff.next_cutoff(loan),
            days_since_last_payment,
        }
    }

    pub fn report_with_time(&self, loan: &Loan, time: &SafeTimeProvider) -> StatusReport {
        self.report(loan, time.now().date_naive())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::types::{LoanType, Modality};
    use chrono::Duration;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn loan_strategy() -> impl Strategy<Value = Loan> {
        (
            prop_oneof![Just(LoanType::Capsula), Just(LoanType::Indefinido)],
            prop_oneof![Just(Modality::Meses), Just(Modality::Quincenas)],
            0i64..3_000i64,
            proptest::option::of(0i64..400i64),
            0u32..5u32,
        )
            .prop_map(|(loan_type, modality, start_offset, paid_offset, months_paid)| {
                let base = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
                let loan_date = base + Duration::days(start_offset);
                let mut loan = match loan_type {
                    LoanType::Capsula => Loan::capsula(
                        Money::from_major(10_000),
                        Rate::from_percentage(dec!(5)),
                        6,
                        modality,
                        loan_date,
                    ),
                    LoanType::Indefinido => {
                        Loan::indefinido(Money::from_major(10_000), Rate::from_percentage(dec!(5)), loan_date)
                    }
                };
                if let Some(offset) = paid_offset {
                    loan = loan.with_payments(months_paid.max(1), loan_date + Duration::days(offset));
                }
                loan
            })
    }

    proptest! {
        #[test]
        fn classification_only_moves_toward_overdue(
            loan in loan_strategy(),
            day1 in 0i64..4_000i64,
            gap in 0i64..400i64,
        ) {
            let classifier = StatusClassifier::default();
            let base = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
            let today1 = base + Duration::days(day1);
            let today2 = today1 + Duration::days(gap);

            let first = classifier.classify(&loan, today1);
            let second = classifier.classify(&loan, today2);

            if first == DisplayStatus::Overdue {
                prop_assert_eq!(second, DisplayStatus::Overdue);
            } else {
                prop_assert!(second == first || second == DisplayStatus::Overdue);
            }
        }
    }
}
