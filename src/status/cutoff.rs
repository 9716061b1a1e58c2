use chrono::{Datelike, Days, Months, NaiveDate};

use crate::config::CutoffPolicy;
use crate::loan::Loan;
use crate::types::{LoanType, Modality};

/// computes the date after which an unpaid period makes a loan overdue
#[derive(Debug, Clone, Copy, Default)]
pub struct CutoffCalculator {
    policy: CutoffPolicy,
}

impl CutoffCalculator {
    pub fn new(policy: CutoffPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CutoffPolicy {
        &self.policy
    }

    /// next cutoff for a loan snapshot
    pub fn next_cutoff(&self, loan: &Loan) -> NaiveDate {
        self.next_cutoff_for(
            loan.loan_type,
            loan.effective_modality(),
            loan.loan_date,
            loan.last_payment_date,
        )
    }

    /// next cutoff from the raw inputs
    pub fn next_cutoff_for(
        &self,
        loan_type: LoanType,
        modality: Modality,
        loan_date: NaiveDate,
        last_payment_date: Option<NaiveDate>,
    ) -> NaiveDate {
        let reference = last_payment_date.unwrap_or(loan_date);

        match (loan_type, modality) {
            (LoanType::Indefinido, _) => self.open_ended_cutoff(loan_date, reference),
            (LoanType::Capsula, Modality::Quincenas) => self.semi_monthly_cutoff(reference),
            (LoanType::Capsula, Modality::Meses) => self.monthly_cutoff(reference),
        }
    }

    /// true once `today` is strictly after the next cutoff
    pub fn is_past_cutoff(&self, loan: &Loan, today: NaiveDate) -> bool {
        today > self.next_cutoff(loan)
    }

    /// loan day plus grace, in the month after the reference date
    fn open_ended_cutoff(&self, loan_date: NaiveDate, reference: NaiveDate) -> NaiveDate {
        let cutoff_day = loan_date.day() + self.policy.indefinido_grace_days;
        nth_day_of_month(reference, 1, cutoff_day)
    }

    fn semi_monthly_cutoff(&self, reference: NaiveDate) -> NaiveDate {
        let day = reference.day();

        if day <= self.policy.early_window_last_day {
            nth_day_of_month(reference, 0, self.policy.quincena_mid_day)
        } else if day < self.policy.rollover_first_day {
            last_day_of_month(reference, 0)
        } else {
            nth_day_of_month(reference, 1, self.policy.quincena_mid_day)
        }
    }

    fn monthly_cutoff(&self, reference: NaiveDate) -> NaiveDate {
        if reference.day() < self.policy.rollover_first_day {
            last_day_of_month(reference, 0)
        } else {
            last_day_of_month(reference, 1)
        }
    }
}

/// first day of the month `months_ahead` months after `date`'s month
fn month_start(date: NaiveDate, months_ahead: u32) -> NaiveDate {
    date.with_day(1)
        .and_then(|d| d.checked_add_months(Months::new(months_ahead)))
        .unwrap_or(NaiveDate::MAX)
}

fn last_day_of_month(date: NaiveDate, months_ahead: u32) -> NaiveDate {
    month_start(date, months_ahead + 1)
        .pred_opt()
        .unwrap_or(NaiveDate::MAX)
}

/// day `day` of the target month; days past the month's end spill into the next month
fn nth_day_of_month(date: NaiveDate, months_ahead: u32, day: u32) -> NaiveDate {
    month_start(date, months_ahead)
        .checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calc() -> CutoffCalculator {
        CutoffCalculator::new(CutoffPolicy::standard())
    }

    #[test]
    fn test_indefinido_first_cutoff() {
        let cutoff = calc().next_cutoff_for(LoanType::Indefinido, Modality::Meses, date(2024, 1, 10), None);
        assert_eq!(cutoff, date(2024, 2, 12));
    }

    #[test]
    fn test_indefinido_cutoff_after_payment_keeps_loan_day() {
        let cutoff = calc().next_cutoff_for(
            LoanType::Indefinido,
            Modality::Meses,
            date(2024, 1, 10),
            Some(date(2024, 3, 28)),
        );
        assert_eq!(cutoff, date(2024, 4, 12));
    }

    #[test]
    fn test_indefinido_cutoff_spills_past_month_end() {
        // day 30 + 2 in february 2024 lands on march 3rd
        let cutoff = calc().next_cutoff_for(LoanType::Indefinido, Modality::Meses, date(2024, 1, 30), None);
        assert_eq!(cutoff, date(2024, 3, 3));
    }

    #[test]
    fn test_indefinido_cutoff_crosses_year() {
        let cutoff = calc().next_cutoff_for(LoanType::Indefinido, Modality::Meses, date(2023, 12, 5), None);
        assert_eq!(cutoff, date(2024, 1, 7));
    }

    #[test]
    fn test_quincenas_windows() {
        let c = calc();
        let cutoff = |d| c.next_cutoff_for(LoanType::Capsula, Modality::Quincenas, d, None);

        assert_eq!(cutoff(date(2024, 3, 1)), date(2024, 3, 15));
        assert_eq!(cutoff(date(2024, 3, 9)), date(2024, 3, 15));
        assert_eq!(cutoff(date(2024, 3, 10)), date(2024, 3, 31));
        assert_eq!(cutoff(date(2024, 3, 24)), date(2024, 3, 31));
        assert_eq!(cutoff(date(2024, 3, 25)), date(2024, 4, 15));
        assert_eq!(cutoff(date(2024, 12, 31)), date(2025, 1, 15));
        assert_eq!(cutoff(date(2024, 2, 20)), date(2024, 2, 29));
    }

    #[test]
    fn test_meses_windows() {
        let c = calc();
        let cutoff = |d| c.next_cutoff_for(LoanType::Capsula, Modality::Meses, d, None);

        assert_eq!(cutoff(date(2024, 1, 1)), date(2024, 1, 31));
        assert_eq!(cutoff(date(2024, 1, 24)), date(2024, 1, 31));
        assert_eq!(cutoff(date(2024, 1, 25)), date(2024, 2, 29));
        assert_eq!(cutoff(date(2023, 1, 31)), date(2023, 2, 28));
        assert_eq!(cutoff(date(2024, 12, 26)), date(2025, 1, 31));
    }

    #[test]
    fn test_last_payment_is_reference_for_capsula() {
        let cutoff = calc().next_cutoff_for(
            LoanType::Capsula,
            Modality::Quincenas,
            date(2024, 1, 28),
            Some(date(2024, 3, 5)),
        );
        assert_eq!(cutoff, date(2024, 3, 15));
    }

    #[test]
    fn test_strict_policy_drops_grace() {
        let strict = CutoffCalculator::new(CutoffPolicy::strict());
        let cutoff = strict.next_cutoff_for(LoanType::Indefinido, Modality::Meses, date(2024, 1, 10), None);
        assert_eq!(cutoff, date(2024, 2, 10));
    }
}
