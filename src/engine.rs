use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::amortization::{PaymentSuggestion, Projection, ProjectionCalculator, SuggestedPaymentCalculator};
use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::{Loan, LoanTerms};
use crate::portfolio::PortfolioSummary;
use crate::status::{DisplayStatus, StatusClassifier, StatusReport};
use crate::view::LoanView;

/// single entry point for every screen that derives numbers from a loan
#[derive(Debug, Clone, Default)]
pub struct LoanEngine {
    config: EngineConfig,
    projections: ProjectionCalculator,
    payments: SuggestedPaymentCalculator,
    classifier: StatusClassifier,
}

impl LoanEngine {
    /// create engine from validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            projections: ProjectionCalculator::new(),
            payments: SuggestedPaymentCalculator::new(),
            classifier: StatusClassifier::new(config.cutoff),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &StatusClassifier {
        &self.classifier
    }

    // projection

    /// quote terms before the loan exists
    pub fn project(&self, terms: &LoanTerms) -> Result<Projection> {
        self.projections.project(terms)
    }

    pub fn project_loan(&self, loan: &Loan) -> Result<Projection> {
        self.projections.project_loan(loan)
    }

    // payment time

    pub fn suggested_payment(&self, loan: &Loan, overdue_periods: u32) -> Result<Money> {
        self.payments.suggested_payment(loan, overdue_periods)
    }

    pub fn outstanding_interest(&self, loan: &Loan) -> Result<Money> {
        self.payments.outstanding_interest(loan)
    }

    pub fn overdue_period_options(&self, loan: &Loan) -> Vec<u32> {
        self.payments.overdue_period_options(loan)
    }

    pub fn suggest(&self, loan: &Loan, overdue_periods: u32) -> Result<PaymentSuggestion> {
        self.payments.suggest(loan, overdue_periods)
    }

    // status

    pub fn next_cutoff(&self, loan: &Loan) -> NaiveDate {
        self.classifier.cutoff().next_cutoff(loan)
    }

    pub fn is_overdue(&self, loan: &Loan, today: NaiveDate) -> bool {
        self.classifier.is_overdue(loan, today)
    }

    pub fn classify(&self, loan: &Loan, today: NaiveDate) -> DisplayStatus {
        self.classifier.classify(loan, today)
    }

    pub fn classify_with_time(&self, loan: &Loan, time: &SafeTimeProvider) -> DisplayStatus {
        self.classifier.classify_with_time(loan, time)
    }

    pub fn report(&self, loan: &Loan, today: NaiveDate) -> StatusReport {
        self.classifier.report(loan, today)
    }

    pub fn report_with_time(&self, loan: &Loan, time: &SafeTimeProvider) -> StatusReport {
        self.classifier.report_with_time(loan, time)
    }

    // aggregates

    pub fn portfolio(&self, loans: &[Loan], today: NaiveDate) -> PortfolioSummary {
        PortfolioSummary::from_loans(self, loans, today)
    }

    pub fn portfolio_with_time(&self, loans: &[Loan], time: &SafeTimeProvider) -> PortfolioSummary {
        self.portfolio(loans, time.now().date_naive())
    }

    pub fn view(&self, loan: &Loan, today: NaiveDate) -> LoanView {
        LoanView::build(self, loan, today)
    }

    pub fn view_with_time(&self, loan: &Loan, time: &SafeTimeProvider) -> LoanView {
        self.view(loan, time.now().date_naive())
    }
}
