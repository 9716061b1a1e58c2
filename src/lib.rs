pub mod amortization;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod loan;
pub mod payments;
pub mod portfolio;
pub mod status;
pub mod types;
pub mod view;

// re-export key types
pub use amortization::{PaymentSuggestion, Projection, ProjectionCalculator, SuggestedPaymentCalculator};
pub use config::{CutoffPolicy, EngineConfig, PortfolioPolicy};
pub use decimal::{Money, Rate};
pub use engine::LoanEngine;
pub use errors::{LoanError, Result};
pub use loan::{parse_date, Loan, LoanTerms};
pub use payments::{PaymentBreakdown, PaymentRecord, PaymentRequest};
pub use portfolio::{DueSoonLoan, OverdueLoan, PortfolioSummary};
pub use status::{CutoffCalculator, DisplayStatus, StatusClassifier, StatusReport};
pub use types::{LoanId, LoanStatus, LoanType, Modality, PaymentFrequency};
pub use view::{FinancialView, LoanView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
