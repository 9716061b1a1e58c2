/// status board - classify a loan book as the calendar moves
use chrono::{Duration, TimeZone, Utc};
use microloan_rs::{Loan, LoanEngine, Modality, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let time = SafeTimeProvider::new(TimeSource::Test(Utc.with_ymd_and_hms(2024, 2, 10, 12, 0, 0).unwrap()));
    let controller = time.test_control().unwrap();

    let json = r#"[
        {"id": 1, "loanType": "Cápsula", "amount": "10000.00", "monthlyInterestRate": "5",
         "term": 6, "modality": "quincenas", "loanDate": "2024-02-01", "currentBalance": "10000.00",
         "status": "ACTIVE", "monthsPaid": 0, "lastPaymentDate": null},
        {"id": 2, "loanType": "Indefinido", "amount": 50000, "monthlyInterestRate": 4,
         "loanDate": "2024-01-10T00:00:00.000Z", "currentBalance": "$45,000.00",
         "status": "ACTIVE", "monthsPaid": 1, "lastPaymentDate": "2024-02-09"},
        {"id": 3, "loanType": "Indefinido", "amount": 5000, "monthlyInterestRate": 5,
         "loanDate": "2023-05-10", "currentBalance": 0, "totalCapitalPaid": 5000,
         "totalInterestPaid": 1750, "status": "PAID", "monthsPaid": 7}
    ]"#;
    let mut loans: Vec<Loan> = serde_json::from_str(json)?;

    let engine = LoanEngine::default();

    for _ in 0..3 {
        println!("=== {} ===", time.now().format("%Y-%m-%d"));
        for loan in &loans {
            let report = engine.report_with_time(loan, &time);
            println!(
                "loan {:?}: {:<14} next cutoff {}",
                report.loan_id, report.label, report.next_cutoff
            );
        }

        let summary = engine.portfolio_with_time(&loans, &time);
        println!(
            "active {} overdue {} punctuality {}% recovered {}%\n",
            summary.active_loans,
            summary.overdue_count,
            summary.punctuality_percentage(),
            summary.recovery_percentage()
        );

        controller.advance(Duration::days(20));
    }

    // the first loan pays and catches up
    loans[0] = loans[0].clone().with_payments(1, time.now().date_naive());
    println!("after payment: {}", engine.classify_with_time(&loans[0], &time).label(Modality::Quincenas));

    println!("{}", engine.view_with_time(&loans[1], &time).to_json_pretty()?);

    Ok(())
}
