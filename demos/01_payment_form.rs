/// payment form - pre-fill and build payment submissions
use chrono::NaiveDate;
use microloan_rs::{Loan, LoanEngine, Modality, Money, PaymentRequest, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = LoanEngine::default();
    let today = NaiveDate::from_ymd_opt(2024, 3, 5).ok_or("bad date")?;

    // fixed-term loan two periods behind
    let capsula = Loan::capsula(
        Money::from_major(10_000),
        Rate::from_percentage(dec!(5)),
        6,
        Modality::Meses,
        NaiveDate::from_ymd_opt(2024, 1, 3).ok_or("bad date")?,
    )
    .with_id(1)
    .with_overdue_periods(2);

    println!("=== capsula ===");
    for periods in std::iter::once(0).chain(engine.overdue_period_options(&capsula)) {
        println!("settle {} overdue period(s): {}", periods, engine.suggested_payment(&capsula, periods)?);
    }

    let amount = engine.suggested_payment(&capsula, 2)?;
    let payment = PaymentRequest::scheduled(&capsula, today, amount, Some(2), "CASH")?
        .with_late_interest(Money::from_major(150))?;
    println!("submit: {}", payment.to_json()?);

    // open-ended loan paying interest plus some capital
    let indefinido = Loan::indefinido(
        Money::from_major(50_000),
        Rate::from_percentage(dec!(4)),
        NaiveDate::from_ymd_opt(2024, 1, 10).ok_or("bad date")?,
    )
    .with_id(2)
    .with_balance(Money::from_major(30_000));

    println!("\n=== indefinido ===");
    let suggestion = engine.suggest(&indefinido, 0)?;
    println!("interest due: {}", suggestion.outstanding_interest);
    println!("max capital: {}", suggestion.max_capital);

    let payment = PaymentRequest::split(
        &indefinido,
        today,
        Money::from_major(5_000),
        suggestion.outstanding_interest,
        "TRANSFER",
    )?;
    println!("submit: {}", payment.to_json()?);

    // capital beyond the balance is refused
    if let Err(e) = PaymentRequest::split(&indefinido, today, Money::from_major(40_000), Money::ZERO, "CASH") {
        println!("rejected: {}", e);
    }

    Ok(())
}
