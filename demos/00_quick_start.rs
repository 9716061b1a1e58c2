/// quick start - quote a loan before it exists
use microloan_rs::{LoanEngine, LoanTerms, Modality, Money, Rate};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let engine = LoanEngine::default();

    // $10,000 at 5% monthly, six periods each way
    for modality in [Modality::Meses, Modality::Quincenas] {
        let terms = LoanTerms::capsula(Money::from_major(10_000), Rate::from_percentage(dec!(5)), 6, modality);
        let quote = engine.project(&terms)?;

        println!(
            "capsula {}: {} x {} = {} (interest {})",
            quote.payment_frequency,
            quote.terms.unwrap_or_default(),
            quote.estimated_payment,
            quote.total_to_pay(),
            quote.total_interest.unwrap_or_default(),
        );
    }

    // open-ended loans only owe interest until capital is returned
    let open = engine.project(&LoanTerms::indefinido(Money::from_major(50_000), Rate::from_percentage(dec!(4))))?;
    println!("indefinido: {} interest per month", open.estimated_payment);

    println!("{}", serde_json::to_string_pretty(&open)?);

    Ok(())
}
