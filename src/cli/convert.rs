use std::sync::Arc;

use anyhow::Result;

use super::ui;
use crate::core::Calculator;
use crate::core::rates::RateProvider;

/// Converts each amount between the selected currency and PLN and renders
/// the results as a table.
///
/// Without a rate override the calculator is initialized from the rate
/// source; with one, the given rate seeds the calculator directly and no
/// request is made. `reverse` flips the direction: amounts are read as PLN
/// and converted back into the selected currency.
pub async fn run(
    provider: Arc<dyn RateProvider>,
    currency_code: &str,
    amounts: &[f64],
    reverse: bool,
    rate_override: Option<f64>,
) -> Result<()> {
    let mut calculator = Calculator::new(provider);

    match rate_override {
        Some(rate) => calculator.set_exchange_rate(rate)?,
        None => calculator.init(currency_code).await?,
    }

    let Some(rate) = calculator.exchange_rate() else {
        anyhow::bail!("no exchange rate available after initialization");
    };

    let rate_line = format!("1 {currency_code} = {rate:.4} PLN");
    let annotation = if rate_override.is_some() {
        format!(" {}", ui::style_text("(rate set manually)", ui::StyleType::Subtle))
    } else {
        String::new()
    };
    println!(
        "Rate: {}{}\n",
        ui::style_text(&rate_line, ui::StyleType::RateValue),
        annotation
    );

    let mut table = ui::new_styled_table();
    let (source_header, target_header) = if reverse {
        ("PLN", currency_code)
    } else {
        (currency_code, "PLN")
    };
    table.set_header(vec![
        ui::header_cell(source_header),
        ui::header_cell(target_header),
    ]);

    for &amount in amounts {
        let converted = if reverse {
            calculator.calculate_to(amount)?
        } else {
            calculator.calculate_from(amount)?
        };
        table.add_row(vec![ui::amount_cell(amount), ui::amount_cell(converted)]);
    }

    println!("{table}");

    Ok(())
}
