use std::sync::Arc;

use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;

use super::ui;
use crate::core::error::FetchError;
use crate::core::rates::RateQuote;
use crate::providers::NbpProvider;

/// Fetches the current quote for each requested code concurrently and
/// renders them as a table. Codes that fail keep their row with the error
/// reported below the table; the command only fails when no code resolves.
pub async fn run(provider: Arc<NbpProvider>, codes: &[String]) -> Result<()> {
    let quote_futures = codes.iter().map(|code| {
        let provider = Arc::clone(&provider);
        async move { (code.clone(), provider.fetch_quote(code).await) }
    });
    let results: Vec<(String, Result<RateQuote, FetchError>)> = join_all(quote_futures).await;

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Mid (PLN)"),
        ui::header_cell("Effective"),
        ui::header_cell("Table"),
    ]);

    let mut failures = Vec::new();
    for (code, result) in results {
        match result {
            Ok(quote) => {
                table.add_row(vec![
                    Cell::new(&quote.code),
                    Cell::new(&quote.currency),
                    ui::rate_cell(quote.mid),
                    Cell::new(quote.effective_date.to_string()),
                    Cell::new(&quote.no),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    Cell::new(&code),
                    ui::na_cell(true),
                    ui::na_cell(true),
                    ui::na_cell(true),
                    ui::na_cell(true),
                ]);
                failures.push((code, e));
            }
        }
    }

    println!("{table}");

    for (code, error) in &failures {
        println!(
            "{}",
            ui::style_text(&format!("{code}: {error}"), ui::StyleType::Error)
        );
    }

    if !failures.is_empty() && failures.len() == codes.len() {
        anyhow::bail!("no rates could be fetched");
    }

    Ok(())
}
