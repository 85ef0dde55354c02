pub mod cli;
pub mod core;
pub mod providers;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::config::AppConfig;
use crate::providers::NbpProvider;

/// Public NBP Web API endpoint, used when the config has no provider block.
pub const DEFAULT_NBP_BASE_URL: &str = "https://api.nbp.pl";

/// Commands the application can run, decoupled from the clap surface.
pub enum AppCommand {
    Convert {
        amounts: Vec<f64>,
        currency: Option<String>,
        reverse: bool,
        rate: Option<f64>,
    },
    Rate {
        codes: Vec<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("kantor starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let (base_url, timeout) = match &config.provider.nbp {
        Some(nbp) => (
            nbp.base_url.as_str(),
            nbp.timeout_secs.map(Duration::from_secs),
        ),
        None => (DEFAULT_NBP_BASE_URL, None),
    };
    let provider = Arc::new(NbpProvider::new(base_url, timeout));

    match command {
        AppCommand::Convert {
            amounts,
            currency,
            reverse,
            rate,
        } => {
            let currency_code = currency
                .unwrap_or_else(|| config.default_currency.clone())
                .to_uppercase();
            cli::convert::run(provider, &currency_code, &amounts, reverse, rate).await
        }
        AppCommand::Rate { codes } => {
            let codes: Vec<String> = if codes.is_empty() {
                vec![config.default_currency.to_uppercase()]
            } else {
                codes.iter().map(|c| c.to_uppercase()).collect()
            };
            cli::rate::run(provider, &codes).await
        }
    }
}
