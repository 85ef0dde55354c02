use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kantor::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for kantor::AppCommand {
    fn from(cmd: Commands) -> kantor::AppCommand {
        match cmd {
            Commands::Convert {
                amounts,
                currency,
                reverse,
                rate,
            } => kantor::AppCommand::Convert {
                amounts,
                currency,
                reverse,
                rate,
            },
            Commands::Rate { codes } => kantor::AppCommand::Rate { codes },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert amounts between the selected currency and PLN
    Convert {
        /// Amounts to convert
        #[arg(required = true, allow_negative_numbers = true)]
        amounts: Vec<f64>,

        /// Currency code to convert (defaults to the configured currency)
        #[arg(short = 'C', long)]
        currency: Option<String>,

        /// Read amounts as PLN and convert back into the selected currency
        #[arg(short, long)]
        reverse: bool,

        /// Use this exchange rate instead of fetching one
        #[arg(long, allow_negative_numbers = true)]
        rate: Option<f64>,
    },
    /// Show current mid rates for one or more currency codes
    Rate {
        /// Currency codes (defaults to the configured currency)
        codes: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => kantor::cli::setup::setup(),
        Some(cmd) => kantor::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
