use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use massage_quote::core::ConfigProvider;
use massage_quote::utils::error::ErrorSeverity;
use massage_quote::utils::{logger, validation, validation::Validate};
use massage_quote::{
    CliConfig, HttpMassageGateway, MassageOffer, MassageService, OutputFormat, QuoteError,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting massage-quote");
    tracing::debug!("CLI config: {:?}", cli);

    let today = Local::now().date_naive();
    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            match TomlConfig::from_file(path) {
                Ok(toml) => {
                    let format = cli.format.or(toml.output_format()).unwrap_or_default();
                    fetch_offers(&toml, today, cli.date).await.map(|o| (o, format))
                }
                Err(e) => Err(e),
            }
        }
        None => {
            let format = cli.format.unwrap_or_default();
            fetch_offers(&cli, today, cli.date).await.map(|o| (o, format))
        }
    };

    match result {
        Ok((offers, format)) => {
            let rendered = render(&offers, format).context("failed to render offers")?;
            println!("{}", rendered);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Quote failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
            Ok(())
        }
    }
}

async fn fetch_offers<C>(
    config: &C,
    today: NaiveDate,
    date: NaiveDate,
) -> Result<Vec<MassageOffer>, QuoteError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;
    validation::validate_not_before("date", date, today)?;

    let gateway = HttpMassageGateway::new(config)?;
    let service = MassageService::new(gateway)
        .with_accepted_statuses(config.accepted_statuses().to_vec());

    service.get_massages_on(today, date).await
}

fn render(offers: &[MassageOffer], format: OutputFormat) -> Result<String, QuoteError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(offers)?),
        OutputFormat::Text => {
            if offers.is_empty() {
                return Ok("No massages available.".to_string());
            }
            let blocks: Vec<String> = offers
                .iter()
                .map(|offer| {
                    format!(
                        "{} [{}] {} {} ({} min) ref {}\n  {}",
                        offer.name,
                        offer.status,
                        offer.amount,
                        offer.currency,
                        offer.duration.as_secs() / 60,
                        offer.external_reference,
                        offer
                            .cancellation_policies_formatted
                            .to_string()
                            .replace('\n', "\n  ")
                    )
                })
                .collect();
            Ok(blocks.join("\n\n"))
        }
    }
}
