use booking_pass::app::build_handler;
use booking_pass::app::webhook::{Outcome, WebhookRequest};
use booking_pass::config::cli::Command;
use booking_pass::domain::model::OrderPayload;
use booking_pass::utils::error::{BookingError, ErrorSeverity};
use booking_pass::utils::{logger, validation::Validate};
use booking_pass::config::CipherConfig;
use booking_pass::{AppConfig, BookingPipeline, CliConfig};
use clap::Parser;
use secrecy::ExposeSecret;

fn load_config(cli: &CliConfig) -> Result<AppConfig, BookingError> {
    let config = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            AppConfig::from_file(path)?
        }
        None => AppConfig::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

/// The booking pipeline only needs the key, so `render` and `inspect`
/// read just `[cipher]` from a config file, or `AES_KEY` from the
/// environment.
fn load_pipeline(cli: &CliConfig) -> Result<BookingPipeline, BookingError> {
    let secret = match &cli.config {
        Some(path) => CipherConfig::from_file(path)?
            .aes_key
            .expose_secret()
            .clone(),
        None => std::env::var("AES_KEY").map_err(|_| BookingError::MissingConfigError {
            field: "AES_KEY".to_string(),
        })?,
    };
    BookingPipeline::from_secret(&secret)
}

async fn run(cli: &CliConfig) -> Result<(), BookingError> {
    match &cli.command {
        Command::Render { payload, output } => {
            let pipeline = load_pipeline(cli)?;
            let order: OrderPayload = serde_json::from_slice(&std::fs::read(payload)?)?;
            let pass = pipeline.run(&order)?;
            std::fs::write(output, &pass.qr_png)?;

            println!("🕑 {} -> {} (entry {})", pass.window.start, pass.window.end, pass.entry_time);
            println!("🔐 {}", pass.token);
            println!("📁 QR code saved to: {}", output.display());
        }
        Command::Inspect { token } => {
            let pipeline = load_pipeline(cli)?;
            println!("{}", pipeline.sealer().open_token(token)?);
        }
        Command::Send { payload } => {
            let config = load_config(cli)?;
            let handler = build_handler(&config)?;
            let request = WebhookRequest {
                body: Some(std::fs::read_to_string(payload)?),
                is_base64_encoded: false,
            };

            match handler.process(&request).await? {
                Outcome::Sent { to, token } => {
                    println!("✅ Booking confirmation sent to {}", to);
                    println!("🔐 {}", token);
                }
                Outcome::MissingEmail => {
                    return Err(BookingError::InvalidPayloadError {
                        message: "order has no billing email".to_string(),
                    })
                }
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting booking-pass CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Command failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}
