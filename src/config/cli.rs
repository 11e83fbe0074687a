use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "booking-pass")]
#[command(about = "Build and send venue booking passes from WooCommerce orders")]
pub struct CliConfig {
    /// TOML configuration file. Falls back to the Lambda environment variables.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build the pass for an order JSON file and write the QR image
    Render {
        /// Order payload as delivered by the webhook
        #[arg(long)]
        payload: PathBuf,

        #[arg(long, default_value = "qr_code.png")]
        output: PathBuf,
    },

    /// Decrypt an SK01 token back to its plaintext
    Inspect {
        token: String,
    },

    /// Run the full webhook flow for an order JSON file, including email
    Send {
        #[arg(long)]
        payload: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_render_command() {
        let config = CliConfig::try_parse_from([
            "booking-pass",
            "render",
            "--payload",
            "order.json",
            "--verbose",
        ])
        .unwrap();

        assert!(config.verbose);
        assert!(config.config.is_none());
        match config.command {
            Command::Render { payload, output } => {
                assert_eq!(payload, PathBuf::from("order.json"));
                assert_eq!(output, PathBuf::from("qr_code.png"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_inspect_command() {
        let config = CliConfig::try_parse_from([
            "booking-pass",
            "--config",
            "booking.toml",
            "inspect",
            "SK01abc=",
        ])
        .unwrap();

        assert_eq!(config.config, Some(PathBuf::from("booking.toml")));
        assert!(matches!(config.command, Command::Inspect { token } if token == "SK01abc="));
    }
}
