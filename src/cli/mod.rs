pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::DashboardClient;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Dashboard CLI - Command-line access to the merchant dashboard API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "DASHBOARD_API_URL",
        default_value = "http://localhost:3000",
        help = "Base URL of the dashboard API"
    )]
    pub url: String,

    #[arg(long, global = true, env = "DASHBOARD_TOKEN", help = "Access token sent as the auth cookie")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Login, logout and account id checks")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Store info, tables and QR codes")]
    Merchant {
        #[command(subcommand)]
        cmd: commands::merchant::MerchantCommands,
    },

    #[command(about = "Login history and orders")]
    Dashboard {
        #[command(subcommand)]
        cmd: commands::dashboard::DashboardCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let mut client = DashboardClient::new(cli.url.as_str());
    if let Some(token) = cli.token.as_deref().filter(|t| !t.is_empty()) {
        client = client.with_token(token);
    }

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client, output_format).await,
        Commands::Merchant { cmd } => commands::merchant::handle(cmd, &client, output_format).await,
        Commands::Dashboard { cmd } => commands::dashboard::handle(cmd, &client, output_format).await,
    }
}
