use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_response, output_success, Reported};
use crate::cli::OutputFormat;
use crate::client::DashboardClient;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and print the access token")]
    Login {
        #[arg(help = "Account id")]
        account_id: String,
        #[arg(long, env = "DASHBOARD_PASSWORD", help = "Password")]
        password: String,
    },

    #[command(about = "Check whether an account id is still available")]
    CheckId {
        #[arg(help = "Account id to check")]
        account_id: String,
    },

    #[command(about = "Clear the session")]
    Logout,
}

pub async fn handle(cmd: AuthCommands, client: &DashboardClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { account_id, password } => {
            let response = client.login(&account_id, &password).await;
            if !response.success {
                let reason = response.message.unwrap_or_else(|| "Login failed".to_string());
                output_error(&output_format, &reason, None)?;
                return Err(Reported(reason).into());
            }

            let token = response.data.map(|d| d.access_token).unwrap_or_default();
            match output_format {
                OutputFormat::Json => output_success(
                    &output_format,
                    &format!("Logged in as {}", account_id),
                    Some(json!({ "accessToken": token })),
                ),
                OutputFormat::Text => {
                    println!("✓ Logged in as {}", account_id);
                    println!("export DASHBOARD_TOKEN={}", token);
                    Ok(())
                }
            }
        }
        AuthCommands::CheckId { account_id } => {
            let response = client.check_id(&account_id).await;
            let available = response.data.as_ref().map(|a| a.available);
            let message = match available {
                Some(true) => format!("Account id '{}' is available", account_id),
                Some(false) => format!("Account id '{}' is already taken", account_id),
                None => format!("Checked account id '{}'", account_id),
            };
            output_response(&output_format, &message, response)
        }
        AuthCommands::Logout => {
            let response = client.logout().await;
            output_response(&output_format, "Logged out", response)
        }
    }
}
