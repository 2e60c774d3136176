use clap::Subcommand;
use serde_json::Value;

use crate::cli::utils::{output_empty_collection, output_response};
use crate::cli::OutputFormat;
use crate::client::DashboardClient;
use crate::types::TableId;

#[derive(Subcommand)]
pub enum MerchantCommands {
    #[command(about = "Show store information")]
    Info,

    #[command(about = "List dining tables")]
    Tables,

    #[command(about = "Update a dining table")]
    UpdateTable {
        #[arg(help = "Table id")]
        id: TableId,
        #[arg(help = "JSON object with the fields to change, e.g. '{\"capacity\":4}'")]
        changes: String,
    },

    #[command(about = "List tables together with their QR codes")]
    Qr,

    #[command(about = "Create a QR code for a table")]
    CreateQr {
        #[arg(help = "Table id")]
        table_id: TableId,
    },
}

pub async fn handle(cmd: MerchantCommands, client: &DashboardClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        MerchantCommands::Info => {
            let response = client.merchant_info().await;
            output_response(&output_format, "Store information", response)
        }
        MerchantCommands::Tables => {
            let response = client.tables().await;
            if response.success && response.data.as_ref().map_or(true, |t| t.is_empty()) {
                return output_empty_collection(&output_format, "tables", "No tables registered");
            }
            output_response(&output_format, "Tables", response)
        }
        MerchantCommands::UpdateTable { id, changes } => {
            let changes: Value = serde_json::from_str(&changes)
                .map_err(|e| anyhow::anyhow!("changes must be a JSON object: {}", e))?;
            let response = client.update_table(&id, changes).await;
            output_response(&output_format, &format!("Table {} updated", id), response)
        }
        MerchantCommands::Qr => {
            let response = client.qr_codes().await;
            if response.success && response.data.as_ref().map_or(true, |t| t.is_empty()) {
                return output_empty_collection(&output_format, "tables", "No tables registered");
            }
            output_response(&output_format, "Tables and QR codes", response)
        }
        MerchantCommands::CreateQr { table_id } => {
            let response = client.create_qr(&table_id).await;
            output_response(&output_format, &format!("QR code created for table {}", table_id), response)
        }
    }
}
