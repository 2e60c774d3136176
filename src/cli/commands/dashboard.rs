use clap::{Args, Subcommand};

use crate::cli::utils::output_response;
use crate::cli::OutputFormat;
use crate::client::{DashboardClient, PageParams};

#[derive(Args)]
pub struct PageArgs {
    #[arg(long, help = "Zero-based page number")]
    pub page: Option<u32>,
    #[arg(long, help = "Page size")]
    pub size: Option<u32>,
    #[arg(long, help = "Sort as field,direction (e.g. createdAt,desc)")]
    pub sort: Option<String>,
}

impl From<PageArgs> for PageParams {
    fn from(args: PageArgs) -> Self {
        PageParams {
            page: args.page,
            size: args.size,
            sort: args.sort,
        }
    }
}

#[derive(Subcommand)]
pub enum DashboardCommands {
    #[command(about = "Show recent logins of the account")]
    History {
        #[command(flatten)]
        page: PageArgs,
    },

    #[command(about = "Show orders")]
    Orders {
        #[command(flatten)]
        page: PageArgs,
    },
}

pub async fn handle(cmd: DashboardCommands, client: &DashboardClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DashboardCommands::History { page } => {
            let response = client.login_history(&page.into()).await;
            let message = page_message("Login history", response.data.as_ref().map(|p| (p.number, p.total_pages)));
            output_response(&output_format, &message, response)
        }
        DashboardCommands::Orders { page } => {
            let response = client.orders(&page.into()).await;
            let message = page_message("Orders", response.data.as_ref().map(|p| (p.number, p.total_pages)));
            output_response(&output_format, &message, response)
        }
    }
}

fn page_message(title: &str, position: Option<(u32, u32)>) -> String {
    match position {
        Some((number, total)) => format!("{} (page {} of {})", title, number + 1, total.max(1)),
        None => title.to_string(),
    }
}
