use clap::Subcommand;

use crate::cli::client::DevTeamsClient;
use crate::cli::utils::output_records;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Show server information from API root endpoint")]
    Info,

    #[command(about = "Check server health status from API /health endpoint")]
    Health,
}

pub async fn handle(cmd: ServerCommands, client: &DevTeamsClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Info => {
            let info = client.info().await?;
            output_records(&output_format, &info)
        }
        ServerCommands::Health => {
            let (status, body) = client.health().await?;
            output_records(&output_format, &body)?;
            if !status.is_success() {
                anyhow::bail!("{} is unhealthy ({})", client.base_url(), status);
            }
            Ok(())
        }
    }
}
