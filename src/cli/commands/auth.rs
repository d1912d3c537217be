use clap::Subcommand;
use serde_json::json;

use crate::cli::client::DevTeamsClient;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Request a bearer token for write operations")]
    Token,
}

pub async fn handle(cmd: AuthCommands, client: &DevTeamsClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Token => {
            let token = client.token().await?;
            match output_format {
                OutputFormat::Json => output_success(&output_format, "Token issued", Some(json!({ "token": token }))),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
    }
}
