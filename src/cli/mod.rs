pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::DevTeamsClient;

#[derive(Parser)]
#[command(name = "devteams")]
#[command(about = "DevTeams CLI - Command-line client for the DevTeams API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "DEVTEAMS_URL",
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the API server"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Token management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Record operations on project types, teams, roles, developers and projects")]
    Data {
        #[command(subcommand)]
        cmd: commands::data::DataCommands,
    },

    #[command(about = "Server information and health")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
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
    let client = DevTeamsClient::new(cli.server);

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client, output_format).await,
        Commands::Data { cmd } => commands::data::handle(cmd, &client, output_format).await,
        Commands::Server { cmd } => commands::server::handle(cmd, &client, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;

    #[test]
    fn parses_nested_data_commands() {
        let cli = Cli::try_parse_from([
            "devteams",
            "--server",
            "http://example:8080",
            "data",
            "update",
            "project-type",
            "3",
            r#"{"name":"Web"}"#,
        ])
        .unwrap();

        assert_eq!(cli.server, "http://example:8080");
        match cli.command {
            Commands::Data {
                cmd: commands::data::DataCommands::Update { resource, id, body },
            } => {
                assert_eq!(resource, Resource::ProjectType);
                assert_eq!(id, 3);
                assert_eq!(body.as_deref(), Some(r#"{"name":"Web"}"#));
            }
            _ => panic!("expected data update"),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from(["devteams", "auth", "token", "--json"]).unwrap();
        assert!(matches!(OutputFormat::from_cli(&cli), OutputFormat::Json));
    }

    #[test]
    fn rejects_unknown_resources() {
        assert!(Cli::try_parse_from(["devteams", "data", "list", "widgets"]).is_err());
    }
}
