use clap::Subcommand;
use serde_json::json;

use crate::cli::client::DevTeamsClient;
use crate::cli::utils::{output_records, output_success, read_body};
use crate::cli::OutputFormat;
use crate::resource::Resource;

#[derive(Subcommand)]
pub enum DataCommands {
    #[command(about = "List every record of a resource")]
    List {
        #[arg(value_enum, help = "Resource name")]
        resource: Resource,
    },

    #[command(about = "Show one record")]
    Get {
        #[arg(value_enum, help = "Resource name")]
        resource: Resource,
        #[arg(help = "Record ID")]
        id: i32,
    },

    #[command(about = "Create a record from a JSON argument or stdin")]
    Create {
        #[arg(value_enum, help = "Resource name")]
        resource: Resource,
        #[arg(help = "JSON body (read from stdin when omitted)")]
        body: Option<String>,
    },

    #[command(about = "Replace a record from a JSON argument or stdin")]
    Update {
        #[arg(value_enum, help = "Resource name")]
        resource: Resource,
        #[arg(help = "Record ID to update")]
        id: i32,
        #[arg(help = "JSON body (read from stdin when omitted)")]
        body: Option<String>,
    },

    #[command(about = "Delete a record")]
    Delete {
        #[arg(value_enum, help = "Resource name")]
        resource: Resource,
        #[arg(help = "Record ID to delete")]
        id: i32,
    },
}

pub async fn handle(cmd: DataCommands, client: &DevTeamsClient, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        DataCommands::List { resource } => {
            let rows = client.list(resource).await?;
            output_records(&output_format, &rows)
        }
        DataCommands::Get { resource, id } => {
            let row = client.get(resource, id).await?;
            output_records(&output_format, &row)
        }
        DataCommands::Create { resource, body } => {
            let created = client.create(resource, read_body(body)?).await?;
            output_records(&output_format, &created)
        }
        DataCommands::Update { resource, id, body } => {
            let updated = client.update(resource, id, read_body(body)?).await?;
            output_records(&output_format, &updated)
        }
        DataCommands::Delete { resource, id } => {
            client.delete(resource, id).await?;
            output_success(
                &output_format,
                &format!("Deleted {} {}", resource, id),
                Some(json!({ "resource": resource.segment(), "id": id })),
            )
        }
    }
}
