mod cli;
mod log;

use clap::Parser;
use color_eyre::Result;
use rana_client::{RanaClient, ReqwestTransport};
use serde_json::Value;

use crate::cli::{query_from_pairs, Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    log::setup()?;

    let cli = Cli::parse();
    let client = RanaClient::new(cli.client_config());
    let transport = ReqwestTransport::new();
    log::debug!(endpoint = client.config().endpoint(), "client ready");

    let value = match cli.command {
        Command::Summaries { days } => client.summaries(&transport, days).await?,
        Command::Request { path, query } => {
            client
                .request(&transport, &path, &query_from_pairs(&query))
                .await?
        }
        Command::Whoami => client.current_user(&transport).await?,
        Command::EncodeKey => {
            println!("{}", client.config().credential().authorization_value());
            return Ok(());
        }
    };

    print_json(&value)?;
    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
