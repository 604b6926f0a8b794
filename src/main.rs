// src/main.rs

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use azure_image_streams::{
    get_azure_credentials, make_azure_items, ArmComputeClient, CredentialsFile, StreamSource,
    DEFAULT_STREAM_URL,
};
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(name = "azure-image-streams")]
#[command(author, version, about = "Convert cloud-images simplestreams entries into Azure ARM image streams", long_about = None)]
struct Cli {
    /// Path to the credentials YAML file
    #[arg(short, long, default_value = "credentials.yaml")]
    credentials: PathBuf,

    /// Environment variable holding the ARM bearer token
    #[arg(long, default_value = "AZURE_ACCESS_TOKEN")]
    token_env: String,

    /// Upstream simplestreams index URL
    #[arg(long, default_value = DEFAULT_STREAM_URL)]
    source: String,

    /// Write the assembled item list to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let all_credentials = CredentialsFile::load(&cli.credentials)
        .with_context(|| format!("failed to load {}", cli.credentials.display()))?;
    let (subscription_id, _credentials) = get_azure_credentials(&all_credentials)?;

    let token = std::env::var(&cli.token_env)
        .with_context(|| format!("bearer token expected in ${}", cli.token_env))?;

    let catalog = ArmComputeClient::new(&subscription_id, &token)?;
    let source = StreamSource::new(&cli.source)?;

    let items = make_azure_items(&catalog, &source)?;
    info!("{} items assembled", items.len());

    let json = serde_json::to_string_pretty(&items)?;
    match cli.output {
        Some(path) => {
            fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
