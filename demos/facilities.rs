#![allow(clippy::print_stdout, reason = "Demos are expected to print to stdout")]

use std::env;

use sotaog_public_api_client::auth::Credentials;
use sotaog_public_api_client::types::request::AssetsRequest;
use sotaog_public_api_client::{Client, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let host = env::var("SOTAOG_URL")?;
    let credentials = Credentials::new(
        env::var("SOTAOG_CLIENT_ID")?,
        env::var("SOTAOG_CLIENT_SECRET")?,
    );
    let config = match env::var("SOTAOG_CUSTOMER_ID") {
        Ok(customer_id) => Config::builder().customer_id(customer_id).build(),
        Err(_) => Config::default(),
    };

    let client = Client::new(&host, &credentials, config).await?;

    let facilities = client.get_facilities().await?;
    info!(count = facilities.len(), "facilities");

    for facility in &facilities {
        let Some(facility_id) = facility["id"].as_str() else {
            continue;
        };

        let request = AssetsRequest::builder().facility(facility_id).build();
        let assets = client.get_assets(&request).await?;
        let networks = client.get_swd_networks(Some(facility_id)).await?;

        println!(
            "{facility_id}: {} assets, {} SWD networks",
            assets.len(),
            networks.len()
        );
    }

    Ok(())
}
