use blockfolio::api::ApiClient;
use blockfolio::config::Config;
use blockfolio::{portfolio, report};
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Load config
    let mut config = if Path::new("blockfolio.toml").exists() {
        Config::load(Path::new("blockfolio.toml"))?
    } else {
        Config::from_env()
    };

    // A wallet passed on the command line overrides the configured one
    if let Some(wallet) = std::env::args().nth(1) {
        config.api.wallet = wallet;
    }

    // Initialize logging
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .init();
    }

    let wallet = config.require_wallet()?.to_string();
    info!(wallet = %wallet, base_url = %config.api.base_url, "blockfolio starting");

    let client = ApiClient::new(config.api.base_url.clone(), config.api.api_key.clone());

    // Both resources in flight at once; nothing proceeds on partial results
    let (nfts, transfers) = tokio::join!(
        client.fetch_nfts(&wallet),
        client.fetch_transactions(&wallet)
    );

    // A failed fetch degrades to an empty section, not a failed run
    let nfts = match nfts {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "unable to fetch NFT holdings");
            Vec::new()
        }
    };
    let transfers = match transfers {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "unable to fetch NFT transactions");
            Vec::new()
        }
    };

    let balances = portfolio::balances_by_collection(&nfts);
    let activity = portfolio::activity_by_collection(&wallet, &transfers);

    report::print_report(&wallet, &balances, &activity);

    info!(
        holdings = nfts.len(),
        transfers = transfers.len(),
        collections = balances.len(),
        "report complete"
    );

    Ok(())
}
