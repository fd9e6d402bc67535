use crate::config::Config;
use crate::error::{AppError, Result};
use crate::meta::{Connectivity, MetaClient, MetaOperations};
use crate::models::AdAccount;
use tracing::{info, warn};

pub async fn execute() -> Result<()> {
    let config = Config::load();
    let client = MetaClient::new(&config.meta)?;

    check_accounts(&client, &config.accounts).await
}

/// Probe every account, failing if any of them cannot be reached.
async fn check_accounts<MC: MetaOperations>(client: &MC, accounts: &[AdAccount]) -> Result<()> {
    if accounts.is_empty() {
        warn!("No ad accounts configured");
    }

    let mut unreachable = Vec::new();
    for account in accounts {
        match client.check_connection(&account.id).await {
            Ok(Connectivity::Connected(_)) => {
                info!(account = %account.id, slot = %account.slot, "Account reachable");
            }
            Ok(Connectivity::Rejected(_)) => unreachable.push(account.id.clone()),
            Err(e) => {
                warn!(account = %account.id, error = %e, "Connection check failed");
                unreachable.push(account.id.clone());
            }
        }
    }

    if !unreachable.is_empty() {
        return Err(AppError::MetaApi(format!(
            "Unreachable accounts: {}",
            unreachable.join(", ")
        )));
    }

    Ok(())
}
