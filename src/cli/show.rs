use crate::config::Config;
use crate::error::Result;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show the configuration resolved from the environment
    Config,
}

impl ShowResource {
    pub async fn execute(&self) -> Result<()> {
        match self {
            ShowResource::Config => show_config(),
        }
    }
}

fn show_config() -> Result<()> {
    let config = Config::load();

    info!(
        access_token = if config.meta.access_token.is_some() { "<set>" } else { "<unset>" },
        graph_url = %config.meta.graph_url,
        "Meta"
    );
    info!(
        credentials_file = ?config.google.credentials_file,
        spreadsheet = ?config.google.spreadsheet_name,
        "Google"
    );
    for account in &config.accounts {
        info!(
            slot = %account.slot,
            id = %account.id,
            brand_override = account.brand_override,
            "Account"
        );
    }
    info!(account = ?config.brand_override_account, "Brand override");

    Ok(())
}
