use crate::config::Config;
use crate::error::Result;
use crate::meta::MetaClient;
use crate::models::report_date;
use crate::sheets::SheetsClient;
use crate::sync::SyncEngine;
use chrono::Utc;
use tracing::{info, warn};

pub async fn execute() -> Result<()> {
    let config = Config::load();
    let report_date = report_date(Utc::now());
    let (meta_client, sheets_client) = open_clients(&config).await?;
    let url = sheets_client.spreadsheet_url();

    let engine = SyncEngine::new(config.accounts, meta_client, sheets_client);
    let report = engine.sync(report_date).await?;

    for outcome in report.failed_accounts() {
        warn!(
            account = %outcome.account_id,
            slot = %outcome.slot,
            "{}", outcome.status
        );
    }

    info!(
        date = %report.report_date,
        accounts = report.outcomes.len(),
        rows = report.rows_appended(),
        url = url,
        "Run completed"
    );

    Ok(())
}

/// Build the Graph API client first so a bad configuration fails before
/// the worksheet header is written.
async fn open_clients(config: &Config) -> Result<(MetaClient, SheetsClient)> {
    let meta_client = MetaClient::new(&config.meta)?;
    let sheets_client = SheetsClient::open(&config.google).await?;

    Ok((meta_client, sheets_client))
}
