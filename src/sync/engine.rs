use super::report::{AccountOutcome, AccountStatus, RunReport};
use crate::error::Result;
use crate::meta::{Connectivity, MetaOperations};
use crate::models::{AdAccount, SheetRow};
use crate::sheets::SheetOperations;
use chrono::NaiveDate;
use tracing::{info, instrument, warn};

pub struct SyncEngine<MC, SC> {
    accounts: Vec<AdAccount>,
    meta_client: MC,
    sheets_client: SC,
}

impl<MC, SC> SyncEngine<MC, SC>
where
    MC: MetaOperations + Sync,
    SC: SheetOperations + Sync,
{
    pub fn new(accounts: Vec<AdAccount>, meta_client: MC, sheets_client: SC) -> Self {
        Self {
            accounts,
            meta_client,
            sheets_client,
        }
    }

    /// Process every account in order, one at a time.
    ///
    /// Account-level failures are recorded in the report and the run moves on.
    /// A record that cannot be mapped aborts the whole run.
    #[instrument(name = "Sync", skip_all, fields(date = %report_date))]
    pub async fn sync(&self, report_date: NaiveDate) -> Result<RunReport> {
        if self.accounts.is_empty() {
            warn!("No ad accounts configured");
        }

        let mut outcomes = Vec::with_capacity(self.accounts.len());

        for account in &self.accounts {
            let status = self.sync_account(account, report_date).await?;
            outcomes.push(AccountOutcome {
                slot: account.slot.clone(),
                account_id: account.id.clone(),
                status,
            });
        }

        Ok(RunReport {
            report_date,
            outcomes,
        })
    }

    #[instrument(
        name = "Syncing account",
        skip_all,
        fields(account = %account.id, slot = %account.slot)
    )]
    async fn sync_account(
        &self,
        account: &AdAccount,
        report_date: NaiveDate,
    ) -> Result<AccountStatus> {
        match self.meta_client.check_connection(&account.id).await {
            Ok(Connectivity::Connected(_)) => {}
            Ok(Connectivity::Rejected(error)) => {
                return Ok(AccountStatus::Unreachable {
                    reason: error.to_string(),
                });
            }
            Err(e) => {
                warn!(error = %e, "Connection check failed");
                return Ok(AccountStatus::Unreachable {
                    reason: e.to_string(),
                });
            }
        }

        let records = match self.meta_client.fetch_insights(&account.id).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "No data for account");
                return Ok(AccountStatus::FetchFailed {
                    reason: e.to_string(),
                });
            }
        };

        let mut rows = 0;
        for record in &records {
            let row = SheetRow::from_insight(record, account, report_date)?;

            if let Err(e) = self.sheets_client.append_row(&row).await {
                warn!(campaign = %row.campaign_name, error = %e, "Failed to append row");
                return Ok(AccountStatus::AppendFailed {
                    rows,
                    reason: e.to_string(),
                });
            }

            info!(campaign = %row.campaign_name, brand = %row.brand, "Appended row");
            rows += 1;
        }

        info!(rows, "Account synced");

        Ok(AccountStatus::Synced { rows })
    }
}
