use chrono::NaiveDate;
use std::fmt;

/// What happened to one ad account during a run.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountStatus {
    /// Every fetched record was appended.
    Synced { rows: usize },
    /// The connectivity probe failed, so nothing was fetched.
    Unreachable { reason: String },
    /// Insights could not be fetched; treated as no data.
    FetchFailed { reason: String },
    /// Appending stopped partway; `rows` made it into the sheet.
    AppendFailed { rows: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountOutcome {
    pub slot: String,
    pub account_id: String,
    pub status: AccountStatus,
}

impl AccountOutcome {
    pub fn rows_appended(&self) -> usize {
        match self.status {
            AccountStatus::Synced { rows } | AccountStatus::AppendFailed { rows, .. } => rows,
            AccountStatus::Unreachable { .. } | AccountStatus::FetchFailed { .. } => 0,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, AccountStatus::Synced { .. })
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountStatus::Synced { rows } => write!(f, "synced {} rows", rows),
            AccountStatus::Unreachable { reason } => write!(f, "skipped: {}", reason),
            AccountStatus::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
            AccountStatus::AppendFailed { rows, reason } => {
                write!(f, "append failed after {} rows: {}", rows, reason)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub report_date: NaiveDate,
    pub outcomes: Vec<AccountOutcome>,
}

impl RunReport {
    pub fn rows_appended(&self) -> usize {
        self.outcomes.iter().map(AccountOutcome::rows_appended).sum()
    }

    pub fn failed_accounts(&self) -> impl Iterator<Item = &AccountOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(account_id: &str, status: AccountStatus) -> AccountOutcome {
        AccountOutcome {
            slot: "THC".to_string(),
            account_id: account_id.to_string(),
            status,
        }
    }

    #[test]
    fn test_report_totals() {
        let report = RunReport {
            report_date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            outcomes: vec![
                outcome("a", AccountStatus::Synced { rows: 3 }),
                outcome(
                    "b",
                    AccountStatus::Unreachable {
                        reason: "bad token".to_string(),
                    },
                ),
                outcome(
                    "c",
                    AccountStatus::AppendFailed {
                        rows: 2,
                        reason: "quota".to_string(),
                    },
                ),
            ],
        };

        assert_eq!(report.rows_appended(), 5);
        let failed: Vec<&str> = report
            .failed_accounts()
            .map(|o| o.account_id.as_str())
            .collect();
        assert_eq!(failed, vec!["b", "c"]);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            AccountStatus::Synced { rows: 4 }.to_string(),
            "synced 4 rows"
        );
        assert_eq!(
            AccountStatus::FetchFailed {
                reason: "500".to_string()
            }
            .to_string(),
            "fetch failed: 500"
        );
    }
}
