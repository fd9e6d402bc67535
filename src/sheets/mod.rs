mod auth;
mod client;
mod formatting;

pub use client::SheetsClient;

use crate::error::Result;
use crate::models::SheetRow;
use crate::models::row::header_values;
use async_trait::async_trait;
use serde_json::Value;

/// How the Sheets API should interpret appended cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputMode {
    /// Stored exactly as given.
    Raw,
    /// Parsed as if typed into the UI, so numeric text becomes numbers.
    UserEntered,
}

impl ValueInputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputMode::Raw => "RAW",
            ValueInputMode::UserEntered => "USER_ENTERED",
        }
    }
}

#[async_trait]
pub trait SheetOperations: Sync {
    /// Values of the first row of the report worksheet.
    async fn read_header(&self) -> Result<Vec<Value>>;

    /// Append one row after the last non-empty row.
    async fn append_values(&self, values: Vec<Value>, mode: ValueInputMode) -> Result<()>;

    /// Write the header row unless the first row already has content.
    /// Returns whether the header was written.
    async fn ensure_header(&self) -> Result<bool> {
        let first_row = self.read_header().await?;
        if !is_blank_row(&first_row) {
            return Ok(false);
        }

        self.append_values(header_values(), ValueInputMode::Raw).await?;
        Ok(true)
    }

    async fn append_row(&self, row: &SheetRow) -> Result<()> {
        self.append_values(row.to_values(), ValueInputMode::UserEntered)
            .await
    }
}

fn is_blank_row(row: &[Value]) -> bool {
    row.iter().all(|cell| match cell {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    })
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex};

    /// In-memory worksheet recording every append.
    #[derive(Clone, Default)]
    pub(crate) struct MemorySheet {
        pub rows: Arc<Mutex<Vec<Vec<Value>>>>,
        pub modes: Arc<Mutex<Vec<ValueInputMode>>>,
        /// Appends fail when the row contains this campaign name.
        pub fail_on_campaign: Option<String>,
    }

    impl MemorySheet {
        pub(crate) fn with_rows(rows: Vec<Vec<Value>>) -> Self {
            Self {
                rows: Arc::new(Mutex::new(rows)),
                ..Default::default()
            }
        }

        pub(crate) fn rows(&self) -> Vec<Vec<Value>> {
            self.rows.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SheetOperations for MemorySheet {
        async fn read_header(&self) -> Result<Vec<Value>> {
            Ok(self.rows.lock().unwrap().first().cloned().unwrap_or_default())
        }

        async fn append_values(&self, values: Vec<Value>, mode: ValueInputMode) -> Result<()> {
            if let Some(campaign) = &self.fail_on_campaign {
                if values.iter().any(|v| v.as_str() == Some(campaign.as_str())) {
                    return Err(AppError::Sheets("Failed to append row: quota".to_string()));
                }
            }
            self.rows.lock().unwrap().push(values);
            self.modes.lock().unwrap().push(mode);
            Ok(())
        }
    }
}
