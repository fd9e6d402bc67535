use super::{SheetOperations, ValueInputMode};
use crate::config::GoogleConfig;
use crate::error::{AppError, Result};
use crate::sheets::auth::create_and_verify_authenticator;
use crate::sheets::formatting::header_format_requests;
use async_trait::async_trait;
use google_drive3::api::DriveHub;
use google_sheets4::api::{BatchUpdateSpreadsheetRequest, Scope, Sheet, Sheets, ValueRange};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use serde_json::Value;
use tracing::{debug, info, instrument};

// Read/write spreadsheets, and find them by name in Drive
pub(crate) const AUTH_SCOPES: &[Scope] = &[Scope::Spreadsheet, Scope::Drive];

// Tab inside the spreadsheet that receives the report.
pub const WORKSHEET_NAME: &str = "adsreport";

type Connector = HttpsConnector<HttpConnector>;

pub struct SheetsClient {
    hub: Sheets<Connector>,
    spreadsheet_id: String,
    sheet_id: i32,
}

impl SheetsClient {
    /// Authenticate, locate the report worksheet and make sure it has a header.
    ///
    /// Every failure here is fatal: without the worksheet there is nowhere
    /// to write any account's rows.
    #[instrument(name = "Opening report worksheet", skip_all)]
    pub async fn open(config: &GoogleConfig) -> Result<Self> {
        let credentials_file = config
            .credentials_file
            .as_deref()
            .ok_or_else(|| AppError::Config("CREDENTIALS_FILE is not set".to_string()))?;
        let spreadsheet_name = config
            .spreadsheet_name
            .as_deref()
            .ok_or_else(|| AppError::Config("SPREADSHEET_NAME is not set".to_string()))?;

        let auth = create_and_verify_authenticator(credentials_file).await?;

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector()?);

        let sheets_hub = Sheets::new(client.clone(), auth.clone());
        let drive_hub = DriveHub::new(client, auth);

        let spreadsheet_id = Self::search_spreadsheet_by_name(&drive_hub, spreadsheet_name)
            .await?
            .ok_or_else(|| {
                AppError::Sheets(format!("Spreadsheet '{}' not found", spreadsheet_name))
            })?;

        let sheet = Self::get_sheet(&sheets_hub, &spreadsheet_id, WORKSHEET_NAME)
            .await?
            .ok_or_else(|| {
                AppError::Sheets(format!(
                    "Worksheet '{}' not found in '{}'",
                    WORKSHEET_NAME, spreadsheet_name
                ))
            })?;
        let sheet_id = sheet
            .properties
            .as_ref()
            .and_then(|p| p.sheet_id)
            .ok_or_else(|| AppError::Sheets("Sheet ID not found".to_string()))?;
        debug!(sheet_id, "Found worksheet");

        let client = Self {
            hub: sheets_hub,
            spreadsheet_id,
            sheet_id,
        };

        if client.ensure_header().await? {
            client.format_header().await?;
            info!("Wrote header row");
        }

        Ok(client)
    }

    pub fn spreadsheet_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/edit#gid={}",
            self.spreadsheet_id, self.sheet_id
        )
    }

    #[instrument(name = "Finding spreadsheet", skip(drive))]
    async fn search_spreadsheet_by_name(
        drive: &DriveHub<Connector>,
        name: &str,
    ) -> Result<Option<String>> {
        let query = format!(
            "name='{}' and mimeType='application/vnd.google-apps.spreadsheet' and trashed=false",
            escape_query_value(name)
        );

        let (_, file_list) = drive
            .files()
            .list()
            .q(&query)
            .supports_all_drives(true)
            .include_items_from_all_drives(true)
            .page_size(1)
            .add_scope(Scope::Drive)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to search spreadsheet: {}", e)))?;

        let spreadsheet_id = file_list
            .files
            .and_then(|files| files.into_iter().next())
            .and_then(|file| file.id);

        Ok(spreadsheet_id)
    }

    async fn get_sheet(
        hub: &Sheets<Connector>,
        spreadsheet_id: &str,
        sheet_name: &str,
    ) -> Result<Option<Sheet>> {
        let (_, spreadsheet) = hub
            .spreadsheets()
            .get(spreadsheet_id)
            .include_grid_data(false)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to get spreadsheet: {}", e)))?;

        let sheet = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .find(|sheet| {
                sheet
                    .properties
                    .as_ref()
                    .map(|props| props.title.as_deref() == Some(sheet_name))
                    .unwrap_or(false)
            });

        Ok(sheet)
    }

    async fn format_header(&self) -> Result<()> {
        let batch_update = BatchUpdateSpreadsheetRequest {
            requests: Some(header_format_requests(self.sheet_id)),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(batch_update, &self.spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to format header: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    async fn read_header(&self) -> Result<Vec<Value>> {
        let range = format!("'{}'!1:1", WORKSHEET_NAME);
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &range)
            .major_dimension("ROWS")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to read header row: {}", e)))?;

        let first_row = response
            .values
            .and_then(|rows| rows.into_iter().next())
            .unwrap_or_default();

        Ok(first_row)
    }

    async fn append_values(&self, values: Vec<Value>, mode: ValueInputMode) -> Result<()> {
        let range = format!("'{}'", WORKSHEET_NAME);
        let value_range = ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.clone()),
            values: Some(vec![values]),
        };

        self.hub
            .spreadsheets()
            .values_append(value_range, &self.spreadsheet_id, &range)
            .value_input_option(mode.as_str())
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to append row: {}", e)))?;

        Ok(())
    }
}

fn connector() -> Result<Connector> {
    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()?
        .https_or_http()
        .enable_http1()
        .build();

    Ok(connector)
}

/// Escape a value for use inside a single-quoted Drive query string.
fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
