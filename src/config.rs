use crate::models::AdAccount;
use std::env::VarError;
use std::path::PathBuf;

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v20.0";

const ACCESS_TOKEN_VAR: &str = "META_ACCESS_TOKEN";
const GRAPH_URL_VAR: &str = "META_GRAPH_URL";
const SPREADSHEET_NAME_VAR: &str = "SPREADSHEET_NAME";
const CREDENTIALS_FILE_VAR: &str = "CREDENTIALS_FILE";

/// Environment variables holding ad account IDs, in processing order.
const ACCOUNT_SLOTS: &[&str] = &["THC", "LM"];

/// Environment variable holding the account that gets the brand override.
const BRAND_OVERRIDE_SLOT: &str = "TAFF";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub meta: MetaConfig,
    pub google: GoogleConfig,
    pub accounts: Vec<AdAccount>,
    pub brand_override_account: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MetaConfig {
    pub access_token: Option<String>,
    pub graph_url: String,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            graph_url: DEFAULT_GRAPH_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoogleConfig {
    pub credentials_file: Option<PathBuf>,
    pub spreadsheet_name: Option<String>,
}

impl Config {
    /// Load configuration from the process environment, after reading `.env`
    /// from the working directory if one exists.
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Build configuration from an environment lookup function.
    ///
    /// Nothing is required here: a missing token or credentials file shows up
    /// later as a failed request or authentication error. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let get = |key: &str| lookup(key).ok().filter(|value| !value.is_empty());

        let brand_override_account = get(BRAND_OVERRIDE_SLOT);

        let accounts = ACCOUNT_SLOTS
            .iter()
            .filter_map(|&slot| {
                get(slot).map(|id| {
                    let brand_override = brand_override_account.as_deref() == Some(id.as_str());
                    AdAccount::new(slot, id, brand_override)
                })
            })
            .collect();

        Self {
            meta: MetaConfig {
                access_token: get(ACCESS_TOKEN_VAR),
                graph_url: get(GRAPH_URL_VAR).unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string()),
            },
            google: GoogleConfig {
                credentials_file: get(CREDENTIALS_FILE_VAR).map(PathBuf::from),
                spreadsheet_name: get(SPREADSHEET_NAME_VAR),
            },
            accounts,
            brand_override_account,
        }
    }
}
