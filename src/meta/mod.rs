mod client;
pub mod types;
pub use client::MetaClient;
pub use types::{Connectivity, GraphError, InsightRecord};

use crate::error::Result;

use async_trait::async_trait;

#[async_trait]
pub trait MetaOperations {
    /// Check that the access token can read `account_id`.
    async fn check_connection(&self, account_id: &str) -> Result<Connectivity>;

    /// Campaign-level insights for yesterday, in the order the API returns them.
    async fn fetch_insights(&self, account_id: &str) -> Result<Vec<InsightRecord>>;
}
