use super::MetaOperations;
use crate::config::MetaConfig;
use crate::error::{AppError, Result};
use crate::meta::types::{
    Connectivity, GraphError, INSIGHT_FIELDS, InsightRecord, InsightsResponse,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tracing::{info, instrument, warn};
use url::Url;

pub struct MetaClient {
    client: Client,
    access_token: Option<String>,
    graph_url: Url,
}

impl MetaClient {
    pub fn new(config: &MetaConfig) -> Result<Self> {
        let graph_url = Url::parse(&config.graph_url)?;
        if graph_url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "Graph API URL cannot be used as a base: {}",
                config.graph_url
            )));
        }

        Ok(Self {
            client: Client::new(),
            access_token: config.access_token.clone(),
            graph_url,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.graph_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Build a GET request, passing the token as a query parameter when set.
    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.access_token {
            Some(token) => request.query(&[("access_token", token)]),
            None => request,
        }
    }
}

#[async_trait]
impl MetaOperations for MetaClient {
    #[instrument(name = "Checking API connection", skip_all, fields(account = account_id))]
    async fn check_connection(&self, account_id: &str) -> Result<Connectivity> {
        let response = self
            .get(self.endpoint(&[account_id]))
            .query(&[("fields", "account_id")])
            .send()
            .await?;

        if response.status() == StatusCode::OK {
            let metadata: Value = response.json().await?;
            info!(
                metadata = %serde_json::to_string_pretty(&metadata)?,
                "API connection successful"
            );
            return Ok(Connectivity::Connected(metadata));
        }

        let body = response.text().await.unwrap_or_default();
        let error = GraphError::from_body(&body);
        warn!(
            message = %error.message,
            error_type = %error.error_type,
            code = %error.code,
            "Failed to connect to API"
        );

        Ok(Connectivity::Rejected(error))
    }

    #[instrument(name = "Fetching insights", skip_all, fields(account = account_id))]
    async fn fetch_insights(&self, account_id: &str) -> Result<Vec<InsightRecord>> {
        let response = self
            .get(self.endpoint(&[account_id, "insights"]))
            .query(&[
                ("level", "campaign"),
                ("date_preset", "yesterday"),
                ("fields", INSIGHT_FIELDS),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %body, "Failed to fetch ads performance");
            return Err(AppError::MetaApi(format!(
                "Failed to fetch insights for {}: {} - {}",
                account_id, status, body
            )));
        }

        let insights: InsightsResponse = response.json().await?;

        Ok(insights.data)
    }
}
