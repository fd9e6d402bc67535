use serde::Deserialize;
use serde_json::Value;

/// Fields requested from the insights endpoint.
pub(super) const INSIGHT_FIELDS: &str =
    "campaign_name,account_name,account_id,impressions,spend,cpm,clicks,cpc,ctr,reach";

#[derive(Debug, Deserialize)]
pub(super) struct InsightsResponse {
    #[serde(default)]
    pub(super) data: Vec<InsightRecord>,
}

// https://developers.facebook.com/docs/marketing-api/reference/adgroup/insights/
// Metrics arrive as JSON strings ("1000", "50.5"), so they are kept raw and
// coerced when the row is built.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct InsightRecord {
    pub campaign_name: Option<String>,
    pub account_name: Option<String>,
    pub account_id: Option<String>,
    pub impressions: Option<Value>,
    pub spend: Option<Value>,
    pub cpm: Option<Value>,
    pub clicks: Option<Value>,
    pub cpc: Option<Value>,
    pub ctr: Option<Value>,
    pub reach: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GraphErrorResponse {
    #[serde(default)]
    pub(super) error: GraphErrorBody,
}

// https://developers.facebook.com/docs/graph-api/guides/error-handling
#[derive(Debug, Default, Deserialize)]
pub(super) struct GraphErrorBody {
    pub(super) message: Option<String>,
    #[serde(rename = "type")]
    pub(super) type_: Option<String>,
    pub(super) code: Option<Value>,
}

/// Error reported by the Graph API, with placeholders for missing parts.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphError {
    pub message: String,
    pub error_type: String,
    pub code: String,
}

impl From<GraphErrorBody> for GraphError {
    fn from(body: GraphErrorBody) -> Self {
        let code = match body.code {
            Some(Value::String(code)) => code,
            Some(Value::Null) | None => "Unknown code".to_string(),
            Some(other) => other.to_string(),
        };

        GraphError {
            message: body.message.unwrap_or_else(|| "Unknown error".to_string()),
            error_type: body.type_.unwrap_or_else(|| "Unknown type".to_string()),
            code,
        }
    }
}

impl GraphError {
    /// Parse an error response body, falling back to placeholders when the
    /// body is not the usual `{"error": {...}}` document.
    pub(super) fn from_body(body: &str) -> Self {
        serde_json::from_str::<GraphErrorResponse>(body)
            .unwrap_or_default()
            .error
            .into()
    }
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (type: {}, code: {})",
            self.message, self.error_type, self.code
        )
    }
}

/// Result of probing an ad account with the configured token.
#[derive(Debug, Clone, PartialEq)]
pub enum Connectivity {
    /// Account metadata as returned by the API.
    Connected(Value),
    Rejected(GraphError),
}
