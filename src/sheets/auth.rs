use crate::error::{AppError, Result};
use crate::sheets::client::AUTH_SCOPES;
use hyper_util::client::legacy::connect::HttpConnector;
use std::path::Path;
use tracing::{debug, instrument};
use yup_oauth2::{
    ServiceAccountAuthenticator, authenticator::Authenticator, hyper_rustls::HttpsConnector,
};

pub(super) type AuthType = Authenticator<HttpsConnector<HttpConnector>>;

/// Create a service account authenticator and verify it by fetching a token
#[instrument(name = "Authenticating service account", skip_all, fields(key = ?credentials_file))]
pub(super) async fn create_and_verify_authenticator(credentials_file: &Path) -> Result<AuthType> {
    let key = yup_oauth2::read_service_account_key(credentials_file)
        .await
        .map_err(|e| {
            AppError::Auth(format!(
                "Failed to read service account key {:?}: {}",
                credentials_file, e
            ))
        })?;
    debug!(client_email = %key.client_email, "Loaded service account key");

    let auth = ServiceAccountAuthenticator::builder(key)
        .build()
        .await
        .map_err(|e| AppError::Auth(format!("Failed to build authenticator: {}", e)))?;

    // Bad keys only show up once a token is requested
    let _token = auth
        .token(AUTH_SCOPES)
        .await
        .map_err(|e| AppError::Auth(format!("Failed to get token: {}", e)))?;

    Ok(auth)
}
