//! MyUSA identity provider.
//!
//! The token exchange carries no identity; the email is fetched from the
//! profile endpoint with the access token.

use std::sync::Arc;

use serde_json::Value;
use url::Url;
use warden_config::ValidatedConfiguration;

use crate::error::{ProviderError, Result};
use crate::provider::{Provider, ProviderData, ProviderDefaults};
use crate::transport::{HttpTransport, redact_query};

const DEFAULTS: ProviderDefaults = ProviderDefaults {
    login_url: "https://alpha.my.usa.gov/oauth/authorize",
    redeem_url: "https://alpha.my.usa.gov/oauth/token",
    profile_url: Some("https://alpha.my.usa.gov/api/v1/profile"),
    scope: "profile.email",
};

/// MyUSA provider.
#[derive(Debug, Clone)]
pub struct MyUsaProvider {
    data: ProviderData,
    transport: Arc<dyn HttpTransport>,
}

impl MyUsaProvider {
    pub fn new(cfg: &ValidatedConfiguration, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            data: ProviderData::from_config(cfg, DEFAULTS),
            transport,
        }
    }

    /// Profile request URL for an access token.
    fn profile_request_url(&self, access_token: &str) -> Result<Url> {
        let profile_url = self
            .data
            .profile_url
            .as_ref()
            .ok_or_else(|| ProviderError::RequestBuild("no profile URL configured".to_string()))?;

        let raw = format!(
            "{}?access_token={}",
            profile_url,
            urlencoding::encode(access_token)
        );
        Url::parse(&raw).map_err(|e| ProviderError::RequestBuild(format!("{}: {}", raw, e)))
    }
}

impl Provider for MyUsaProvider {
    fn name(&self) -> &'static str {
        "myusa"
    }

    fn data(&self) -> &ProviderData {
        &self.data
    }

    fn email_address(&self, _auth_result: &Value, access_token: &str) -> Result<String> {
        let url = self.profile_request_url(access_token).inspect_err(|e| {
            tracing::warn!(error = %e, "failed building profile request");
        })?;

        let body = self.transport.get(&url).inspect_err(|e| {
            tracing::warn!(url = %redact_query(&url), error = %e, "failed making profile request");
        })?;

        let profile: Value = serde_json::from_str(&body)?;
        let email = profile
            .get("email")
            .and_then(Value::as_str)
            .ok_or(ProviderError::FieldMissing("email"))?;

        tracing::debug!(email = %email, "resolved identity from profile");
        Ok(email.to_string())
    }
}
