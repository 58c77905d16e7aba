//! The identity provider contract and factory.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use url::Url;
use warden_config::{ProviderKind, ValidatedConfiguration};

use crate::error::Result;
use crate::google::GoogleProvider;
use crate::myusa::MyUsaProvider;
use crate::transport::{HttpTransport, ReqwestTransport};

// ============================================================================
// ProviderData
// ============================================================================

/// Endpoints and scope of one provider instance.
///
/// Built by each provider's constructor from the validated configuration,
/// with provider defaults filling whatever the operator left unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderData {
    pub login_url: Url,
    pub redeem_url: Url,
    pub profile_url: Option<Url>,
    pub scope: String,
}

/// Provider defaults, applied only where configuration is silent.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProviderDefaults {
    pub login_url: &'static str,
    pub redeem_url: &'static str,
    pub profile_url: Option<&'static str>,
    pub scope: &'static str,
}

impl ProviderData {
    pub(crate) fn from_config(cfg: &ValidatedConfiguration, defaults: ProviderDefaults) -> Self {
        let scope = if cfg.scope().is_empty() {
            defaults.scope.to_string()
        } else {
            cfg.scope().to_string()
        };

        Self {
            login_url: cfg
                .login_url()
                .cloned()
                .unwrap_or_else(|| builtin_url(defaults.login_url)),
            redeem_url: cfg
                .redeem_url()
                .cloned()
                .unwrap_or_else(|| builtin_url(defaults.redeem_url)),
            profile_url: cfg
                .profile_url()
                .cloned()
                .or_else(|| defaults.profile_url.map(builtin_url)),
            scope,
        }
    }
}

/// Parse a compiled-in endpoint constant.
fn builtin_url(s: &'static str) -> Url {
    Url::parse(s).expect("built-in provider URL is valid")
}

// ============================================================================
// Provider Trait
// ============================================================================

/// Uniform contract over OAuth2 identity providers.
///
/// Implementations only read their own [`ProviderData`] and per-call state,
/// so a single instance can serve concurrent authentication callbacks.
pub trait Provider: Send + Sync + fmt::Debug {
    /// Short provider name (`google`, `myusa`).
    fn name(&self) -> &'static str;

    /// Endpoints and scope for this instance.
    fn data(&self) -> &ProviderData;

    /// Absolute URL the browser is redirected to for authorization.
    fn login_url(&self) -> String {
        self.data().login_url.to_string()
    }

    /// Absolute URL used for the authorization-code exchange.
    fn redeem_url(&self) -> String {
        self.data().redeem_url.to_string()
    }

    /// Profile endpoint, for providers that use one.
    fn profile_url(&self) -> Option<String> {
        self.data().profile_url.as_ref().map(ToString::to_string)
    }

    /// OAuth2 scope requested during authorization.
    fn scope(&self) -> String {
        self.data().scope.clone()
    }

    /// Resolve the authenticated user's email from a token-exchange result.
    fn email_address(&self, auth_result: &Value, access_token: &str) -> Result<String>;
}

// ============================================================================
// Factory
// ============================================================================

/// Build the configured provider with the default HTTP transport.
///
/// The HTTP client is only created for providers that make profile calls.
pub fn new_provider(cfg: &ValidatedConfiguration) -> Result<Arc<dyn Provider>> {
    match cfg.provider() {
        ProviderKind::MyUsa => {
            let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(None)?);
            Ok(new_provider_with_transport(cfg, transport))
        }
        ProviderKind::Google => Ok(announce(Arc::new(GoogleProvider::new(cfg)))),
    }
}

/// Build the configured provider around an injected transport.
///
/// Providers that make no HTTP calls ignore the transport.
pub fn new_provider_with_transport(
    cfg: &ValidatedConfiguration,
    transport: Arc<dyn HttpTransport>,
) -> Arc<dyn Provider> {
    let provider: Arc<dyn Provider> = match cfg.provider() {
        ProviderKind::MyUsa => Arc::new(MyUsaProvider::new(cfg, transport)),
        ProviderKind::Google => Arc::new(GoogleProvider::new(cfg)),
    };
    announce(provider)
}

fn announce(provider: Arc<dyn Provider>) -> Arc<dyn Provider> {
    tracing::info!(
        provider = provider.name(),
        login_url = %provider.data().login_url,
        scope = %provider.data().scope,
        "identity provider configured"
    );

    provider
}
