//! Raw configuration types mapping to the TOML schema.
//!
//! ```toml
//! http_address = "127.0.0.1:4180"
//! redirect_url = "https://proxy.example.com/oauth2/callback"
//! client_id = "..."
//! client_secret = "..."
//! cookie_secret = "..."
//! upstreams = ["http://127.0.0.1:8080/"]
//! skip_auth_regex = ["^/healthz$"]
//! provider = "google"
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default listen address.
pub const DEFAULT_HTTP_ADDRESS: &str = "127.0.0.1:4180";

/// Default session cookie lifetime (one week).
pub const DEFAULT_COOKIE_EXPIRE_SECS: u64 = 168 * 60 * 60;

// ─────────────────────────────────────────────────────────────────────────────
// RawConfiguration
// ─────────────────────────────────────────────────────────────────────────────

/// Every user-supplied setting, as loaded from file, environment and flags.
///
/// Absent values are represented by their empty/zero value. Nothing here is
/// checked; run [`crate::validate`] to obtain a
/// [`ValidatedConfiguration`](crate::ValidatedConfiguration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfiguration {
    /// Address the proxy listens on.
    pub http_address: String,

    /// OAuth2 callback URL.
    pub redirect_url: String,

    /// OAuth2 client id (required).
    pub client_id: String,

    /// OAuth2 client secret (required).
    pub client_secret: String,

    /// Forward basic-auth credentials to upstreams.
    pub pass_basic_auth: bool,

    /// Path to an htpasswd file for basic-auth sign in.
    pub htpasswd_file: String,

    /// Render the htpasswd sign-in form.
    pub display_htpasswd_form: bool,

    /// Secret used to sign session cookies (required).
    pub cookie_secret: String,

    /// Domain attribute of the session cookie.
    pub cookie_domain: String,

    /// Session cookie lifetime in seconds.
    pub cookie_expire_secs: u64,

    /// Set the `Secure` attribute on the session cookie.
    pub cookie_https_only: bool,

    /// Set the `HttpOnly` attribute on the session cookie.
    #[serde(rename = "cookie_httponly")]
    pub cookie_http_only: bool,

    /// File listing individually authorized email addresses.
    pub authenticated_emails_file: String,

    /// Email domains allowed to authenticate. Order is irrelevant.
    pub google_apps_domains: Vec<String>,

    /// Upstream targets, in routing priority order.
    pub upstreams: Vec<String>,

    /// Request path patterns exempted from authentication.
    pub skip_auth_regex: Vec<String>,

    /// Authorization endpoint override.
    pub login_url: String,

    /// Token endpoint override.
    pub redeem_url: String,

    /// Profile endpoint override.
    pub profile_url: String,

    /// OAuth2 scope override.
    #[serde(rename = "oauth_scope")]
    pub scope: String,

    /// Identity provider discriminator (`google`, `myusa`).
    pub provider: String,
}

impl Default for RawConfiguration {
    fn default() -> Self {
        Self {
            http_address: DEFAULT_HTTP_ADDRESS.to_string(),
            redirect_url: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            pass_basic_auth: true,
            htpasswd_file: String::new(),
            display_htpasswd_form: true,
            cookie_secret: String::new(),
            cookie_domain: String::new(),
            cookie_expire_secs: DEFAULT_COOKIE_EXPIRE_SECS,
            cookie_https_only: true,
            cookie_http_only: true,
            authenticated_emails_file: String::new(),
            google_apps_domains: Vec::new(),
            upstreams: Vec::new(),
            skip_auth_regex: Vec::new(),
            login_url: String::new(),
            redeem_url: String::new(),
            profile_url: String::new(),
            scope: String::new(),
            provider: String::new(),
        }
    }
}

impl RawConfiguration {
    /// Create a config populated with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string. Keys absent from the document keep their defaults.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Session cookie lifetime.
    pub fn cookie_expire(&self) -> Duration {
        Duration::from_secs(self.cookie_expire_secs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ProviderKind
// ─────────────────────────────────────────────────────────────────────────────

/// Which identity provider strategy to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Google OpenID Connect (id_token based). The default.
    #[default]
    Google,
    /// MyUSA (profile endpoint based).
    MyUsa,
}

impl ProviderKind {
    /// Resolve a discriminator setting. Only the exact value `myusa` selects
    /// MyUSA; everything else, including other spellings, is Google.
    pub fn from_setting(setting: &str) -> Self {
        match setting {
            "myusa" => ProviderKind::MyUsa,
            _ => ProviderKind::Google,
        }
    }

    /// Canonical setting value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::MyUsa => "myusa",
        }
    }

    /// Whether the setting names a provider explicitly (empty means default).
    pub fn is_known(setting: &str) -> bool {
        matches!(setting, "" | "google" | "myusa")
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
