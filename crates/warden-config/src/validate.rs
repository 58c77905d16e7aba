//! Raw-to-validated configuration transform.
//!
//! [`validate`] is a pure function: it never touches its input, never stops at
//! the first problem, and always returns the best-effort validated value
//! alongside every violation it found. A non-empty violation list means the
//! configuration must not be used to serve traffic.

use std::time::Duration;

use regex::Regex;
use url::Url;

use crate::error::{ConfigError, InvalidConfiguration};
use crate::types::{ProviderKind, RawConfiguration};

/// Pre-parsed, internally consistent runtime configuration.
///
/// Every URL present is syntactically valid, every upstream has a non-empty
/// path, and every skip-auth matcher compiled. Only obtainable through
/// [`validate`].
#[derive(Debug, Clone)]
pub struct ValidatedConfiguration {
    redirect_url: Option<Url>,
    upstreams: Vec<Url>,
    skip_auth_regex: Vec<Regex>,
    login_url: Option<Url>,
    redeem_url: Option<Url>,
    profile_url: Option<Url>,
    scope: String,
    provider: ProviderKind,

    http_address: String,
    client_id: String,
    client_secret: String,
    pass_basic_auth: bool,
    htpasswd_file: String,
    display_htpasswd_form: bool,
    cookie_secret: String,
    cookie_domain: String,
    cookie_expire: Duration,
    cookie_https_only: bool,
    cookie_http_only: bool,
    authenticated_emails_file: String,
    google_apps_domains: Vec<String>,
}

impl ValidatedConfiguration {
    /// Parsed OAuth2 callback URL, if one was configured.
    ///
    /// Must be absolute (carry a scheme); a path-only value such as
    /// `/oauth2/callback` is reported as a violation.
    pub fn redirect_url(&self) -> Option<&Url> {
        self.redirect_url.as_ref()
    }

    /// Upstream targets in routing priority order.
    pub fn upstreams(&self) -> &[Url] {
        &self.upstreams
    }

    /// Compiled skip-auth matchers. Patterns that failed to compile are absent.
    pub fn skip_auth_regex(&self) -> &[Regex] {
        &self.skip_auth_regex
    }

    /// Authorization endpoint override.
    pub fn login_url(&self) -> Option<&Url> {
        self.login_url.as_ref()
    }

    /// Token endpoint override.
    pub fn redeem_url(&self) -> Option<&Url> {
        self.redeem_url.as_ref()
    }

    /// Profile endpoint override.
    pub fn profile_url(&self) -> Option<&Url> {
        self.profile_url.as_ref()
    }

    /// OAuth2 scope override; empty when the provider default applies.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Selected identity provider.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn http_address(&self) -> &str {
        &self.http_address
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn pass_basic_auth(&self) -> bool {
        self.pass_basic_auth
    }

    pub fn htpasswd_file(&self) -> &str {
        &self.htpasswd_file
    }

    pub fn display_htpasswd_form(&self) -> bool {
        self.display_htpasswd_form
    }

    pub fn cookie_secret(&self) -> &str {
        &self.cookie_secret
    }

    pub fn cookie_domain(&self) -> &str {
        &self.cookie_domain
    }

    pub fn cookie_expire(&self) -> Duration {
        self.cookie_expire
    }

    pub fn cookie_https_only(&self) -> bool {
        self.cookie_https_only
    }

    pub fn cookie_http_only(&self) -> bool {
        self.cookie_http_only
    }

    pub fn authenticated_emails_file(&self) -> &str {
        &self.authenticated_emails_file
    }

    pub fn google_apps_domains(&self) -> &[String] {
        &self.google_apps_domains
    }
}

/// Validate a raw configuration, collecting every violation.
pub fn validate(raw: &RawConfiguration) -> (ValidatedConfiguration, Vec<ConfigError>) {
    let mut errors = Vec::new();

    if raw.upstreams.is_empty() {
        errors.push(ConfigError::missing("upstream"));
    }
    if raw.cookie_secret.is_empty() {
        errors.push(ConfigError::missing("cookie-secret"));
    }
    if raw.client_id.is_empty() {
        errors.push(ConfigError::missing("client-id"));
    }
    if raw.client_secret.is_empty() {
        errors.push(ConfigError::missing("client-secret"));
    }

    let redirect_url = parse_optional_url(&raw.redirect_url, "redirect", &mut errors);
    let login_url = parse_optional_url(&raw.login_url, "login", &mut errors);
    let redeem_url = parse_optional_url(&raw.redeem_url, "redeem", &mut errors);
    let profile_url = parse_optional_url(&raw.profile_url, "profile", &mut errors);

    let upstreams: Vec<Url> = raw
        .upstreams
        .iter()
        .filter_map(|upstream| match parse_upstream(upstream) {
            Ok(url) => Some(url),
            Err(e) => {
                errors.push(e);
                None
            }
        })
        .collect();

    let skip_auth_regex: Vec<Regex> = raw
        .skip_auth_regex
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                errors.push(ConfigError::invalid_regex(pattern, e));
                None
            }
        })
        .collect();

    if !ProviderKind::is_known(&raw.provider) {
        tracing::warn!(
            provider = %raw.provider,
            "unknown provider, falling back to google"
        );
    }

    let validated = ValidatedConfiguration {
        redirect_url,
        upstreams,
        skip_auth_regex,
        login_url,
        redeem_url,
        profile_url,
        scope: raw.scope.clone(),
        provider: ProviderKind::from_setting(&raw.provider),
        http_address: raw.http_address.clone(),
        client_id: raw.client_id.clone(),
        client_secret: raw.client_secret.clone(),
        pass_basic_auth: raw.pass_basic_auth,
        htpasswd_file: raw.htpasswd_file.clone(),
        display_htpasswd_form: raw.display_htpasswd_form,
        cookie_secret: raw.cookie_secret.clone(),
        cookie_domain: raw.cookie_domain.clone(),
        cookie_expire: raw.cookie_expire(),
        cookie_https_only: raw.cookie_https_only,
        cookie_http_only: raw.cookie_http_only,
        authenticated_emails_file: raw.authenticated_emails_file.clone(),
        google_apps_domains: raw.google_apps_domains.clone(),
    };

    tracing::debug!(
        upstreams = validated.upstreams.len(),
        skip_auth_patterns = validated.skip_auth_regex.len(),
        provider = %validated.provider,
        violations = errors.len(),
        "validated configuration"
    );

    (validated, errors)
}

impl RawConfiguration {
    /// Validate, failing with the full report if anything is wrong.
    pub fn validate(&self) -> Result<ValidatedConfiguration, InvalidConfiguration> {
        let (validated, errors) = validate(self);
        match InvalidConfiguration::from_errors(errors) {
            Some(report) => Err(report),
            None => Ok(validated),
        }
    }
}

/// Parse a URL setting if non-empty, recording a tagged error on failure.
fn parse_optional_url(
    value: &str,
    kind: &'static str,
    errors: &mut Vec<ConfigError>,
) -> Option<Url> {
    if value.is_empty() {
        return None;
    }
    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(e) => {
            errors.push(ConfigError::invalid_url(kind, value, e));
            None
        }
    }
}

/// Parse one upstream target, defaulting an empty path to `/`.
///
/// Opaque URLs (`foo:`, `mailto:x`) have no hierarchical path to default and
/// are rejected.
fn parse_upstream(value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value).map_err(|e| ConfigError::invalid_upstream(value, e))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::invalid_upstream(
            value,
            "upstream must be a hierarchical URL with a path",
        ));
    }
    if url.path().is_empty() {
        url.set_path("/");
    }
    Ok(url)
}
