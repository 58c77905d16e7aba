//! CLI command handlers.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use warden_config::{RawConfiguration, ValidatedConfiguration, load_config};

pub mod check;
pub mod email;
pub mod provider;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Explicit config file, if given.
    pub config_path: Option<PathBuf>,
    /// Setting overrides from flags and environment.
    pub settings: SettingsArgs,
    /// Verbose output enabled.
    pub verbose: bool,
}

/// Setting overrides layered on top of the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Address to listen on
    #[arg(long, global = true)]
    pub http_address: Option<String>,

    /// Upstream target (repeatable; replaces the file's list)
    #[arg(long = "upstream", global = true)]
    pub upstreams: Vec<String>,

    /// OAuth2 callback URL
    #[arg(long, global = true)]
    pub redirect_url: Option<String>,

    /// OAuth2 client id
    #[arg(long, global = true, env = "WARDEN_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// OAuth2 client secret
    #[arg(long, global = true, env = "WARDEN_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Forward basic-auth credentials to upstreams
    #[arg(long, global = true)]
    pub pass_basic_auth: Option<bool>,

    /// htpasswd file for basic-auth sign in
    #[arg(long, global = true)]
    pub htpasswd_file: Option<String>,

    /// Render the htpasswd sign-in form
    #[arg(long, global = true)]
    pub display_htpasswd_form: Option<bool>,

    /// Seed for signing session cookies
    #[arg(long, global = true, env = "WARDEN_COOKIE_SECRET", hide_env_values = true)]
    pub cookie_secret: Option<String>,

    /// Session cookie domain
    #[arg(long, global = true, env = "WARDEN_COOKIE_DOMAIN")]
    pub cookie_domain: Option<String>,

    /// Session cookie lifetime in seconds
    #[arg(long = "cookie-expire", global = true, env = "WARDEN_COOKIE_EXPIRE")]
    pub cookie_expire_secs: Option<u64>,

    /// Set the Secure attribute on the session cookie
    #[arg(long, global = true)]
    pub cookie_https_only: Option<bool>,

    /// Set the HttpOnly attribute on the session cookie
    #[arg(long = "cookie-httponly", global = true)]
    pub cookie_http_only: Option<bool>,

    /// File listing individually authorized email addresses
    #[arg(long, global = true)]
    pub authenticated_emails_file: Option<String>,

    /// Allowed email domain (repeatable; replaces the file's list)
    #[arg(long = "google-apps-domain", global = true)]
    pub google_apps_domains: Vec<String>,

    /// Path pattern exempted from authentication (repeatable; replaces the file's list)
    #[arg(long = "skip-auth-regex", global = true)]
    pub skip_auth_regex: Vec<String>,

    /// Authorization endpoint override
    #[arg(long, global = true)]
    pub login_url: Option<String>,

    /// Token endpoint override
    #[arg(long, global = true)]
    pub redeem_url: Option<String>,

    /// Profile endpoint override
    #[arg(long, global = true)]
    pub profile_url: Option<String>,

    /// OAuth2 scope
    #[arg(long = "oauth-scope", global = true)]
    pub scope: Option<String>,

    /// Identity provider: google (default) or myusa
    #[arg(long, global = true)]
    pub provider: Option<String>,
}

impl SettingsArgs {
    /// Overlay the given settings onto a loaded configuration.
    pub fn apply(&self, raw: &mut RawConfiguration) {
        if !self.upstreams.is_empty() {
            raw.upstreams = self.upstreams.clone();
        }
        if !self.skip_auth_regex.is_empty() {
            raw.skip_auth_regex = self.skip_auth_regex.clone();
        }
        if !self.google_apps_domains.is_empty() {
            raw.google_apps_domains = self.google_apps_domains.clone();
        }
        if let Some(secs) = self.cookie_expire_secs {
            raw.cookie_expire_secs = secs;
        }

        let flags = [
            (self.pass_basic_auth, &mut raw.pass_basic_auth),
            (self.display_htpasswd_form, &mut raw.display_htpasswd_form),
            (self.cookie_https_only, &mut raw.cookie_https_only),
            (self.cookie_http_only, &mut raw.cookie_http_only),
        ];
        for (value, target) in flags {
            if let Some(value) = value {
                *target = value;
            }
        }

        let overrides = [
            (&self.http_address, &mut raw.http_address),
            (&self.htpasswd_file, &mut raw.htpasswd_file),
            (&self.authenticated_emails_file, &mut raw.authenticated_emails_file),
            (&self.redirect_url, &mut raw.redirect_url),
            (&self.client_id, &mut raw.client_id),
            (&self.client_secret, &mut raw.client_secret),
            (&self.cookie_secret, &mut raw.cookie_secret),
            (&self.cookie_domain, &mut raw.cookie_domain),
            (&self.login_url, &mut raw.login_url),
            (&self.redeem_url, &mut raw.redeem_url),
            (&self.profile_url, &mut raw.profile_url),
            (&self.scope, &mut raw.scope),
            (&self.provider, &mut raw.provider),
        ];
        for (value, target) in overrides {
            if let Some(value) = value {
                *target = value.clone();
            }
        }
    }
}

impl Context {
    /// Load the config file and apply flag/env overrides.
    pub fn raw_config(&self) -> Result<RawConfiguration> {
        let loaded = load_config(self.config_path.as_deref(), None)
            .context("failed to load configuration")?;
        match &loaded.source {
            Some(path) => tracing::debug!(path = %path.display(), "loaded config file"),
            None => tracing::debug!("no config file, using defaults"),
        }

        let mut raw = loaded.config;
        self.settings.apply(&mut raw);
        Ok(raw)
    }

    /// Load, overlay and validate. An invalid configuration is an error
    /// carrying the full multi-line report.
    pub fn validated_config(&self) -> Result<ValidatedConfiguration> {
        let raw = self.raw_config()?;
        Ok(raw.validate()?)
    }
}
