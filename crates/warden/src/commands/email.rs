//! Email command - resolve an identity from a saved token-exchange result.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use serde_json::Value;
use warden_oauth::new_provider;

use super::Context;

/// Arguments for the email command.
#[derive(Args, Debug)]
pub struct EmailArgs {
    /// JSON file holding the token endpoint response
    #[arg(long)]
    pub auth_result: PathBuf,

    /// Access token (defaults to the response's `access_token` field)
    #[arg(long, env = "WARDEN_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}

/// Run the email command.
pub fn run(args: EmailArgs, ctx: &Context) -> Result<()> {
    let cfg = ctx.validated_config()?;
    let provider = new_provider(&cfg)?;

    let contents = std::fs::read_to_string(&args.auth_result)
        .with_context(|| format!("failed to read {}", args.auth_result.display()))?;
    let auth_result: Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", args.auth_result.display()))?;

    let access_token = args
        .access_token
        .or_else(|| {
            auth_result
                .get("access_token")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_default();

    let email = provider
        .email_address(&auth_result, &access_token)
        .with_context(|| format!("{} provider could not resolve an email", provider.name()))?;

    println!("{}", email);
    Ok(())
}
