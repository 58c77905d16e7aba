//! Provider command - show the resolved identity provider.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use warden_oauth::new_provider;

use super::Context;

/// Arguments for the provider command.
#[derive(Args, Debug)]
pub struct ProviderArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ProviderSummary {
    name: &'static str,
    login_url: String,
    redeem_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_url: Option<String>,
    scope: String,
}

/// Run the provider command.
pub fn run(args: ProviderArgs, ctx: &Context) -> Result<()> {
    let cfg = ctx.validated_config()?;
    let provider = new_provider(&cfg)?;

    let summary = ProviderSummary {
        name: provider.name(),
        login_url: provider.login_url(),
        redeem_url: provider.redeem_url(),
        profile_url: provider.profile_url(),
        scope: provider.scope(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("provider:    {}", summary.name);
    println!("login url:   {}", summary.login_url);
    println!("redeem url:  {}", summary.redeem_url);
    if let Some(profile_url) = &summary.profile_url {
        println!("profile url: {}", profile_url);
    }
    println!("scope:       {}", summary.scope);
    Ok(())
}
