//! Check command - validate configuration.

use anyhow::{Result, bail};
use clap::Args;
use warden_config::validate;

use super::Context;

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print only violations, nothing on success
    #[arg(short, long)]
    pub quiet: bool,
}

/// Run the check command.
pub fn run(args: CheckArgs, ctx: &Context) -> Result<()> {
    let raw = ctx.raw_config()?;
    let (validated, errors) = validate(&raw);

    if let Some(report) = warden_config::InvalidConfiguration::from_errors(errors) {
        eprintln!("{}", report);
        bail!("{} configuration error(s)", report.errors().len());
    }

    if args.quiet {
        return Ok(());
    }

    println!("configuration OK");
    println!("  provider:   {}", validated.provider());
    println!("  upstreams:");
    for upstream in validated.upstreams() {
        println!("    {}", upstream);
    }
    if !validated.skip_auth_regex().is_empty() {
        println!("  skip-auth:");
        for re in validated.skip_auth_regex() {
            println!("    {}", re.as_str());
        }
    }
    if ctx.verbose {
        if let Some(redirect) = validated.redirect_url() {
            println!("  redirect:   {}", redirect);
        }
        println!("  listen:     {}", validated.http_address());
        println!(
            "  cookie:     expire={}s https_only={} httponly={}",
            validated.cookie_expire().as_secs(),
            validated.cookie_https_only(),
            validated.cookie_http_only()
        );
    }

    Ok(())
}
