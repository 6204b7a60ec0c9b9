use anyhow::Result;
use colored::Colorize;

use super::http_client;
use crate::client::VerificationService;
use crate::config::Settings;

/// Show remaining credits. A failed lookup is reported, not treated as an error.
pub fn execute(settings: &Settings, api_key: Option<&str>) -> Result<()> {
    let client = http_client(settings, api_key)?;

    match client.check_balance() {
        Ok(balance) => {
            println!("{}", "Account balance".bold());
            println!("  Daily credits:   {}", balance.daily_credits);
            println!("  Instant credits: {}", balance.instant_credits);
        }
        Err(e) => {
            println!("{} balance unavailable: {e}", "⚠".yellow());
        }
    }
    Ok(())
}
