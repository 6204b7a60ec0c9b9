pub mod balance;
pub mod checkpoint;
pub mod run;
pub mod status;

use anyhow::Result;

use crate::client::HttpVerificationClient;
use crate::config::{require_api_key, Settings};

/// Build the HTTP client, failing before any network traffic when the key is
/// missing.
pub(crate) fn http_client(settings: &Settings, api_key: Option<&str>) -> Result<HttpVerificationClient> {
    let api_key = require_api_key(api_key)?;
    HttpVerificationClient::new(
        &settings.api_base_url,
        api_key,
        settings.connect_timeout(),
        settings.request_timeout(),
    )
}
