//! HTTP adapter for the bulk verification API.
//!
//! Provides a blocking client with connect and request timeouts.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Response};
use reqwest::Url;
use std::time::Duration;

use super::error::{self, VerifyError};
use super::types::{
    error_message, parse_balance_response, parse_create_response, parse_results_response,
    AccountBalance, CreateTaskRequest, CreatedTask, TaskResult,
};
use super::VerificationService;

const CREATE_TASK_PATH: &str = "create-bulk-verification-task/";
const TASK_RESULTS_PATH: &str = "get-result-bulk-verification-task/";
const BALANCE_PATH: &str = "check-account-balance/";

/// Blocking client for the real service
pub struct HttpVerificationClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpVerificationClient {
    /// Build a client. Fails on an unparseable base URL or a TLS setup error.
    pub fn new(
        base_url: &str,
        api_key: String,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        let base_url = format!("{}/", base_url.trim_end_matches('/'));
        Url::parse(&base_url).with_context(|| format!("Invalid API base URL: {base_url}"))?;

        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(concat!("leadsift/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Join `path` onto the base URL. The query string is only added when
    /// there are parameters, so a bare endpoint never ends in `?`.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> error::Result<Url> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|e| VerifyError::InvalidUrl(e.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }
}

/// Return the body of a successful response, or an `Api` error for any other
/// status.
fn read_body(response: Response) -> error::Result<String> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(VerifyError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(body)
}

impl VerificationService for HttpVerificationClient {
    fn check_balance(&self) -> error::Result<AccountBalance> {
        let url = self.endpoint(BALANCE_PATH, &[("key", self.api_key.as_str())])?;
        let body = read_body(self.client.get(url).send()?)?;
        parse_balance_response(&body)
    }

    fn create_task(&self, emails: &[String], name: &str) -> error::Result<CreatedTask> {
        let url = self.endpoint(CREATE_TASK_PATH, &[])?;
        let request = CreateTaskRequest {
            name,
            emails,
            key: &self.api_key,
        };
        tracing::debug!(name, count = emails.len(), "Creating verification task");

        let body = read_body(self.client.post(url).json(&request).send()?)?;
        parse_create_response(&body)
    }

    fn fetch_results(&self, task_id: &str) -> error::Result<TaskResult> {
        let url = self.endpoint(
            TASK_RESULTS_PATH,
            &[("key", self.api_key.as_str()), ("task-id", task_id)],
        )?;
        let body = read_body(self.client.get(url).send()?)?;
        parse_results_response(task_id, &body)
    }
}
