// src/core/scanner/safe_browsing.rs

use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::Config;
use crate::core::error::ScanError;
use crate::core::models::{match_field, FindThreatMatchesRequest, FindThreatMatchesResponse, Verdict};

const USER_AGENT: &str = concat!("LinksProbe/", env!("CARGO_PKG_VERSION"));

/// Thin client for the Safe Browsing `threatMatches:find` lookup.
///
/// Holds one pooled `reqwest::Client`; cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct SafeBrowsingClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl SafeBrowsingClient {
    /// Builds the client from the loaded configuration.
    ///
    /// The outbound timeout comes from `Config::upstream_timeout`, so a stalled
    /// threat API surfaces as `ScanError::UpstreamUnavailable` instead of hanging
    /// the request.
    pub fn new(config: &Config) -> Result<Self, ScanError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| {
                error!(error = %e, "Failed to build HTTP client for threat lookups.");
                ScanError::Internal(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            endpoint: config.gsb_endpoint.clone(),
            api_key: config.gsb_api_key.clone(),
        })
    }

    /// Checks one URL against the threat lists.
    ///
    /// Exactly one outbound request is made; there are no retries. A non-2xx
    /// answer becomes `ScanError::Upstream` carrying whatever body the API sent.
    ///
    /// # Arguments
    /// * `url` - The URL submitted by the client, forwarded as-is.
    ///
    /// # Returns
    /// `Verdict::Unsafe` when the API reports at least one match, `Verdict::Safe`
    /// otherwise, or a `ScanError` when the lookup could not be completed.
    pub async fn scan(&self, url: &str) -> Result<Verdict, ScanError> {
        let response = self.find_threat_matches(url).await?;

        if let Some(matches) = &response.matches {
            for m in matches {
                debug!(
                    threat_type = match_field(m, "threatType"),
                    platform_type = match_field(m, "platformType"),
                    "Threat match reported."
                );
            }
        }

        let verdict = Verdict::from_matches(&response);
        info!(url, ?verdict, "Verdict determined.");
        Ok(verdict)
    }

    async fn find_threat_matches(&self, url: &str) -> Result<FindThreatMatchesResponse, ScanError> {
        let body = FindThreatMatchesRequest::for_url(url);

        info!(url, "Sending lookup to threat API.");
        let response = self
            .http
            .post(self.endpoint.clone())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "No response from threat API.");
                ScanError::from(e)
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(%status, error = %e, "Failed to read threat API response body.");
            ScanError::from(e)
        })?;

        if !status.is_success() {
            warn!(%status, body = %text, "Threat API returned an error.");
            return Err(ScanError::upstream(status, &text));
        }

        debug!(%status, body = %text, "Raw threat API response.");

        // An empty body reads as `{}`.
        if text.trim().is_empty() {
            return Ok(FindThreatMatchesResponse::default());
        }

        serde_json::from_str(&text).map_err(|e| {
            error!(error = %e, "Threat API response was not valid JSON.");
            ScanError::Internal(format!("Unreadable threat API response: {}", e))
        })
    }
}
