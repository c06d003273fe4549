// src/core/scanner/mod.rs

// Public interface of the `scanner` module: the threat-API client and the
// entry point used by the HTTP layer.
pub mod safe_browsing;

use tracing::info;

use crate::core::error::ScanError;
use crate::core::models::{ScanRequest, Verdict};
pub use self::safe_browsing::SafeBrowsingClient;

/// Validates an inbound request and relays it to the threat API.
///
/// A missing or empty URL fails with `ScanError::Validation` before any
/// outbound call is made.
///
/// # Arguments
/// * `client` - The shared threat-API client from the application state.
/// * `request` - The decoded body of the `POST /scan` call.
///
/// # Returns
/// The `Verdict` for the requested URL, or the `ScanError` to report to the client.
pub async fn run_scan(client: &SafeBrowsingClient, request: &ScanRequest) -> Result<Verdict, ScanError> {
    info!(url = ?request.url, "Scan requested.");
    let target = request.target()?;
    client.scan(target).await
}
