// src/core/models.rs

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::core::error::ScanError;

// --- Inbound / Outbound Relay Models ---

/// Body of a `POST /scan` call. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub url: Option<String>,
}

impl ScanRequest {
    /// Returns the URL to check, or a validation error when it is missing or empty.
    pub fn target(&self) -> Result<&str, ScanError> {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => Ok(url),
            _ => Err(ScanError::Validation),
        }
    }
}

// The JSON object handed back to the client, on success and on failure alike.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub detail: Option<serde_json::Value>,
}

impl ScanResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self { message: message.into(), detail: None }
    }
}

// --- Verdict ---

pub const SAFE_MESSAGE: &str =
    "Safe ✅ — No signs of harmful activity detected. This link appears secure.";
pub const UNSAFE_MESSAGE: &str =
    "Not Safe ❌ — This link has been identified as unsafe. Avoid visiting it.";

/// Outcome of a single scan. Only turned into text at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Safe,
    Unsafe,
}

impl Verdict {
    /// A URL is unsafe as soon as the threat API reports at least one match.
    pub fn from_matches(response: &FindThreatMatchesResponse) -> Self {
        if response.is_flagged() {
            Verdict::Unsafe
        } else {
            Verdict::Safe
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Safe => SAFE_MESSAGE,
            Verdict::Unsafe => UNSAFE_MESSAGE,
        }
    }
}

// --- Threat-Matching API Models ---

// Threat categories submitted with every lookup. All variants are always sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatType {
    Malware,
    SocialEngineering,
    UnwantedSoftware,
    PotentiallyHarmfulApplication,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformType {
    AnyPlatform,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatEntryType {
    Url,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub client_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatEntry {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatInfo {
    pub threat_types: Vec<ThreatType>,
    pub platform_types: Vec<PlatformType>,
    pub threat_entry_types: Vec<ThreatEntryType>,
    pub threat_entries: Vec<ThreatEntry>,
}

/// Body of the outbound `threatMatches:find` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindThreatMatchesRequest {
    pub client: ClientInfo,
    pub threat_info: ThreatInfo,
}

impl FindThreatMatchesRequest {
    /// Builds the fixed lookup policy for a single URL.
    pub fn for_url(url: &str) -> Self {
        Self {
            client: ClientInfo {
                client_id: "linksprobe".to_string(),
                client_version: "1.0".to_string(),
            },
            threat_info: ThreatInfo {
                threat_types: ThreatType::iter().collect(),
                platform_types: vec![PlatformType::AnyPlatform],
                threat_entry_types: vec![ThreatEntryType::Url],
                threat_entries: vec![ThreatEntry { url: url.to_string() }],
            },
        }
    }
}

/// Response of the `threatMatches:find` call. An empty object means "no matches".
///
/// Items are kept as raw JSON: only the length of the list decides the
/// verdict, so an item of any shape still counts as a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindThreatMatchesResponse {
    #[serde(default)]
    pub matches: Option<Vec<serde_json::Value>>,
}

/// Reads a string field of a reported match for logging, `"-"` when the item
/// has no such string field.
pub fn match_field<'a>(item: &'a serde_json::Value, key: &str) -> &'a str {
    item.get(key).and_then(serde_json::Value::as_str).unwrap_or("-")
}

impl FindThreatMatchesResponse {
    pub fn is_flagged(&self) -> bool {
        self.matches.as_ref().is_some_and(|m| !m.is_empty())
    }
}
