use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engagement::{
    selected_denominator, EngagementResult, MetricsInput, Platform, PlatformEntry, QualityBand,
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    pub platform: Option<String>,
    #[serde(default, alias = "content_type")]
    pub content_type: Option<String>,
    #[serde(default)]
    pub metrics: MetricsInput,
}

impl EntryInput {
    pub fn into_entry(self) -> AppResult<PlatformEntry> {
        let platform = self.platform.unwrap_or_default().trim().to_string();
        if platform.is_empty() {
            return Err(AppError::InvalidInput("platform is required".to_string()));
        }

        let mut entry = PlatformEntry::new(platform, self.metrics.into_metrics());
        if let Some(content_type) = self.content_type {
            if !content_type.trim().is_empty() {
                entry = entry.with_content_type(content_type);
            }
        }
        Ok(entry)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CombinedRequest {
    #[serde(default)]
    pub entries: Vec<EntryInput>,
}

impl CombinedRequest {
    pub fn into_entries(self) -> AppResult<Vec<PlatformEntry>> {
        self.entries
            .into_iter()
            .map(EntryInput::into_entry)
            .collect()
    }
}

/// Accepts either a bare JSON array of entries or `{"entries": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EntriesPayload {
    List(Vec<EntryInput>),
    Wrapped(CombinedRequest),
}

pub fn parse_entries(payload: &str) -> AppResult<Vec<PlatformEntry>> {
    let request = match serde_json::from_str::<EntriesPayload>(payload)? {
        EntriesPayload::List(entries) => CombinedRequest { entries },
        EntriesPayload::Wrapped(request) => request,
    };
    request.into_entries()
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualityRequest {
    pub rate: f64,
    pub platform: Option<String>,
}

impl QualityRequest {
    pub fn validated(self) -> AppResult<(f64, String)> {
        let platform = self.platform.unwrap_or_default().trim().to_string();
        if platform.is_empty() {
            return Err(AppError::InvalidInput("platform is required".to_string()));
        }
        if !self.rate.is_finite() {
            return Err(AppError::InvalidInput(format!("rate must be finite: {}", self.rate)));
        }
        Ok((self.rate, platform))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RateResponse {
    #[serde(flatten)]
    pub result: EngagementResult,
    pub quality: QualityBand,
    pub description: &'static str,
}

/// Logs inputs that produce a defined but misleading rate. The rate itself is
/// left untouched.
pub fn log_data_quality(entry: &PlatformEntry) {
    let platform = Platform::parse(&entry.platform);
    if !platform.is_recognized() {
        warn!(
            platform = platform.label(),
            "unrecognized platform, using followers-based fallback formula"
        );
    }

    let (audience, value) =
        selected_denominator(&entry.platform, &entry.metrics, entry.content_type.as_deref());
    if value == 0 {
        warn!(
            platform = platform.label(),
            denominator = audience.label(),
            "denominator is zero, rate computed against 1"
        );
    }
}
