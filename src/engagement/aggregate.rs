use serde::Serialize;

use crate::engagement::metrics::EngagementMetrics;
use crate::engagement::quality::{EngagementQuality, QualityClassifier};
use crate::engagement::rate::{calculate_engagement_rate, EngagementResult, COMBINED_PLATFORM};

/// One platform's counts inside a cross-platform aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformEntry {
    pub platform: String,
    pub metrics: EngagementMetrics,
    pub content_type: Option<String>,
}

impl PlatformEntry {
    pub fn new(platform: impl Into<String>, metrics: EngagementMetrics) -> Self {
        Self {
            platform: platform.into(),
            metrics,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn result(&self) -> EngagementResult {
        calculate_engagement_rate(&self.platform, &self.metrics, self.content_type.as_deref())
    }

    pub fn weight(&self) -> f64 {
        self.metrics.audience_weight() as f64
    }
}

/// Audience-weighted mean of the per-entry rates. Empty input yields a zero
/// `combined` result.
pub fn calculate_cross_platform_engagement(entries: &[PlatformEntry]) -> EngagementResult {
    let weighted: Vec<(EngagementResult, f64)> = entries
        .iter()
        .map(|entry| (entry.result(), entry.weight()))
        .collect();
    combine(&weighted)
}

fn combine(weighted: &[(EngagementResult, f64)]) -> EngagementResult {
    if weighted.is_empty() {
        return EngagementResult::zero_combined();
    }

    let total_weight: f64 = weighted.iter().map(|(_, weight)| weight).sum();
    let weighted_sum: f64 = weighted
        .iter()
        .map(|(result, weight)| result.rate * weight)
        .sum();

    EngagementResult::new(weighted_sum / total_weight, COMBINED_PLATFORM, None)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBreakdown {
    pub result: EngagementResult,
    pub quality: EngagementQuality,
    pub weight: f64,
    pub weight_share: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementReport {
    pub combined: EngagementResult,
    pub combined_quality: EngagementQuality,
    pub entries: Vec<EntryBreakdown>,
}

/// Combined rate plus a per-entry breakdown, in input order.
pub fn build_report(entries: &[PlatformEntry], classifier: &QualityClassifier) -> EngagementReport {
    let weighted: Vec<(EngagementResult, f64)> = entries
        .iter()
        .map(|entry| (entry.result(), entry.weight()))
        .collect();
    let combined = combine(&weighted);
    let total_weight: f64 = weighted.iter().map(|(_, weight)| weight).sum();

    let breakdown = weighted
        .into_iter()
        .map(|(result, weight)| EntryBreakdown {
            quality: classifier.classify(result.rate, &result.platform),
            result,
            weight,
            weight_share: weight / total_weight,
        })
        .collect();

    EngagementReport {
        combined_quality: classifier.classify(combined.rate, &combined.platform),
        combined,
        entries: breakdown,
    }
}
