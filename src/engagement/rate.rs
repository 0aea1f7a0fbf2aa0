use serde::{Deserialize, Serialize};

use crate::engagement::metrics::{Audience, EngagementMetrics};
use crate::engagement::platform::{normalize, ContentType, Formula, Platform};

pub const COMBINED_PLATFORM: &str = "combined";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementResult {
    pub rate: f64,
    pub formatted_rate: String,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
}

impl EngagementResult {
    /// Builds a result from an unrounded percentage. `rate` and
    /// `formatted_rate` always agree on two decimals.
    pub fn new(raw_rate: f64, platform: impl Into<String>, content_type: Option<ContentType>) -> Self {
        let rate = round2(raw_rate);
        Self {
            rate,
            formatted_rate: format_rate(rate),
            platform: platform.into(),
            content_type,
        }
    }

    pub fn zero_combined() -> Self {
        Self::new(0.0, COMBINED_PLATFORM, None)
    }
}

/// Engagement rate for one platform. Never fails: unknown platforms use the
/// followers-based fallback and zero denominators count as 1.
pub fn calculate_engagement_rate(
    platform: &str,
    metrics: &EngagementMetrics,
    content_type: Option<&str>,
) -> EngagementResult {
    let parsed = Platform::parse(platform);
    let formula = Formula::select(&parsed, content_type);
    let numerator = metrics.interactions(formula.numerator) as f64;
    let denominator = metrics.audience(formula.denominator).max(1) as f64;

    EngagementResult::new(
        numerator / denominator * 100.0,
        normalize(platform),
        formula.content_type,
    )
}

/// The denominator the dispatch would use for these inputs, before clamping.
pub fn selected_denominator(
    platform: &str,
    metrics: &EngagementMetrics,
    content_type: Option<&str>,
) -> (Audience, u64) {
    let formula = Formula::select(&Platform::parse(platform), content_type);
    (formula.denominator, metrics.audience(formula.denominator))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_up() {
        assert!((round2(6.666_666) - 6.67).abs() < 1e-9);
        assert!((round2(2.125) - 2.13).abs() < 1e-9);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn format_rate_pads_two_decimals() {
        assert_eq!(format_rate(5.0), "5.00%");
        assert_eq!(format_rate(0.5), "0.50%");
        assert_eq!(format_rate(1234.56), "1234.56%");
    }

    #[test]
    fn selected_denominator_reports_raw_value() {
        let metrics = EngagementMetrics {
            views: 0,
            followers: 50,
            ..EngagementMetrics::default()
        };
        let (audience, value) = selected_denominator("instagram", &metrics, Some("reel"));
        assert_eq!(audience, Audience::Views);
        assert_eq!(value, 0);
    }

    #[test]
    fn result_serializes_camel_case_without_missing_content_type() {
        let result = EngagementResult::new(1.5, "twitter", None);
        let json = serde_json::to_value(&result).expect("serializable");
        assert_eq!(json["formattedRate"], "1.50%");
        assert!(json.get("contentType").is_none());

        let reel = EngagementResult::new(10.0, "instagram", Some(ContentType::Reel));
        let json = serde_json::to_value(&reel).expect("serializable");
        assert_eq!(json["contentType"], "reel");
    }
}
