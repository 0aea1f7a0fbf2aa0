//! Multi-platform engagement rate calculation.
//!
//! Rates are `interactions / audience * 100`, where both sides depend on the
//! platform and content type:
//!
//! ```text
//! instagram post   likes+comments+shares+saves / followers
//! instagram reel   likes+comments+shares+saves / views
//! youtube video    likes+comments+shares       / views
//! youtube channel  likes+comments+shares       / subscribers
//! twitter, x       likes+comments+shares       / impressions
//! tiktok           likes+comments+shares+saves / views
//! anything else    likes+comments+shares       / followers
//! ```
//!
//! Every denominator is clamped to at least 1, so all functions are total.

pub mod api;
pub mod config;
pub mod engagement;
pub mod error;
pub mod server;

pub use engagement::{
    build_report, calculate_cross_platform_engagement, calculate_engagement_rate,
    get_engagement_quality, ContentType, EngagementMetrics, EngagementQuality, EngagementReport,
    EngagementResult, MetricsInput, Platform, PlatformEntry, QualityBand, QualityClassifier,
};
pub use error::{AppError, AppResult};

/// Groups thousands with commas, e.g. `12,500`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result
}

pub fn format_share(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_count_groups_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12_500_000), "12,500,000");
    }

    #[test]
    fn format_share_is_one_decimal_percent() {
        assert_eq!(format_share(0.6667), "66.7%");
        assert_eq!(format_share(1.0), "100.0%");
    }
}
