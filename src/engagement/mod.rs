pub mod aggregate;
pub mod metrics;
pub mod platform;
pub mod quality;
pub mod rate;

pub use aggregate::{
    build_report, calculate_cross_platform_engagement, EngagementReport, EntryBreakdown,
    PlatformEntry,
};
pub use metrics::{Audience, EngagementMetrics, Interaction, MetricsInput};
pub use platform::{ContentType, Formula, Platform};
pub use quality::{
    get_engagement_quality, Benchmark, BenchmarkTable, EngagementQuality, QualityBand,
    QualityClassifier,
};
pub use rate::{
    calculate_engagement_rate, format_rate, round2, selected_denominator, EngagementResult,
    COMBINED_PLATFORM,
};
