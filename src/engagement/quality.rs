use serde::{Deserialize, Serialize};

use crate::engagement::platform::Platform;

/// Lower bounds (inclusive, in percent) for the top three bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub excellent: f64,
    pub good: f64,
    pub average: f64,
}

impl Benchmark {
    pub const fn new(excellent: f64, good: f64, average: f64) -> Self {
        Self {
            excellent,
            good,
            average,
        }
    }

    pub fn band(&self, rate: f64) -> QualityBand {
        if rate >= self.excellent {
            QualityBand::Excellent
        } else if rate >= self.good {
            QualityBand::Good
        } else if rate >= self.average {
            QualityBand::Average
        } else {
            QualityBand::Poor
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkTable {
    pub instagram: Benchmark,
    pub youtube: Benchmark,
    pub twitter: Benchmark,
    pub tiktok: Benchmark,
}

impl Default for BenchmarkTable {
    fn default() -> Self {
        Self {
            instagram: Benchmark::new(6.0, 3.0, 1.0),
            youtube: Benchmark::new(10.0, 5.0, 2.0),
            twitter: Benchmark::new(3.0, 1.5, 0.5),
            tiktok: Benchmark::new(10.0, 5.0, 2.0),
        }
    }
}

impl BenchmarkTable {
    /// Unknown platforms are judged against Instagram's row.
    pub fn for_platform(&self, platform: &Platform) -> &Benchmark {
        match platform {
            Platform::Instagram | Platform::Other(_) => &self.instagram,
            Platform::YouTube => &self.youtube,
            Platform::Twitter => &self.twitter,
            Platform::TikTok => &self.tiktok,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl QualityBand {
    pub fn label(self) -> &'static str {
        match self {
            QualityBand::Excellent => "excellent",
            QualityBand::Good => "good",
            QualityBand::Average => "average",
            QualityBand::Poor => "poor",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            QualityBand::Excellent => "Excellent engagement, well above the platform benchmark",
            QualityBand::Good => "Good engagement, above the platform average",
            QualityBand::Average => "Average engagement for this platform",
            QualityBand::Poor => "Below average engagement, consider adjusting content strategy",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngagementQuality {
    pub quality: QualityBand,
    pub description: &'static str,
}

impl From<QualityBand> for EngagementQuality {
    fn from(quality: QualityBand) -> Self {
        Self {
            quality,
            description: quality.description(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QualityClassifier {
    benchmarks: BenchmarkTable,
}

impl QualityClassifier {
    pub fn new(benchmarks: BenchmarkTable) -> Self {
        Self { benchmarks }
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    pub fn classify(&self, rate: f64, platform: &str) -> EngagementQuality {
        let platform = Platform::parse(platform);
        self.benchmarks.for_platform(&platform).band(rate).into()
    }
}

/// Classifies `rate` against the built-in benchmark table.
pub fn get_engagement_quality(rate: f64, platform: &str) -> EngagementQuality {
    let platform = Platform::parse(platform);
    BenchmarkTable::default()
        .for_platform(&platform)
        .band(rate)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_thresholds_are_inclusive() {
        let bench = Benchmark::new(10.0, 5.0, 2.0);
        assert_eq!(bench.band(10.0), QualityBand::Excellent);
        assert_eq!(bench.band(5.0), QualityBand::Good);
        assert_eq!(bench.band(2.0), QualityBand::Average);
        assert_eq!(bench.band(1.99), QualityBand::Poor);
    }

    #[test]
    fn x_alias_uses_twitter_row() {
        assert_eq!(get_engagement_quality(3.0, "x").quality, QualityBand::Excellent);
        assert_eq!(get_engagement_quality(0.4, "X").quality, QualityBand::Poor);
    }

    #[test]
    fn custom_table_changes_classification() {
        let mut table = BenchmarkTable::default();
        table.instagram = Benchmark::new(20.0, 10.0, 5.0);
        let classifier = QualityClassifier::new(table);
        assert_eq!(classifier.classify(6.0, "instagram").quality, QualityBand::Average);
        assert_eq!(classifier.classify(6.0, "combined").quality, QualityBand::Average);
    }

    #[test]
    fn quality_serializes_lowercase_band() {
        let json = serde_json::to_value(get_engagement_quality(12.0, "tiktok")).expect("serializable");
        assert_eq!(json["quality"], "excellent");
        assert_eq!(json["description"], QualityBand::Excellent.description());
    }
}
