use serde::{Deserialize, Serialize};

/// Raw interaction counts for one piece of content or one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementMetrics {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub saves: u64,
    pub views: u64,
    pub followers: u64,
    pub subscribers: u64,
    pub impressions: u64,
}

/// Partial counts as supplied by callers. Absent fields count as zero once
/// converted with [`MetricsInput::into_metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsInput {
    pub likes: Option<u64>,
    pub comments: Option<u64>,
    pub shares: Option<u64>,
    pub saves: Option<u64>,
    pub views: Option<u64>,
    pub followers: Option<u64>,
    pub subscribers: Option<u64>,
    pub impressions: Option<u64>,
}

impl MetricsInput {
    pub fn into_metrics(self) -> EngagementMetrics {
        EngagementMetrics {
            likes: self.likes.unwrap_or(0),
            comments: self.comments.unwrap_or(0),
            shares: self.shares.unwrap_or(0),
            saves: self.saves.unwrap_or(0),
            views: self.views.unwrap_or(0),
            followers: self.followers.unwrap_or(0),
            subscribers: self.subscribers.unwrap_or(0),
            impressions: self.impressions.unwrap_or(0),
        }
    }
}

impl From<MetricsInput> for EngagementMetrics {
    fn from(input: MetricsInput) -> Self {
        input.into_metrics()
    }
}

/// Interaction counts that can appear in a formula numerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Likes,
    Comments,
    Shares,
    Saves,
}

/// Audience counts that can act as a formula denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    Followers,
    Views,
    Subscribers,
    Impressions,
}

impl Audience {
    pub fn label(self) -> &'static str {
        match self {
            Audience::Followers => "followers",
            Audience::Views => "views",
            Audience::Subscribers => "subscribers",
            Audience::Impressions => "impressions",
        }
    }
}

impl EngagementMetrics {
    pub fn interaction(&self, kind: Interaction) -> u64 {
        match kind {
            Interaction::Likes => self.likes,
            Interaction::Comments => self.comments,
            Interaction::Shares => self.shares,
            Interaction::Saves => self.saves,
        }
    }

    pub fn audience(&self, kind: Audience) -> u64 {
        match kind {
            Audience::Followers => self.followers,
            Audience::Views => self.views,
            Audience::Subscribers => self.subscribers,
            Audience::Impressions => self.impressions,
        }
    }

    /// Sum of the given interaction counts. Saturates rather than wrapping.
    pub fn interactions(&self, kinds: &[Interaction]) -> u64 {
        kinds
            .iter()
            .fold(0u64, |total, kind| total.saturating_add(self.interaction(*kind)))
    }

    /// Audience size used to weight this record in a cross-platform aggregate.
    pub fn audience_weight(&self) -> u64 {
        self.followers.max(self.subscribers).max(self.views).max(1)
    }
}
