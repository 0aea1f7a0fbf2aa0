use serde::{Deserialize, Serialize};

use crate::engagement::metrics::{Audience, Interaction};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Instagram,
    YouTube,
    Twitter,
    TikTok,
    Other(String),
}

impl Platform {
    /// Total parse: anything unrecognised becomes [`Platform::Other`] carrying
    /// the normalized name.
    pub fn parse(value: &str) -> Self {
        let normalized = normalize(value);
        match normalized.as_str() {
            "instagram" => Platform::Instagram,
            "youtube" => Platform::YouTube,
            "twitter" | "x" => Platform::Twitter,
            "tiktok" => Platform::TikTok,
            _ => Platform::Other(normalized),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Platform::Instagram => "instagram",
            Platform::YouTube => "youtube",
            Platform::Twitter => "twitter",
            Platform::TikTok => "tiktok",
            Platform::Other(name) => name.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Platform::Other(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Post,
    Reel,
    Video,
    Channel,
}

impl ContentType {
    pub fn label(self) -> &'static str {
        match self {
            ContentType::Post => "post",
            ContentType::Reel => "reel",
            ContentType::Video => "video",
            ContentType::Channel => "channel",
        }
    }
}

const ALL_INTERACTIONS: &[Interaction] = &[
    Interaction::Likes,
    Interaction::Comments,
    Interaction::Shares,
    Interaction::Saves,
];

const PUBLIC_INTERACTIONS: &[Interaction] =
    &[Interaction::Likes, Interaction::Comments, Interaction::Shares];

/// Numerator and denominator selection for one platform/content-type pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formula {
    pub numerator: &'static [Interaction],
    pub denominator: Audience,
    pub content_type: Option<ContentType>,
}

impl Formula {
    /// Picks the formula for `platform`. Only Instagram and YouTube look at the
    /// content-type hint; unknown hints fall back to each platform's default.
    pub fn select(platform: &Platform, content_type: Option<&str>) -> Self {
        let hint = content_type.map(normalize);
        let hint = hint.as_deref();

        match platform {
            Platform::Instagram => match hint {
                Some("reel") => Formula {
                    numerator: ALL_INTERACTIONS,
                    denominator: Audience::Views,
                    content_type: Some(ContentType::Reel),
                },
                _ => Formula {
                    numerator: ALL_INTERACTIONS,
                    denominator: Audience::Followers,
                    content_type: Some(ContentType::Post),
                },
            },
            Platform::YouTube => match hint {
                Some("channel") => Formula {
                    numerator: PUBLIC_INTERACTIONS,
                    denominator: Audience::Subscribers,
                    content_type: Some(ContentType::Channel),
                },
                _ => Formula {
                    numerator: PUBLIC_INTERACTIONS,
                    denominator: Audience::Views,
                    content_type: Some(ContentType::Video),
                },
            },
            Platform::Twitter => Formula {
                numerator: PUBLIC_INTERACTIONS,
                denominator: Audience::Impressions,
                content_type: None,
            },
            Platform::TikTok => Formula {
                numerator: ALL_INTERACTIONS,
                denominator: Audience::Views,
                content_type: None,
            },
            Platform::Other(_) => Formula {
                numerator: PUBLIC_INTERACTIONS,
                denominator: Audience::Followers,
                content_type: None,
            },
        }
    }
}

pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_aliases_x() {
        assert_eq!(Platform::parse("Instagram"), Platform::Instagram);
        assert_eq!(Platform::parse(" YOUTUBE "), Platform::YouTube);
        assert_eq!(Platform::parse("X"), Platform::Twitter);
        assert_eq!(Platform::parse("TikTok"), Platform::TikTok);
        assert_eq!(
            Platform::parse("Mastodon"),
            Platform::Other("mastodon".to_string())
        );
    }

    #[test]
    fn instagram_defaults_to_post() {
        let formula = Formula::select(&Platform::Instagram, None);
        assert_eq!(formula.content_type, Some(ContentType::Post));
        assert_eq!(formula.denominator, Audience::Followers);

        let story = Formula::select(&Platform::Instagram, Some("story"));
        assert_eq!(story.content_type, Some(ContentType::Post));

        let reel = Formula::select(&Platform::Instagram, Some("Reel"));
        assert_eq!(reel.denominator, Audience::Views);
    }

    #[test]
    fn youtube_channel_uses_subscribers() {
        let formula = Formula::select(&Platform::YouTube, Some("channel"));
        assert_eq!(formula.denominator, Audience::Subscribers);
        assert_eq!(formula.numerator.len(), 3);
    }

    #[test]
    fn single_formula_platforms_ignore_hint() {
        let twitter = Formula::select(&Platform::Twitter, Some("reel"));
        assert_eq!(twitter.content_type, None);
        assert_eq!(twitter.denominator, Audience::Impressions);

        let other = Formula::select(&Platform::Other("bluesky".to_string()), Some("post"));
        assert_eq!(other.content_type, None);
        assert_eq!(other.denominator, Audience::Followers);
    }
}
