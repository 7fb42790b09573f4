//! Platform preset catalog.
//!
//! A static table of export targets. Entries are looked up by
//! [`PlatformId`] (or its snake_case string form) and grouped by
//! [`PlatformCategory`]. There is no runtime registration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::format::ExportFormat;

/// Identifier of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformId {
    /// YouTube video thumbnail.
    YoutubeThumbnail,
    /// YouTube channel banner.
    YoutubeBanner,
    /// Twitch chat emote.
    TwitchEmote,
    /// Twitch subscriber badge.
    TwitchBadge,
    /// Twitch channel panel.
    TwitchPanel,
    /// Twitch offline screen.
    TwitchOffline,
    /// Instagram square post.
    InstagramPost,
    /// Instagram story.
    InstagramStory,
    /// TikTok cover.
    TiktokCover,
    /// Discord server banner.
    DiscordBanner,
    /// Discord custom emoji.
    DiscordEmoji,
    /// Free-form export.
    Custom,
}

impl PlatformId {
    /// Every platform, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::YoutubeThumbnail,
        Self::YoutubeBanner,
        Self::TwitchEmote,
        Self::TwitchBadge,
        Self::TwitchPanel,
        Self::TwitchOffline,
        Self::InstagramPost,
        Self::InstagramStory,
        Self::TiktokCover,
        Self::DiscordBanner,
        Self::DiscordEmoji,
        Self::Custom,
    ];

    /// Catalog key, e.g. `twitch_emote`.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::YoutubeThumbnail => "youtube_thumbnail",
            Self::YoutubeBanner => "youtube_banner",
            Self::TwitchEmote => "twitch_emote",
            Self::TwitchBadge => "twitch_badge",
            Self::TwitchPanel => "twitch_panel",
            Self::TwitchOffline => "twitch_offline",
            Self::InstagramPost => "instagram_post",
            Self::InstagramStory => "instagram_story",
            Self::TiktokCover => "tiktok_cover",
            Self::DiscordBanner => "discord_banner",
            Self::DiscordEmoji => "discord_emoji",
            Self::Custom => "custom",
        }
    }

    /// Filename slug, e.g. `twitch-emote`.
    #[must_use]
    pub fn slug(self) -> String {
        self.id().replace('_', "-")
    }

    /// Category the platform is listed under.
    #[must_use]
    pub const fn category(self) -> PlatformCategory {
        match self {
            Self::YoutubeThumbnail | Self::YoutubeBanner => PlatformCategory::Youtube,
            Self::TwitchEmote | Self::TwitchBadge | Self::TwitchPanel | Self::TwitchOffline => {
                PlatformCategory::Twitch
            }
            Self::InstagramPost | Self::InstagramStory => PlatformCategory::Instagram,
            Self::TiktokCover => PlatformCategory::Tiktok,
            Self::DiscordBanner | Self::DiscordEmoji => PlatformCategory::Discord,
            Self::Custom => PlatformCategory::Custom,
        }
    }
}

impl std::fmt::Display for PlatformId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PlatformId {
    type Err = ExportError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.id() == id)
            .ok_or_else(|| ExportError::UnknownPlatform(id.to_string()))
    }
}

/// Platform family used to group the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformCategory {
    /// YouTube.
    Youtube,
    /// Twitch.
    Twitch,
    /// Instagram.
    Instagram,
    /// TikTok.
    Tiktok,
    /// Discord.
    Discord,
    /// Anything else.
    Custom,
}

impl PlatformCategory {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Youtube => "youtube",
            Self::Twitch => "twitch",
            Self::Instagram => "instagram",
            Self::Tiktok => "tiktok",
            Self::Discord => "discord",
            Self::Custom => "custom",
        }
    }
}

impl FromStr for PlatformCategory {
    type Err = ExportError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_lowercase().as_str() {
            "youtube" => Ok(Self::Youtube),
            "twitch" => Ok(Self::Twitch),
            "instagram" => Ok(Self::Instagram),
            "tiktok" => Ok(Self::Tiktok),
            "discord" => Ok(Self::Discord),
            "custom" => Ok(Self::Custom),
            other => Err(ExportError::UnknownPlatform(format!(
                "unknown category '{other}'"
            ))),
        }
    }
}

/// An extra fixed-size rendition a platform asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeVariant {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Display label, e.g. `112×112`.
    pub label: &'static str,
}

impl SizeVariant {
    /// A `side` x `side` variant.
    #[must_use]
    pub const fn square(side: u32, label: &'static str) -> Self {
        Self {
            width: side,
            height: side,
            label,
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExportPreset {
    /// Platform key.
    pub id: PlatformId,
    /// Human-readable name.
    pub name: &'static str,
    /// Short description for pickers.
    pub description: &'static str,
    /// Icon tag for UIs.
    pub icon: &'static str,
    /// Output format.
    pub format: ExportFormat,
    /// Encoder quality, 0-100.
    pub quality: u8,
    /// Recommended width in pixels.
    pub width: u32,
    /// Recommended height in pixels.
    pub height: u32,
    /// Upload limit in KB, if the platform has one.
    pub max_file_size_kb: Option<u64>,
    /// Whether the platform keeps transparency.
    pub supports_transparency: bool,
    /// Additional renditions. Empty for most platforms.
    pub variants: &'static [SizeVariant],
}

impl ExportPreset {
    /// Upload limit in bytes.
    #[must_use]
    pub fn max_file_size_bytes(&self) -> Option<u64> {
        self.max_file_size_kb.map(|kb| kb * 1024)
    }

    /// Category of the platform.
    #[must_use]
    pub const fn category(&self) -> PlatformCategory {
        self.id.category()
    }

    /// Whether `width` x `height` is the recommended size or one of the variants.
    #[must_use]
    pub fn matches_dimensions(&self, width: u32, height: u32) -> bool {
        (self.width == width && self.height == height)
            || self
                .variants
                .iter()
                .any(|v| v.width == width && v.height == height)
    }
}

const TWITCH_EMOTE_VARIANTS: &[SizeVariant] = &[
    SizeVariant::square(112, "112×112"),
    SizeVariant::square(56, "56×56"),
    SizeVariant::square(28, "28×28"),
];

const TWITCH_BADGE_VARIANTS: &[SizeVariant] = &[
    SizeVariant::square(72, "72×72"),
    SizeVariant::square(36, "36×36"),
    SizeVariant::square(18, "18×18"),
];

/// The catalog, indexed by `PlatformId as usize`.
pub static PRESETS: [ExportPreset; 12] = [
    ExportPreset {
        id: PlatformId::YoutubeThumbnail,
        name: "YouTube Thumbnail",
        description: "Video thumbnail, 16:9",
        icon: "youtube",
        format: ExportFormat::Jpg,
        quality: 90,
        width: 1280,
        height: 720,
        max_file_size_kb: Some(2048),
        supports_transparency: false,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::YoutubeBanner,
        name: "YouTube Banner",
        description: "Channel art, safe area centred",
        icon: "youtube",
        format: ExportFormat::Jpg,
        quality: 90,
        width: 2560,
        height: 1440,
        max_file_size_kb: Some(6144),
        supports_transparency: false,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::TwitchEmote,
        name: "Twitch Emote",
        description: "Chat emote at all three sizes",
        icon: "twitch",
        format: ExportFormat::Png,
        quality: 100,
        width: 112,
        height: 112,
        max_file_size_kb: Some(1024),
        supports_transparency: true,
        variants: TWITCH_EMOTE_VARIANTS,
    },
    ExportPreset {
        id: PlatformId::TwitchBadge,
        name: "Twitch Badge",
        description: "Subscriber badge at all three sizes",
        icon: "twitch",
        format: ExportFormat::Png,
        quality: 100,
        width: 72,
        height: 72,
        max_file_size_kb: Some(25),
        supports_transparency: true,
        variants: TWITCH_BADGE_VARIANTS,
    },
    ExportPreset {
        id: PlatformId::TwitchPanel,
        name: "Twitch Panel",
        description: "About-section panel",
        icon: "twitch",
        format: ExportFormat::Png,
        quality: 100,
        width: 320,
        height: 160,
        max_file_size_kb: Some(2048),
        supports_transparency: true,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::TwitchOffline,
        name: "Twitch Offline Screen",
        description: "Shown while the channel is offline",
        icon: "twitch",
        format: ExportFormat::Jpg,
        quality: 90,
        width: 1920,
        height: 1080,
        max_file_size_kb: Some(10240),
        supports_transparency: false,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::InstagramPost,
        name: "Instagram Post",
        description: "Square feed post",
        icon: "instagram",
        format: ExportFormat::Jpg,
        quality: 95,
        width: 1080,
        height: 1080,
        max_file_size_kb: Some(8192),
        supports_transparency: false,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::InstagramStory,
        name: "Instagram Story",
        description: "Full-screen vertical story",
        icon: "instagram",
        format: ExportFormat::Jpg,
        quality: 95,
        width: 1080,
        height: 1920,
        max_file_size_kb: Some(8192),
        supports_transparency: false,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::TiktokCover,
        name: "TikTok Cover",
        description: "Vertical video cover",
        icon: "tiktok",
        format: ExportFormat::Jpg,
        quality: 90,
        width: 1080,
        height: 1920,
        max_file_size_kb: None,
        supports_transparency: false,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::DiscordBanner,
        name: "Discord Banner",
        description: "Server banner",
        icon: "discord",
        format: ExportFormat::Png,
        quality: 100,
        width: 960,
        height: 540,
        max_file_size_kb: Some(10240),
        supports_transparency: false,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::DiscordEmoji,
        name: "Discord Emoji",
        description: "Custom server emoji",
        icon: "discord",
        format: ExportFormat::Png,
        quality: 100,
        width: 128,
        height: 128,
        max_file_size_kb: Some(256),
        supports_transparency: true,
        variants: &[],
    },
    ExportPreset {
        id: PlatformId::Custom,
        name: "Custom",
        description: "Full HD, lossless",
        icon: "image",
        format: ExportFormat::Png,
        quality: 100,
        width: 1920,
        height: 1080,
        max_file_size_kb: None,
        supports_transparency: true,
        variants: &[],
    },
];

/// Catalog entry for a platform.
#[must_use]
pub fn preset(id: PlatformId) -> &'static ExportPreset {
    &PRESETS[id as usize]
}

/// Catalog entry by string key; `None` for unknown ids.
#[must_use]
pub fn find_preset(id: &str) -> Option<&'static ExportPreset> {
    id.parse::<PlatformId>().ok().map(preset)
}

/// Entries in one category, in catalog order.
pub fn presets_by_category(
    category: PlatformCategory,
) -> impl Iterator<Item = &'static ExportPreset> {
    PRESETS.iter().filter(move |p| p.category() == category)
}

/// The whole catalog.
#[must_use]
pub fn all_presets() -> &'static [ExportPreset] {
    &PRESETS
}
