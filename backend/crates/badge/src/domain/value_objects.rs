//! Domain Value Objects
//!
//! Immutable value types for the badge domain.

use crate::error::{BadgeError, BadgeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event kinds used by the badge schema
pub mod kinds {
    /// Deletion request
    pub const DELETION: u32 = 5;
    /// Badge award
    pub const BADGE_AWARD: u32 = 8;
    /// Per-user ordered profile badge list
    pub const PROFILE_BADGES: u32 = 30008;
    /// Badge definition
    pub const BADGE_DEFINITION: u32 = 30009;

    /// Addressable kinds are replaced by `(kind, pubkey, d)`
    pub const fn is_addressable(kind: u32) -> bool {
        kind >= 30000 && kind < 40000
    }
}

/// Fixed `d` value of the profile badge list
pub const PROFILE_BADGES_SLUG: &str = "profile_badges";

/// Difficulty in leading zero bits of an event id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u32);

impl Difficulty {
    pub const ZERO: Difficulty = Difficulty(0);
    /// A 64-character hex id carries at most 256 bits
    pub const MAX: u32 = 256;

    pub fn new(bits: u32) -> Option<Self> {
        (bits <= Self::MAX).then_some(Self(bits))
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn rarity(&self) -> Rarity {
        Rarity::from_difficulty(self.0)
    }
}

impl From<Difficulty> for u32 {
    fn from(d: Difficulty) -> Self {
        d.0
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.0)
    }
}

/// Rarity tier derived from difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Ascending by threshold
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Minimum leading zero bits for this tier
    #[inline]
    pub const fn min_difficulty(&self) -> u32 {
        use Rarity::*;
        match self {
            Common => 0,
            Uncommon => 16,
            Rare => 21,
            Epic => 32,
            Legendary => 64,
        }
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Rarity::*;
        match self {
            Common => "COMMON",
            Uncommon => "UNCOMMON",
            Rare => "RARE",
            Epic => "EPIC",
            Legendary => "LEGENDARY",
        }
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        use Rarity::*;
        match self {
            Common => "Common",
            Uncommon => "Uncommon",
            Rare => "Rare",
            Epic => "Epic",
            Legendary => "Legendary",
        }
    }

    /// Display color (hex RGB)
    #[inline]
    pub const fn color(&self) -> &'static str {
        use Rarity::*;
        match self {
            Common => "#9CA3AF",
            Uncommon => "#10B981",
            Rare => "#3B82F6",
            Epic => "#8B5CF6",
            Legendary => "#F59E0B",
        }
    }

    /// Tier with the largest threshold not above `bits`
    pub fn from_difficulty(bits: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| bits >= tier.min_difficulty())
            .unwrap_or(Rarity::Common)
    }

    /// Case-insensitive lookup by code
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|tier| tier.code().eq_ignore_ascii_case(code.trim()))
    }
}

impl FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::from_code(s).ok_or_else(|| format!("unknown rarity: {}", s))
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Structured form of a `"<kind>:<pubkey>:<slug>"` reference
///
/// Codecs carry addresses as plain strings; this type is for callers that
/// need the parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BadgeAddress {
    pub kind: u32,
    pub pubkey: String,
    pub slug: String,
}

impl BadgeAddress {
    pub fn new(kind: u32, pubkey: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            kind,
            pubkey: pubkey.into(),
            slug: slug.into(),
        }
    }

    /// Address of a badge definition
    pub fn definition(pubkey: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::new(kinds::BADGE_DEFINITION, pubkey, slug)
    }

    /// Split on the first two colons; the slug may itself contain colons
    pub fn parse(s: &str) -> BadgeResult<Self> {
        let mut parts = s.splitn(3, ':');
        let (Some(kind), Some(pubkey), Some(slug)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(BadgeError::InvalidAddress(s.to_string()));
        };
        let kind = kind
            .parse::<u32>()
            .map_err(|_| BadgeError::InvalidAddress(s.to_string()))?;
        if pubkey.is_empty() {
            return Err(BadgeError::InvalidAddress(s.to_string()));
        }
        Ok(Self::new(kind, pubkey, slug))
    }
}

impl FromStr for BadgeAddress {
    type Err = BadgeError;

    fn from_str(s: &str) -> BadgeResult<Self> {
        BadgeAddress::parse(s)
    }
}

impl fmt::Display for BadgeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.pubkey, self.slug)
    }
}

/// Requested rendering size for a badge image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    Xs,
    S,
    M,
    L,
    Xl,
    Full,
}

impl ImageSize {
    /// Thumbnail slots in the order they are written to tags
    pub const THUMBNAIL_SLOTS: [ImageSize; 5] = [
        ImageSize::Xl,
        ImageSize::L,
        ImageSize::M,
        ImageSize::S,
        ImageSize::Xs,
    ];

    pub const fn dimensions(&self) -> &'static str {
        match self {
            ImageSize::Xs => "16x16",
            ImageSize::S => "32x32",
            ImageSize::M => "64x64",
            ImageSize::L => "256x256",
            ImageSize::Xl => "512x512",
            ImageSize::Full => "1024x1024",
        }
    }

    /// Thumbnail slot whose dimensions match exactly
    pub fn slot_for(dimensions: &str) -> Option<Self> {
        Self::THUMBNAIL_SLOTS
            .iter()
            .copied()
            .find(|slot| slot.dimensions() == dimensions)
    }
}
