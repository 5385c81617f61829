//! Enumerations shared by the dashboard's records and forms.
//!
//! All enums serialize in lowercase, matching the values stored under the
//! persistence keys and the values posted by HTML forms.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl UnknownVariant {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// E-commerce platform a connected shop is hosted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EcPlatform {
    #[default]
    Shopify,
    Base,
    Stores,
    Makeshop,
    Other,
}

impl EcPlatform {
    /// Every platform, in the order the settings form lists them.
    pub const ALL: [Self; 5] = [
        Self::Shopify,
        Self::Base,
        Self::Stores,
        Self::Makeshop,
        Self::Other,
    ];

    /// Stored value, e.g. `"makeshop"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shopify => "shopify",
            Self::Base => "base",
            Self::Stores => "stores",
            Self::Makeshop => "makeshop",
            Self::Other => "other",
        }
    }

    /// Human-readable label shown in badges and the platform select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Shopify => "Shopify",
            Self::Base => "BASE",
            Self::Stores => "STORES",
            Self::Makeshop => "MakeShop",
            Self::Other => "その他",
        }
    }
}

impl fmt::Display for EcPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EcPlatform {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant::new("platform", s))
    }
}

/// Kind of generated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Image,
    Video,
}

impl ContentType {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// Label used on content cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "画像",
            Self::Video => "動画",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            other => Err(UnknownVariant::new("content type", other)),
        }
    }
}

/// Social network a piece of content targets. Only Instagram for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    #[default]
    Instagram,
}

impl SocialPlatform {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for SocialPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the product image for a generation request was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputMethod {
    #[default]
    Upload,
    Url,
}

impl InputMethod {
    /// Stored value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "upload",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for InputMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputMethod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upload" => Ok(Self::Upload),
            "url" => Ok(Self::Url),
            other => Err(UnknownVariant::new("input method", other)),
        }
    }
}
