use serde::{Deserialize, Serialize};
use std::fmt;

/// Glyph shown on a card when the catalog entry has no icon.
pub const DEFAULT_ICON: &str = "\u{221e}";

fn is_trimmable(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Trims the same characters a browser's `String.prototype.trim` does:
/// Unicode whitespace and line terminators plus the byte order mark, but
/// not NEL.
pub fn trim_text(raw: &str) -> &str {
    raw.trim_matches(is_trimmable)
}

/// One catalog entry: a linkable destination plus its display metadata.
///
/// Instances only come out of catalog normalization, which guarantees that
/// `key`, `name` and `direct_url` are non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDescriptor {
    pub key: String,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_label: String,
    #[serde(default)]
    pub phone_param: bool,
    pub direct_url: String,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_owned()
}

impl ModuleDescriptor {
    pub fn has_required_fields(&self) -> bool {
        !self.key.is_empty() && !self.name.is_empty() && !self.direct_url.is_empty()
    }
}

/// The `{slug, phone}` pair used when a link is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IdentityContext {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub phone: String,
}

impl IdentityContext {
    pub fn new(slug: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            phone: phone.into(),
        }
    }
}

pub const STATUS_ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(String),
}

impl StatusFilter {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | STATUS_ALL => StatusFilter::All,
            other => StatusFilter::Only(other.to_owned()),
        }
    }

    pub fn matches(&self, status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => expected == status,
        }
    }
}

impl From<&str> for StatusFilter {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str(STATUS_ALL),
            StatusFilter::Only(status) => f.write_str(status),
        }
    }
}

/// What a card can do when activated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Open,
    Copy,
}

impl CardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CardAction::Open => "open",
            CardAction::Copy => "copy",
        }
    }

    /// Reads a `data-action` attribute value.
    pub fn from_attr(raw: &str) -> Option<Self> {
        match raw {
            "open" => Some(CardAction::Open),
            "copy" => Some(CardAction::Copy),
            _ => None,
        }
    }
}
