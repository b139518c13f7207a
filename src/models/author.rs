//! Author model

use serde::{Deserialize, Serialize};

/// Name used when a post has no author relation
pub const UNKNOWN_AUTHOR_NAME: &str = "Unknown Author";

/// Author entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Avatar image URL (placeholder when the profile has none)
    pub avatar_url: String,
    /// Short biography
    pub bio: String,
    /// Personal website
    pub website: Option<String>,
    /// Derived role
    pub role: AuthorRole,
    /// Social handles
    #[serde(default)]
    pub social: SocialLinks,
}

impl Author {
    /// Placeholder author with the given avatar
    pub fn unknown(avatar_url: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: UNKNOWN_AUTHOR_NAME.to_string(),
            avatar_url: avatar_url.into(),
            bio: String::new(),
            website: None,
            role: AuthorRole::Contributor,
            social: SocialLinks::default(),
        }
    }
}

/// Author role, derived from the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthorRole {
    /// Profile has a personal website
    Writer,
    #[default]
    Contributor,
}

impl AuthorRole {
    /// Derive the role from an optional website
    pub fn from_website(website: Option<&str>) -> Self {
        match website {
            Some(site) if !site.trim().is_empty() => AuthorRole::Writer,
            _ => AuthorRole::Contributor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorRole::Writer => "Writer",
            AuthorRole::Contributor => "Contributor",
        }
    }
}

impl std::fmt::Display for AuthorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional social handles of an author
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl SocialLinks {
    pub fn is_empty(&self) -> bool {
        self.twitter.is_none()
            && self.facebook.is_none()
            && self.linkedin.is_none()
            && self.instagram.is_none()
            && self.github.is_none()
    }
}
