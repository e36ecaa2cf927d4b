//! Tracked games and their identity keys

use serde::{Deserialize, Serialize};

/// A game whose most-viewed gameplay video is tracked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Display name, also the source of the cache key and output filenames
    pub name: String,
    /// Free-text search query sent to the API
    pub query: String,
    /// Static image used when a fetched video has no thumbnail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_image: Option<String>,
}

impl Target {
    /// Create a target without a fallback image
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
            fallback_image: None,
        }
    }

    /// Attach a fallback image path
    pub fn with_fallback(mut self, image: impl Into<String>) -> Self {
        self.fallback_image = Some(image.into());
        self
    }

    /// Cache key and output filename stem for this target
    pub fn key(&self) -> String {
        target_key(&self.name)
    }
}

/// Derive a key from a display name: lowercase, spaces become underscores
///
/// `"GTA V"` becomes `"gta_v"`.
pub fn target_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// The games tracked when no `[[targets]]` are configured
pub fn default_targets() -> Vec<Target> {
    vec![
        Target::new("Valorant", "Valorant gameplay").with_fallback("assets/img/new.png"),
        Target::new("GTA V", "GTA V gameplay").with_fallback("assets/img/gtav.png"),
        Target::new("League of Legends", "League of Legends gameplay")
            .with_fallback("assets/img/league-legends.png"),
        Target::new("Mobile Legends", "Mobile Legends gameplay")
            .with_fallback("assets/img/mobile_legends.jpg"),
    ]
}
