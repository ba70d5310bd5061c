use std::fmt;

use serde::{Deserialize, Serialize};

/// A song as handed over by the listing UI.
///
/// `id` and `source` are opaque to everything but the URL resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: String,
    pub source: String,
    pub name: String,
    pub artist: Artist,
}

/// Either a single artist name or an ordered list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Artist {
    Single(String),
    Many(Vec<String>),
}

impl Artist {
    /// Flattens the artist field the way it appears in file names.
    pub fn joined(&self) -> String {
        match self {
            Artist::Single(name) => name.clone(),
            Artist::Many(names) => names.join(", "),
        }
    }
}

impl From<&str> for Artist {
    fn from(name: &str) -> Self {
        Artist::Single(name.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityLevel {
    pub value: &'static str,
    pub label: &'static str,
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

pub const QUALITY_LEVELS: [QualityLevel; 4] = [
    QualityLevel {
        value: "128",
        label: "Standard",
    },
    QualityLevel {
        value: "192",
        label: "Higher",
    },
    QualityLevel {
        value: "320",
        label: "High",
    },
    QualityLevel {
        value: "740",
        label: "Lossless",
    },
];

/// Machine value of a quality level, e.g. `"320"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(pub String);

impl Quality {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    /// Human readable label, or the raw value when it is not a known level.
    pub fn label(&self) -> &str {
        QUALITY_LEVELS
            .iter()
            .find(|level| level.value == self.0)
            .map(|level| level.label)
            .unwrap_or(&self.0)
    }
}

impl From<QualityLevel> for Quality {
    fn from(level: QualityLevel) -> Self {
        Self::new(level.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    /// Save on the device running the client.
    Browser,
    /// Ask the server to persist the file.
    Server,
}

/// Everything a download flow needs, captured when the user picks a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub target: DownloadTarget,
    pub song: Song,
    pub quality: Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationStyle {
    #[default]
    Default,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub style: NotificationStyle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_label_lookup() {
        assert_eq!(Quality::new("320").label(), "High");
        assert_eq!(Quality::new("740").label(), "Lossless");
        assert_eq!(Quality::new("999").label(), "999");
    }

    #[test]
    fn test_artist_deserializes_both_shapes() {
        let single: Artist = serde_json::from_str(r#""Solo""#).unwrap();
        assert_eq!(single, Artist::Single("Solo".to_string()));

        let many: Artist = serde_json::from_str(r#"["A","B"]"#).unwrap();
        assert_eq!(many.joined(), "A, B");
    }
}
