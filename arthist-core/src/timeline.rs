//! Timeline document model
//!
//! The dataset is a JSON array of eras, each holding movements, then
//! country groups, then artists. It is loaded once at startup and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid timeline document: {0}")]
    Json(#[from] serde_json::Error),
}

/// One era of the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub century: String,
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub art_movements: Vec<ArtMovement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtMovement {
    pub name: String,
    #[serde(default)]
    pub countries: Vec<CountryGroup>,
}

/// Artists of one movement from one country. The same country may appear
/// under several movements of an era.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryGroup {
    pub country: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub name: String,
    pub painting_title: String,
    /// Wikipedia page title (not a URL) for the artist's portrait, e.g. "Claude Monet"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_wiki_title: Option<String>,
    /// Wikipedia page title for the artwork, e.g. "Mona Lisa"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub painting_wiki_title: Option<String>,
}

/// Lookup keys for an artist's two images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailKeys<'a> {
    pub photo: Option<&'a str>,
    pub artwork: Option<&'a str>,
}

impl Artist {
    pub fn thumbnail_keys(&self) -> ThumbnailKeys<'_> {
        ThumbnailKeys {
            photo: self.photo_wiki_title.as_deref(),
            artwork: self.painting_wiki_title.as_deref(),
        }
    }
}

impl CountryGroup {
    /// "1 artist", "3 artists"
    pub fn artist_count_label(&self) -> String {
        let n = self.artists.len();
        format!("{} artist{}", n, if n == 1 { "" } else { "s" })
    }
}

pub fn parse_timeline(json: &str) -> Result<Vec<TimelineItem>, TimelineError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse the timeline document at `path`.
pub fn load_timeline(path: &Path) -> Result<Vec<TimelineItem>, TimelineError> {
    let content = std::fs::read_to_string(path)?;
    let timeline = parse_timeline(&content)?;
    info!("Loaded {} eras from {}", timeline.len(), path.display());
    Ok(timeline)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"[
        {
            "century": "19th century",
            "period": "Modern",
            "description": "Light and colour.",
            "artMovements": [
                {
                    "name": "Impressionism",
                    "countries": [
                        {
                            "country": "France",
                            "artists": [
                                {
                                    "name": "Claude Monet",
                                    "photoWikiTitle": "Claude Monet",
                                    "paintingWikiTitle": "Impression, Sunrise",
                                    "paintingTitle": "Impression, Sunrise"
                                },
                                { "name": "Berthe Morisot", "paintingTitle": "The Cradle" }
                            ]
                        }
                    ]
                }
            ]
        }
    ]"#;

    #[test]
    fn parses_camel_case_document() {
        let timeline = parse_timeline(DOC).unwrap();
        assert_eq!(timeline.len(), 1);

        let era = &timeline[0];
        assert_eq!(era.century, "19th century");
        let group = &era.art_movements[0].countries[0];
        assert_eq!(group.country, "France");
        assert_eq!(
            group.artists[0].thumbnail_keys(),
            ThumbnailKeys {
                photo: Some("Claude Monet"),
                artwork: Some("Impression, Sunrise"),
            }
        );
        assert_eq!(
            group.artists[1].thumbnail_keys(),
            ThumbnailKeys {
                photo: None,
                artwork: None
            }
        );
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let err = parse_timeline(r#"[{"century": "x", "period": "y"}]"#).unwrap_err();
        assert!(matches!(err, TimelineError::Json(_)));
    }

    #[test]
    fn artist_count_label_pluralizes() {
        let mut group = CountryGroup {
            country: "Spain".to_string(),
            artists: vec![],
        };
        assert_eq!(group.artist_count_label(), "0 artists");
        group.artists.push(Artist {
            name: "Goya".to_string(),
            painting_title: "The Third of May 1808".to_string(),
            photo_wiki_title: None,
            painting_wiki_title: None,
        });
        assert_eq!(group.artist_count_label(), "1 artist");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("historyTimeline.json");
        std::fs::write(&path, DOC).unwrap();
        assert_eq!(load_timeline(&path).unwrap().len(), 1);

        let missing = load_timeline(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, TimelineError::Io(_)));
    }
}
