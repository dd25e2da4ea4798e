//! The game record handed to the host by whatever generated the game.
//!
//! Metadata is display-only; the engine never transforms it.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameMeta {
    #[serde(default)]
    pub title: String,
    /// Freeform genre/type tag ("puzzle", "arcade", ...).
    #[serde(default)]
    pub kind: String,
    /// Whether the markup came out of a generator rather than a person.
    #[serde(default)]
    pub generated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameData {
    /// Raw markup, pre-enhancement. Exports always use this form.
    pub html: String,
    #[serde(default)]
    pub meta: GameMeta,
}

static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("title pattern"));

impl GameData {
    /// Wraps pasted or imported markup, deriving a title from the document's
    /// own `<title>` when it has one.
    pub fn from_html(html: impl Into<String>) -> Self {
        let html = html.into();
        let title = title_from_html(&html).unwrap_or_default();
        Self {
            html,
            meta: GameMeta {
                title,
                ..GameMeta::default()
            },
        }
    }

    /// Filename for the export collaborator: the metadata title when
    /// present, a generic fallback otherwise.
    pub fn export_filename(&self) -> String {
        let title = self.meta.title.trim();
        if title.is_empty() {
            return "game.html".to_string();
        }
        let safe: String = title
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c => c,
            })
            .collect();
        format!("{safe}.html")
    }
}

/// First `<title>` text in the document, trimmed, if any.
pub fn title_from_html(html: &str) -> Option<String> {
    TITLE_TAG
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_html_picks_up_the_document_title() {
        let data = GameData::from_html("<html><head><title> 接苹果 </title></head></html>");
        assert_eq!(data.meta.title, "接苹果");
        assert!(!data.meta.generated);
    }

    #[test]
    fn export_filename_sanitizes_or_falls_back() {
        let mut data = GameData::from_html("<div></div>");
        assert_eq!(data.export_filename(), "game.html");

        data.meta.title = "space: invaders?".to_string();
        assert_eq!(data.export_filename(), "space_ invaders_.html");
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let data = GameData {
            html: "<canvas></canvas>".to_string(),
            meta: GameMeta {
                title: "pong".to_string(),
                kind: "arcade".to_string(),
                generated: true,
            },
        };
        let raw = serde_json::to_string(&data).unwrap();
        assert_eq!(serde_json::from_str::<GameData>(&raw).unwrap(), data);
    }

    #[test]
    fn missing_title_yields_none() {
        assert_eq!(title_from_html("<html><head></head></html>"), None);
        assert_eq!(title_from_html("<title>   </title>"), None);
    }
}
