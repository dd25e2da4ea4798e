//! UI models and metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test
//! the panel inventory and the message-to-toast mapping on the host.

use gamebox::diagnostics::Severity;
use gamebox::manifest::GameMeta;
use gamebox::protocol::NoticeLevel;

/// Right-hand panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    #[default]
    Preview,
    Diagnostics,
    Source,
}

impl PanelTab {
    pub fn label(self) -> &'static str {
        match self {
            PanelTab::Preview => "Preview",
            PanelTab::Diagnostics => "Diagnostics",
            PanelTab::Source => "Source",
        }
    }

    pub fn all() -> &'static [PanelTab] {
        &[PanelTab::Preview, PanelTab::Diagnostics, PanelTab::Source]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀️",
        }
    }

    pub fn toggle(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Stable value for localStorage round-trips.
    pub fn storage_value(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_storage_value(v: &str) -> Option<Theme> {
        match v.trim() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

/// Severity of a toast on the notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Caution,
    Error,
}

impl ToastLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastLevel::Info => "toast info",
            ToastLevel::Caution => "toast caution",
            ToastLevel::Error => "toast error",
        }
    }
}

/// How bridge notifications land on the toast stack. `confirm` text is
/// cautionary because the frame already answered it without the player.
pub fn toast_level_for(level: NoticeLevel) -> ToastLevel {
    match level {
        NoticeLevel::Info => ToastLevel::Info,
        NoticeLevel::Caution => ToastLevel::Caution,
    }
}

/// Badge class for a diagnostic severity.
pub fn severity_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "diag-badge info",
        Severity::Warning => "diag-badge warning",
        Severity::Error => "diag-badge error",
    }
}

/// Display chips for the loaded game's metadata.
pub fn meta_tags(meta: &GameMeta) -> Vec<String> {
    let mut tags = Vec::new();
    if !meta.kind.trim().is_empty() {
        tags.push(meta.kind.trim().to_string());
    }
    if meta.generated {
        tags.push("generated".to_string());
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_inventory_is_stable() {
        let all = PanelTab::all();
        assert_eq!(all.len(), 3);
        for t in all {
            assert!(!t.label().trim().is_empty());
        }
        assert_eq!(PanelTab::default(), PanelTab::Preview);
    }

    #[test]
    fn theme_round_trips_through_storage_value() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(Theme::from_storage_value(theme.storage_value()), Some(theme));
        }
        assert_eq!(Theme::from_storage_value("solarized"), None);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn confirm_notices_read_as_caution() {
        assert_eq!(toast_level_for(NoticeLevel::Info), ToastLevel::Info);
        assert_eq!(toast_level_for(NoticeLevel::Caution), ToastLevel::Caution);
        assert_ne!(
            ToastLevel::Info.css_class(),
            ToastLevel::Caution.css_class()
        );
    }

    #[test]
    fn meta_tags_skip_empty_fields() {
        let mut meta = GameMeta::default();
        assert!(meta_tags(&meta).is_empty());

        meta.kind = "arcade".to_string();
        meta.generated = true;
        assert_eq!(meta_tags(&meta), vec!["arcade", "generated"]);
    }
}
