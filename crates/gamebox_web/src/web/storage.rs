use gamebox::score::ScoreState;

use crate::ui_model::Theme;

const THEME_KEY: &str = "gamebox.theme.v1";
const SCORE_KEY: &str = "gamebox.score.v1";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(super) fn local_storage_get_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

pub(super) fn local_storage_set_string(key: &str, value: &str) {
    if let Some(s) = local_storage() {
        let _ = s.set_item(key, value);
    }
}

pub(super) fn load_theme() -> Theme {
    local_storage_get_string(THEME_KEY)
        .and_then(|v| Theme::from_storage_value(&v))
        .unwrap_or_default()
}

pub(super) fn save_theme(theme: Theme) {
    local_storage_set_string(THEME_KEY, theme.storage_value());
}

pub(super) fn load_score() -> Option<ScoreState> {
    let raw = local_storage_get_string(SCORE_KEY)?;
    serde_json::from_str(&raw).ok()
}

pub(super) fn save_score(score: &ScoreState) {
    if let Ok(raw) = serde_json::to_string(score) {
        local_storage_set_string(SCORE_KEY, &raw);
    }
}
