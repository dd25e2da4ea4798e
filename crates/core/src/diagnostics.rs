//! Static heuristics over raw game markup.
//!
//! Every rule is a named entry in [`RULES`] so it can be unit-tested in
//! isolation, and the analyzer output order is exactly the table order.
//! These are textual heuristics, not semantic analysis: false positives are
//! acceptable, misses are silent.

use std::sync::LazyLock;

use regex::Regex;

use crate::layout::GAME_CONTAINER_SELECTORS;

/// How strongly a diagnostic should be surfaced to the author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A single heuristic finding about the analyzed markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable id of the rule that produced this finding.
    pub rule: &'static str,
    pub message: String,
}

/// One analyzer rule: evaluated against the full document text, emits zero
/// or one diagnostic.
pub struct Rule {
    pub id: &'static str,
    pub check: fn(&str) -> Option<Diagnostic>,
}

/// The rule table. Order is part of the contract: new rules are appended,
/// never inserted, so prior diagnostics keep their relative order.
pub const RULES: &[Rule] = &[
    Rule {
        id: "controls-without-buttons",
        check: check_controls_without_buttons,
    },
    Rule {
        id: "no-keyboard-binding",
        check: check_no_keyboard_binding,
    },
    Rule {
        id: "distance-collision",
        check: check_distance_collision,
    },
    Rule {
        id: "global-layout-on-body",
        check: check_global_layout_on_body,
    },
    Rule {
        id: "no-game-container",
        check: check_no_game_container,
    },
    Rule {
        id: "no-charset",
        check: check_no_charset,
    },
];

/// Runs every rule against the document, in table order.
///
/// Pure and total: analysis never fails, absence of evidence just yields no
/// diagnostic for that rule.
pub fn analyze(html: &str) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    for rule in RULES {
        if let Some(d) = (rule.check)(html) {
            tracing::trace!(rule = rule.id, severity = d.severity.label(), "rule hit");
            out.push(d);
        }
    }
    out
}

fn re(pattern: &str) -> Regex {
    // Patterns below are static and known-good; a failure here is a bug in
    // this module, not in caller input.
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid analyzer pattern {pattern:?}: {e}"))
}

// Locale-tolerant "press the left/right buttons" instruction text.
static CONTROL_HINT: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?i)(?:左右|左/右|左、右)\s*(?:方向)?(?:按钮|按键)|left\s*(?:/|and|or)\s*right\s+buttons?"#)
});

// Clickable markup that plausibly is a left/right button.
static LR_BUTTON_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?is)<button[^>]*(?:left|right)[^>]*>|<button[^>]*>[^<]{0,40}?(?:左|右|left|right|←|→|◀|▶)"#)
});

fn check_controls_without_buttons(html: &str) -> Option<Diagnostic> {
    if CONTROL_HINT.is_match(html) && !LR_BUTTON_MARKUP.is_match(html) {
        return Some(Diagnostic {
            severity: Severity::Warning,
            rule: "controls-without-buttons",
            message: "Instructions mention left/right buttons but no matching clickable \
                      buttons were found."
                .to_string(),
        });
    }
    None
}

static ARROW_KEY_BINDING: LazyLock<Regex> =
    LazyLock::new(|| re(r#"(?i)Arrow(?:Left|Right|Up|Down)|key(?:down|up)|keyCode"#));

fn check_no_keyboard_binding(html: &str) -> Option<Diagnostic> {
    if !ARROW_KEY_BINDING.is_match(html) {
        return Some(Diagnostic {
            severity: Severity::Info,
            rule: "no-keyboard-binding",
            message: "No keyboard arrow-key handling detected; keyboard controls are \
                      recommended."
                .to_string(),
        });
    }
    None
}

// `Math.abs(a - b) < n` style fixed-threshold proximity check.
static ABS_DISTANCE_CMP: LazyLock<Regex> =
    LazyLock::new(|| re(r#"Math\s*\.\s*abs\s*\([^)]*\)\s*<=?\s*\d"#));

// A geometry query plus a directional edge comparison: good-enough evidence
// of an axis-aligned bounding-box check.
static RECT_EDGE_CMP: LazyLock<Regex> =
    LazyLock::new(|| re(r#"\.(?:left|right|top|bottom)\s*[<>]=?"#));

fn check_distance_collision(html: &str) -> Option<Diagnostic> {
    if !ABS_DISTANCE_CMP.is_match(html) {
        return None;
    }
    let has_aabb = html.contains("getBoundingClientRect") && RECT_EDGE_CMP.is_match(html);
    if has_aabb {
        return None;
    }
    Some(Diagnostic {
        severity: Severity::Warning,
        rule: "distance-collision",
        message: "Collision detection uses a fixed distance threshold; bounding-box \
                  checks track the rendered size more reliably."
            .to_string(),
    })
}

static BODY_GLOBAL_LAYOUT: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?is)(?:^|[\s,{};>])(?:html|body)\s*(?:,\s*(?:html|body)\s*)?\{[^}]*?(?:display\s*:\s*flex|overflow\s*:\s*hidden)"#)
});

static BODY_INLINE_LAYOUT: LazyLock<Regex> = LazyLock::new(|| {
    re(r#"(?is)<body[^>]*style\s*=\s*["'][^"']*(?:display\s*:\s*flex|overflow\s*:\s*hidden)"#)
});

fn check_global_layout_on_body(html: &str) -> Option<Diagnostic> {
    if BODY_GLOBAL_LAYOUT.is_match(html) || BODY_INLINE_LAYOUT.is_match(html) {
        return Some(Diagnostic {
            severity: Severity::Info,
            rule: "global-layout-on-body",
            message: "Flex display or hidden overflow is applied to the page root; prefer \
                      scoping layout to a dedicated game container."
                .to_string(),
        });
    }
    None
}

static CONTAINER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    let mut names: Vec<&str> = GAME_CONTAINER_SELECTORS
        .iter()
        .map(|s| s.trim_start_matches(['#', '.']))
        .collect();
    names.dedup();
    let alternation = names.join("|");
    re(&format!(
        r#"(?i)\bid\s*=\s*["']?(?:{alternation})\b|\bclass\s*=\s*["'][^"']*\b(?:{alternation})\b"#
    ))
});

fn check_no_game_container(html: &str) -> Option<Diagnostic> {
    if !CONTAINER_MARKER.is_match(html) {
        return Some(Diagnostic {
            severity: Severity::Info,
            rule: "no-game-container",
            message: "No canonical game container (e.g. #game-container) found; adaptive \
                      layout will fall back to area heuristics."
                .to_string(),
        });
    }
    None
}

static UTF8_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| re(r#"(?i)charset\s*=\s*["']?\s*utf-?8"#));

fn check_no_charset(html: &str) -> Option<Diagnostic> {
    if !UTF8_CHARSET.is_match(html) {
        return Some(Diagnostic {
            severity: Severity::Warning,
            rule: "no-charset",
            message: "Document does not declare a UTF-8 charset; non-ASCII text may render \
                      incorrectly."
                .to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    // Clean document: container marker, charset, keyboard handling, nothing
    // to warn about.
    const CLEAN: &str = r#"<html><head><meta charset="utf-8"></head>
        <body><div id="game-container"></div>
        <script>document.addEventListener('keydown', e => e.key === 'ArrowLeft');</script>
        </body></html>"#;

    #[test]
    fn clean_document_yields_no_diagnostics() {
        assert!(analyze(CLEAN).is_empty());
    }

    #[test]
    fn analyze_is_deterministic() {
        let doc = "<div>左右按钮</div>";
        assert_eq!(analyze(doc), analyze(doc));
    }

    #[test]
    fn rule_ids_are_unique_and_order_stable() {
        let mut ids: Vec<&str> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 6);
        let ordered = ids.clone();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);

        // A document tripping every rule reports in table order.
        let noisy = "点击左右按钮 if (Math.abs(a-b) < 10) {} body{display:flex}";
        let report = analyze(noisy);
        let seq: Vec<&str> = report.iter().map(|d| d.rule).collect();
        let expected: Vec<&str> = ordered
            .iter()
            .copied()
            .filter(|id| seq.contains(id))
            .collect();
        assert_eq!(seq, expected);
        assert_eq!(seq.len(), 6);
    }

    #[test]
    fn missing_charset_is_exactly_one_warning() {
        let doc = r#"<html><head></head><body><div class="game-area"></div>
            <script>onkeydown = () => {};</script></body></html>"#;
        let report = analyze(doc);
        let charset: Vec<_> = report.iter().filter(|d| d.rule == "no-charset").collect();
        assert_eq!(charset.len(), 1);
        assert_eq!(charset[0].severity, Severity::Warning);
        assert_eq!(
            report
                .iter()
                .filter(|d| d.severity == Severity::Warning)
                .count(),
            1
        );
    }

    #[test]
    fn control_hint_without_buttons_warns() {
        let doc = "<p>使用左右按钮移动</p>";
        let hit = check_controls_without_buttons(doc).expect("should warn");
        assert_eq!(hit.severity, Severity::Warning);

        // English phrasing triggers too.
        assert!(check_controls_without_buttons("use the left and right buttons").is_some());
    }

    #[test]
    fn control_hint_with_buttons_is_quiet() {
        let doc = r#"<p>使用左右按钮移动</p><button onclick="moveLeft()">←</button>"#;
        assert!(check_controls_without_buttons(doc).is_none());
        assert!(check_controls_without_buttons("<p>no hint here</p>").is_none());
    }

    #[test]
    fn distance_collision_suppressed_by_bounding_box() {
        let distance_only = "if (Math.abs(player.x - coin.x) < 20) { score++; }";
        assert!(check_distance_collision(distance_only).is_some());

        let with_aabb = "const r = el.getBoundingClientRect();\
            if (Math.abs(a-b) < 20 && r.left < other.right) {}";
        assert!(check_distance_collision(with_aabb).is_none());

        assert!(check_distance_collision("no collisions at all").is_none());
    }

    #[test]
    fn body_flex_and_hidden_overflow_are_flagged() {
        assert!(check_global_layout_on_body("<style>body { display: flex; }</style>").is_some());
        assert!(
            check_global_layout_on_body("<style>html, body { overflow: hidden }</style>")
                .is_some()
        );
        assert!(check_global_layout_on_body(r#"<body style="overflow:hidden">"#).is_some());
        // A scoped container does not trip the rule.
        assert!(check_global_layout_on_body(".game-area { display: flex; }").is_none());
    }

    #[test]
    fn container_marker_variants_are_recognized() {
        assert!(check_no_game_container(r#"<div id="game-container">"#).is_none());
        assert!(check_no_game_container(r#"<div class="panel game-area">"#).is_none());
        assert!(check_no_game_container(r#"<div id="gameCanvas">"#).is_some());
        assert!(check_no_game_container("<div>").is_some());
    }

    #[test]
    fn charset_declarations_are_matched_loosely() {
        assert!(check_no_charset(r#"<meta charset="UTF-8">"#).is_none());
        assert!(check_no_charset(
            r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8">"#
        )
        .is_none());
        assert!(check_no_charset("<meta charset='gbk'>").is_some());
    }
}
