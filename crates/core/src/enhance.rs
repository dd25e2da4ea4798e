//! Enhancement Injector.
//!
//! Merges a fixed script/style bundle into a raw game document before it is
//! handed to the isolated context. The bundle replaces the blocking dialog
//! primitives with parent-directed messages, defines the status-emission
//! primitive, and carries the adaptive-layout routine plus its observers.
//!
//! The script template is instantiated from the [`crate::layout`] constants,
//! so the injected JS and the Rust arithmetic stay in lockstep.

use std::sync::LazyLock;

use crate::layout::{
    FALLBACK_CANVAS_H, FALLBACK_CANVAS_W, GAME_CONTAINER_SELECTORS, GAME_ROOT_SELECTORS,
    HEIGHT_FRACTION, MIN_BUDGET_PX, WIDTH_FRACTION,
};

/// Delay before the one-shot layout pass after content ready, in ms.
const SETTLE_DELAY_MS: u32 = 250;

// Baseline resets plus viewport constraints. The full-viewport background is
// scoped to the root document only; container constraints must not override
// page chrome, so they stop at max-width/max-height.
const STYLE_TEMPLATE: &str = r##"html { min-height: 100vh; }
html, body { margin: 0; padding: 0; }
@CONTAINER_SELECTORS@ {
  max-width: 100vw;
  max-height: 100vh;
  box-sizing: border-box;
}
canvas { max-width: 100%; height: auto; }"##;

const SCRIPT_TEMPLATE: &str = r##"(function () {
  'use strict';

  // The payload carries no secrets, so the recipient is left unrestricted.
  function post(msg) {
    try { window.parent.postMessage(msg, '*'); } catch (e) {}
  }

  // Blocking dialogs would wedge the frame; route the text to the host
  // instead. confirm() reports affirmatively so callers never wait on input
  // that cannot arrive.
  window.alert = function (message) {
    post({ type: 'game-alert', message: String(message) });
  };
  window.confirm = function (message) {
    post({ type: 'game-confirm', message: String(message) });
    return true;
  };
  window.reportStatus = function (status, data) {
    post({ type: 'game-status', status: String(status), data: data || {} });
  };

  var ROOT_SELECTORS = [@ROOT_SELECTORS@];
  var WIDTH_FRACTION = @WIDTH_FRACTION@;
  var HEIGHT_FRACTION = @HEIGHT_FRACTION@;
  var MIN_BUDGET_PX = @MIN_BUDGET_PX@;
  var FALLBACK_CANVAS_W = @FALLBACK_CANVAS_W@;
  var FALLBACK_CANVAS_H = @FALLBACK_CANVAS_H@;

  function viewportBudget() {
    return {
      w: Math.max(Math.floor(window.innerWidth * WIDTH_FRACTION), MIN_BUDGET_PX),
      h: Math.max(Math.floor(window.innerHeight * HEIGHT_FRACTION), MIN_BUDGET_PX)
    };
  }

  function findGameRoot() {
    for (var i = 0; i < ROOT_SELECTORS.length; i++) {
      var el = document.querySelector(ROOT_SELECTORS[i]);
      if (el) { return el; }
    }
    if (!document.body) { return null; }
    var best = null;
    var bestArea = 0;
    var nodes = document.body.querySelectorAll('*');
    for (var j = 0; j < nodes.length; j++) {
      var n = nodes[j];
      if (n.tagName === 'SCRIPT' || n.tagName === 'STYLE') { continue; }
      if (window.getComputedStyle(n).position === 'fixed') { continue; }
      var r = n.getBoundingClientRect();
      var area = r.width * r.height;
      if (area > bestArea) { best = n; bestArea = area; }
    }
    if (best) { return best; }
    return document.body.firstElementChild;
  }

  function adaptLayout() {
    var root = findGameRoot();
    if (!root) { return; }
    var budget = viewportBudget();

    // Box constraints only; transform scaling lies to anything that reads
    // the element's true rendered size (hit testing, canvas coords).
    root.style.maxWidth = budget.w + 'px';
    root.style.maxHeight = budget.h + 'px';
    root.style.display = 'block';
    root.style.margin = '0 auto';
    root.style.transform = 'none';

    try {
      var canvas = root.tagName === 'CANVAS' ? root : root.querySelector('canvas');
      if (canvas) {
        var iw = parseFloat(canvas.getAttribute('width'));
        var ih = parseFloat(canvas.getAttribute('height'));
        if (!isFinite(iw) || iw <= 0) { iw = FALLBACK_CANVAS_W; }
        if (!isFinite(ih) || ih <= 0) { ih = FALLBACK_CANVAS_H; }
        var ratio = iw / ih;
        var width = Math.min(budget.w, budget.h * ratio);
        canvas.style.width = width + 'px';
        canvas.style.height = (width / ratio) + 'px';
        canvas.style.display = 'block';
        canvas.style.margin = '0 auto';
      } else {
        var bw = root.scrollWidth || root.clientWidth;
        var bh = root.scrollHeight || root.clientHeight;
        if (bw > 0 && bh > 0) {
          root.style.width = Math.min(budget.w, budget.h * (bw / bh)) + 'px';
        }
      }
    } catch (e) {
      // Layout degradation must never take the frame down.
    }
  }

  window.addEventListener('resize', adaptLayout);
  window.addEventListener('orientationchange', adaptLayout);
  window.addEventListener('load', adaptLayout);
  setTimeout(adaptLayout, @SETTLE_DELAY_MS@);

  function scanScore() {
    var el = document.querySelector('[class*="score"], [id*="score"]');
    if (el && el.textContent) {
      post({ type: 'game-status', status: 'score-update', data: { text: el.textContent } });
    }
  }

  function installObservers() {
    if (!document.body) { return; }
    if (typeof MutationObserver === 'function') {
      new MutationObserver(scanScore).observe(document.body, {
        childList: true,
        subtree: true,
        characterData: true
      });
    }
    if (typeof ResizeObserver === 'function') {
      new ResizeObserver(adaptLayout).observe(document.body);
    }
    scanScore();
  }

  if (document.readyState === 'loading') {
    document.addEventListener('DOMContentLoaded', installObservers);
  } else {
    installObservers();
  }
})();"##;

static BUNDLE: LazyLock<String> = LazyLock::new(build_bundle);

fn build_bundle() -> String {
    let style = STYLE_TEMPLATE.replace(
        "@CONTAINER_SELECTORS@",
        &GAME_CONTAINER_SELECTORS.join(",\n"),
    );
    let root_selectors = GAME_ROOT_SELECTORS
        .iter()
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(", ");
    let script = SCRIPT_TEMPLATE
        .replace("@ROOT_SELECTORS@", &root_selectors)
        .replace("@WIDTH_FRACTION@", &WIDTH_FRACTION.to_string())
        .replace("@HEIGHT_FRACTION@", &HEIGHT_FRACTION.to_string())
        .replace("@MIN_BUDGET_PX@", &MIN_BUDGET_PX.to_string())
        .replace("@FALLBACK_CANVAS_W@", &FALLBACK_CANVAS_W.to_string())
        .replace("@FALLBACK_CANVAS_H@", &FALLBACK_CANVAS_H.to_string())
        .replace("@SETTLE_DELAY_MS@", &SETTLE_DELAY_MS.to_string());
    format!("<style>\n{style}\n</style>\n<script>\n{script}\n</script>")
}

/// The bundle text merged into every document. Fixed for the process
/// lifetime.
pub fn enhancement_bundle() -> &'static str {
    BUNDLE.as_str()
}

/// Case-insensitive search for an ASCII marker. The returned index is a char
/// boundary because the marker starts with an ASCII byte.
fn find_marker(haystack: &str, needle: &str) -> Option<usize> {
    debug_assert!(needle.is_ascii() && !needle.is_empty());
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Rewrites a raw document with the enhancement bundle merged in.
///
/// Three-tier fallback, exactly one insertion point, every other byte of the
/// input preserved:
///
/// 1. bundle inserted immediately before the closing `</head>`;
/// 2. else a `<head>` wrapping the bundle is synthesized before `<body`;
/// 3. else the bundle is prepended to the document verbatim.
///
/// Generated documents are frequently malformed fragments rather than full
/// documents, hence tiers 2 and 3.
pub fn inject(html: &str) -> String {
    let bundle = enhancement_bundle();

    if let Some(idx) = find_marker(html, "</head>") {
        let mut out = String::with_capacity(html.len() + bundle.len() + 1);
        out.push_str(&html[..idx]);
        out.push_str(bundle);
        out.push('\n');
        out.push_str(&html[idx..]);
        return out;
    }

    if let Some(idx) = find_marker(html, "<body") {
        let mut out = String::with_capacity(html.len() + bundle.len() + 16);
        out.push_str(&html[..idx]);
        out.push_str("<head>\n");
        out.push_str(bundle);
        out.push_str("\n</head>\n");
        out.push_str(&html[idx..]);
        return out;
    }

    format!("{bundle}\n{html}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_bundle(doc: &str) -> usize {
        doc.matches(enhancement_bundle()).count()
    }

    #[test]
    fn head_insertion_preserves_every_other_byte() {
        let original = "<html><head><title>t</title></head><body><p>身体</p></body></html>";
        let out = inject(original);
        assert_eq!(count_bundle(&out), 1);

        let idx = original.find("</head>").unwrap();
        let expected = format!(
            "{}{}\n{}",
            &original[..idx],
            enhancement_bundle(),
            &original[idx..]
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn closing_head_marker_is_case_insensitive() {
        let out = inject("<HTML><HEAD></HEAD><BODY></BODY></HTML>");
        assert_eq!(count_bundle(&out), 1);
        assert!(out.find(enhancement_bundle()).unwrap() < out.find("</HEAD>").unwrap());
    }

    #[test]
    fn missing_head_synthesizes_one_before_body() {
        let original = "<html><body><p>x</p></body></html>";
        let out = inject(original);
        assert_eq!(count_bundle(&out), 1);
        assert!(out.starts_with("<html><head>\n"));
        assert!(out.ends_with("</head>\n<body><p>x</p></body></html>"));
    }

    #[test]
    fn bare_fragment_gets_bundle_prepended() {
        let original = "<div>just a fragment</div>";
        let out = inject(original);
        assert_eq!(out, format!("{}\n{original}", enhancement_bundle()));
    }

    #[test]
    fn bundle_has_no_unexpanded_placeholders() {
        let bundle = enhancement_bundle();
        assert!(!bundle.contains('@'));
    }

    #[test]
    fn bundle_embeds_the_layout_constants() {
        let bundle = enhancement_bundle();
        assert!(bundle.contains(&WIDTH_FRACTION.to_string()));
        assert!(bundle.contains(&HEIGHT_FRACTION.to_string()));
        assert!(bundle.contains(&MIN_BUDGET_PX.to_string()));
        assert!(bundle.contains(&FALLBACK_CANVAS_W.to_string()));
        assert!(bundle.contains(&FALLBACK_CANVAS_H.to_string()));
        for sel in GAME_ROOT_SELECTORS {
            assert!(bundle.contains(&format!("'{sel}'")), "missing {sel}");
        }
    }

    #[test]
    fn bundle_carries_the_protocol_surface() {
        let bundle = enhancement_bundle();
        assert!(bundle.contains("game-alert"));
        assert!(bundle.contains("game-confirm"));
        assert!(bundle.contains("game-status"));
        assert!(bundle.contains("score-update"));
        assert!(bundle.contains("return true;"));
    }
}
