//! Adaptive-layout arithmetic shared with the injected script.
//!
//! The layout routine itself runs inside the isolated context (see
//! [`crate::enhance`]); this module is the reference implementation of its
//! selection and sizing rules so they can be unit-tested without a DOM. The
//! script template is instantiated from these constants, so the Rust side and
//! the injected JS cannot drift apart.

/// Fraction of the window width a game may occupy.
pub const WIDTH_FRACTION: f64 = 0.92;

/// Fraction of the window height a game may occupy.
pub const HEIGHT_FRACTION: f64 = 0.88;

/// Floor for either budget edge, in pixels.
pub const MIN_BUDGET_PX: u32 = 320;

/// Intrinsic canvas size assumed when the width/height attributes are absent
/// or non-numeric.
pub const FALLBACK_CANVAS_W: u32 = 800;
/// See [`FALLBACK_CANVAS_W`].
pub const FALLBACK_CANVAS_H: u32 = 600;

/// Canonical game-container selectors, in priority order.
///
/// Shared by the analyzer (container-marker rule), the injected stylesheet
/// (viewport constraints), and the game-root selection policy below.
pub const GAME_CONTAINER_SELECTORS: &[&str] = &[
    "#game-container",
    ".game-container",
    "#game",
    ".game-area",
    "#game-area",
    ".game-wrapper",
];

/// Full priority list for game-root selection: container markers first, then
/// a bare canvas as the last resort selector.
pub const GAME_ROOT_SELECTORS: &[&str] = &[
    "#game-container",
    ".game-container",
    "#game",
    ".game-area",
    "#game-area",
    ".game-wrapper",
    "canvas",
];

/// The viewport budget a game root is constrained to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportBudget {
    pub width: u32,
    pub height: u32,
}

/// Computes the budget for a window size: 92% of the width and 88% of the
/// height, floored, with a 320px minimum per edge.
pub fn viewport_budget(win_width: u32, win_height: u32) -> ViewportBudget {
    let w = (f64::from(win_width) * WIDTH_FRACTION).floor() as u32;
    let h = (f64::from(win_height) * HEIGHT_FRACTION).floor() as u32;
    ViewportBudget {
        width: w.max(MIN_BUDGET_PX),
        height: h.max(MIN_BUDGET_PX),
    }
}

/// Target pixel dimensions for a sized element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitSize {
    pub width: f64,
    pub height: f64,
}

/// Parses a canvas `width`/`height` attribute pair, falling back to 800×600
/// when either is absent, non-numeric, or non-positive.
pub fn canvas_intrinsic(width_attr: Option<&str>, height_attr: Option<&str>) -> (f64, f64) {
    let parse = |attr: Option<&str>, fallback: u32| {
        attr.and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(f64::from(fallback))
    };
    (
        parse(width_attr, FALLBACK_CANVAS_W),
        parse(height_attr, FALLBACK_CANVAS_H),
    )
}

/// Fits a canvas with the given intrinsic dimensions into the budget,
/// preserving the intrinsic aspect ratio: the target width is the smaller of
/// the width budget and the ratio-scaled height budget, the target height
/// follows from the ratio.
pub fn fit_canvas(intrinsic_w: f64, intrinsic_h: f64, budget: ViewportBudget) -> FitSize {
    let ratio = if intrinsic_w > 0.0 && intrinsic_h > 0.0 {
        intrinsic_w / intrinsic_h
    } else {
        f64::from(FALLBACK_CANVAS_W) / f64::from(FALLBACK_CANVAS_H)
    };
    let width = f64::from(budget.width).min(f64::from(budget.height) * ratio);
    FitSize {
        width,
        height: width / ratio,
    }
}

/// Width constraint for a non-canvas root, preserving the root's own box
/// ratio. Returns `None` when the box has no usable dimensions.
pub fn fit_root_width(box_w: f64, box_h: f64, budget: ViewportBudget) -> Option<f64> {
    if box_w <= 0.0 || box_h <= 0.0 {
        return None;
    }
    let ratio = box_w / box_h;
    Some(f64::from(budget.width).min(f64::from(budget.height) * ratio))
}

/// A flattened description of one candidate element, in document order, as
/// the in-frame script sees the body's descendants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootCandidate {
    /// Index into [`GAME_ROOT_SELECTORS`] of the first selector the element
    /// matches, if any.
    pub selector_rank: Option<usize>,
    /// Rendered area in px².
    pub area: f64,
    /// `position: fixed` elements never become the game root.
    pub fixed_position: bool,
    /// True for script/style elements.
    pub non_visual: bool,
    /// True for direct children of the body.
    pub body_child: bool,
}

/// Game-root selection policy, first match wins:
///
/// 1. best-ranked canonical selector match (document order breaks ties),
/// 2. else the visible non-fixed candidate with the largest rendered area,
/// 3. else the first direct body child,
/// 4. else nothing.
pub fn select_game_root(candidates: &[RootCandidate]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (i, c) in candidates.iter().enumerate() {
        if let Some(rank) = c.selector_rank {
            if best.map_or(true, |(_, r)| rank < r) {
                best = Some((i, rank));
            }
        }
    }
    if let Some((i, _)) = best {
        return Some(i);
    }

    let mut largest: Option<(usize, f64)> = None;
    for (i, c) in candidates.iter().enumerate() {
        if c.fixed_position || c.non_visual || c.area <= 0.0 {
            continue;
        }
        if largest.map_or(true, |(_, a)| c.area > a) {
            largest = Some((i, c.area));
        }
    }
    if let Some((i, _)) = largest {
        return Some(i);
    }

    candidates.iter().position(|c| c.body_child)
}
