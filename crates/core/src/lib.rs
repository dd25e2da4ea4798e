//! # gamebox
//!
//! Engine for hosting untrusted, generated HTML/JS mini-games.
//!
//! A host application hands a raw game document to this crate, which
//! provides three things on top of an isolated rendering context:
//!
//! - [`diagnostics`]: static heuristics over the markup, surfacing quality
//!   warnings before the game runs;
//! - [`enhance`]: a rewritten copy of the document with a compatibility and
//!   adaptive-layout bundle merged into its head;
//! - [`protocol`] + [`score`]: the narrow message channel the enhanced
//!   document uses to report dialogs and score back to the host.
//!
//! Everything here is pure and DOM-free; the browser-facing host lives in
//! the `gamebox_web` crate.
//!
//! ## Quick start
//!
//! ```
//! use gamebox::prelude::*;
//!
//! let raw = "<html><head></head><body><canvas width=\"800\" height=\"600\"></canvas></body></html>";
//!
//! // Static feedback about the markup.
//! let report = analyze(raw);
//! assert!(report.iter().any(|d| d.rule == "no-charset"));
//!
//! // The document the isolated context actually renders.
//! let enhanced = inject(raw);
//! assert!(enhanced.contains("game-status"));
//!
//! // Host-side handling of a message posted from the frame.
//! let msg = GameMessage::decode(r#"{"type":"game-alert","message":"ready"}"#).unwrap();
//! match route(&msg) {
//!     HostAction::Notify { text, .. } => assert_eq!(text, "ready"),
//!     _ => unreachable!(),
//! }
//! ```

pub mod diagnostics;
pub mod enhance;
pub mod layout;
pub mod manifest;
pub mod protocol;
pub mod score;

pub mod prelude {
    pub use crate::diagnostics::{analyze, Diagnostic, Severity};
    pub use crate::enhance::{enhancement_bundle, inject};
    pub use crate::manifest::{GameData, GameMeta};
    pub use crate::protocol::{route, GameMessage, HostAction, NoticeLevel};
    pub use crate::score::ScoreState;
}
