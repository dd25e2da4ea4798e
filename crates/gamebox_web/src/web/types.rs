use std::sync::atomic::{AtomicU64, Ordering};

use crate::ui_model::ToastLevel;

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(0);

/// One entry on the notification surface.
#[derive(Clone)]
pub(super) struct Toast {
    pub(super) id: u64,
    pub(super) level: ToastLevel,
    pub(super) message: String,
}

impl Toast {
    pub(super) fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self {
            id: NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed),
            level,
            message: message.into(),
        }
    }
}
