/// Best-effort fullscreen toggle on the preview container. Browsers may
/// refuse outside a user gesture; callers only reach this from click
/// handlers.
pub(super) fn toggle_fullscreen(el: &web_sys::Element) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else {
        let _ = el.request_fullscreen();
    }
}
