//! Host side of the message channel.
//!
//! One `message` listener on the window for the app's lifetime. Decoding and
//! dispatch are pure (`gamebox::protocol`); this module only adapts the raw
//! browser event and hands the resulting [`HostAction`] to the app. A new
//! game load replaces the frame's `srcdoc`, not this listener.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use gamebox::protocol::{route, GameMessage, HostAction};

/// Installs the window `message` listener. Never throws past this boundary:
/// anything that does not decode as a protocol message is dropped.
pub(super) fn install(on_action: impl Fn(HostAction) + 'static) -> Result<(), String> {
    let window = web_sys::window().ok_or("no window".to_string())?;

    let cb = Closure::wrap(Box::new(move |ev: web_sys::MessageEvent| {
        let raw = match js_sys::JSON::stringify(&ev.data()) {
            Ok(s) => String::from(s),
            Err(_) => return,
        };
        match GameMessage::decode(&raw) {
            Ok(msg) => match route(&msg) {
                HostAction::Drop => {}
                action => on_action(action),
            },
            Err(_) => {
                // Other widgets post messages too; not ours, not an error.
                web_sys::console::debug_1(&"gamebox: dropped non-protocol message".into());
            }
        }
    }) as Box<dyn FnMut(_)>);

    window
        .add_event_listener_with_callback("message", cb.as_ref().unchecked_ref())
        .map_err(|_| "addEventListener threw".to_string())?;

    // The listener lives for the app's lifetime.
    cb.forget();
    Ok(())
}
