use leptos::prelude::*;
use wasm_bindgen::JsCast;

use gamebox::diagnostics::Diagnostic;
use gamebox::manifest::GameData;
use gamebox::score::{ScoreState, PROGRESS_MAX};

use crate::ui_model::{severity_class, Theme};

use super::files;
use super::types::Toast;

#[component]
pub(super) fn Topbar(
    status: ReadSignal<String>,
    tags: Signal<Vec<String>>,
    theme: ReadSignal<Theme>,
    set_theme: WriteSignal<Theme>,
    on_export: Callback<()>,
    on_fullscreen: Callback<()>,
) -> impl IntoView {
    view! {
        <header class="app-header">
            <div class="app-header-left">
                <h1 class="brand">"Gamebox"</h1>
                <For each=move || tags.get() key=|t| t.clone() children=move |t| {
                    view! { <span class="tag">{t}</span> }
                } />
            </div>
            <div class="app-header-right">
                <span class="status">{move || status.get()}</span>
                <button class="btn sm ghost" title="Fullscreen" on:click=move |_| on_fullscreen.run(())>
                    "⛶ Fullscreen"
                </button>
                <button class="btn sm ghost" title="Download the raw game HTML" on:click=move |_| on_export.run(())>
                    "⬇ Export"
                </button>
                <button
                    class="btn sm ghost"
                    title=move || format!("Theme: {}", theme.get().label())
                    on:click=move |_| set_theme.set(theme.get().toggle())
                >
                    {move || theme.get().icon()}" "{move || theme.get().label()}
                </button>
            </div>
        </header>
    }
}

#[component]
pub(super) fn ToastStack(toasts: RwSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-stack" aria-live="polite" aria-relevant="additions removals">
            <For
                each=move || toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    view! {
                        <div class=t.level.css_class()>
                            <div style="flex: 1; white-space: pre-wrap;">{t.message}</div>
                            <button
                                class="toast-close"
                                title="Dismiss"
                                on:click=move |_| toasts.update(|ts| ts.retain(|x| x.id != id))
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub(super) fn ImportPanel(
    on_load: Callback<GameData>,
    on_error: Callback<String>,
) -> impl IntoView {
    let pasted = RwSignal::new(String::new());

    let load_pasted = move |_| {
        let text = pasted.get_untracked();
        if text.trim().is_empty() {
            on_error.run("nothing to load: paste some markup first".to_string());
            return;
        }
        on_load.run(GameData::from_html(text));
    };

    let load_file = move |ev: leptos::ev::Event| {
        let input = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok());
        let Some(file) = input.and_then(|i| i.files()).and_then(|fs| fs.get(0)) else {
            return;
        };
        wasm_bindgen_futures::spawn_local(async move {
            match files::read_file_text(file).await {
                Ok(text) => on_load.run(GameData::from_html(text)),
                Err(e) => on_error.run(format!("import failed: {e}")),
            }
        });
    };

    view! {
        <div class="panel">
            <div class="panel-title">"Load a game"</div>
            <textarea
                class="paste-box"
                rows="6"
                placeholder="Paste generated game HTML here"
                prop:value=move || pasted.get()
                on:input=move |ev| pasted.set(event_target_value(&ev))
            ></textarea>
            <div class="row">
                <button class="btn" on:click=load_pasted>
                    "Load pasted markup"
                </button>
                <label class="btn ghost file-btn">
                    "Open file…"
                    <input type="file" accept=".html,.htm,text/html" on:change=load_file />
                </label>
            </div>
        </div>
    }
}

#[component]
pub(super) fn ScorePanel(score: ReadSignal<ScoreState>) -> impl IntoView {
    view! {
        <div class="panel">
            <div class="panel-title">"Score"</div>
            <Stat label="Correct" value=move || score.get().correct.to_string() />
            <Stat label="Wrong" value=move || score.get().wrong.to_string() />
            <Stat label="Progress" value=move || {
                format!("{}/{}", score.get().progress, PROGRESS_MAX)
            } />
        </div>
    }
}

#[component]
pub(super) fn DiagnosticsPanel(report: ReadSignal<Vec<Diagnostic>>) -> impl IntoView {
    view! {
        <div class="panel diag-panel">
            <Show when=move || report.get().is_empty()>
                <p class="subtle">"No findings for this document."</p>
            </Show>
            <For
                each=move || report.get()
                key=|d| d.rule
                children=move |d| {
                    view! {
                        <div class="diag-row">
                            <span class=severity_class(d.severity)>{d.severity.label()}</span>
                            <span class="diag-msg">{d.message.clone()}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
pub(super) fn Stat(label: &'static str, value: impl Fn() -> String + Send + 'static) -> impl IntoView {
    view! {
        <div class="stat-row">
            <div class="stat-label">{label}</div>
            <div class="stat-value">{value}</div>
        </div>
    }
}
