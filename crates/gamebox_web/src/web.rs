use leptos::prelude::*;

use gamebox::diagnostics::{analyze, Diagnostic};
use gamebox::enhance::inject;
use gamebox::manifest::GameData;
use gamebox::protocol::HostAction;
use gamebox::score::ScoreState;

use crate::ui_model::{meta_tags, toast_level_for, PanelTab, ToastLevel};

mod bridge;
mod files;
mod frame;
mod shell;
mod storage;
mod types;

use shell::{DiagnosticsPanel, ImportPanel, ScorePanel, ToastStack, Topbar};
use types::Toast;

const MAX_TOASTS: usize = 5;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let (game, set_game) = signal::<Option<GameData>>(None);
    let (report, set_report) = signal::<Vec<Diagnostic>>(Vec::new());
    let (enhanced, set_enhanced) = signal(String::new());
    let (score, set_score) = signal(storage::load_score().unwrap_or_default());
    let (status, set_status) = signal(String::new());
    let (tab, set_tab) = signal(PanelTab::Preview);
    let (theme, set_theme) = signal(storage::load_theme());
    let toasts: RwSignal<Vec<Toast>> = RwSignal::new(Vec::new());

    Effect::new(move |_| storage::save_theme(theme.get()));

    let push_toast = move |level: ToastLevel, text: String| {
        toasts.update(|ts| {
            ts.push(Toast::new(level, text));
            if ts.len() > MAX_TOASTS {
                ts.remove(0);
            }
        });
    };

    // Everything the frame reports arrives here: dialog text becomes a
    // toast, score payloads go through the reducer.
    if let Err(e) = bridge::install(move |action| match action {
        HostAction::Notify { level, text } => push_toast(toast_level_for(level), text),
        HostAction::UpdateScore { payload } => {
            let next = score.get_untracked().apply(&payload);
            set_score.set(next);
            storage::save_score(&next);
        }
        HostAction::Drop => {}
    }) {
        set_status.set(format!("message bridge unavailable: {e}"));
    }

    let load_game = move |data: GameData| {
        set_report.set(analyze(&data.html));
        set_enhanced.set(inject(&data.html));

        // A new document is a new session for the score, while re-analysis
        // of the same game keeps whatever the frame last reported.
        let fresh = ScoreState::default();
        set_score.set(fresh);
        storage::save_score(&fresh);

        let title = if data.meta.title.trim().is_empty() {
            "untitled game".to_string()
        } else {
            data.meta.title.clone()
        };
        set_status.set(format!("loaded {title}"));
        set_game.set(Some(data));
        set_tab.set(PanelTab::Preview);
    };

    let do_export = move |_: ()| {
        let Some(data) = game.get_untracked() else {
            push_toast(ToastLevel::Error, "nothing to export yet".to_string());
            return;
        };
        let filename = data.export_filename();
        // Exports always carry the raw, pre-enhancement markup.
        match files::download_text(&filename, &data.html) {
            Ok(()) => set_status.set(format!("exported {filename}")),
            Err(e) => push_toast(ToastLevel::Error, format!("export failed: {e}")),
        }
    };

    let preview_ref: NodeRef<leptos::html::Div> = NodeRef::new();
    let do_fullscreen = move |_: ()| {
        if let Some(el) = preview_ref.get_untracked() {
            frame::toggle_fullscreen(&el);
        }
    };

    view! {
        <div class=move || format!("app theme-{}", theme.get().storage_value())>
            <Topbar
                status=status
                tags=Signal::derive(move || {
                    game.get().map(|g| meta_tags(&g.meta)).unwrap_or_default()
                })
                theme=theme
                set_theme=set_theme
                on_export=Callback::new(do_export)
                on_fullscreen=Callback::new(do_fullscreen)
            />

            <main class="layout">
                <section class="side">
                    <ImportPanel
                        on_load=Callback::new(load_game)
                        on_error=Callback::new(move |e: String| {
                            push_toast(ToastLevel::Error, e)
                        })
                    />
                    <ScorePanel score=score />
                </section>

                <section class="stage">
                    <nav class="tabs">
                        {PanelTab::all()
                            .iter()
                            .map(|&t| {
                                view! {
                                    <button
                                        class=move || {
                                            if tab.get() == t { "tab active" } else { "tab" }
                                        }
                                        on:click=move |_| set_tab.set(t)
                                    >
                                        {t.label()}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </nav>

                    <div class="stage-body" node_ref=preview_ref>
                        <Show
                            when=move || game.get().is_some()
                            fallback=|| {
                                view! {
                                    <p class="subtle empty-hint">
                                        "Paste or open a generated game to get started."
                                    </p>
                                }
                            }
                        >
                            <Show when=move || tab.get() == PanelTab::Preview>
                                <iframe
                                    class="game-frame"
                                    attr:sandbox="allow-scripts"
                                    attr:srcdoc=move || enhanced.get()
                                ></iframe>
                            </Show>
                            <Show when=move || tab.get() == PanelTab::Diagnostics>
                                <DiagnosticsPanel report=report />
                            </Show>
                            <Show when=move || tab.get() == PanelTab::Source>
                                <pre class="source">
                                    {move || game.get().map(|g| g.html).unwrap_or_default()}
                                </pre>
                            </Show>
                        </Show>
                    </div>
                </section>
            </main>

            <ToastStack toasts=toasts />
        </div>
    }
}
