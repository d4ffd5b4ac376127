use crate::storage::PrefStore;
use crate::theme::{ThemeManager, UiPrefs, theme_definition};
use crate::transcript::Transcript;
use crate::types::{Sender, ThemeMode};
use crate::views::{ChatView, shared};
use dioxus::prelude::*;
use std::time::Duration;
use tracing::{info, warn};

const NIGHTJAR_CSS: Asset = asset!("/assets/nightjar.css");
const WELCOME_DELAY: Duration = Duration::from_millis(500);
const TOAST_DISMISS_DELAY: Duration = Duration::from_secs(2);
const WELCOME_MESSAGE: &str = "\u{1f44b} Hello! I'm your AI assistant. How can I help you today?";

/// Transient notification state. Every `show` returns a ticket and only the
/// dismiss timer holding the current ticket may clear the label, so a stale
/// timer never hides a newer notice.
#[derive(Clone, Debug, Default, PartialEq)]
struct ToastState {
    label: Option<String>,
    ticket: u64,
}

impl ToastState {
    fn show(&mut self, label: String) -> u64 {
        self.ticket += 1;
        self.label = Some(label);
        self.ticket
    }

    fn dismiss(&mut self, ticket: u64) {
        if self.ticket == ticket {
            self.label = None;
        }
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

#[component]
pub fn App() -> Element {
    let store = use_hook(PrefStore::open);
    let theme = use_signal({
        let store = store.clone();
        move || ThemeManager::startup(store.clone())
    });
    let ui_prefs = use_signal({
        let store = store.clone();
        move || UiPrefs::load(&store)
    });
    let transcript = use_signal(Transcript::new);
    let toast = use_signal(ToastState::default);
    let confirm_clear = use_signal(|| false);
    let pending_welcome = use_signal(|| true);

    use_welcome_message(transcript, pending_welcome);

    let mut toast_signal = toast;
    let mut show_toast = move |label: String| {
        let ticket = toast_signal.with_mut(|state| state.show(label));
        spawn(async move {
            tokio::time::sleep(TOAST_DISMISS_DELAY).await;
            toast_signal.with_mut(|state| state.dismiss(ticket));
        });
    };

    let mut theme_signal = theme;
    let mut toggle_theme = move || {
        let next = theme_signal.with_mut(|manager| manager.toggle());
        show_toast(ThemeManager::notification_label(next).to_string());
    };

    let transcript_signal = transcript;
    let mut save_transcript = move || {
        match transcript_signal.with(|t| shared::export_transcript(t)) {
            Ok(path) => {
                info!("saved transcript to {}", path.display());
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                show_toast(format!("Saved {name}"));
            }
            Err(err) => {
                warn!("failed to save transcript: {err}");
                show_toast("Save failed".to_string());
            }
        }
    };

    let mut ui_prefs_signal = ui_prefs;
    let store_for_prefs = store.clone();
    let mut apply_font_delta = move |delta: i32| {
        let next = ui_prefs_signal().with_font_delta(delta);
        ui_prefs_signal.set(next);
        next.save(&store_for_prefs);
    };

    let mut confirm_signal = confirm_clear;
    let mut transcript_for_clear = transcript;

    let current_theme = theme.with(|manager| manager.current());

    rsx! {
        ThemeStyles { base_font_px: ui_prefs().font_px, theme: current_theme }
        AppHeader {
            theme: current_theme,
            on_toggle_theme: move |_| toggle_theme(),
            on_save: move |_| save_transcript(),
            on_clear: move |_| confirm_signal.set(true),
        }
        ChatView {
            transcript,
            on_toggle_theme: move |_| toggle_theme(),
            on_request_clear: move |_| confirm_signal.set(true),
            on_font_delta: move |delta| apply_font_delta(delta),
        }
        if let Some(label) = toast.with(|state| state.label().map(str::to_string)) {
            div { class: "toast", "{label}" }
        }
        if confirm_clear() {
            ConfirmClearOverlay {
                on_confirm: move |_| {
                    transcript_for_clear.with_mut(|t| t.clear());
                    confirm_signal.set(false);
                },
                on_cancel: move |_| confirm_signal.set(false),
            }
        }
    }
}

/// Pushes the greeting into the transcript shortly after startup.
fn use_welcome_message(transcript: Signal<Transcript>, pending: Signal<bool>) {
    use_effect(move || {
        if pending() {
            let mut transcript = transcript;
            let mut pending = pending;
            spawn(async move {
                tokio::time::sleep(WELCOME_DELAY).await;
                pending.set(false);
                transcript.with_mut(|t| t.append(Sender::Model, WELCOME_MESSAGE));
            });
        }
    });
}

#[component]
fn ThemeStyles(base_font_px: i32, theme: ThemeMode) -> Element {
    let root_style = format!(":root {{ font-size: {base_font_px}px; }}");
    let definition = theme_definition(theme);
    rsx! {
        document::Link { rel: "stylesheet", href: NIGHTJAR_CSS }
        style { dangerous_inner_html: "{root_style}" }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn AppHeader(
    theme: ThemeMode,
    on_toggle_theme: EventHandler<()>,
    on_save: EventHandler<()>,
    on_clear: EventHandler<()>,
) -> Element {
    let definition = theme_definition(theme);
    let toggle_label = match theme {
        ThemeMode::Dark => "\u{2600}\u{fe0f}",
        ThemeMode::Light => "\u{1f319}",
    };
    rsx! {
        div { class: "header",
            div { class: "header-content",
                span { class: "{definition.wordmark_class}", "Nightjar" }
                div { class: "header-actions",
                    button {
                        class: "btn",
                        r#type: "button",
                        title: "Toggle theme",
                        onclick: move |_| on_toggle_theme.call(()),
                        "{toggle_label}"
                    }
                    button {
                        class: "btn",
                        r#type: "button",
                        title: "Save conversation",
                        onclick: move |_| on_save.call(()),
                        "Save"
                    }
                    button {
                        class: "btn",
                        r#type: "button",
                        title: "Clear conversation",
                        onclick: move |_| on_clear.call(()),
                        "Clear"
                    }
                }
            }
        }
    }
}

#[component]
fn ConfirmClearOverlay(on_confirm: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        div { class: "overlay",
            div { class: "overlay-card",
                p { "Are you sure you want to clear the conversation?" }
                div { class: "overlay-actions",
                    button {
                        class: "btn",
                        r#type: "button",
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(()),
                        "Clear"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ToastState;

    #[test]
    fn dismiss_with_current_ticket_clears_the_notice() {
        let mut toast = ToastState::default();
        let ticket = toast.show("Saved chat-2026-08-28.html".to_string());
        assert_eq!(toast.label(), Some("Saved chat-2026-08-28.html"));

        toast.dismiss(ticket);
        assert_eq!(toast.label(), None);
    }

    #[test]
    fn stale_dismiss_leaves_a_newer_notice_in_place() {
        let mut toast = ToastState::default();
        let first = toast.show("Dark Mode".to_string());
        let second = toast.show("Light Mode".to_string());

        toast.dismiss(first);
        assert_eq!(toast.label(), Some("Light Mode"));

        toast.dismiss(second);
        assert_eq!(toast.label(), None);
    }
}
