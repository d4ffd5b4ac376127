use crate::chat::{ChatBackend, HttpBackend};
use crate::conversation::{SEND_FAILURE_NOTICE, SendRequest};
use crate::transcript::{REVEAL_INTERVAL, Reveal, Transcript};
use crate::types::{Attachment, Sender};
use crate::views::shared::format_message_timestamp;
use dioxus::events::Key;
use dioxus::prelude::*;
use std::sync::Arc;
use time::OffsetDateTime;
use tracing::warn;

/// Scroll the transcript into view after every insertion.
fn scroll_to_bottom() {
    let _ = document::eval(
        r#"const list = document.getElementById("chat-list"); if (list) { list.scrollTop = list.scrollHeight; }"#,
    );
}

#[component]
pub fn ChatView(
    transcript: Signal<Transcript>,
    on_toggle_theme: EventHandler<()>,
    on_request_clear: EventHandler<()>,
    on_font_delta: EventHandler<i32>,
) -> Element {
    let mut input = use_signal(String::new);
    let pending_attachment = use_signal(|| Option::<Attachment>::None);
    let backend = use_signal(|| Arc::new(HttpBackend::from_env()));

    let mut send_message = {
        let mut transcript = transcript;
        let mut input_signal = input;
        let mut pending = pending_attachment;
        move |raw: String| {
            let staged = pending.with_mut(|slot| slot.take());
            let Some(request) = SendRequest::compose(&raw, staged) else {
                return;
            };

            transcript.with_mut(|t| t.append(Sender::User, request.user_echo()));
            input_signal.set(String::new());
            scroll_to_bottom();

            // Overlapping sends stay independent; replies land in arrival order.
            let backend = backend();
            spawn(async move {
                match backend.exchange(request.text(), request.attachment()).await {
                    Ok(body) => {
                        let id = transcript.with_mut(|t| t.append(Sender::Model, ""));
                        scroll_to_bottom();
                        let mut reveal = Reveal::new(&body);
                        while let Some(ch) = reveal.tick() {
                            tokio::time::sleep(REVEAL_INTERVAL).await;
                            // The target vanishes when the transcript is cleared
                            // mid-reveal; stop writing then.
                            if !transcript.with_mut(|t| t.splice(id, ch)) {
                                break;
                            }
                            scroll_to_bottom();
                        }
                    }
                    Err(err) => {
                        warn!("chat request failed: {err}");
                        transcript.with_mut(|t| t.append(Sender::Error, SEND_FAILURE_NOTICE));
                        scroll_to_bottom();
                    }
                }
            });
        }
    };

    let stage_attachment = {
        let mut transcript = transcript;
        let mut pending = pending_attachment;
        move |ev: Event<FormData>| {
            if let Some(engine) = ev.files() {
                spawn(async move {
                    if let Some(name) = engine.files().into_iter().next() {
                        if let Some(bytes) = engine.read_file(&name).await {
                            transcript.with_mut(|t| {
                                t.append(Sender::User, format!("Selected file: {name}"))
                            });
                            scroll_to_bottom();
                            pending.set(Some(Attachment { name, bytes }));
                        }
                    }
                });
            }
        }
    };

    let snapshot = transcript();
    let has_input = !input().is_empty() || pending_attachment().is_some();

    rsx! {
        div { class: "main-container",
            // Shortcuts bubble here so they work wherever focus sits inside
            // the chat area, not just the textarea.
            onkeydown: move |ev| {
                if !(ev.modifiers().meta() || ev.modifiers().ctrl()) {
                    return;
                }
                if ev.key() == Key::Character("k".into()) {
                    ev.prevent_default();
                    on_request_clear.call(());
                } else if ev.key() == Key::Character("d".into()) {
                    ev.prevent_default();
                    on_toggle_theme.call(());
                } else if ev.key() == Key::Character("+".into())
                    || ev.key() == Key::Character("=".into())
                {
                    ev.prevent_default();
                    on_font_delta.call(1);
                } else if ev.key() == Key::Character("-".into()) {
                    ev.prevent_default();
                    on_font_delta.call(-1);
                }
            },
            div { class: "chat-wrap",
                div { id: "chat-list", class: "chat-list",
                    for msg in snapshot.messages().iter() {
                        MessageRow {
                            sender: msg.sender,
                            content: msg.content.clone(),
                            created_at: msg.created_at,
                        }
                    }
                }
            }

            form { class: "composer",
                div { class: "composer-inner",
                    label { class: "btn attach-btn", r#for: "file-input", "+" }
                    input {
                        id: "file-input",
                        class: "file-input",
                        r#type: "file",
                        onchange: stage_attachment,
                    }
                    textarea {
                        rows: "1",
                        placeholder: "What can I help you with?",
                        value: "{input}",
                        oninput: move |ev| input.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.modifiers().meta() || ev.modifiers().ctrl() {
                                return;
                            }
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                let text = input();
                                send_message(text);
                            }
                        },
                        autofocus: true,
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: !has_input,
                        onclick: move |_| {
                            let text = input();
                            send_message(text);
                        },
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn MessageRow(sender: Sender, content: String, created_at: Option<OffsetDateTime>) -> Element {
    rsx! {
        div { class: format_args!("message-row {}", sender.css_class()),
            div { class: "message-stack",
                div { class: "msg-header", "{sender.label()}" }
                div { class: format_args!("bubble {}", sender.css_class()), "{content}" }
                div { class: "message-meta",
                    if let Some(ts) = format_message_timestamp(created_at) {
                        span { class: "message-timestamp", "{ts}" }
                    }
                    if matches!(sender, Sender::Model) {
                        CopyButton { content }
                    }
                }
            }
        }
    }
}

#[component]
fn CopyButton(content: String) -> Element {
    let on_copy = move |_| {
        let raw = content.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut clipboard) = arboard::Clipboard::new() {
                    let _ = clipboard.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };

    rsx! {
        button { class: "action-btn", r#type: "button", title: "Copy reply", onclick: on_copy, "Copy" }
    }
}
