//! Transcript model
//!
//! The ordered list of rendered messages plus the typewriter reveal used
//! for model replies. The view layer owns scrolling and timing; everything
//! here is synchronous state.

use crate::types::{Message, MessageId, Sender};
use std::time::Duration;
use time::OffsetDateTime;

/// Cadence of the typewriter reveal, one character per tick.
pub const REVEAL_INTERVAL: Duration = Duration::from_millis(30);

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
    next_id: MessageId,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message block at the end of the transcript. Empty content is
    /// accepted; reveal targets start that way.
    pub fn append(&mut self, sender: Sender, content: impl Into<String>) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(Message {
            id,
            sender,
            content: content.into(),
            created_at: Some(OffsetDateTime::now_utc()),
        });
        id
    }

    /// Replace the content of an existing block. Returns false when the id is
    /// gone, which happens after `clear`; reveal drivers stop on that.
    pub fn set_content(&mut self, id: MessageId, content: impl Into<String>) -> bool {
        match self.find_mut(id) {
            Some(msg) => {
                msg.content = content.into();
                true
            }
            None => false,
        }
    }

    /// Append one revealed character to an existing block.
    pub fn splice(&mut self, id: MessageId, ch: char) -> bool {
        match self.find_mut(id) {
            Some(msg) => {
                msg.content.push(ch);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|msg| msg.id == id)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Remove every message and reset the id counter.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.next_id = 0;
    }

    /// Serialize the transcript into export markup, one block per message.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for msg in &self.messages {
            out.push_str(&format!(
                "<div class=\"message {}\">\n  <div class=\"msg-header\">{}</div>\n  <div class=\"msg-body\">{}</div>\n</div>\n",
                msg.sender.css_class(),
                msg.sender.label(),
                escape_html(&msg.content),
            ));
        }
        out
    }

    fn find_mut(&mut self, id: MessageId) -> Option<&mut Message> {
        self.messages.iter_mut().find(|msg| msg.id == id)
    }
}

/// Per-message reveal task state. Yields one character per tick until the
/// text is exhausted; an empty text terminates immediately. Each reveal is
/// independent, so overlapping replies interleave in arrival order.
#[derive(Debug)]
pub struct Reveal {
    chars: Vec<char>,
    cursor: usize,
}

impl Reveal {
    pub fn new(full_text: &str) -> Self {
        Self {
            chars: full_text.chars().collect(),
            cursor: 0,
        }
    }

    pub fn tick(&mut self) -> Option<char> {
        let ch = self.chars.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(ch)
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.chars.len()
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_assigns_monotonic_ids() {
        let mut transcript = Transcript::new();
        let a = transcript.append(Sender::User, "hello");
        let b = transcript.append(Sender::Model, "");
        assert_eq!((a, b), (0, 1));
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn clear_resets_the_id_counter() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "hello");
        transcript.append(Sender::Model, "hi");
        transcript.clear();
        assert!(transcript.is_empty());
        assert_eq!(transcript.append(Sender::User, "again"), 0);
    }

    #[test]
    fn splice_on_a_cleared_transcript_reports_dead_target() {
        let mut transcript = Transcript::new();
        let id = transcript.append(Sender::Model, "");
        transcript.clear();
        assert!(!transcript.splice(id, 'x'));
        assert!(!transcript.set_content(id, "x"));
    }

    #[test]
    fn reveal_of_empty_text_terminates_immediately() {
        let mut reveal = Reveal::new("");
        assert!(reveal.is_done());
        assert_eq!(reveal.tick(), None);
    }

    #[test]
    fn reveal_yields_exactly_one_tick_per_character() {
        let mut transcript = Transcript::new();
        let id = transcript.append(Sender::Model, "");
        let mut reveal = Reveal::new("Hi");
        let mut updates = 0;
        while let Some(ch) = reveal.tick() {
            assert!(transcript.splice(id, ch));
            updates += 1;
        }
        assert_eq!(updates, 2);
        assert!(reveal.is_done());
        assert_eq!(transcript.get(id).map(|m| m.content.as_str()), Some("Hi"));
    }

    #[test]
    fn to_html_escapes_message_content() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::User, "<b>hi</b> & bye");
        let html = transcript.to_html();
        assert!(html.contains("message user"));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt; &amp; bye"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn to_html_tags_error_blocks() {
        let mut transcript = Transcript::new();
        transcript.append(Sender::Error, "boom");
        assert!(transcript.to_html().contains("message model error"));
    }
}
