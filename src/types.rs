use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Identifies who produced a transcript block. The error variant is a real
/// sender rather than a styling flag so every variant carries its own
/// rendering policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Model,
    Error,
}

impl Sender {
    /// Header label shown above the message body.
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "User",
            Sender::Model => "Model",
            Sender::Error => "Error",
        }
    }

    /// CSS class for the message block. Errors render as model bubbles with
    /// an error accent.
    pub fn css_class(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Model => "model",
            Sender::Error => "model error",
        }
    }
}

/// Opaque identifier handed out by the transcript; stable until `clear`.
pub type MessageId = u64;

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub content: String,
    pub created_at: Option<OffsetDateTime>,
}

/// The single file staged for the next send. Cleared unconditionally after
/// every send attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Total parse: anything other than "light" normalizes to dark.
    pub fn parse(value: &str) -> ThemeMode {
        if value == "light" {
            ThemeMode::Light
        } else {
            ThemeMode::Dark
        }
    }

    pub fn flipped(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_unknown_values_to_dark() {
        assert_eq!(ThemeMode::parse("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::parse("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::parse("anything-else"), ThemeMode::Dark);
        assert_eq!(ThemeMode::parse(""), ThemeMode::Dark);
    }

    #[test]
    fn flipping_twice_is_identity() {
        assert_eq!(ThemeMode::Light.flipped().flipped(), ThemeMode::Light);
        assert_eq!(ThemeMode::Dark.flipped().flipped(), ThemeMode::Dark);
    }

    #[test]
    fn sender_rendering_policy() {
        assert_eq!(Sender::User.label(), "User");
        assert_eq!(Sender::Error.css_class(), "model error");
    }
}
