//! Conversation controller
//!
//! Send semantics: echo the user message first, clear the staged attachment
//! unconditionally, issue exactly one request, then either reveal the model
//! reply or append a fixed error notice. The view drives the same steps over
//! signals; `run_send` is the headless form the tests exercise.

use crate::chat::ChatBackend;
use crate::transcript::Transcript;
use crate::types::{Attachment, MessageId, Sender};
use tracing::warn;

/// Rendered verbatim when the transport fails, whatever the cause.
pub const SEND_FAILURE_NOTICE: &str = "Failed to fetch a response from the server.";

/// A validated outgoing message: non-empty text, an attachment, or both.
#[derive(Debug)]
pub struct SendRequest {
    text: String,
    attachment: Option<Attachment>,
}

impl SendRequest {
    /// `None` when there is nothing to send; the caller then does nothing and
    /// issues no request. Anything else, whitespace included, goes through
    /// verbatim.
    pub fn compose(text: &str, attachment: Option<Attachment>) -> Option<Self> {
        if text.is_empty() && attachment.is_none() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            attachment,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// What the transcript shows for the user turn: the text, or the file
    /// name when only an attachment is staged.
    pub fn user_echo(&self) -> String {
        if self.text.is_empty() {
            self.attachment
                .as_ref()
                .map(|file| file.name.clone())
                .unwrap_or_default()
        } else {
            self.text.clone()
        }
    }
}

/// Drive one full send against a backend. The staged attachment is taken up
/// front, so it is cleared whether or not the request succeeds. On success
/// the empty model block is appended and returned with the full reply for
/// the caller's reveal loop; on failure the error notice is appended.
pub async fn run_send(
    transcript: &mut Transcript,
    backend: &dyn ChatBackend,
    text: &str,
    pending: &mut Option<Attachment>,
) -> Option<(MessageId, String)> {
    let request = SendRequest::compose(text, pending.take())?;
    transcript.append(Sender::User, request.user_echo());

    match backend.exchange(request.text(), request.attachment()).await {
        Ok(body) => {
            let id = transcript.append(Sender::Model, "");
            Some((id, body))
        }
        Err(err) => {
            warn!("chat request failed: {err}");
            transcript.append(Sender::Error, SEND_FAILURE_NOTICE);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_rejects_empty_input() {
        assert!(SendRequest::compose("", None).is_none());
    }

    #[test]
    fn compose_passes_whitespace_text_through_verbatim() {
        let request = SendRequest::compose("  padded  ", None).expect("send");
        assert_eq!(request.text(), "  padded  ");
        assert_eq!(request.user_echo(), "  padded  ");
    }

    #[test]
    fn compose_accepts_attachment_only_sends() {
        let attachment = Attachment {
            name: "notes.txt".to_string(),
            bytes: b"hello".to_vec(),
        };
        let request = SendRequest::compose("", Some(attachment)).expect("attachment send");
        assert_eq!(request.user_echo(), "notes.txt");
        assert_eq!(request.text(), "");
    }

    #[test]
    fn user_echo_prefers_text_over_the_file_name() {
        let attachment = Attachment {
            name: "notes.txt".to_string(),
            bytes: Vec::new(),
        };
        let request = SendRequest::compose("see attached", Some(attachment)).expect("send");
        assert_eq!(request.user_echo(), "see attached");
    }
}
