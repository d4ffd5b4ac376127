/// Chat transport for Nightjar
///
/// One endpoint, one request shape: a multipart form with a `msg` text field
/// and an optional `file` part. The plain-text response body is the whole
/// reply; there is no streaming framing and no structured payload.
///
/// `ChatBackend` is the seam the conversation controller talks through, so
/// tests can swap the HTTP client for a mock.
mod client;

pub use client::{ChatBackend, ChatError, ChatResult, DEFAULT_ENDPOINT, HttpBackend};
