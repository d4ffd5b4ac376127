//! Nightjar - a small desktop chat client
//!
//! Talks to a single chat endpoint over multipart POST, renders the reply
//! with a typewriter reveal, and keeps a persisted light/dark theme.

pub mod chat;
pub mod conversation;
pub mod storage;
pub mod theme;
pub mod transcript;
pub mod types;
pub mod ui;
pub mod views;
