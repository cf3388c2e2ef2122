//! # Completion endpoint client
//!
//! Thin wrapper over the chat-completions HTTP API the whole application is
//! backed by. The module distinguishes three outcomes:
//!
//! ```text
//! success            → assistant text, unmodified
//! HTTP-level failure → TutorError::Api with the service-reported message
//! transport failure  → TutorError::Network / TutorError::Envelope
//! ```
//!
//! Callers never talk to [`DeepSeekClient`] directly in tests: the
//! [`CompletionBackend`] trait is the seam where a scripted double (or a
//! future structured-output client) can be swapped in.

mod client;

pub use client::{
    ChatRequest, ChatResponse, Choice, CompletionBackend, CompletionOptions, DeepSeekClient,
    WireMessage,
};
