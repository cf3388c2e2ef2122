//! Heuristic recovery of structured fields from free-form model output.
//!
//! The upstream model is asked for a clearly structured reply, but nothing
//! enforces that contract, so every pass here is defensive by construction:
//! a miss degrades to a hard-coded default and an internal failure is
//! swallowed behind a sentinel value. Nothing in this module returns an
//! error to its caller.
//!
//! Misfires on unexpected phrasing are an accepted trade-off. When the
//! upstream gains structured output, these passes can be replaced behind the
//! same signatures without touching callers.

mod description;
mod history;
mod impacts;

pub use description::extract_description;
pub use history::extract_historical_examples;
pub use impacts::{extract_impacts, Timeframe};

/// Captures the body of a labeled section: text from the line after the
/// first occurrence of `label` up to the next blank line or end of input.
/// The remainder of the label's own line is skipped.
pub(crate) fn section_after<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let start = text.find(label)?;
    let after_label = &text[start + label.len()..];
    let newline = after_label.find('\n')?;
    let body = &after_label[newline + 1..];
    let end = body.find("\n\n").unwrap_or(body.len());
    Some(&body[..end])
}
