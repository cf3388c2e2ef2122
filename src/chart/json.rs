use crate::error::{TutorError, TutorResult};
use serde_json::Value;

/// Recovers the JSON payload embedded in a model reply.
///
/// Tries, in order: a ```json fenced block, a plain ``` fenced block, the
/// first `{…}` brace-delimited substring, then the whole text. The first
/// structural hit is parsed; there is no second attempt if it fails.
pub fn parse_payload(response: &str) -> TutorResult<Value> {
    let candidate = locate_json(response);
    serde_json::from_str(candidate.trim()).map_err(|e| TutorError::ChartData {
        reason: e.to_string(),
    })
}

fn locate_json(response: &str) -> &str {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```json") {
        if let Some(end) = trimmed[start + 7..].find("```") {
            return trimmed[start + 7..start + 7 + end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        if let Some(end) = trimmed[start + 3..].find("```") {
            return trimmed[start + 3..start + 3 + end].trim();
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return &trimmed[start..=end];
        }
    }

    trimmed
}
