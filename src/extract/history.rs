use crate::types::HistoricalExample;
use regex::Regex;
use tracing::{debug, warn};

const SECTION_LABEL: &str = "历史案例";

/// Fallback pair shown when the reply has no usable historical section.
fn default_examples() -> Vec<HistoricalExample> {
    vec![
        HistoricalExample {
            year: 2008,
            country: "美国".to_string(),
            outcome: "量化宽松政策帮助稳定了金融危机后的市场".to_string(),
        },
        HistoricalExample {
            year: 1997,
            country: "日本".to_string(),
            outcome: "零利率政策导致流动性陷阱".to_string(),
        },
    ]
}

/// Recovers `年份，国家：结果` rows from the `历史案例：` section.
///
/// Per line: a 4-digit year is required and the line must be longer than
/// five characters. The country is the first token ending in `国`, else the
/// token immediately after the year, else `全球`. The outcome is the line
/// with the year token and the matched country stripped out. A section miss
/// or an empty harvest yields the stock defaults; an internal failure yields
/// a single sentinel row. Never returns an empty list and never errors.
pub fn extract_historical_examples(text: &str) -> Vec<HistoricalExample> {
    match try_extract(text) {
        Ok(examples) if !examples.is_empty() => examples,
        Ok(_) => {
            debug!("historical section missing, using defaults");
            default_examples()
        }
        Err(e) => {
            warn!(error = %e, "historical example extraction failed");
            vec![HistoricalExample {
                year: 0,
                country: "解析错误".to_string(),
                outcome: "无法获取历史案例".to_string(),
            }]
        }
    }
}

/// Body of the labeled section: from right after the colon (full-width or
/// ASCII) up to the next blank line or end of input.
fn section_block(text: &str) -> Option<&str> {
    let start = text.find(SECTION_LABEL)?;
    let after_label = &text[start + SECTION_LABEL.len()..];
    let body = after_label
        .strip_prefix('：')
        .or_else(|| after_label.strip_prefix(':'))?;
    let end = body.find("\n\n").unwrap_or(body.len());
    Some(&body[..end])
}

fn try_extract(text: &str) -> Result<Vec<HistoricalExample>, regex::Error> {
    let block = match section_block(text) {
        Some(block) => block,
        None => return Ok(Vec::new()),
    };

    let year_re = Regex::new(r"(\d{4})年?")?;
    let country_re = Regex::new(r"[^\s，,。：:；;、]*国")?;
    let mut examples = Vec::new();

    for line in block.lines() {
        let line = line.trim();
        let year_match = match year_re.captures(line) {
            Some(captures) => captures,
            None => continue,
        };
        if line.chars().count() <= 5 {
            continue;
        }

        let year: i32 = year_match[1].parse().unwrap_or(0);
        let year_token = year_match
            .get(0)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .to_string();

        let country = country_re
            .find(line)
            .map(|m| m.as_str().to_string())
            .or_else(|| token_after(line, year_match.get(0).map_or(0, |m| m.end())));

        let mut outcome = line.replacen(&year_token, "", 1);
        if let Some(ref country) = country {
            outcome = outcome.replacen(country, "", 1);
        }
        let outcome = outcome
            .trim_matches(|c: char| c.is_whitespace() || "，,。：:；;、".contains(c))
            .to_string();

        examples.push(HistoricalExample {
            year,
            country: country.unwrap_or_else(|| "全球".to_string()),
            outcome,
        });
    }

    Ok(examples)
}

/// First token after the given byte offset, skipping separators.
fn token_after(line: &str, from: usize) -> Option<String> {
    let is_separator = |c: char| c.is_whitespace() || "，,。：:；;、".contains(c);
    let rest = line[from..].trim_start_matches(is_separator);
    let token: String = rest.chars().take_while(|c| !is_separator(*c)).collect();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
