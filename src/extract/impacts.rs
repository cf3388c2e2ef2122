use super::section_after;
use regex::Regex;
use tracing::{debug, warn};

/// The three impact horizons the simulator reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Short,
    Medium,
    Long,
}

impl Timeframe {
    /// Section label the model is asked to emit (the reply uses it as a
    /// header like `短期影响`).
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Short => "短期",
            Timeframe::Medium => "中期",
            Timeframe::Long => "长期",
        }
    }

    fn default_bullets(&self) -> [&'static str; 2] {
        match self {
            Timeframe::Short => ["消费支出增加", "市场利率随政策调整波动"],
            Timeframe::Medium => ["通货膨胀压力上升", "企业投资活动增加"],
            Timeframe::Long => ["可能积累经济泡沫风险", "本币面临贬值压力"],
        }
    }
}

/// Recovers the bullet list for one timeframe out of the raw reply.
///
/// Finds the first occurrence of the timeframe label followed by a newline,
/// captures until the next blank line, splits on `-`/`•`/`*` at line starts
/// and keeps the non-empty fragments in order. An empty harvest falls back
/// to the timeframe's two stock bullets; an internal failure yields a single
/// parse-failure bullet. Never returns an empty list and never errors.
pub fn extract_impacts(text: &str, timeframe: Timeframe) -> Vec<String> {
    match try_extract(text, timeframe.label()) {
        Ok(bullets) if !bullets.is_empty() => bullets,
        Ok(_) => {
            debug!(timeframe = timeframe.label(), "impact section missing, using defaults");
            timeframe
                .default_bullets()
                .iter()
                .map(|bullet| bullet.to_string())
                .collect()
        }
        Err(e) => {
            warn!(timeframe = timeframe.label(), error = %e, "impact extraction failed");
            vec![format!("无法解析{}影响数据", timeframe.label())]
        }
    }
}

fn try_extract(text: &str, label: &str) -> Result<Vec<String>, regex::Error> {
    let block = match section_after(text, label) {
        Some(block) => block,
        None => return Ok(Vec::new()),
    };

    let splitter = Regex::new(r"(?m)^\s*[-•*]\s*")?;
    let bullets = splitter
        .split(block)
        .map(str::trim)
        // Guard against the header re-appearing inside a fragment.
        .filter(|fragment| !fragment.is_empty() && !fragment.starts_with(label))
        .map(str::to_string)
        .collect();

    Ok(bullets)
}
