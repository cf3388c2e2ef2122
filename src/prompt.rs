//! Prompt construction for the completion endpoint.
//!
//! The simulation prompt asks for exactly the structure the extraction layer
//! scrapes: timeframe headers followed by `-` bullets, a blank line between
//! sections, and a trailing `历史案例：` block. Parameter values are
//! interpolated verbatim; range checking is the caller's business.

use crate::types::{ChartKind, PolicyKind};
use std::collections::HashMap;

/// Persona for the free-form chat surface.
pub const CHAT_SYSTEM_PROMPT: &str = "你是一位专业的经济学AI导师，擅长用通俗易懂的语言讲解经济学概念、\
     分析经济政策与经济数据。请使用中文回答，条理清晰，必要时结合现实案例说明。";

/// Persona for the simulation surface. The structure requirement lives in
/// the user prompt; the system prompt just pins the role.
pub const SIMULATION_SYSTEM_PROMPT: &str = "你是一位宏观经济政策分析专家。请严格按照用户要求的结构输出分析结果，\
     不要添加无关内容。";

/// Persona for the visualization surface: JSON only, no prose.
pub const VISUALIZATION_SYSTEM_PROMPT: &str =
    "你是一个经济数据服务，只输出JSON格式的数据，不要输出任何其他文字或解释。";

/// Builds the simulation instruction from a policy kind and its parameter
/// mapping. A missing parameter is passed through as 0 rather than rejected;
/// this layer never validates ranges.
pub fn build_simulation_prompt(kind: PolicyKind, params: &HashMap<String, f64>) -> String {
    let rate = params.get(kind.param_key()).copied().unwrap_or(0.0);

    format!(
        "请模拟分析以下{policy}的经济影响：{param}设定为{rate}%。\n\
         请先用一段文字概述该政策的总体影响，然后按以下结构输出分析：\n\n\
         短期影响\n- 第一条要点\n- 第二条要点\n\n\
         中期影响\n- 第一条要点\n- 第二条要点\n\n\
         长期影响\n- 第一条要点\n- 第二条要点\n\n\
         历史案例：\n\
         年份，国家：政策结果（每行一条，年份用四位数字）\n\n\
         请确保回复结构清晰，各部分之间用空行分隔。",
        policy = kind.label(),
        param = kind.param_label(),
        rate = rate,
    )
}

/// Builds the time-boxed data request for a chart kind. The reply is
/// expected to be a bare JSON object covering 2020 through 2030.
pub fn build_visualization_prompt(kind: &ChartKind) -> String {
    match kind {
        ChartKind::SupplyDemand => "请以JSON格式给出2020至2030年某一典型商品市场的供给与需求指数预测，\
             格式为：{\"2020\":{\"supply\":数值,\"demand\":数值},...}。\
             只返回JSON，不要任何额外说明。"
            .to_string(),
        other => format!(
            "请以JSON格式给出2020至2030年{label}的年度预测数据，\
             格式为：{{\"2020\":数值,\"2021\":数值,...}}。\
             只返回JSON，不要任何额外说明。",
            label = other.label(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_prompt_names_policy_and_rate() {
        let mut params = HashMap::new();
        params.insert("interestRate".to_string(), 3.0);
        let prompt = build_simulation_prompt(PolicyKind::Monetary, &params);
        assert!(prompt.contains("货币政策"));
        assert!(prompt.contains("基准利率"));
        assert!(prompt.contains("3%"));
    }

    #[test]
    fn test_simulation_prompt_requests_scrapeable_structure() {
        let prompt = build_simulation_prompt(PolicyKind::Fiscal, &HashMap::new());
        assert!(prompt.contains("短期影响"));
        assert!(prompt.contains("中期影响"));
        assert!(prompt.contains("长期影响"));
        assert!(prompt.contains("历史案例："));
    }

    #[test]
    fn test_out_of_range_rate_passes_through_verbatim() {
        let mut params = HashMap::new();
        params.insert("tariffRate".to_string(), 250.0);
        let prompt = build_simulation_prompt(PolicyKind::Trade, &params);
        assert!(prompt.contains("250%"));
    }

    #[test]
    fn test_visualization_prompt_is_kind_specific() {
        let supply = build_visualization_prompt(&ChartKind::SupplyDemand);
        assert!(supply.contains("supply"));
        assert!(supply.contains("2020"));

        let gdp = build_visualization_prompt(&ChartKind::GdpGrowth);
        assert!(gdp.contains("GDP增长"));
        assert!(gdp.contains("JSON"));
    }
}
