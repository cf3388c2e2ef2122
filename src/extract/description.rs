/// Stock description used when the reply opens with nothing substantial.
const GENERIC_DESCRIPTION: &str =
    "该政策模拟基于宏观经济模型生成，以下为主要影响领域与历史参考案例。";

/// Takes the reply's leading paragraph (up to the first blank line) as the
/// simulation description. Anything of 20 characters or fewer is considered
/// too thin to show and is replaced by the stock sentence.
pub fn extract_description(text: &str) -> String {
    let lead = text.split("\n\n").next().unwrap_or("").trim();
    if lead.chars().count() > 20 {
        lead.to_string()
    } else {
        GENERIC_DESCRIPTION.to_string()
    }
}
