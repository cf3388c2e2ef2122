//! Built-in economics concept cards for the landing page.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConceptCategory {
    Basic,
    Intermediate,
    Advanced,
}

impl ConceptCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ConceptCategory::Basic => "基础",
            ConceptCategory::Intermediate => "进阶",
            ConceptCategory::Advanced => "高级",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EconomicConcept {
    pub id: String,
    pub title: String,
    pub description: String,
    pub examples: Vec<String>,
    pub category: ConceptCategory,
}

/// The starter set shown before any interaction has happened.
pub fn starter_concepts() -> Vec<EconomicConcept> {
    vec![
        EconomicConcept {
            id: "1".to_string(),
            title: "供需平衡".to_string(),
            description: "供需平衡是指市场中商品或服务的供给量与需求量达到平衡状态，价格趋于稳定的过程。"
                .to_string(),
            examples: vec![
                "咖啡店根据客流量调整咖啡价格".to_string(),
                "共享单车公司根据区域需求调整车辆投放".to_string(),
                "农产品在不同季节的价格波动".to_string(),
            ],
            category: ConceptCategory::Basic,
        },
        EconomicConcept {
            id: "2".to_string(),
            title: "边际效应".to_string(),
            description: "边际效应指额外一单位投入（如劳动、资本）所带来的产出变化，是经济决策的重要依据。"
                .to_string(),
            examples: vec![
                "餐厅增加一名厨师对出餐效率的影响".to_string(),
                "学习时间增加一小时对考试成绩的提升".to_string(),
                "企业增加一单位广告投入对销售额的贡献".to_string(),
            ],
            category: ConceptCategory::Intermediate,
        },
        EconomicConcept {
            id: "3".to_string(),
            title: "通货膨胀".to_string(),
            description: "通货膨胀是指一般物价水平持续上涨，导致货币购买力下降的经济现象。".to_string(),
            examples: vec![
                "各国央行通过调整利率控制通胀".to_string(),
                "工资上涨速度低于物价上涨导致实际购买力下降".to_string(),
                "投资者通过多元化资产配置应对通胀风险".to_string(),
            ],
            category: ConceptCategory::Basic,
        },
        EconomicConcept {
            id: "4".to_string(),
            title: "博弈论".to_string(),
            description: "博弈论研究多个参与者在策略互动情境中的决策行为和最优策略选择。".to_string(),
            examples: vec![
                "企业定价策略中考虑竞争对手反应".to_string(),
                "招聘中雇主与求职者的薪资谈判".to_string(),
                "国际贸易谈判中各国的关税政策制定".to_string(),
            ],
            category: ConceptCategory::Advanced,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_set_is_well_formed() {
        let concepts = starter_concepts();
        assert!(!concepts.is_empty());
        for concept in &concepts {
            assert!(!concept.title.is_empty());
            assert!(!concept.description.is_empty());
            assert!(!concept.examples.is_empty());
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ConceptCategory::Basic.label(), "基础");
        assert_eq!(ConceptCategory::Intermediate.label(), "进阶");
        assert_eq!(ConceptCategory::Advanced.label(), "高级");
    }
}
