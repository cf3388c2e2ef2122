//! Core data model shared by the chat, simulator and visualization surfaces.
//!
//! Everything here is constructed fresh per request/response cycle and never
//! mutated afterwards. Wire names follow the camelCase shapes the frontend
//! consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single chat bubble. In-memory only; the session owns its lifetime.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// The three policy families the simulator exposes.
///
/// Each kind carries its display label, the parameter key the frontend sends,
/// and the slider metadata the controls are rendered from, so the whole
/// parameter surface has a single source of truth.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Monetary,
    Fiscal,
    Trade,
}

impl PolicyKind {
    pub fn label(&self) -> &'static str {
        match self {
            PolicyKind::Monetary => "货币政策",
            PolicyKind::Fiscal => "财政政策",
            PolicyKind::Trade => "贸易政策",
        }
    }

    /// Key under which the rate arrives in the parameter mapping.
    pub fn param_key(&self) -> &'static str {
        match self {
            PolicyKind::Monetary => "interestRate",
            PolicyKind::Fiscal => "taxRate",
            PolicyKind::Trade => "tariffRate",
        }
    }

    pub fn param_label(&self) -> &'static str {
        match self {
            PolicyKind::Monetary => "基准利率",
            PolicyKind::Fiscal => "税率",
            PolicyKind::Trade => "关税率",
        }
    }

    pub fn default_rate(&self) -> f64 {
        match self {
            PolicyKind::Monetary => 3.0,
            PolicyKind::Fiscal => 15.0,
            PolicyKind::Trade => 10.0,
        }
    }

    /// Slider range as (min, max, step), in percent.
    pub fn rate_range(&self) -> (f64, f64, f64) {
        match self {
            PolicyKind::Monetary => (0.0, 10.0, 0.25),
            PolicyKind::Fiscal => (0.0, 40.0, 1.0),
            PolicyKind::Trade => (0.0, 30.0, 1.0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAreas {
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub long_term: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoricalExample {
    pub year: i32,
    pub country: String,
    pub outcome: String,
}

/// One simulation run. Replaces the previous result wholesale.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PolicySimulation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub impact_areas: ImpactAreas,
    pub historical_examples: Vec<HistoricalExample>,
}

/// Chart the user asked for. Anything outside the four built-in kinds is
/// passed through as-is so the backend stays open to new chart types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartKind {
    SupplyDemand,
    GdpGrowth,
    Inflation,
    Unemployment,
    Other(String),
}

impl ChartKind {
    pub fn from_str(kind: &str) -> Self {
        match kind {
            "supply-demand" => ChartKind::SupplyDemand,
            "gdp-growth" => ChartKind::GdpGrowth,
            "inflation" => ChartKind::Inflation,
            "unemployment" => ChartKind::Unemployment,
            other => ChartKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ChartKind::SupplyDemand => "supply-demand",
            ChartKind::GdpGrowth => "gdp-growth",
            ChartKind::Inflation => "inflation",
            ChartKind::Unemployment => "unemployment",
            ChartKind::Other(kind) => kind,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ChartKind::SupplyDemand => "供需曲线",
            ChartKind::GdpGrowth => "GDP增长",
            ChartKind::Inflation => "通货膨胀率",
            ChartKind::Unemployment => "失业率",
            ChartKind::Other(kind) => kind,
        }
    }
}

impl Serialize for ChartKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChartKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let kind = String::deserialize(deserializer)?;
        Ok(ChartKind::from_str(&kind))
    }
}

/// Shape of a normalized dataset, as opposed to the kind that was requested.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    SupplyDemand,
    TimeSeries,
    Error,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RenderKind {
    Line,
    Bar,
    Scatter,
    Area,
}

/// Category axis: the labels the chart renderer lays series values against.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CategoryAxis {
    pub title: String,
    pub data: Vec<String>,
}

/// Value axis. The numeric data is unused by the renderer but kept so the
/// wire shape matches what the chart collaborator expects.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ValueAxis {
    pub title: String,
    pub data: Vec<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Series {
    pub name: String,
    pub data: Vec<f64>,
    #[serde(rename = "type")]
    pub render_kind: RenderKind,
}

/// Normalized chart payload. Series value sequences are intended to align
/// 1:1 with the xAxis categories; alignment is not enforced here.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationData {
    #[serde(rename = "type")]
    pub kind: DatasetKind,
    pub title: String,
    pub x_axis: CategoryAxis,
    pub y_axis: ValueAxis,
    pub series: Vec<Series>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_metadata() {
        for kind in [PolicyKind::Monetary, PolicyKind::Fiscal, PolicyKind::Trade] {
            assert!(!kind.label().is_empty());
            assert!(!kind.param_key().is_empty());
            let (min, max, step) = kind.rate_range();
            assert!(min < max);
            assert!(step > 0.0);
            assert!(kind.default_rate() >= min && kind.default_rate() <= max);
        }
        assert_eq!(PolicyKind::Monetary.param_key(), "interestRate");
        assert_eq!(PolicyKind::Fiscal.param_key(), "taxRate");
        assert_eq!(PolicyKind::Trade.param_key(), "tariffRate");
    }

    #[test]
    fn test_chart_kind_round_trip() {
        assert_eq!(ChartKind::from_str("supply-demand"), ChartKind::SupplyDemand);
        assert_eq!(ChartKind::from_str("gdp-growth").as_str(), "gdp-growth");
        let custom = ChartKind::from_str("trade-balance");
        assert_eq!(custom, ChartKind::Other("trade-balance".to_string()));
        assert_eq!(custom.label(), "trade-balance");
    }

    #[test]
    fn test_message_wire_shape() {
        let message = ChatMessage::assistant("你好");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "你好");
        assert!(json["id"].as_str().is_some());
    }

    #[test]
    fn test_simulation_wire_shape_is_camel_case() {
        let simulation = PolicySimulation {
            id: "1".to_string(),
            name: "货币政策模拟".to_string(),
            description: "描述".to_string(),
            impact_areas: ImpactAreas::default(),
            historical_examples: vec![],
        };
        let json = serde_json::to_value(&simulation).unwrap();
        assert!(json.get("impactAreas").is_some());
        assert!(json.get("historicalExamples").is_some());
        assert!(json["impactAreas"].get("shortTerm").is_some());
    }

    #[test]
    fn test_series_render_kind_serializes_as_type() {
        let series = Series {
            name: "供给".to_string(),
            data: vec![1.0, 2.0],
            render_kind: RenderKind::Line,
        };
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["type"], "line");
    }
}
