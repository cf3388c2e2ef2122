use super::json::parse_payload;
use crate::error::TutorResult;
use crate::types::{
    CategoryAxis, ChartKind, DatasetKind, RenderKind, Series, ValueAxis, VisualizationData,
};
use serde_json::Value;
use tracing::debug;

const X_AXIS_TITLE: &str = "年份";
const FAILURE_TITLE: &str = "数据获取失败";

/// Normalizes a raw model reply into the renderer's dataset shape.
///
/// JSON recovery failure propagates as an error; an empty or unusable JSON
/// shape degrades to the kind's hard-coded placeholder curve instead.
pub fn normalize_visualization(kind: &ChartKind, raw: &str) -> TutorResult<VisualizationData> {
    let payload = parse_payload(raw)?;
    Ok(match kind {
        ChartKind::SupplyDemand => supply_demand_dataset(kind, &payload),
        other => time_series_dataset(other, &payload),
    })
}

/// Renderable stand-in for a failed generation: fixed year labels, all-zero
/// series, failure title.
pub fn error_placeholder(kind: &ChartKind) -> VisualizationData {
    let categories = fixed_years();
    let zeros = vec![0.0; categories.len()];
    let series = match kind {
        ChartKind::SupplyDemand => vec![
            line_series("供给", zeros.clone()),
            line_series("需求", zeros),
        ],
        other => vec![line_series(other.label(), zeros)],
    };

    VisualizationData {
        kind: DatasetKind::Error,
        title: FAILURE_TITLE.to_string(),
        x_axis: CategoryAxis {
            title: X_AXIS_TITLE.to_string(),
            data: categories,
        },
        y_axis: ValueAxis {
            title: String::new(),
            data: Vec::new(),
        },
        series,
    }
}

/// Top-level keys are year labels, sorted lexicographically; `.supply` and
/// `.demand` subfields (missing → 0) feed two parallel series.
fn supply_demand_dataset(kind: &ChartKind, payload: &Value) -> VisualizationData {
    let mut categories = Vec::new();
    let mut supply = Vec::new();
    let mut demand = Vec::new();

    if let Some(map) = payload.as_object() {
        let mut years: Vec<&String> = map.keys().collect();
        years.sort();
        for year in years {
            let entry = &map[year];
            categories.push(year.clone());
            supply.push(numeric_field(entry, "supply"));
            demand.push(numeric_field(entry, "demand"));
        }
    }

    if categories.is_empty() {
        debug!("supply-demand payload empty, using placeholder curves");
        categories = fixed_years();
        supply = (1..=11).map(f64::from).collect();
        demand = (1..=11).rev().map(f64::from).collect();
    }

    VisualizationData {
        kind: DatasetKind::SupplyDemand,
        title: forecast_title(kind),
        x_axis: CategoryAxis {
            title: X_AXIS_TITLE.to_string(),
            data: categories,
        },
        y_axis: ValueAxis {
            title: "指数".to_string(),
            data: Vec::new(),
        },
        series: vec![line_series("供给", supply), line_series("需求", demand)],
    }
}

/// Accepts `[{year, value|rate}, …]` or `{year: number | {value|rate}}` and
/// flattens into one aligned (years, values) pair.
fn time_series_dataset(kind: &ChartKind, payload: &Value) -> VisualizationData {
    let (mut categories, mut values) = flatten_records(payload);

    if categories.is_empty() {
        debug!(kind = kind.as_str(), "time-series payload empty, using placeholder curve");
        categories = fixed_years();
        values = placeholder_curve(kind);
    }

    VisualizationData {
        kind: DatasetKind::TimeSeries,
        title: forecast_title(kind),
        x_axis: CategoryAxis {
            title: X_AXIS_TITLE.to_string(),
            data: categories,
        },
        y_axis: ValueAxis {
            title: value_axis_title(kind).to_string(),
            data: Vec::new(),
        },
        series: vec![line_series(kind.label(), values)],
    }
}

fn flatten_records(payload: &Value) -> (Vec<String>, Vec<f64>) {
    let mut categories = Vec::new();
    let mut values = Vec::new();

    match payload {
        Value::Array(records) => {
            for record in records {
                let year = match record.get("year") {
                    Some(Value::String(year)) => Some(year.clone()),
                    Some(Value::Number(year)) => Some(year.to_string()),
                    _ => None,
                };
                if let Some(year) = year {
                    categories.push(year);
                    values.push(
                        record
                            .get("value")
                            .or_else(|| record.get("rate"))
                            .and_then(Value::as_f64)
                            .unwrap_or(0.0),
                    );
                }
            }
        }
        Value::Object(map) => {
            let mut years: Vec<&String> = map.keys().collect();
            years.sort();
            for year in years {
                let entry = &map[year];
                let value = entry.as_f64().unwrap_or_else(|| {
                    entry
                        .get("value")
                        .or_else(|| entry.get("rate"))
                        .and_then(Value::as_f64)
                        .unwrap_or(0.0)
                });
                categories.push(year.clone());
                values.push(value);
            }
        }
        _ => {}
    }

    (categories, values)
}

fn numeric_field(entry: &Value, field: &str) -> f64 {
    entry.get(field).and_then(Value::as_f64).unwrap_or(0.0)
}

fn line_series(name: &str, data: Vec<f64>) -> Series {
    Series {
        name: name.to_string(),
        data,
        render_kind: RenderKind::Line,
    }
}

fn forecast_title(kind: &ChartKind) -> String {
    format!("{}预测 2020-2030", kind.label())
}

fn fixed_years() -> Vec<String> {
    (2020..=2030).map(|year| year.to_string()).collect()
}

fn value_axis_title(kind: &ChartKind) -> &'static str {
    match kind {
        ChartKind::GdpGrowth => "增长率（%）",
        ChartKind::Inflation => "通胀率（%）",
        ChartKind::Unemployment => "失业率（%）",
        _ => "数值",
    }
}

/// Hard-coded example curves (rise then fall) shown when the model returns
/// nothing usable. Illustrative values, not real economic data.
fn placeholder_curve(kind: &ChartKind) -> Vec<f64> {
    match kind {
        ChartKind::GdpGrowth => vec![2.3, 2.8, 3.4, 4.0, 4.6, 5.0, 4.7, 4.2, 3.6, 3.0, 2.5],
        ChartKind::Inflation => vec![1.8, 2.1, 2.6, 3.2, 3.8, 4.2, 3.9, 3.4, 2.9, 2.4, 2.0],
        ChartKind::Unemployment => vec![3.9, 4.2, 4.6, 5.1, 5.6, 6.0, 5.7, 5.2, 4.8, 4.3, 4.0],
        _ => vec![1.2, 1.6, 2.1, 2.7, 3.3, 3.8, 3.5, 3.0, 2.4, 1.9, 1.5],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TutorError;

    #[test]
    fn test_gdp_growth_from_fenced_json() {
        let raw = "```json\n{\"2020\":3.2,\"2021\":3.5}\n```";
        let dataset = normalize_visualization(&ChartKind::GdpGrowth, raw).unwrap();
        assert_eq!(dataset.kind, DatasetKind::TimeSeries);
        assert_eq!(dataset.x_axis.data, vec!["2020", "2021"]);
        assert_eq!(dataset.series.len(), 1);
        assert_eq!(dataset.series[0].data, vec![3.2, 3.5]);
    }

    #[test]
    fn test_supply_demand_parallel_series() {
        let raw = r#"{"2020":{"supply":1,"demand":11},"2021":{"supply":2,"demand":10}}"#;
        let dataset = normalize_visualization(&ChartKind::SupplyDemand, raw).unwrap();
        assert_eq!(dataset.x_axis.data, vec!["2020", "2021"]);
        assert_eq!(dataset.series[0].name, "供给");
        assert_eq!(dataset.series[0].data, vec![1.0, 2.0]);
        assert_eq!(dataset.series[1].name, "需求");
        assert_eq!(dataset.series[1].data, vec![11.0, 10.0]);
    }

    #[test]
    fn test_supply_demand_missing_fields_default_to_zero() {
        let raw = r#"{"2020":{"supply":4},"2021":{}}"#;
        let dataset = normalize_visualization(&ChartKind::SupplyDemand, raw).unwrap();
        assert_eq!(dataset.series[0].data, vec![4.0, 0.0]);
        assert_eq!(dataset.series[1].data, vec![0.0, 0.0]);
    }

    #[test]
    fn test_record_array_shape() {
        let raw = r#"[{"year":2020,"value":2.5},{"year":"2021","rate":3.0}]"#;
        let dataset = normalize_visualization(&ChartKind::Inflation, raw).unwrap();
        assert_eq!(dataset.x_axis.data, vec!["2020", "2021"]);
        assert_eq!(dataset.series[0].data, vec![2.5, 3.0]);
    }

    #[test]
    fn test_object_with_value_wrappers() {
        let raw = r#"{"2020":{"value":5.0},"2021":{"rate":5.5}}"#;
        let dataset = normalize_visualization(&ChartKind::Unemployment, raw).unwrap();
        assert_eq!(dataset.series[0].data, vec![5.0, 5.5]);
    }

    #[test]
    fn test_empty_payload_uses_placeholder_curve() {
        let dataset = normalize_visualization(&ChartKind::GdpGrowth, "{}").unwrap();
        assert_eq!(dataset.x_axis.data.len(), 11);
        assert_eq!(dataset.x_axis.data[0], "2020");
        assert_eq!(dataset.x_axis.data[10], "2030");
        assert_eq!(dataset.series[0].data.len(), 11);
        // Rise then fall.
        assert!(dataset.series[0].data[5] > dataset.series[0].data[0]);
        assert!(dataset.series[0].data[5] > dataset.series[0].data[10]);
    }

    #[test]
    fn test_unparseable_payload_is_an_error() {
        assert!(matches!(
            normalize_visualization(&ChartKind::GdpGrowth, "无数据"),
            Err(TutorError::ChartData { .. })
        ));
    }

    #[test]
    fn test_error_placeholder_is_renderable() {
        let dataset = error_placeholder(&ChartKind::SupplyDemand);
        assert_eq!(dataset.kind, DatasetKind::Error);
        assert_eq!(dataset.title, "数据获取失败");
        assert_eq!(dataset.series.len(), 2);
        assert!(dataset.series.iter().all(|series| {
            series.data.len() == dataset.x_axis.data.len()
                && series.data.iter().all(|value| *value == 0.0)
        }));
    }

    #[test]
    fn test_forecast_title_is_kind_specific() {
        let dataset = normalize_visualization(&ChartKind::Inflation, "{}").unwrap();
        assert_eq!(dataset.title, "通货膨胀率预测 2020-2030");
    }
}
