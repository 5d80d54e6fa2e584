//! Single-fund forecasts and side-by-side fund comparison.

use super::fund::{Rating, RiskLevel};
use super::recommendation::Tenure;
use super::series::{SeriesPoint, records_from_map};
use super::wire::OrderedMap;
use crate::utils::format::{PLACEHOLDER, format_fixed, format_percent};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/forecast`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRequest {
    pub fund_name: String,
    pub horizon: Tenure,
}

impl ForecastRequest {
    /// A five-year forecast, the backend's default horizon.
    pub fn new(fund_name: impl Into<String>) -> Self {
        Self {
            fund_name: fund_name.into(),
            horizon: Tenure::Five,
        }
    }

    pub fn with_horizon(mut self, horizon: Tenure) -> Self {
        self.horizon = horizon;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CurrentMetrics {
    pub risk_level: RiskLevel,
    pub rating: Rating,
    #[serde(default)]
    pub expense_ratio: Option<f64>,
    #[serde(default)]
    pub fund_size: Option<f64>,
    #[serde(default)]
    pub fund_age: Option<f64>,
}

/// Outcome of one horizon's model. A failing model reports an error for its
/// horizon without failing the others.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum HorizonPrediction {
    Failed {
        error: String,
    },
    Predicted {
        predicted_return: Option<f64>,
        #[serde(default)]
        historical_return: Option<f64>,
        #[serde(default)]
        confidence: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MonthlyProjection {
    pub month: u32,
    pub projected_value: f64,
    #[serde(default)]
    pub return_percentage: Option<f64>,
}

/// Response of `POST /api/forecast`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ForecastResponse {
    pub fund_name: String,
    pub amc_name: String,
    pub current_metrics: CurrentMetrics,
    /// Keyed `1_year`, `3_year`, `5_year`.
    pub predictions: OrderedMap<HorizonPrediction>,
    #[serde(default)]
    pub monthly_projections: Vec<MonthlyProjection>,
    #[serde(default)]
    pub forecast_horizon: Option<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRow {
    pub horizon: String,
    pub predicted: String,
    pub historical: String,
    pub confidence: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub fund_name: String,
    pub amc_name: String,
    pub risk: String,
    pub stars: String,
    pub expense_ratio: String,
    pub predictions: Vec<PredictionRow>,
    /// Value of 100 invested, month by month.
    pub projections: Vec<SeriesPoint>,
}

impl ForecastView {
    pub fn build(forecast: &ForecastResponse) -> Self {
        let predictions = records_from_map(&forecast.predictions, |key, prediction| {
            let horizon = key.replacen('_', " ", 1);
            match prediction {
                HorizonPrediction::Predicted {
                    predicted_return,
                    historical_return,
                    confidence,
                } => PredictionRow {
                    horizon,
                    predicted: format_percent(*predicted_return, 2),
                    historical: format_percent(*historical_return, 2),
                    confidence: confidence.clone().unwrap_or_else(|| PLACEHOLDER.to_string()),
                    error: None,
                },
                HorizonPrediction::Failed { error } => PredictionRow {
                    horizon,
                    predicted: PLACEHOLDER.to_string(),
                    historical: PLACEHOLDER.to_string(),
                    confidence: PLACEHOLDER.to_string(),
                    error: Some(error.clone()),
                },
            }
        });

        Self {
            fund_name: forecast.fund_name.clone(),
            amc_name: forecast.amc_name.clone(),
            risk: forecast.current_metrics.risk_level.to_string(),
            stars: forecast.current_metrics.rating.stars(),
            expense_ratio: format_percent(forecast.current_metrics.expense_ratio, 2),
            predictions,
            projections: forecast
                .monthly_projections
                .iter()
                .map(|p| SeriesPoint::new(format!("M{}", p.month), p.projected_value))
                .collect(),
        }
    }
}

/// Metrics compared when a request names none.
pub const DEFAULT_COMPARISON_METRICS: [&str; 5] = [
    "return_1yr",
    "return_3yr",
    "return_5yr",
    "risk_level",
    "expense_ratio",
];

/// Body of `POST /api/compare-funds`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRequest {
    pub fund_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Vec<String>>,
}

impl ComparisonRequest {
    pub fn new<I, S>(fund_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fund_names: fund_names.into_iter().map(Into::into).collect(),
            metrics: None,
        }
    }

    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = Some(metrics.into_iter().map(Into::into).collect());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ComparedFund {
    pub fund_name: String,
    pub amc_name: String,
    #[serde(default)]
    pub predictions: OrderedMap<Option<f64>>,
    /// Requested metrics plus their `{metric}_rank` companions.
    #[serde(flatten)]
    pub values: OrderedMap<serde_json::Value>,
}

impl ComparedFund {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.values.get(name).and_then(serde_json::Value::as_f64)
    }

    pub fn rank(&self, name: &str) -> Option<u64> {
        self.values
            .get(&format!("{name}_rank"))
            .and_then(serde_json::Value::as_u64)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComparisonEntry {
    Missing { fund_name: String, error: String },
    Found(ComparedFund),
}

impl ComparisonEntry {
    pub fn fund_name(&self) -> &str {
        match self {
            Self::Missing { fund_name, .. } => fund_name,
            Self::Found(fund) => &fund.fund_name,
        }
    }
}

/// Response of `POST /api/compare-funds`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ComparisonResponse {
    pub comparison: Vec<ComparisonEntry>,
    pub metrics_compared: Vec<String>,
    #[serde(default)]
    pub total_funds: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub metric: String,
    /// One cell per compared fund, in request order.
    pub cells: Vec<String>,
}

impl ComparisonResponse {
    pub fn fund_names(&self) -> Vec<&str> {
        self.comparison.iter().map(ComparisonEntry::fund_name).collect()
    }

    /// Pivots the per-fund entries into one row per compared metric.
    pub fn metric_rows(&self) -> Vec<MetricRow> {
        self.metrics_compared
            .iter()
            .map(|metric| MetricRow {
                metric: metric.replacen('_', " ", 1),
                cells: self
                    .comparison
                    .iter()
                    .map(|entry| match entry {
                        ComparisonEntry::Found(fund) => {
                            let value = format_fixed(fund.metric(metric), 2);
                            match fund.rank(metric) {
                                Some(rank) if value != PLACEHOLDER => {
                                    format!("{value} (#{rank})")
                                }
                                _ => value,
                            }
                        }
                        ComparisonEntry::Missing { .. } => PLACEHOLDER.to_string(),
                    })
                    .collect(),
            })
            .collect()
    }
}
