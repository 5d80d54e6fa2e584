use super::error::AppError;
use super::fund::{Rating, RiskLevel};
use crate::config::Config;
use crate::utils::format::{PLACEHOLDER, format_fixed, format_percent};
use serde::{Deserialize, Serialize};

/// Ranking metric accepted by `GET /api/top-performers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopMetric {
    #[serde(rename = "return_1yr")]
    Return1yr,
    #[default]
    #[serde(rename = "return_3yr")]
    Return3yr,
    #[serde(rename = "return_5yr")]
    Return5yr,
    Sharpe,
    Alpha,
}

impl TopMetric {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Return1yr => "return_1yr",
            Self::Return3yr => "return_3yr",
            Self::Return5yr => "return_5yr",
            Self::Sharpe => "sharpe",
            Self::Alpha => "alpha",
        }
    }

    pub fn label(self) -> String {
        self.as_str().replacen('_', " ", 1)
    }

    pub const fn is_return(self) -> bool {
        matches!(self, Self::Return1yr | Self::Return3yr | Self::Return5yr)
    }

    pub const fn all() -> [Self; 5] {
        [
            Self::Return1yr,
            Self::Return3yr,
            Self::Return5yr,
            Self::Sharpe,
            Self::Alpha,
        ]
    }
}

impl std::str::FromStr for TopMetric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Invalid metric: {s}")))
    }
}

impl std::fmt::Display for TopMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query of `GET /api/top-performers`.
#[derive(Debug, Clone, PartialEq)]
pub struct TopPerformersQuery {
    pub metric: TopMetric,
    pub category: Option<String>,
    pub limit: u32,
}

impl Default for TopPerformersQuery {
    fn default() -> Self {
        Self {
            metric: TopMetric::default(),
            category: None,
            limit: Config::DEFAULT_TOP_LIMIT,
        }
    }
}

impl TopPerformersQuery {
    /// Query pairs in wire order. The category is left out when unset.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("metric", self.metric.as_str().to_string())];
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopPerformer {
    pub rank: u32,
    pub scheme_name: String,
    pub amc_name: String,
    #[serde(default)]
    pub metric_value: Option<f64>,
    #[serde(default)]
    pub return_1yr: Option<f64>,
    #[serde(default)]
    pub return_3yr: Option<f64>,
    #[serde(default)]
    pub return_5yr: Option<f64>,
    pub risk_level: RiskLevel,
    pub rating: Rating,
    #[serde(default)]
    pub expense_ratio: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TopPerformersResponse {
    /// Echoed as a plain string; unknown metrics are rejected upstream with a 400.
    pub metric: String,
    #[serde(default)]
    pub category: Option<String>,
    pub top_performers: Vec<TopPerformer>,
    #[serde(default)]
    pub total_evaluated: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformerRow {
    pub rank: u32,
    pub scheme_name: String,
    pub amc_name: String,
    pub metric_label: String,
    pub metric_value: String,
    pub risk: String,
    pub stars: String,
}

impl TopPerformersResponse {
    pub fn rows(&self) -> Vec<PerformerRow> {
        let is_return = self.metric.contains("return");
        self.top_performers
            .iter()
            .map(|p| PerformerRow {
                rank: p.rank,
                scheme_name: p.scheme_name.clone(),
                amc_name: p.amc_name.clone(),
                metric_label: self.metric.replacen('_', " ", 1),
                metric_value: if is_return {
                    format_percent(p.metric_value, 2)
                } else {
                    format_fixed(p.metric_value, 2)
                },
                risk: p.risk_level.badge(),
                stars: p.rating.stars(),
            })
            .collect()
    }

    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(PLACEHOLDER)
    }
}
