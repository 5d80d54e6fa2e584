use super::fund::{RiskBucket, RiskLevel};
use super::series::{SeriesPoint, StatCard, count_series, records_from_map};
use super::wire::OrderedMap;
use crate::utils::format::{PLACEHOLDER, format_compact_inr, format_fixed, format_years};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
    #[serde(other)]
    Weak,
}

impl CorrelationStrength {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CorrelationPair {
    pub feature1: String,
    pub feature2: String,
    pub correlation: f64,
    pub strength: CorrelationStrength,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct CorrelationAnalysis {
    #[serde(default)]
    pub correlation_matrix: OrderedMap<OrderedMap<Option<f64>>>,
    #[serde(default)]
    pub strong_correlations: Vec<CorrelationPair>,
    #[serde(default)]
    pub key_insights: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryTrend {
    pub count: u64,
    #[serde(default)]
    pub avg_return_1yr: Option<f64>,
    #[serde(default)]
    pub avg_return_3yr: Option<f64>,
    #[serde(default)]
    pub avg_return_5yr: Option<f64>,
    #[serde(default)]
    pub avg_risk: Option<f64>,
    #[serde(default)]
    pub avg_expense: Option<f64>,
    #[serde(default)]
    pub top_performer: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RiskReturnBucket {
    pub risk_level: RiskLevel,
    pub fund_count: u64,
    #[serde(default)]
    pub avg_return_1yr: Option<f64>,
    #[serde(default)]
    pub avg_return_3yr: Option<f64>,
    #[serde(default)]
    pub avg_return_5yr: Option<f64>,
    /// Standard deviation of 3-year returns; null for single-fund buckets
    #[serde(default)]
    pub return_volatility: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ExpenseBucket {
    pub count: u64,
    #[serde(default)]
    pub avg_return_3yr: Option<f64>,
    #[serde(default)]
    pub avg_expense: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AgeBand {
    pub age_range: String,
    pub count: u64,
    #[serde(default)]
    pub avg_return_3yr: Option<f64>,
    #[serde(default)]
    pub avg_stability: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DistributionMoments {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub std: Option<f64>,
    #[serde(default)]
    pub skewness: Option<f64>,
    #[serde(default)]
    pub kurtosis: Option<f64>,
    #[serde(default)]
    pub percentiles: OrderedMap<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MarketInsights {
    #[serde(default)]
    pub total_aum: Option<f64>,
    #[serde(default)]
    pub avg_fund_age: Option<f64>,
    pub high_performers_count: u64,
    pub low_cost_funds_count: u64,
}

/// Response of `GET /api/enhanced-analysis`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EnhancedAnalysis {
    pub correlation_analysis: CorrelationAnalysis,
    pub category_trends: OrderedMap<CategoryTrend>,
    pub risk_return_analysis: Vec<RiskReturnBucket>,
    pub expense_impact: OrderedMap<ExpenseBucket>,
    #[serde(default)]
    pub age_performance: Vec<AgeBand>,
    pub distribution_analysis: OrderedMap<DistributionMoments>,
    pub market_insights: MarketInsights,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct DatasetSummary {
    #[serde(default)]
    pub total_funds: u64,
    #[serde(default)]
    pub unique_amcs: u64,
    #[serde(default)]
    pub data_points: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ReturnStatistics {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub std: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct ExpenseAnalysis {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub median: Option<f64>,
    #[serde(default)]
    pub low_cost_funds: u64,
    #[serde(default)]
    pub high_cost_funds: u64,
}

/// Response of `GET /api/descriptive-analysis`. The backend treats this shape
/// as informal, so every section is optional.
#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct DescriptiveAnalysis {
    #[serde(default)]
    pub summary: DatasetSummary,
    #[serde(default)]
    pub category_distribution: OrderedMap<u64>,
    #[serde(default)]
    pub risk_distribution: OrderedMap<u64>,
    #[serde(default)]
    pub rating_distribution: OrderedMap<u64>,
    #[serde(default)]
    pub return_statistics: OrderedMap<ReturnStatistics>,
    #[serde(default)]
    pub top_performing_amcs: OrderedMap<Option<f64>>,
    #[serde(default)]
    pub expense_analysis: ExpenseAnalysis,
}

impl DescriptiveAnalysis {
    pub fn category_series(&self) -> Vec<SeriesPoint> {
        count_series(&self.category_distribution)
    }

    pub fn risk_series(&self) -> Vec<SeriesPoint> {
        count_series(&self.risk_distribution)
    }

    /// Mean 3-year return of the strongest AMCs, in backend rank order.
    pub fn top_amc_series(&self) -> Vec<SeriesPoint> {
        records_from_map(&self.top_performing_amcs, |amc, mean| {
            SeriesPoint::new(amc, *mean)
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationCard {
    pub pair: String,
    pub value: String,
    pub strength: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTrendPoint {
    pub name: String,
    pub count: u64,
    pub avg_return_1yr: Option<f64>,
    pub avg_return_3yr: Option<f64>,
    pub avg_return_5yr: Option<f64>,
    pub avg_risk: Option<f64>,
    pub avg_expense: Option<f64>,
    pub top_performer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskReturnPoint {
    pub name: String,
    pub bucket: RiskBucket,
    pub fund_count: u64,
    pub avg_return_3yr: Option<f64>,
    pub volatility: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub series: String,
    pub mean: String,
    pub median: String,
    pub std: String,
    pub skewness: String,
    pub kurtosis: String,
}

/// Everything the analysis screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisView {
    pub insights: Vec<StatCard>,
    pub key_insights: Vec<String>,
    pub correlations: Vec<CorrelationCard>,
    pub category_trends: Vec<CategoryTrendPoint>,
    pub risk_return: Vec<RiskReturnPoint>,
    pub expense_impact: Vec<SeriesPoint>,
    pub age_performance: Vec<SeriesPoint>,
    pub distributions: Vec<DistributionRow>,
}

impl AnalysisView {
    pub fn build(analysis: &EnhancedAnalysis) -> Self {
        let insights = &analysis.market_insights;

        Self {
            insights: vec![
                StatCard::new(
                    "High Performers",
                    insights.high_performers_count.to_string(),
                    "Funds with returns above 20%",
                ),
                StatCard::new(
                    "Low Cost Funds",
                    insights.low_cost_funds_count.to_string(),
                    "Expense ratios below 1.0%",
                ),
                StatCard::new(
                    "Market Age",
                    format_years(insights.avg_fund_age),
                    "Average fund maturity",
                ),
                StatCard::new(
                    "Total AUM",
                    format_compact_inr(insights.total_aum),
                    "Assets under management",
                ),
            ],
            key_insights: analysis.correlation_analysis.key_insights.clone(),
            correlations: analysis
                .correlation_analysis
                .strong_correlations
                .iter()
                .map(|c| CorrelationCard {
                    pair: format!("{} ↔ {}", c.feature1, c.feature2),
                    value: format_fixed(c.correlation, 3),
                    strength: format!("{} Correlation", c.strength.label()),
                })
                .collect(),
            category_trends: records_from_map(&analysis.category_trends, |name, t| {
                CategoryTrendPoint {
                    name: name.to_string(),
                    count: t.count,
                    avg_return_1yr: t.avg_return_1yr,
                    avg_return_3yr: t.avg_return_3yr,
                    avg_return_5yr: t.avg_return_5yr,
                    avg_risk: t.avg_risk,
                    avg_expense: t.avg_expense,
                    top_performer: t
                        .top_performer
                        .clone()
                        .unwrap_or_else(|| PLACEHOLDER.to_string()),
                }
            }),
            risk_return: analysis
                .risk_return_analysis
                .iter()
                .map(|b| RiskReturnPoint {
                    name: format!("Risk {}", b.risk_level.value()),
                    bucket: b.risk_level.bucket(),
                    fund_count: b.fund_count,
                    avg_return_3yr: b.avg_return_3yr,
                    volatility: b.return_volatility,
                })
                .collect(),
            expense_impact: records_from_map(&analysis.expense_impact, |name, bucket| {
                SeriesPoint::new(name.replace('_', " "), bucket.avg_return_3yr)
            }),
            age_performance: analysis
                .age_performance
                .iter()
                .map(|band| SeriesPoint::new(band.age_range.clone(), band.avg_return_3yr))
                .collect(),
            distributions: records_from_map(&analysis.distribution_analysis, |name, m| {
                DistributionRow {
                    series: name.to_string(),
                    mean: format_fixed(m.mean, 2),
                    median: format_fixed(m.median, 2),
                    std: format_fixed(m.std, 2),
                    skewness: format_fixed(m.skewness, 3),
                    kurtosis: format_fixed(m.kurtosis, 3),
                }
            }),
        }
    }
}
