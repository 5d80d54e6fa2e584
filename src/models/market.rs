use super::fund::{Rating, RiskLevel};
use super::series::{SeriesPoint, StatCard, count_series, records_from_map, top_n_by_count};
use super::wire::{OrderedMap, opt_display_string};
use crate::config::Config;
use crate::utils::format::{
    PLACEHOLDER, format_compact_inr, format_fixed, format_percent, format_share,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MarketOverview {
    pub total_funds: u64,
    pub total_amcs: u64,
    #[serde(default)]
    pub avg_1yr_return: Option<f64>,
    #[serde(default)]
    pub avg_3yr_return: Option<f64>,
    #[serde(default)]
    pub avg_5yr_return: Option<f64>,
    #[serde(default)]
    pub total_aum: Option<f64>,
}

/// Best 3-year performer of a category.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CategoryLeader {
    pub fund_name: String,
    pub amc_name: String,
    #[serde(default)]
    pub return_3yr: Option<f64>,
    pub risk_level: RiskLevel,
    pub rating: Rating,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelPerformance {
    #[serde(default, deserialize_with = "opt_display_string")]
    pub accuracy: Option<String>,
    #[serde(default)]
    pub rmse: Option<f64>,
}

/// Response of `GET /api/dashboard-data`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DashboardData {
    pub market_overview: MarketOverview,
    pub top_performers: OrderedMap<CategoryLeader>,
    #[serde(default)]
    pub model_performance: OrderedMap<ModelPerformance>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

/// Fund counts by 3-year return band.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PerformanceDistribution {
    pub excellent: u64,
    pub good: u64,
    pub average: u64,
    pub below_average: u64,
}

impl PerformanceDistribution {
    pub const fn total(&self) -> u64 {
        self.excellent + self.good + self.average + self.below_average
    }

    /// Funds above the 15% band minus funds at or below it, as a share of all funds.
    pub fn trend(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let positive = (self.excellent + self.good) as f64;
        let negative = (self.average + self.below_average) as f64;
        Some((positive - negative) / total as f64 * 100.0)
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RiskAppetite {
    pub conservative: u64,
    pub moderate: u64,
    pub aggressive: u64,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct ExpenseTrends {
    #[serde(default)]
    pub market_average: Option<f64>,
    #[serde(default)]
    pub equity_avg: Option<f64>,
    #[serde(default)]
    pub debt_avg: Option<f64>,
    #[serde(default)]
    pub hybrid_avg: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct SharpeAnalysis {
    #[serde(default)]
    pub market_avg_sharpe: Option<f64>,
    #[serde(default)]
    pub high_sharpe_funds: u64,
    #[serde(default)]
    pub negative_sharpe_funds: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MarketSummary {
    pub total_funds: u64,
    #[serde(default)]
    pub total_aum: Option<f64>,
    #[serde(default)]
    pub avg_3yr_return: Option<f64>,
    #[serde(default)]
    pub market_volatility: Option<f64>,
}

/// Response of `GET /api/market-trends`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MarketTrends {
    pub performance_distribution: PerformanceDistribution,
    pub risk_appetite: RiskAppetite,
    pub amc_market_share: OrderedMap<u64>,
    #[serde(default)]
    pub category_aum: OrderedMap<Option<f64>>,
    #[serde(default)]
    pub expense_trends: ExpenseTrends,
    #[serde(default)]
    pub rating_distribution: OrderedMap<u64>,
    #[serde(default)]
    pub sharpe_analysis: SharpeAnalysis,
    pub market_summary: MarketSummary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSlice {
    pub key: &'static str,
    pub label: &'static str,
    pub count: u64,
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderRow {
    pub category: String,
    /// Category name as a badge, spaces replaced with underscores
    pub badge: String,
    pub return_3yr: String,
    pub fund_name: String,
    pub amc_name: String,
    pub risk: RiskLevel,
    pub stars: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelCard {
    pub label: String,
    pub accuracy: String,
    pub rmse: String,
}

/// Everything the dashboard renders, built only once both the dashboard
/// payload and the market trends have arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub performance: Vec<PerformanceSlice>,
    pub performance_trend: String,
    pub returns_by_period: Vec<SeriesPoint>,
    pub leaderboard: Vec<LeaderRow>,
    pub models: Vec<ModelCard>,
    pub risk_appetite: Vec<SeriesPoint>,
    /// Top AMCs by fund count, truncated to `Config::AMC_SHARE_TOP_N`.
    pub amc_share: Vec<SeriesPoint>,
    pub category_aum: Vec<SeriesPoint>,
    pub rating_distribution: Vec<SeriesPoint>,
    pub market_volatility: String,
    pub last_updated: Option<NaiveDate>,
}

impl DashboardView {
    pub fn build(dashboard: &DashboardData, trends: &MarketTrends) -> Self {
        let overview = &dashboard.market_overview;

        let cards = vec![
            StatCard::new(
                "Total Managed Funds",
                overview.total_funds.to_string(),
                "Active instruments",
            ),
            StatCard::new(
                "Market Providers",
                overview.total_amcs.to_string(),
                "Certified AMCs",
            ),
            StatCard::new(
                "Avg 3Y Return",
                format_percent(overview.avg_3yr_return, 2),
                "System alpha",
            ),
            StatCard::new(
                "Aggregated AUM",
                format_compact_inr(overview.total_aum),
                "Total liquidity",
            ),
        ];

        let returns_by_period = vec![
            SeriesPoint::new("1Y", overview.avg_1yr_return),
            SeriesPoint::new("3Y", overview.avg_3yr_return),
            SeriesPoint::new("5Y", overview.avg_5yr_return),
        ];

        let leaderboard = records_from_map(&dashboard.top_performers, |category, leader| {
            LeaderRow {
                category: category.to_string(),
                badge: category.split(' ').collect::<Vec<_>>().join("_"),
                return_3yr: format_percent(leader.return_3yr, 1),
                fund_name: leader.fund_name.clone(),
                amc_name: leader.amc_name.clone(),
                risk: leader.risk_level,
                stars: leader.rating.stars(),
            }
        });

        let models = records_from_map(&dashboard.model_performance, |key, model| ModelCard {
            label: key.replacen('_', " ", 1),
            accuracy: model
                .accuracy
                .clone()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            rmse: format_fixed(model.rmse, 3),
        });

        let risk = &trends.risk_appetite;

        Self {
            cards,
            performance: performance_slices(&trends.performance_distribution),
            performance_trend: format_percent(trends.performance_distribution.trend(), 1),
            returns_by_period,
            leaderboard,
            models,
            risk_appetite: vec![
                SeriesPoint::new("Conservative", risk.conservative as f64),
                SeriesPoint::new("Moderate", risk.moderate as f64),
                SeriesPoint::new("Aggressive", risk.aggressive as f64),
            ],
            amc_share: top_n_by_count(&trends.amc_market_share, Config::AMC_SHARE_TOP_N),
            category_aum: records_from_map(&trends.category_aum, |name, aum| {
                SeriesPoint::new(name, *aum)
            }),
            rating_distribution: count_series(&trends.rating_distribution),
            market_volatility: format_fixed(trends.market_summary.market_volatility, 2),
            last_updated: dashboard.last_updated,
        }
    }
}

/// Pie slices for the four return bands, each with its share of all funds.
pub fn performance_slices(dist: &PerformanceDistribution) -> Vec<PerformanceSlice> {
    let total = dist.total();
    [
        ("excellent", "Excellent (>25%)", dist.excellent),
        ("good", "Good (15-25%)", dist.good),
        ("average", "Average (10-15%)", dist.average),
        ("below_average", "Below Average (≤10%)", dist.below_average),
    ]
    .into_iter()
    .map(|(key, label, count)| PerformanceSlice {
        key,
        label,
        count,
        percentage: format_share(count, total),
    })
    .collect()
}
