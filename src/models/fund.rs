use super::error::AppError;
use crate::config::Config;
use crate::utils::format::{PLACEHOLDER, format_compact_inr, format_percent};
use serde::{Deserialize, Serialize};

/// Risk classification assigned to a fund, 1 (very low) to 6 (very high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RiskLevel(u8);

impl RiskLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    pub fn new(value: i64) -> Result<Self, AppError> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(AppError::OutOfRange {
                field: "risk level",
                value,
                min: Self::MIN.into(),
                max: Self::MAX.into(),
            })
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Severity bucket used for colour coding: 1-2 low, 3-4 medium, 5-6 high.
    pub const fn bucket(self) -> RiskBucket {
        match self.0 {
            0..=2 => RiskBucket::Low,
            3..=4 => RiskBucket::Medium,
            _ => RiskBucket::High,
        }
    }

    pub const fn description(self) -> &'static str {
        match self.0 {
            1 => "Very Low",
            2 => "Low",
            3 => "Moderate",
            4 => "Moderately High",
            5 => "High",
            _ => "Very High",
        }
    }

    /// Short form used in tables, e.g. `4/6`.
    pub fn badge(self) -> String {
        format!("{}/{}", self.0, Self::MAX)
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }
}

impl TryFrom<i64> for RiskLevel {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskLevel> for i64 {
    fn from(level: RiskLevel) -> Self {
        level.0.into()
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.0, self.description())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskBucket {
    Low,
    Medium,
    High,
}

impl RiskBucket {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Returns CSS class name for color coding
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Low => "risk-low",
            Self::Medium => "risk-medium",
            Self::High => "risk-high",
        }
    }

    pub const fn color(&self) -> &'static str {
        match self {
            Self::Low => "#16a34a",    // green
            Self::Medium => "#ca8a04", // yellow
            Self::High => "#dc2626",   // red
        }
    }
}

/// Buckets a raw risk integer, failing for anything outside 1-6.
pub fn risk_bucket(value: i64) -> Result<RiskBucket, AppError> {
    RiskLevel::new(value).map(RiskLevel::bucket)
}

/// Star rating, 0 (unrated) to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, AppError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or(AppError::OutOfRange {
                field: "rating",
                value,
                min: 0,
                max: Self::MAX.into(),
            })
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Always five glyphs: one filled star per rating point, the rest hollow.
    pub fn stars(self) -> String {
        let filled = usize::from(self.0);
        let empty = usize::from(Self::MAX) - filled;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl TryFrom<i64> for Rating {
    type Error = AppError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i64 {
    fn from(rating: Rating) -> Self {
        rating.0.into()
    }
}

/// Star glyphs for a raw rating integer, failing for anything outside 0-5.
pub fn rating_stars(value: i64) -> Result<String, AppError> {
    Rating::new(value).map(Rating::stars)
}

/// The backend has no stable fund id; scheme and AMC together identify a fund.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FundKey {
    pub scheme_name: String,
    pub amc_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub scheme_name: String,
    pub amc_name: String,
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
    #[serde(default)]
    pub fund_size: Option<f64>,
    #[serde(default)]
    pub fund_age: Option<f64>,
}

impl Fund {
    pub fn key(&self) -> FundKey {
        FundKey {
            scheme_name: self.scheme_name.clone(),
            amc_name: self.amc_name.clone(),
        }
    }

    /// Case-insensitive substring match on scheme or AMC name.
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.scheme_name.to_lowercase().contains(needle)
            || self.amc_name.to_lowercase().contains(needle)
    }
}

/// Narrows an already fetched page of funds by a free-text term.
///
/// The result keeps the input order and only ever drops funds, so applying
/// the same term twice is a no-op and an empty term returns the input.
pub fn filter_by_term(funds: &[Fund], term: &str) -> Vec<Fund> {
    if term.is_empty() {
        return funds.to_vec();
    }
    let needle = term.to_lowercase();
    funds.iter().filter(|f| f.matches(&needle)).cloned().collect()
}

/// Body of `POST /api/funds`. Absent fields mean "any".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amc_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Default for FundFilter {
    fn default() -> Self {
        Self {
            amc_name: None,
            category: None,
            risk_level: None,
            min_rating: None,
            limit: Some(Config::DEFAULT_FUND_LIMIT),
        }
    }
}

impl FundFilter {
    /// Builds a filter from the explorer form, where an empty selection or a
    /// zero risk level/rating means "any".
    pub fn from_form(
        amc_name: &str,
        category: &str,
        risk_level: i64,
        min_rating: i64,
        limit: u32,
    ) -> Result<Self, AppError> {
        Ok(Self {
            amc_name: non_empty(amc_name),
            category: non_empty(category),
            risk_level: (risk_level != 0)
                .then(|| RiskLevel::new(risk_level))
                .transpose()?,
            min_rating: (min_rating != 0)
                .then(|| Rating::new(min_rating))
                .transpose()?,
            limit: Some(limit),
        })
    }
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct FiltersApplied {
    #[serde(default)]
    pub amc_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub risk_level: Option<i64>,
    #[serde(default)]
    pub min_rating: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FundsResponse {
    pub funds: Vec<Fund>,
    pub total_found: u64,
    #[serde(default)]
    pub filters_applied: FiltersApplied,
}

/// One fund as the explorer table shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct FundRow {
    pub scheme_name: String,
    pub amc_name: String,
    pub return_1yr: String,
    pub return_3yr: String,
    pub return_5yr: String,
    pub risk: String,
    pub risk_bucket: RiskBucket,
    pub stars: String,
    pub expense_ratio: String,
    pub fund_size: String,
}

impl From<&Fund> for FundRow {
    fn from(fund: &Fund) -> Self {
        let size = format_compact_inr(fund.fund_size);
        Self {
            scheme_name: fund.scheme_name.clone(),
            amc_name: fund.amc_name.clone(),
            return_1yr: format_percent(fund.return_1yr, 1),
            return_3yr: format_percent(fund.return_3yr, 1),
            return_5yr: format_percent(fund.return_5yr, 1),
            risk: fund.risk_level.badge(),
            risk_bucket: fund.risk_level.bucket(),
            stars: fund.rating.stars(),
            expense_ratio: format_percent(fund.expense_ratio, 2),
            // fund_size is reported in crores
            fund_size: if size == PLACEHOLDER {
                size
            } else {
                format!("{size} Cr")
            },
        }
    }
}
