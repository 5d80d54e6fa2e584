use super::error::AppError;
use super::fund::non_empty;
use super::wire::opt_display_string;
use crate::config::Config;
use crate::utils::format::{PLACEHOLDER, format_inr};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU64;

/// Investment holding period offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tenure {
    One,
    #[default]
    Three,
    Five,
}

impl Tenure {
    pub const fn years(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Five => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "1 Year",
            Self::Three => "3 Years",
            Self::Five => "5 Years",
        }
    }

    pub const fn all() -> [Self; 3] {
        [Self::One, Self::Three, Self::Five]
    }
}

impl TryFrom<u8> for Tenure {
    type Error = AppError;

    fn try_from(years: u8) -> Result<Self, Self::Error> {
        match years {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            _ => Err(AppError::Validation(format!(
                "Unsupported tenure: {years} years (expected 1, 3 or 5)"
            ))),
        }
    }
}

impl From<Tenure> for u8 {
    fn from(tenure: Tenure) -> Self {
        tenure.years()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Wire value sent to the backend.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Conservative => "Low Risk",
            Self::Moderate => "Moderate",
            Self::Aggressive => "High Risk",
        }
    }

    pub const fn all() -> [Self; 3] {
        [Self::Conservative, Self::Moderate, Self::Aggressive]
    }
}

impl std::str::FromStr for RiskTolerance {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(AppError::Validation(format!("Invalid risk tolerance: {s}"))),
        }
    }
}

const DEFAULT_AMOUNT: NonZeroU64 = match NonZeroU64::new(Config::DEFAULT_INVESTMENT_AMOUNT) {
    Some(amount) => amount,
    None => NonZeroU64::MIN,
};

/// Body of `POST /api/recommend`. Fixed once built from the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    amc_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    amount: NonZeroU64,
    tenure: Tenure,
    risk_tolerance: RiskTolerance,
}

impl RecommendationRequest {
    pub const fn new(amount: NonZeroU64, tenure: Tenure, risk_tolerance: RiskTolerance) -> Self {
        Self {
            amc_name: None,
            category: None,
            amount,
            tenure,
            risk_tolerance,
        }
    }

    pub fn with_amc(mut self, amc_name: impl Into<String>) -> Self {
        self.amc_name = Some(amc_name.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Parses raw form fields. Empty AMC/category selections mean "any".
    pub fn from_form(
        amc_name: &str,
        category: &str,
        amount: &str,
        tenure_years: u8,
        risk_tolerance: &str,
    ) -> Result<Self, AppError> {
        let amount: u64 = amount.trim().parse().map_err(|_| {
            AppError::Validation(format!("Investment amount must be a whole number: {amount}"))
        })?;
        let amount = NonZeroU64::new(amount).ok_or_else(|| {
            AppError::Validation("Investment amount must be greater than zero".to_string())
        })?;

        Ok(Self {
            amc_name: non_empty(amc_name),
            category: non_empty(category),
            amount,
            tenure: Tenure::try_from(tenure_years)?,
            risk_tolerance: risk_tolerance.parse()?,
        })
    }

    pub fn amc_name(&self) -> Option<&str> {
        self.amc_name.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub const fn amount(&self) -> NonZeroU64 {
        self.amount
    }

    pub const fn tenure(&self) -> Tenure {
        self.tenure
    }

    pub const fn risk_tolerance(&self) -> RiskTolerance {
        self.risk_tolerance
    }
}

impl Default for RecommendationRequest {
    fn default() -> Self {
        Self::new(DEFAULT_AMOUNT, Tenure::default(), RiskTolerance::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Success,
    /// No fund matched the requested AMC; the list holds alternatives.
    PartialMatch,
    #[serde(other)]
    Unknown,
}

/// A recommended fund. The backend pre-formats most figures, sometimes as
/// numbers and sometimes as strings, so they are kept as display text.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Recommendation {
    pub scheme_name: String,
    pub amc_name: String,
    #[serde(default, deserialize_with = "opt_display_string")]
    pub predicted_return: Option<String>,
    #[serde(default, deserialize_with = "opt_display_string")]
    pub suggested_allocation: Option<String>,
    #[serde(default, deserialize_with = "opt_display_string")]
    pub allocation_percentage: Option<String>,
    #[serde(default, deserialize_with = "opt_display_string")]
    pub comprehensive_score: Option<String>,
    #[serde(default, deserialize_with = "opt_display_string")]
    pub risk_level: Option<String>,
    #[serde(default, deserialize_with = "opt_display_string")]
    pub rating: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Default, Deserialize)]
pub struct InvestmentSummary {
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "opt_display_string")]
    pub investment_horizon: Option<String>,
    #[serde(default)]
    pub risk_tolerance: Option<String>,
    #[serde(default)]
    pub category_preference: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RecommendationResponse {
    pub status: RecommendationStatus,
    #[serde(default)]
    pub message: String,
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub investment_summary: InvestmentSummary,
    #[serde(default)]
    pub diversification_analysis: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBlock {
    pub amount: String,
    pub tenure: String,
    pub risk_tolerance: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FundCard {
    /// 1-based position in the backend's ordering
    pub position: usize,
    pub scheme_name: String,
    pub amc_name: String,
    pub predicted_return: String,
    pub allocation: String,
    pub allocation_share: String,
    pub rating: String,
    pub risk: String,
    pub score: String,
}

impl From<(usize, &Recommendation)> for FundCard {
    fn from((index, rec): (usize, &Recommendation)) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_else(|| PLACEHOLDER.to_string());
        Self {
            position: index + 1,
            scheme_name: rec.scheme_name.clone(),
            amc_name: rec.amc_name.clone(),
            predicted_return: text(&rec.predicted_return),
            allocation: text(&rec.suggested_allocation),
            allocation_share: text(&rec.allocation_percentage),
            rating: rec
                .rating
                .as_ref()
                .map_or_else(|| PLACEHOLDER.to_string(), |r| format!("★ {r}")),
            risk: text(&rec.risk_level),
            score: text(&rec.comprehensive_score),
        }
    }
}

/// What the recommendation screen renders after a submit.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationView {
    pub status: RecommendationStatus,
    /// Backend message shown when the result is not a plain success.
    pub notice: Option<String>,
    pub summary: SummaryBlock,
    /// Cards in backend order; never re-sorted here.
    pub cards: Vec<FundCard>,
}

impl RecommendationView {
    /// Summary fields come from the backend's echo, falling back to what was
    /// submitted when the echo omits them.
    pub fn build(request: &RecommendationRequest, response: &RecommendationResponse) -> Self {
        let echo = &response.investment_summary;

        let summary = SummaryBlock {
            amount: format_inr(
                echo.total_amount
                    .or(Some(request.amount().get() as f64)),
            ),
            tenure: echo
                .investment_horizon
                .clone()
                .unwrap_or_else(|| request.tenure().years().to_string()),
            risk_tolerance: echo
                .risk_tolerance
                .clone()
                .unwrap_or_else(|| request.risk_tolerance().as_str().to_string()),
            category: echo
                .category_preference
                .clone()
                .or_else(|| request.category().map(str::to_string))
                .unwrap_or_else(|| "All Categories".to_string()),
        };

        let notice = (response.status != RecommendationStatus::Success
            && !response.message.is_empty())
        .then(|| response.message.clone());

        Self {
            status: response.status,
            notice,
            summary,
            cards: response
                .recommendations
                .iter()
                .enumerate()
                .map(FundCard::from)
                .collect(),
        }
    }
}
