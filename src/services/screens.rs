//! Screen loaders: each one fetches everything a screen needs and returns a
//! single view model, or the first error. A screen never sees half its data.

use super::api::FundApiClient;
use crate::models::{
    analysis::{AnalysisView, DescriptiveAnalysis},
    catalog::FormOptions,
    error::AppError,
    forecast::{ComparisonRequest, ComparisonResponse, ForecastRequest, ForecastView},
    fund::{FundFilter, FundRow, FundsResponse, filter_by_term},
    market::DashboardView,
    performers::{PerformerRow, TopPerformersQuery, TopPerformersResponse},
    recommendation::{RecommendationRequest, RecommendationView},
    series::SeriesPoint,
};

pub async fn load_dashboard(client: &FundApiClient) -> Result<DashboardView, AppError> {
    let (dashboard, trends) =
        futures::try_join!(client.get_dashboard_data(), client.get_market_trends())?;
    Ok(DashboardView::build(&dashboard, &trends))
}

/// Enhanced analysis plus the descriptive breakdowns shown beside it.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisScreen {
    pub view: AnalysisView,
    pub category_mix: Vec<SeriesPoint>,
    pub risk_mix: Vec<SeriesPoint>,
    pub top_amcs: Vec<SeriesPoint>,
}

impl AnalysisScreen {
    fn build(view: AnalysisView, descriptive: &DescriptiveAnalysis) -> Self {
        Self {
            view,
            category_mix: descriptive.category_series(),
            risk_mix: descriptive.risk_series(),
            top_amcs: descriptive.top_amc_series(),
        }
    }
}

pub async fn load_analysis(client: &FundApiClient) -> Result<AnalysisScreen, AppError> {
    let (enhanced, descriptive) = futures::try_join!(
        client.get_enhanced_analysis(),
        client.get_descriptive_analysis()
    )?;
    Ok(AnalysisScreen::build(
        AnalysisView::build(&enhanced),
        &descriptive,
    ))
}

pub async fn load_form_options(client: &FundApiClient) -> Result<FormOptions, AppError> {
    let (amcs, categories) = futures::try_join!(client.get_amcs(), client.get_categories())?;
    Ok(FormOptions::build(&amcs, &categories))
}

/// A page of funds as returned for one filter.
#[derive(Debug, Clone, PartialEq)]
pub struct FundResults {
    pub funds: FundsResponse,
}

impl FundResults {
    /// Table rows narrowed by the explorer's search box.
    pub fn rows(&self, term: &str) -> Vec<FundRow> {
        filter_by_term(&self.funds.funds, term)
            .iter()
            .map(FundRow::from)
            .collect()
    }
}

impl From<FundsResponse> for FundResults {
    fn from(funds: FundsResponse) -> Self {
        Self { funds }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformerResults {
    pub response: TopPerformersResponse,
    pub rows: Vec<PerformerRow>,
}

impl From<TopPerformersResponse> for PerformerResults {
    fn from(response: TopPerformersResponse) -> Self {
        let rows = response.rows();
        Self { response, rows }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FundExplorerScreen {
    pub options: FormOptions,
    pub results: FundResults,
    pub performers: PerformerResults,
}

/// Dropdowns, the first page of funds and the top performers table, together.
pub async fn load_fund_explorer(
    client: &FundApiClient,
    filter: &FundFilter,
    query: &TopPerformersQuery,
) -> Result<FundExplorerScreen, AppError> {
    let (amcs, categories, funds, performers) = futures::try_join!(
        client.get_amcs(),
        client.get_categories(),
        client.get_funds(filter),
        client.get_top_performers(query)
    )?;
    Ok(FundExplorerScreen {
        options: FormOptions::build(&amcs, &categories),
        results: funds.into(),
        performers: performers.into(),
    })
}

pub async fn search_funds(
    client: &FundApiClient,
    filter: &FundFilter,
) -> Result<FundResults, AppError> {
    client.get_funds(filter).await.map(FundResults::from)
}

pub async fn load_top_performers(
    client: &FundApiClient,
    query: &TopPerformersQuery,
) -> Result<PerformerResults, AppError> {
    client
        .get_top_performers(query)
        .await
        .map(PerformerResults::from)
}

pub async fn submit_recommendation(
    client: &FundApiClient,
    request: &RecommendationRequest,
) -> Result<RecommendationView, AppError> {
    let response = client.get_recommendations(request).await?;
    Ok(RecommendationView::build(request, &response))
}

pub async fn load_forecast(
    client: &FundApiClient,
    request: &ForecastRequest,
) -> Result<ForecastView, AppError> {
    let forecast = client.get_forecast(request).await?;
    Ok(ForecastView::build(&forecast))
}

pub async fn compare(
    client: &FundApiClient,
    request: &ComparisonRequest,
) -> Result<ComparisonResponse, AppError> {
    client.compare_funds(request).await
}
