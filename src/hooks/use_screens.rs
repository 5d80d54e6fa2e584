use crate::hooks::use_screen::{ScreenHandle, use_screen, use_screen_with};
use crate::models::{
    catalog::FormOptions,
    forecast::{ComparisonRequest, ComparisonResponse, ForecastRequest, ForecastView},
    fund::FundFilter,
    health::HealthStatus,
    market::DashboardView,
    performers::TopPerformersQuery,
    recommendation::{RecommendationRequest, RecommendationView},
};
use crate::services::screens::{
    AnalysisScreen, FundExplorerScreen, FundResults, PerformerResults, compare, load_analysis,
    load_dashboard, load_forecast, load_form_options, load_fund_explorer, load_top_performers,
    search_funds, submit_recommendation,
};
use yew::prelude::*;

/// Backend status shown in the header.
#[hook]
pub fn use_health() -> ScreenHandle<HealthStatus> {
    use_screen(|client| async move { client.health_check().await })
}

#[hook]
pub fn use_dashboard() -> ScreenHandle<DashboardView> {
    use_screen(|client| async move { load_dashboard(&client).await })
}

#[hook]
pub fn use_analysis() -> ScreenHandle<AnalysisScreen> {
    use_screen(|client| async move { load_analysis(&client).await })
}

#[hook]
pub fn use_form_options() -> ScreenHandle<FormOptions> {
    use_screen(|client| async move { load_form_options(&client).await })
}

/// First visit to the explorer: dropdowns, default search and default top
/// performers in one join.
#[hook]
pub fn use_fund_explorer() -> ScreenHandle<FundExplorerScreen> {
    use_screen(|client| async move {
        load_fund_explorer(
            &client,
            &FundFilter::default(),
            &TopPerformersQuery::default(),
        )
        .await
    })
}

/// Re-runs the fund search whenever a new filter is applied.
#[hook]
pub fn use_fund_search(filter: Option<FundFilter>) -> ScreenHandle<FundResults> {
    use_screen_with(filter, |client, filter| async move {
        search_funds(&client, &filter).await
    })
}

#[hook]
pub fn use_top_performers(query: Option<TopPerformersQuery>) -> ScreenHandle<PerformerResults> {
    use_screen_with(query, |client, query| async move {
        load_top_performers(&client, &query).await
    })
}

#[hook]
pub fn use_forecast(request: Option<ForecastRequest>) -> ScreenHandle<ForecastView> {
    use_screen_with(request, |client, request| async move {
        load_forecast(&client, &request).await
    })
}

/// Side-by-side comparison; idle until at least two funds are picked.
#[hook]
pub fn use_comparison(request: Option<ComparisonRequest>) -> ScreenHandle<ComparisonResponse> {
    let request = request.filter(|r| r.fund_names.len() >= 2);
    use_screen_with(request, |client, request| async move {
        compare(&client, &request).await
    })
}

pub struct RecommendationHandle {
    pub screen: ScreenHandle<RecommendationView>,
    pub submit: Callback<RecommendationRequest>,
}

/// Idle until the form is submitted. Each submit is a new load, even when
/// the request is unchanged.
#[hook]
pub fn use_recommendation() -> RecommendationHandle {
    let submitted = use_state(|| None::<(RecommendationRequest, u32)>);

    let screen = use_screen_with((*submitted).clone(), |client, (request, _)| async move {
        submit_recommendation(&client, &request).await
    });

    let submit = {
        let submitted = submitted.clone();
        Callback::from(move |request: RecommendationRequest| {
            let serial = submitted.as_ref().map_or(0, |(_, n)| n + 1);
            submitted.set(Some((request, serial)));
        })
    };

    RecommendationHandle { screen, submit }
}
