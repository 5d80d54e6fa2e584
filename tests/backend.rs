//! Drives the real HTTP client against stub backends on ephemeral ports.

use axum::body::{Body, Bytes};
use axum::extract::{RawQuery, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use fund_explorer::hooks::use_screen::ScreenState;
use fund_explorer::models::{
    error::AppError,
    forecast::{ComparisonRequest, ForecastRequest},
    fund::FundFilter,
    performers::TopPerformersQuery,
    recommendation::{RecommendationRequest, RecommendationStatus},
};
use fund_explorer::services::api::{ApiConfig, FundApiClient};
use fund_explorer::services::screens::{
    compare, load_dashboard, load_fund_explorer, submit_recommendation,
};
use futures::StreamExt;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

type Captured = Arc<Mutex<Vec<Value>>>;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fund_explorer=debug")),
        )
        .with_test_writer()
        .try_init()
        .ok();
}

async fn spawn_backend(router: Router) -> FundApiClient {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    let config = ApiConfig::builder()
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap();
    FundApiClient::with_config(config).unwrap()
}

/// Served as raw text so key order on the wire is exactly as written here,
/// with categories deliberately out of alphabetical order.
const DASHBOARD_JSON: &str = r#"{
    "market_overview": {
        "total_funds": 812, "total_amcs": 41,
        "avg_1yr_return": 14.2, "avg_3yr_return": 17.85, "avg_5yr_return": 15.1,
        "total_aum": 2450000.0
    },
    "top_performers": {
        "Equity": {"fund_name": "Alpha Growth", "amc_name": "Alpha AMC",
                   "return_3yr": 31.4, "risk_level": 6, "rating": 5},
        "Debt": {"fund_name": "Steady Income", "amc_name": "Beta AMC",
                 "return_3yr": 8.2, "risk_level": 2, "rating": 4}
    },
    "model_performance": {"3_year_model": {"accuracy": "91.3%", "rmse": 2.41}},
    "last_updated": "2025-01-15"
}"#;

const TRENDS_JSON: &str = r#"{
    "performance_distribution": {"excellent": 120, "good": 300, "average": 250, "below_average": 142},
    "risk_appetite": {"conservative": 200, "moderate": 350, "aggressive": 262},
    "amc_market_share": {"Alpha AMC": 60, "Beta AMC": 45},
    "category_aum": {"Equity": 1200000.0, "Debt": 800000.0, "Hybrid": 450000.0},
    "expense_trends": {"market_average": 1.1},
    "rating_distribution": {"5": 80, "4": 200},
    "sharpe_analysis": {"market_avg_sharpe": 0.9, "high_sharpe_funds": 40, "negative_sharpe_funds": 12},
    "market_summary": {"total_funds": 812, "total_aum": 2450000.0, "avg_3yr_return": 17.85, "market_volatility": 6.3}
}"#;

fn raw_json(body: &'static str) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

fn recommendation_json() -> Value {
    json!({
        "status": "success",
        "message": "Generated 2 recommendations",
        "recommendations": [
            {"scheme_name": "Alpha Growth", "amc_name": "Alpha AMC", "predicted_return": "18.4%",
             "suggested_allocation": "₹30,000", "allocation_percentage": "60.0%",
             "comprehensive_score": 0.87, "risk_level": "Moderately High", "rating": 5},
            {"scheme_name": "Steady Income", "amc_name": "Beta AMC", "predicted_return": "9.1%",
             "suggested_allocation": "₹20,000", "allocation_percentage": "40.0%",
             "comprehensive_score": "0.74", "risk_level": "Low", "rating": "4"}
        ],
        "investment_summary": {
            "total_amount": 50000, "investment_horizon": 3,
            "risk_tolerance": "moderate", "category_preference": null
        }
    })
}

fn failing_backend() -> Router {
    Router::new().fallback(|| async {
        (StatusCode::INTERNAL_SERVER_ERROR, "Models or data not loaded")
    })
}

fn assert_server_error<T: std::fmt::Debug>(result: Result<T, AppError>) {
    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(500), "unexpected error: {err:?}");
    assert_eq!(err.user_message(), "API Error: 500 Internal Server Error");
    match err {
        AppError::Http { body, .. } => assert_eq!(body, "Models or data not loaded"),
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_every_operation_surfaces_server_errors() {
    let client = spawn_backend(failing_backend()).await;

    assert_server_error(client.health_check().await);
    assert_server_error(
        client
            .get_recommendations(&RecommendationRequest::default())
            .await,
    );
    assert_server_error(client.get_amcs().await);
    assert_server_error(client.get_categories().await);
    assert_server_error(client.get_dashboard_data().await);
    assert_server_error(client.get_market_trends().await);
    assert_server_error(client.get_descriptive_analysis().await);
    assert_server_error(client.get_enhanced_analysis().await);
    assert_server_error(client.get_funds(&FundFilter::default()).await);
    assert_server_error(client.get_forecast(&ForecastRequest::new("Alpha Growth")).await);
    assert_server_error(client.compare_funds(&ComparisonRequest::new(["A", "B"])).await);
    assert_server_error(
        client
            .get_top_performers(&TopPerformersQuery::default())
            .await,
    );
}

#[tokio::test]
async fn test_unresponsive_backend_never_resolves() {
    let router = Router::new().fallback(|| async {
        std::future::pending::<()>().await;
        StatusCode::OK
    });
    let client = spawn_backend(router).await;

    let outcome = tokio::time::timeout(Duration::from_millis(300), client.get_amcs()).await;
    assert!(outcome.is_err(), "a hanging backend must not produce a result");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ApiConfig::builder()
        .base_url(format!("http://{addr}"))
        .build()
        .unwrap();
    let client = FundApiClient::with_config(config).unwrap();

    let err = client.get_categories().await.unwrap_err();
    assert!(err.is_transport(), "expected transport error, got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_unreadable_error_body_keeps_status() {
    let router = Router::new().fallback(|| async {
        let chunks = futures::stream::once(async {
            Ok::<_, std::io::Error>(Bytes::from_static(b"Models or"))
        })
        .chain(futures::stream::once(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err(std::io::Error::other("connection reset mid-body"))
        }));
        (StatusCode::SERVICE_UNAVAILABLE, Body::from_stream(chunks))
    });
    let client = spawn_backend(router).await;

    let err = client.get_amcs().await.unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.user_message(), "API Error: 503 Service Unavailable");
    match err {
        AppError::Http { body, .. } => assert_eq!(body, ""),
        other => panic!("expected an HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_shape_error() {
    let router = Router::new()
        .route("/api/amcs", get(|| async { Json(json!({"providers": ["Alpha AMC"]})) }))
        .route("/api/categories", get(|| async { "not json at all" }));
    let client = spawn_backend(router).await;

    assert!(client.get_amcs().await.unwrap_err().is_shape());
    assert!(client.get_categories().await.unwrap_err().is_shape());
}

#[tokio::test]
async fn test_recommendation_round_trip() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route(
            "/api/recommend",
            post(
                |State(seen): State<Captured>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    Json(recommendation_json())
                },
            ),
        )
        .with_state(captured.clone());
    let client = spawn_backend(router).await;

    let request = RecommendationRequest::from_form("", "", "50000", 3, "moderate").unwrap();
    let view = submit_recommendation(&client, &request).await.unwrap();

    assert_eq!(
        captured.lock().unwrap().as_slice(),
        &[json!({"amount": 50000, "tenure": 3, "risk_tolerance": "moderate"})]
    );
    assert_eq!(view.status, RecommendationStatus::Success);
    assert_eq!(view.notice, None);
    assert_eq!(view.summary.amount, "₹50,000");
    assert_eq!(view.summary.tenure, "3");
    assert_eq!(view.summary.category, "All Categories");

    let names: Vec<&str> = view.cards.iter().map(|c| c.scheme_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha Growth", "Steady Income"]);
    assert_eq!(view.cards[0].position, 1);
    assert_eq!(view.cards[0].score, "0.87");
    assert_eq!(view.cards[1].rating, "★ 4");
}

#[tokio::test]
async fn test_partial_match_surfaces_notice() {
    let router = Router::new().route(
        "/api/recommend",
        post(|| async {
            let mut body = recommendation_json();
            body["status"] = json!("partial_match");
            body["message"] = json!("No suitable funds found for Gamma AMC.");
            Json(body)
        }),
    );
    let client = spawn_backend(router).await;

    let request = RecommendationRequest::default().with_amc("Gamma AMC");
    let view = submit_recommendation(&client, &request).await.unwrap();
    assert_eq!(view.status, RecommendationStatus::PartialMatch);
    assert_eq!(
        view.notice.as_deref(),
        Some("No suitable funds found for Gamma AMC.")
    );
}

#[tokio::test]
async fn test_dashboard_loads_when_both_calls_succeed() {
    let router = Router::new()
        .route("/api/dashboard-data", get(|| async { raw_json(DASHBOARD_JSON) }))
        .route("/api/market-trends", get(|| async { raw_json(TRENDS_JSON) }));
    let client = spawn_backend(router).await;

    let view = load_dashboard(&client).await.unwrap();
    assert_eq!(view.cards[0].value, "812");
    assert_eq!(view.cards[2].value, "17.85%");
    assert_eq!(view.cards[3].value, "₹2.45M");
    let categories: Vec<&str> = view.leaderboard.iter().map(|r| r.category.as_str()).collect();
    assert_eq!(categories, vec!["Equity", "Debt"]);
    let aum: Vec<&str> = view.category_aum.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(aum, vec!["Equity", "Debt", "Hybrid"]);
    assert_eq!(view.leaderboard[0].stars, "★★★★★");
    assert_eq!(view.models[0].label, "3 year model");
}

#[tokio::test]
async fn test_dashboard_fails_whole_when_trends_fail() {
    let router = Router::new()
        .route("/api/dashboard-data", get(|| async { raw_json(DASHBOARD_JSON) }))
        .route(
            "/api/market-trends",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let client = spawn_backend(router).await;

    let state = ScreenState::from_result(load_dashboard(&client).await);
    assert!(state.data().is_none());
    assert_eq!(state.error(), Some("API Error: 500 Internal Server Error"));
}

#[tokio::test]
async fn test_fund_explorer_sends_default_query_and_filter() {
    let captured: Captured = Arc::default();
    let router = Router::new()
        .route("/api/amcs", get(|| async { Json(json!({"amcs": ["Alpha AMC"]})) }))
        .route(
            "/api/categories",
            get(|| async { Json(json!({"categories": [{"name": "Equity", "count": 412}]})) }),
        )
        .route(
            "/api/funds",
            post(
                |State(seen): State<Captured>, Json(body): Json<Value>| async move {
                    seen.lock().unwrap().push(body);
                    Json(json!({"funds": [], "total_found": 0, "filters_applied": {}}))
                },
            ),
        )
        .route(
            "/api/top-performers",
            get(
                |State(seen): State<Captured>, RawQuery(query): RawQuery| async move {
                    seen.lock().unwrap().push(json!(query));
                    Json(json!({
                        "metric": "return_3yr", "category": "All",
                        "top_performers": [], "total_evaluated": 812
                    }))
                },
            ),
        )
        .with_state(captured.clone());
    let client = spawn_backend(router).await;

    let screen = load_fund_explorer(
        &client,
        &FundFilter::default(),
        &TopPerformersQuery::default(),
    )
    .await
    .unwrap();

    let seen = captured.lock().unwrap().clone();
    assert!(seen.contains(&json!({"limit": 50})));
    assert!(seen.contains(&json!("metric=return_3yr&limit=10")));
    assert_eq!(screen.options.categories[1].label, "Equity (412)");
    assert!(screen.results.rows("").is_empty());
}

#[tokio::test]
async fn test_compare_keeps_missing_funds_in_place() {
    let router = Router::new().route(
        "/api/compare-funds",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({"fund_names": ["Alpha Growth", "Ghost Fund"]}));
            Json(json!({
                "comparison": [
                    {"fund_name": "Alpha Growth", "amc_name": "Alpha AMC",
                     "return_1yr": 22.0, "expense_ratio": 0.65},
                    {"fund_name": "Ghost Fund", "error": "Fund not found"}
                ],
                "metrics_compared": ["return_1yr", "expense_ratio"],
                "total_funds": 2
            }))
        }),
    );
    let client = spawn_backend(router).await;

    let response = compare(&client, &ComparisonRequest::new(["Alpha Growth", "Ghost Fund"]))
        .await
        .unwrap();
    let rows = response.metric_rows();
    assert_eq!(rows[0].cells, vec!["22.00", "—"]);
    assert_eq!(rows[1].metric, "expense ratio");
}
