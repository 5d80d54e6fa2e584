#[cfg(test)]
mod tests {
    use fund_explorer::hooks::use_screen::{ScreenPhase, ScreenState};
    use fund_explorer::models::{
        analysis::{AnalysisView, EnhancedAnalysis},
        catalog::{AmcList, CategoryList, FormOptions},
        error::AppError,
        fund::{Fund, FundRow, RiskBucket, RiskLevel, filter_by_term, rating_stars, risk_bucket},
        market::{DashboardData, DashboardView, MarketTrends},
        recommendation::{RecommendationRequest, RecommendationResponse, RecommendationView},
    };
    use fund_explorer::utils::format::{
        PLACEHOLDER, format_compact_inr, format_inr, format_percent, format_years,
    };
    use std::rc::Rc;

    // Helper function to create a page of funds
    fn create_test_funds() -> Vec<Fund> {
        let json = r#"[
            {"scheme_name": "Alpha Bluechip Fund", "amc_name": "Alpha Mutual Fund",
             "return_1yr": 21.4, "return_3yr": 18.2, "return_5yr": 15.0,
             "risk_level": 5, "rating": 4, "expense_ratio": 0.92, "fund_size": 12450.0, "fund_age": 9.0},
            {"scheme_name": "Beta Liquid Fund", "amc_name": "Beta AMC",
             "return_1yr": 6.8, "return_3yr": 5.9, "return_5yr": null,
             "risk_level": 1, "rating": 3, "expense_ratio": 0.2, "fund_size": 840.0},
            {"scheme_name": "Gamma Hybrid", "amc_name": "ALPHA Mutual Fund",
             "return_1yr": 12.0, "return_3yr": 11.1,
             "risk_level": 3, "rating": 0}
        ]"#;
        serde_json::from_str(json).unwrap()
    }

    fn create_enhanced_analysis() -> EnhancedAnalysis {
        let json = r#"{
            "correlation_analysis": {
                "correlation_matrix": {"return_3yr": {"return_3yr": 1.0, "expense_ratio": -0.4123}},
                "strong_correlations": [
                    {"feature1": "return_3yr", "feature2": "return_5yr", "correlation": 0.87654, "strength": "strong"},
                    {"feature1": "expense_ratio", "feature2": "return_3yr", "correlation": -0.4123, "strength": "moderate"}
                ],
                "key_insights": ["Found 2 strong correlations between fund metrics"]
            },
            "category_trends": {
                "Equity": {"count": 412, "avg_return_1yr": 19.1, "avg_return_3yr": 18.3,
                           "avg_return_5yr": 15.2, "avg_risk": 5.1, "avg_expense": 1.2,
                           "top_performer": "Alpha Bluechip Fund"},
                "Debt": {"count": 260, "avg_return_1yr": 7.0, "avg_return_3yr": 6.4,
                         "avg_return_5yr": 6.9, "avg_risk": 1.8, "avg_expense": 0.6,
                         "top_performer": null}
            },
            "risk_return_analysis": [
                {"risk_level": 1, "fund_count": 90, "avg_return_1yr": 6.1, "avg_return_3yr": 5.8,
                 "avg_return_5yr": 6.2, "return_volatility": 0.9},
                {"risk_level": 6, "fund_count": 1, "avg_return_3yr": 24.0, "return_volatility": null}
            ],
            "expense_impact": {
                "Low_Cost": {"count": 300, "avg_return_3yr": 14.2, "avg_expense": 0.5},
                "High_Cost": {"count": 120, "avg_return_3yr": 12.9, "avg_expense": 2.1}
            },
            "age_performance": [
                {"age_range": "0-3 years", "count": 80, "avg_return_3yr": 16.0, "avg_stability": 4.2}
            ],
            "distribution_analysis": {
                "return_3yr": {"mean": 14.23, "median": 13.9, "std": 6.1, "skewness": 0.4321,
                               "kurtosis": -0.12, "percentiles": {"25th": 9.8, "75th": 18.7}}
            },
            "market_insights": {"total_aum": 2450000.0, "avg_fund_age": 7.36,
                                "high_performers_count": 143, "low_cost_funds_count": 301}
        }"#;
        serde_json::from_str(json).unwrap()
    }

    // ERROR TESTS
    #[test]
    fn test_app_error_http_display() {
        let error = AppError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            body: String::new(),
        };
        assert_eq!(error.to_string(), "HTTP error: 503 Service Unavailable");
        assert_eq!(error.user_message(), "API Error: 503 Service Unavailable");
        assert_eq!(error.status(), Some(503));
    }

    #[test]
    fn test_app_error_kinds_are_distinct() {
        let transport = AppError::Transport("connection refused".to_string());
        let shape = AppError::Shape("missing field `amcs`".to_string());
        assert!(transport.is_transport() && !transport.is_shape());
        assert!(shape.is_shape() && !shape.is_transport());
        assert_eq!(transport.status(), None);
    }

    // CURRENCY TESTS
    #[test]
    fn test_compact_inr_thresholds_are_inclusive() {
        assert_eq!(format_compact_inr(999.0), "₹999");
        assert_eq!(format_compact_inr(1_000.0), "₹1K");
        assert_eq!(format_compact_inr(999_000.0), "₹999K");
        assert_eq!(format_compact_inr(1_000_000.0), "₹1.00M");
        assert_eq!(format_compact_inr(2_450_000.0), "₹2.45M");
    }

    #[test]
    fn test_compact_inr_never_invents_values() {
        assert_eq!(format_compact_inr(None::<f64>), PLACEHOLDER);
        assert_eq!(format_compact_inr(f64::NAN), PLACEHOLDER);
        assert_eq!(format_compact_inr(f64::INFINITY), PLACEHOLDER);
        assert_eq!(format_compact_inr(-2_600.0), "-₹3K");
    }

    #[test]
    fn test_inr_groups_indian_style() {
        assert_eq!(format_inr(50_000.0), "₹50,000");
        assert_eq!(format_inr(100_000.0), "₹1,00,000");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(None::<f64>), PLACEHOLDER);
    }

    #[test]
    fn test_percent_and_years() {
        assert_eq!(format_percent(17.852, 2), "17.85%");
        assert_eq!(format_percent(f64::NAN, 2), PLACEHOLDER);
        assert_eq!(format_years(7.36), "7.4 yrs");
    }

    // RISK AND RATING TESTS
    #[test]
    fn test_every_risk_level_has_one_bucket() {
        for level in RiskLevel::all() {
            let bucket = risk_bucket(level.value().into()).unwrap();
            assert_eq!(bucket, level.bucket());
        }
        assert_eq!(risk_bucket(2).unwrap(), RiskBucket::Low);
        assert_eq!(risk_bucket(3).unwrap(), RiskBucket::Medium);
        assert_eq!(risk_bucket(5).unwrap(), RiskBucket::High);
        assert!(risk_bucket(0).is_err());
        assert!(risk_bucket(7).is_err());
    }

    #[test]
    fn test_rating_glyphs() {
        assert_eq!(rating_stars(0).unwrap(), "☆☆☆☆☆");
        assert_eq!(rating_stars(5).unwrap(), "★★★★★");
        assert!(matches!(
            rating_stars(9),
            Err(AppError::OutOfRange { field: "rating", .. })
        ));
    }

    // FUND FILTER TESTS
    #[test]
    fn test_filter_matches_scheme_or_amc_case_insensitively() {
        let funds = create_test_funds();
        let names: Vec<String> = filter_by_term(&funds, "alpha")
            .into_iter()
            .map(|f| f.scheme_name)
            .collect();
        assert_eq!(names, vec!["Alpha Bluechip Fund", "Gamma Hybrid"]);
    }

    #[test]
    fn test_filter_is_idempotent_subsequence() {
        let funds = create_test_funds();
        for term in ["", "fund", "BETA", "nothing matches"] {
            let once = filter_by_term(&funds, term);
            let twice = filter_by_term(&once, term);
            assert_eq!(once, twice, "term {term:?}");

            let mut rest = funds.iter();
            assert!(
                once.iter().all(|f| rest.any(|g| g == f)),
                "term {term:?} must keep input order"
            );
        }
        assert_eq!(filter_by_term(&funds, ""), funds);
    }

    #[test]
    fn test_fund_row_formatting() {
        let funds = create_test_funds();
        let row = FundRow::from(&funds[0]);
        assert_eq!(row.return_3yr, "18.2%");
        assert_eq!(row.risk, "5/6");
        assert_eq!(row.stars, "★★★★☆");
        assert_eq!(row.fund_size, "₹12K Cr");

        let sparse = FundRow::from(&funds[2]);
        assert_eq!(sparse.return_5yr, PLACEHOLDER);
        assert_eq!(sparse.fund_size, PLACEHOLDER);
        assert_eq!(sparse.risk_bucket, RiskBucket::Medium);
    }

    // FORM OPTION TESTS
    #[test]
    fn test_form_options_keep_backend_order() {
        let amcs: AmcList = serde_json::from_str(r#"{"amcs": ["Beta AMC", "Alpha AMC"]}"#).unwrap();
        let categories: CategoryList = serde_json::from_str(
            r#"{"categories": [{"name": "Equity", "count": 412}, {"name": "Debt", "count": 260}]}"#,
        )
        .unwrap();

        let options = FormOptions::build(&amcs, &categories);
        let amc_values: Vec<&str> = options.amcs.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(amc_values, vec!["", "Beta AMC", "Alpha AMC"]);
        assert_eq!(options.categories[1].label, "Equity (412)");
        assert_eq!(options.categories[2].label, "Debt (260)");
    }

    // DASHBOARD TESTS
    #[test]
    fn test_dashboard_amc_share_top_ten() {
        let amc_share: String = (0..15)
            .map(|i| format!("\"AMC {i}\": {}", 100 - i * 5))
            .collect::<Vec<_>>()
            .join(",");
        let trends: MarketTrends = serde_json::from_str(&format!(
            r#"{{
                "performance_distribution": {{"excellent": 1, "good": 1, "average": 1, "below_average": 1}},
                "risk_appetite": {{"conservative": 1, "moderate": 2, "aggressive": 3}},
                "amc_market_share": {{{amc_share}}},
                "market_summary": {{"total_funds": 4}}
            }}"#
        ))
        .unwrap();
        let dashboard: DashboardData = serde_json::from_str(
            r#"{"market_overview": {"total_funds": 4, "total_amcs": 15}, "top_performers": {}}"#,
        )
        .unwrap();

        let view = DashboardView::build(&dashboard, &trends);
        assert_eq!(view.amc_share.len(), 10);
        assert_eq!(view.amc_share[0].name, "AMC 0");
        assert_eq!(view.amc_share[9].name, "AMC 9");
        assert_eq!(view.cards[3].value, PLACEHOLDER);
        assert_eq!(view.market_volatility, PLACEHOLDER);
        assert_eq!(view.performance_trend, "0.0%");
    }

    // ANALYSIS TESTS
    #[test]
    fn test_analysis_view_cards() {
        let view = AnalysisView::build(&create_enhanced_analysis());

        let values: Vec<&str> = view.insights.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["143", "301", "7.4 yrs", "₹2.45M"]);

        assert_eq!(view.correlations[0].pair, "return_3yr ↔ return_5yr");
        assert_eq!(view.correlations[0].value, "0.877");
        assert_eq!(view.correlations[0].strength, "Strong Correlation");
        assert_eq!(view.correlations[1].value, "-0.412");
    }

    #[test]
    fn test_analysis_view_series_follow_backend_order() {
        let view = AnalysisView::build(&create_enhanced_analysis());

        let categories: Vec<&str> = view.category_trends.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(categories, vec!["Equity", "Debt"]);
        assert_eq!(view.category_trends[1].top_performer, PLACEHOLDER);

        assert_eq!(view.risk_return[0].name, "Risk 1");
        assert_eq!(view.risk_return[1].bucket, RiskBucket::High);
        assert_eq!(view.risk_return[1].volatility, None);

        let expense: Vec<&str> = view.expense_impact.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(expense, vec!["Low Cost", "High Cost"]);

        assert_eq!(view.distributions[0].skewness, "0.432");
    }

    // RECOMMENDATION TESTS
    #[test]
    fn test_recommendation_view_falls_back_to_request() {
        let request = RecommendationRequest::from_form("", "Equity", "75000", 5, "aggressive").unwrap();
        let response: RecommendationResponse = serde_json::from_str(
            r#"{"status": "success", "message": "ok", "recommendations": []}"#,
        )
        .unwrap();

        let view = RecommendationView::build(&request, &response);
        assert_eq!(view.summary.amount, "₹75,000");
        assert_eq!(view.summary.tenure, "5");
        assert_eq!(view.summary.risk_tolerance, "aggressive");
        assert_eq!(view.summary.category, "Equity");
        assert!(view.cards.is_empty());
    }

    // SCREEN STATE TESTS
    #[test]
    fn test_screen_state_data_extraction() {
        let funds = Rc::new(create_test_funds());
        let loaded = ScreenState::Loaded(funds.clone());
        assert!(loaded.data().is_some());
        assert_eq!(loaded.data().unwrap(), &funds);
        assert_eq!(loaded.phase(), ScreenPhase::Loaded);

        let loading: ScreenState<Vec<Fund>> = ScreenState::Loading;
        assert!(loading.data().is_none());
        assert!(loading.is_loading());

        let idle: ScreenState<Vec<Fund>> = ScreenState::Idle;
        assert_eq!(idle.phase(), ScreenPhase::Idle);
    }

    #[test]
    fn test_screen_state_from_error_keeps_user_message() {
        let state: ScreenState<Vec<Fund>> =
            ScreenState::from_result(Err(AppError::Transport("dns failure".to_string())));
        assert!(state.data().is_none());
        assert_eq!(state.error(), Some("Unable to reach the analytics service"));
        assert_eq!(
            state.phase(),
            ScreenPhase::Error("Unable to reach the analytics service".to_string())
        );
    }

    #[test]
    fn test_screen_state_clone_shares_data() {
        let state = ScreenState::from_result(Ok(create_test_funds()));
        let copy = state.clone();
        assert_eq!(state, copy);
        assert!(Rc::ptr_eq(state.data().unwrap(), copy.data().unwrap()));
    }
}
