use crate::components::{series_table::SeriesTable, stat_cards::StatCards, status::Status};
use crate::hooks::use_screens::use_analysis;
use crate::models::series::SeriesPoint;
use crate::services::screens::AnalysisScreen;
use crate::utils::format::{format_fixed, format_percent};
use yew::prelude::*;

#[function_component(Analysis)]
pub fn analysis() -> Html {
    let screen = use_analysis();

    html! {
        <section class="screen analysis">
            <h2>{"Market Analysis"}</h2>
            <Status phase={screen.state.phase()} on_retry={screen.retry.clone()} />
            if let Some(data) = screen.state.data() {
                { analysis_body(data) }
            }
        </section>
    }
}

fn analysis_body(data: &AnalysisScreen) -> Html {
    let view = &data.view;
    let risk_return: Vec<SeriesPoint> = view
        .risk_return
        .iter()
        .map(|p| SeriesPoint::new(p.name.clone(), p.avg_return_3yr))
        .collect();

    html! {
        <>
            <StatCards cards={view.insights.clone()} />

            <div class="panel">
                <h3>{"Key Insights"}</h3>
                <ul>
                    { for view.key_insights.iter().map(|i| html! { <li>{i}</li> }) }
                </ul>
            </div>

            <div class="panel correlations">
                <h3>{"Strong Correlations"}</h3>
                { for view.correlations.iter().map(|c| html! {
                    <div class="correlation-card">
                        <h4>{&c.pair}</h4>
                        <p class="num">{&c.value}</p>
                        <small>{&c.strength}</small>
                    </div>
                }) }
            </div>

            <div class="panel">
                <h3>{"Category Trends"}</h3>
                <table>
                    <thead>
                        <tr>
                            <th>{"Category"}</th>
                            <th>{"Funds"}</th>
                            <th>{"1Y"}</th>
                            <th>{"3Y"}</th>
                            <th>{"5Y"}</th>
                            <th>{"Avg Risk"}</th>
                            <th>{"Avg Expense"}</th>
                            <th>{"Top Performer"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for view.category_trends.iter().map(|t| html! {
                            <tr>
                                <td>{&t.name}</td>
                                <td class="num">{t.count}</td>
                                <td class="num">{format_percent(t.avg_return_1yr, 1)}</td>
                                <td class="num">{format_percent(t.avg_return_3yr, 1)}</td>
                                <td class="num">{format_percent(t.avg_return_5yr, 1)}</td>
                                <td class="num">{format_fixed(t.avg_risk, 1)}</td>
                                <td class="num">{format_percent(t.avg_expense, 2)}</td>
                                <td>{&t.top_performer}</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>

            <SeriesTable title="3Y Return by Risk Level" points={risk_return} unit="%" />
            <SeriesTable title="Expense Impact on 3Y Return" points={view.expense_impact.clone()} unit="%" />
            <SeriesTable title="Fund Age vs 3Y Return" points={view.age_performance.clone()} unit="%" />

            <div class="panel">
                <h3>{"Return Distributions"}</h3>
                <table>
                    <thead>
                        <tr>
                            <th>{"Series"}</th>
                            <th>{"Mean"}</th>
                            <th>{"Median"}</th>
                            <th>{"Std"}</th>
                            <th>{"Skew"}</th>
                            <th>{"Kurtosis"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for view.distributions.iter().map(|d| html! {
                            <tr>
                                <td>{&d.series}</td>
                                <td class="num">{&d.mean}</td>
                                <td class="num">{&d.median}</td>
                                <td class="num">{&d.std}</td>
                                <td class="num">{&d.skewness}</td>
                                <td class="num">{&d.kurtosis}</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>

            <SeriesTable title="Funds by Category" points={data.category_mix.clone()} decimals={0} />
            <SeriesTable title="Funds by Risk Level" points={data.risk_mix.clone()} decimals={0} />
            <SeriesTable title="Top AMCs by 3Y Return" points={data.top_amcs.clone()} unit="%" />
        </>
    }
}
