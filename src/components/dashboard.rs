use crate::components::{series_table::SeriesTable, stat_cards::StatCards, status::Status};
use crate::hooks::use_screens::use_dashboard;
use crate::models::market::DashboardView;
use yew::prelude::*;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let screen = use_dashboard();

    html! {
        <section class="screen dashboard">
            <h2>{"Market Dashboard"}</h2>
            <Status phase={screen.state.phase()} on_retry={screen.retry.clone()} />
            if let Some(view) = screen.state.data() {
                { dashboard_body(view) }
            }
        </section>
    }
}

fn dashboard_body(view: &DashboardView) -> Html {
    html! {
        <>
            <StatCards cards={view.cards.clone()} />

            <div class="panel">
                <h3>{"Performance Distribution"}</h3>
                <p class="trend">{"Net trend: "}{&view.performance_trend}</p>
                <ul class="slices">
                    { for view.performance.iter().map(|s| html! {
                        <li class={classes!("slice", s.key)}>
                            {s.label}{": "}{s.count}{" ("}{&s.percentage}{")"}
                        </li>
                    }) }
                </ul>
            </div>

            <SeriesTable title="Average Returns" points={view.returns_by_period.clone()} unit="%" />

            <div class="panel">
                <h3>{"Category Leaders"}</h3>
                <table class="leaderboard">
                    <thead>
                        <tr>
                            <th>{"Category"}</th>
                            <th>{"Fund"}</th>
                            <th>{"3Y Return"}</th>
                            <th>{"Risk"}</th>
                            <th>{"Rating"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for view.leaderboard.iter().map(|row| html! {
                            <tr>
                                <td><span class="badge">{&row.badge}</span></td>
                                <td>{&row.fund_name}<br /><small>{&row.amc_name}</small></td>
                                <td class="num">{&row.return_3yr}</td>
                                <td class={row.risk.bucket().css_class()}>{row.risk.badge()}</td>
                                <td class="stars">{&row.stars}</td>
                            </tr>
                        }) }
                    </tbody>
                </table>
            </div>

            <div class="panel models">
                <h3>{"Model Performance"}</h3>
                { for view.models.iter().map(|m| html! {
                    <div class="model-card">
                        <h4>{&m.label}</h4>
                        <p>{"Accuracy: "}{&m.accuracy}</p>
                        <p>{"RMSE: "}{&m.rmse}</p>
                    </div>
                }) }
            </div>

            <SeriesTable title="Risk Appetite" points={view.risk_appetite.clone()} decimals={0} />
            <SeriesTable title="AMC Market Share" points={view.amc_share.clone()} decimals={0} />
            <SeriesTable title="AUM by Category" points={view.category_aum.clone()} />
            <SeriesTable title="Rating Distribution" points={view.rating_distribution.clone()} decimals={0} />

            <p class="footnote">
                {"Market volatility: "}{&view.market_volatility}
                if let Some(date) = view.last_updated {
                    {" · Last updated "}{date.format("%d %b %Y").to_string()}
                }
            </p>
        </>
    }
}
