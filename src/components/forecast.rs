use crate::components::{select_field::SelectField, series_table::SeriesTable, status::Status};
use crate::hooks::use_screens::use_forecast;
use crate::models::{
    catalog::SelectOption,
    forecast::{ForecastRequest, ForecastView},
    recommendation::Tenure,
};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ForecastPanelProps {
    pub fund_name: AttrValue,
    pub on_close: Callback<()>,
}

/// Model forecast for one fund, reloaded when the horizon changes.
#[function_component(ForecastPanel)]
pub fn forecast_panel(props: &ForecastPanelProps) -> Html {
    let horizon = use_state(|| Tenure::Five);
    let request = ForecastRequest::new(props.fund_name.to_string()).with_horizon(*horizon);
    let forecast = use_forecast(Some(request));

    let on_horizon = {
        let horizon = horizon.clone();
        Callback::from(move |value: String| {
            if let Some(t) = value.parse::<u8>().ok().and_then(|y| Tenure::try_from(y).ok()) {
                horizon.set(t);
            }
        })
    };
    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let options: Vec<SelectOption> = Tenure::all()
        .into_iter()
        .map(|t| SelectOption {
            value: t.years().to_string(),
            label: t.label().to_string(),
        })
        .collect();

    html! {
        <div class="panel forecast">
            <button class="close" onclick={on_close}>{"×"}</button>
            <h3>{"Forecast: "}{&props.fund_name}</h3>
            <SelectField label="Horizon" {options}
                value={horizon.years().to_string()} on_change={on_horizon} />
            <Status phase={forecast.state.phase()} on_retry={forecast.retry.clone()} />
            if let Some(view) = forecast.state.data() {
                { forecast_body(view) }
            }
        </div>
    }
}

fn forecast_body(view: &ForecastView) -> Html {
    html! {
        <>
            <p class="amc">{&view.amc_name}{" · Risk "}{&view.risk}{" · "}{&view.stars}
                {" · Expense "}{&view.expense_ratio}</p>
            <table>
                <thead>
                    <tr>
                        <th>{"Horizon"}</th>
                        <th>{"Predicted"}</th>
                        <th>{"Historical"}</th>
                        <th>{"Confidence"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for view.predictions.iter().map(|p| html! {
                        <tr>
                            <td>{&p.horizon}</td>
                            if let Some(err) = &p.error {
                                <td colspan="3" class="error">{err}</td>
                            } else {
                                <td class="num">{&p.predicted}</td>
                                <td class="num">{&p.historical}</td>
                                <td>{&p.confidence}</td>
                            }
                        </tr>
                    }) }
                </tbody>
            </table>
            <SeriesTable title="Value of ₹100 (first year)" points={view.projections.clone()} />
        </>
    }
}
