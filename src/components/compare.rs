use crate::components::{select_field::SelectField, status::Status};
use crate::hooks::use_screens::use_comparison;
use crate::models::{
    catalog::SelectOption,
    forecast::{ComparisonEntry, ComparisonRequest, ComparisonResponse},
};
use yew::prelude::*;

const RETURN_METRICS: [&str; 3] = ["return_1yr", "return_3yr", "return_5yr"];

#[derive(Properties, PartialEq)]
pub struct ComparePanelProps {
    pub fund_names: Vec<String>,
    pub on_close: Callback<()>,
}

#[function_component(ComparePanel)]
pub fn compare_panel(props: &ComparePanelProps) -> Html {
    let returns_only = use_state(|| false);

    let request = {
        let request = ComparisonRequest::new(props.fund_names.iter().cloned());
        Some(if *returns_only {
            request.with_metrics(RETURN_METRICS)
        } else {
            request
        })
    };
    let comparison = use_comparison(request);

    let on_scope = {
        let returns_only = returns_only.clone();
        Callback::from(move |value: String| returns_only.set(value == "returns"))
    };
    let on_close = {
        let cb = props.on_close.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    let scopes = vec![
        SelectOption {
            value: "default".to_string(),
            label: "Returns, risk and cost".to_string(),
        },
        SelectOption {
            value: "returns".to_string(),
            label: "Returns only".to_string(),
        },
    ];

    html! {
        <div class="panel compare">
            <button class="close" onclick={on_close}>{"×"}</button>
            <h3>{"Compare Funds"}</h3>
            if props.fund_names.len() < 2 {
                <p class="hint">{"Pick at least two funds to compare."}</p>
            } else {
                <SelectField label="Metrics" options={scopes}
                    value={if *returns_only { "returns" } else { "default" }} on_change={on_scope} />
                <Status phase={comparison.state.phase()} on_retry={comparison.retry.clone()} />
                if let Some(response) = comparison.state.data() {
                    { comparison_table(response) }
                }
            }
        </div>
    }
}

fn comparison_table(response: &ComparisonResponse) -> Html {
    let missing = response.comparison.iter().filter_map(|entry| match entry {
        ComparisonEntry::Missing { fund_name, error } => Some(html! {
            <li>{fund_name}{": "}{error}</li>
        }),
        ComparisonEntry::Found(_) => None,
    });

    html! {
        <>
            <table class="comparison">
                <thead>
                    <tr>
                        <th>{"Metric"}</th>
                        { for response.fund_names().into_iter().map(|name| html! { <th>{name}</th> }) }
                    </tr>
                </thead>
                <tbody>
                    { for response.metric_rows().into_iter().map(|row| html! {
                        <tr>
                            <td>{row.metric}</td>
                            { for row.cells.into_iter().map(|cell| html! { <td class="num">{cell}</td> }) }
                        </tr>
                    }) }
                </tbody>
            </table>
            <ul class="missing">{ for missing }</ul>
        </>
    }
}
