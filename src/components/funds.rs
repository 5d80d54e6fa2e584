use crate::components::{
    compare::ComparePanel,
    forecast::ForecastPanel,
    select_field::{SearchBox, SelectField},
    status::Status,
};
use crate::config::Config;
use crate::hooks::use_screens::{use_fund_explorer, use_fund_search, use_top_performers};
use crate::models::{
    catalog::SelectOption,
    fund::{FundFilter, RiskLevel},
    performers::{TopMetric, TopPerformersQuery},
};
use crate::services::screens::{FundResults, PerformerResults};
use gloo::console;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, PartialEq, Default)]
struct FilterForm {
    amc: String,
    category: String,
    risk_level: String,
    min_rating: String,
    limit: String,
}

impl FilterForm {
    fn to_filter(&self) -> Result<FundFilter, String> {
        let number = |raw: &str| raw.parse::<i64>().unwrap_or(0);
        let limit = self.limit.parse().unwrap_or(Config::DEFAULT_FUND_LIMIT);
        FundFilter::from_form(
            &self.amc,
            &self.category,
            number(&self.risk_level),
            number(&self.min_rating),
            limit,
        )
        .map_err(|e| e.user_message())
    }
}

fn risk_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::any("Any Risk"))
        .chain(RiskLevel::all().map(|r| SelectOption {
            value: r.value().to_string(),
            label: r.to_string(),
        }))
        .collect()
}

fn rating_options() -> Vec<SelectOption> {
    std::iter::once(SelectOption::any("Any Rating"))
        .chain((1..=5).map(|r| SelectOption {
            value: r.to_string(),
            label: format!("{r}+ stars"),
        }))
        .collect()
}

fn count_options(choices: &[u32]) -> Vec<SelectOption> {
    choices
        .iter()
        .map(|n| SelectOption {
            value: n.to_string(),
            label: n.to_string(),
        })
        .collect()
}

#[function_component(FundExplorer)]
pub fn fund_explorer() -> Html {
    let explorer = use_fund_explorer();
    let form = use_state(FilterForm::default);
    let form_error = use_state(|| None::<String>);
    let applied = use_state(|| None::<FundFilter>);
    let term = use_state(String::new);
    let top_query = use_state(|| None::<TopPerformersQuery>);
    let selected = use_state(|| None::<String>);
    let compared = use_state(Vec::<String>::new);

    let search = use_fund_search((*applied).clone());
    let top = use_top_performers((*top_query).clone());

    let Some(initial) = explorer.state.data() else {
        return html! {
            <section class="screen funds">
                <h2>{"Fund Explorer"}</h2>
                <Status phase={explorer.state.phase()} on_retry={explorer.retry.clone()} />
            </section>
        };
    };

    let set_field = |apply: fn(&mut FilterForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_search = {
        let form = form.clone();
        let form_error = form_error.clone();
        let applied = applied.clone();
        Callback::from(move |_: MouseEvent| match form.to_filter() {
            Ok(filter) => {
                form_error.set(None);
                applied.set(Some(filter));
            }
            Err(msg) => {
                console::warn!(&format!("Rejected fund filter: {msg}"));
                form_error.set(Some(msg));
            }
        })
    };

    let on_term = {
        let term = term.clone();
        Callback::from(move |value: String| term.set(value))
    };

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |name: String| selected.set(Some(name)))
    };
    let on_close_forecast = {
        let selected = selected.clone();
        Callback::from(move |()| selected.set(None))
    };

    let on_toggle_compare = {
        let compared = compared.clone();
        Callback::from(move |name: String| {
            let mut next = (*compared).clone();
            if let Some(pos) = next.iter().position(|n| *n == name) {
                next.remove(pos);
            } else {
                next.push(name);
            }
            compared.set(next);
        })
    };
    let on_close_compare = {
        let compared = compared.clone();
        Callback::from(move |()| compared.set(Vec::new()))
    };

    let current_query = (*top_query).clone().unwrap_or_default();
    let on_metric = {
        let top_query = top_query.clone();
        let current = current_query.clone();
        Callback::from(move |value: String| {
            if let Ok(metric) = value.parse::<TopMetric>() {
                top_query.set(Some(TopPerformersQuery {
                    metric,
                    ..current.clone()
                }));
            }
        })
    };
    let on_top_limit = {
        let top_query = top_query.clone();
        let current = current_query.clone();
        Callback::from(move |value: String| {
            if let Ok(limit) = value.parse::<u32>() {
                top_query.set(Some(TopPerformersQuery {
                    limit,
                    ..current.clone()
                }));
            }
        })
    };

    // Later searches replace the first page; until then show what the join loaded.
    let results: Option<Rc<FundResults>> = if applied.is_some() {
        search.state.data().cloned()
    } else {
        Some(Rc::new(initial.results.clone()))
    };
    let performers: Option<Rc<PerformerResults>> = if top_query.is_some() {
        top.state.data().cloned()
    } else {
        Some(Rc::new(initial.performers.clone()))
    };

    let metric_options: Vec<SelectOption> = TopMetric::all()
        .into_iter()
        .map(|m| SelectOption {
            value: m.as_str().to_string(),
            label: m.label(),
        })
        .collect();

    html! {
        <section class="screen funds">
            <h2>{"Fund Explorer"}</h2>

            <div class="filters">
                <SelectField label="AMC" options={initial.options.amcs.clone()}
                    value={form.amc.clone()} on_change={set_field(|f, v| f.amc = v)} />
                <SelectField label="Category" options={initial.options.categories.clone()}
                    value={form.category.clone()} on_change={set_field(|f, v| f.category = v)} />
                <SelectField label="Risk Level" options={risk_options()}
                    value={form.risk_level.clone()} on_change={set_field(|f, v| f.risk_level = v)} />
                <SelectField label="Minimum Rating" options={rating_options()}
                    value={form.min_rating.clone()} on_change={set_field(|f, v| f.min_rating = v)} />
                <SelectField label="Results" options={count_options(&Config::FUND_LIMIT_CHOICES)}
                    value={if form.limit.is_empty() { Config::DEFAULT_FUND_LIMIT.to_string() } else { form.limit.clone() }}
                    on_change={set_field(|f, v| f.limit = v)} />
                <button onclick={on_search}>{"Search"}</button>
                if let Some(msg) = (*form_error).clone() {
                    <p class="form-error">{msg}</p>
                }
            </div>

            <Status phase={search.state.phase()} on_retry={search.retry.clone()} />
            <SearchBox value={(*term).clone()} on_input={on_term} />
            if let Some(results) = results {
                { fund_table(&results, &term, &compared, &on_select, &on_toggle_compare) }
            }
            if let Some(fund_name) = (*selected).clone() {
                <ForecastPanel key={fund_name.clone()} fund_name={fund_name.clone()} on_close={on_close_forecast} />
            }
            if !compared.is_empty() {
                <ComparePanel fund_names={(*compared).clone()} on_close={on_close_compare} />
            }

            <div class="panel">
                <h3>{"Top Performers"}</h3>
                <SelectField label="Metric" options={metric_options}
                    value={current_query.metric.as_str()} on_change={on_metric} />
                <SelectField label="Show" options={count_options(&Config::TOP_LIMIT_CHOICES)}
                    value={current_query.limit.to_string()} on_change={on_top_limit} />
                <Status phase={top.state.phase()} on_retry={top.retry.clone()} />
                if let Some(performers) = performers {
                    { performer_table(&performers) }
                }
            </div>
        </section>
    }
}

fn fund_table(
    results: &FundResults,
    term: &str,
    compared: &[String],
    on_select: &Callback<String>,
    on_toggle_compare: &Callback<String>,
) -> Html {
    let rows = results.rows(term);

    html! {
        <div class="panel">
            <p class="count">
                {format!("Showing {} of {} funds", rows.len(), results.funds.total_found)}
            </p>
            <table class="fund-table">
                <thead>
                    <tr>
                        <th>{"Compare"}</th>
                        <th>{"Scheme"}</th>
                        <th>{"1Y"}</th>
                        <th>{"3Y"}</th>
                        <th>{"5Y"}</th>
                        <th>{"Risk"}</th>
                        <th>{"Rating"}</th>
                        <th>{"Expense"}</th>
                        <th>{"Size"}</th>
                    </tr>
                </thead>
                <tbody>
                    { for rows.iter().map(|row| {
                        let onclick = {
                            let on_select = on_select.clone();
                            let name = row.scheme_name.clone();
                            Callback::from(move |_: MouseEvent| on_select.emit(name.clone()))
                        };
                        let onchange = {
                            let on_toggle = on_toggle_compare.clone();
                            let name = row.scheme_name.clone();
                            Callback::from(move |_: Event| on_toggle.emit(name.clone()))
                        };
                        let checked = compared.contains(&row.scheme_name);
                        html! {
                            <tr>
                                <td><input type="checkbox" {checked} {onchange} /></td>
                                <td>
                                    <a class="scheme-link" {onclick}>{&row.scheme_name}</a>
                                    <br /><small>{&row.amc_name}</small>
                                </td>
                                <td class="num">{&row.return_1yr}</td>
                                <td class="num">{&row.return_3yr}</td>
                                <td class="num">{&row.return_5yr}</td>
                                <td class={row.risk_bucket.css_class()}>{&row.risk}</td>
                                <td class="stars">{&row.stars}</td>
                                <td class="num">{&row.expense_ratio}</td>
                                <td class="num">{&row.fund_size}</td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        </div>
    }
}

fn performer_table(performers: &PerformerResults) -> Html {
    html! {
        <>
        <p class="count">
            {format!("{} of {} funds · Category: {}",
                performers.rows.len(),
                performers.response.total_evaluated,
                performers.response.category_label())}
        </p>
        <table class="performers">
            <thead>
                <tr>
                    <th>{"#"}</th>
                    <th>{"Scheme"}</th>
                    <th>{performers.rows.first().map(|r| r.metric_label.clone()).unwrap_or_default()}</th>
                    <th>{"Risk"}</th>
                    <th>{"Rating"}</th>
                </tr>
            </thead>
            <tbody>
                { for performers.rows.iter().map(|row| html! {
                    <tr>
                        <td>{row.rank}</td>
                        <td>{&row.scheme_name}<br /><small>{&row.amc_name}</small></td>
                        <td class="num">{&row.metric_value}</td>
                        <td>{&row.risk}</td>
                        <td class="stars">{&row.stars}</td>
                    </tr>
                }) }
            </tbody>
        </table>
        </>
    }
}
