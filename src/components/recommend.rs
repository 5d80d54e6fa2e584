use crate::components::{select_field::SelectField, status::Status};
use crate::config::Config;
use crate::hooks::use_screens::{use_form_options, use_recommendation};
use crate::models::{
    catalog::SelectOption,
    recommendation::{RecommendationRequest, RecommendationStatus, RecommendationView, RiskTolerance, Tenure},
};
use gloo::console;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
struct RecommendForm {
    amc: String,
    category: String,
    amount: String,
    tenure: String,
    risk: String,
}

impl Default for RecommendForm {
    fn default() -> Self {
        Self {
            amc: String::new(),
            category: String::new(),
            amount: Config::DEFAULT_INVESTMENT_AMOUNT.to_string(),
            tenure: Tenure::default().years().to_string(),
            risk: RiskTolerance::default().as_str().to_string(),
        }
    }
}

fn tenure_options() -> Vec<SelectOption> {
    Tenure::all()
        .into_iter()
        .map(|t| SelectOption {
            value: t.years().to_string(),
            label: t.label().to_string(),
        })
        .collect()
}

fn risk_options() -> Vec<SelectOption> {
    RiskTolerance::all()
        .into_iter()
        .map(|r| SelectOption {
            value: r.as_str().to_string(),
            label: r.label().to_string(),
        })
        .collect()
}

#[function_component(Recommend)]
pub fn recommend() -> Html {
    let options = use_form_options();
    let recommendation = use_recommendation();
    let form = use_state(RecommendForm::default);
    let form_error = use_state(|| None::<String>);

    let set_field = |apply: fn(&mut RecommendForm, String)| {
        let form = form.clone();
        Callback::from(move |value: String| {
            let mut next = (*form).clone();
            apply(&mut next, value);
            form.set(next);
        })
    };

    let on_amount = {
        let set_amount = set_field(|f, v| f.amount = v);
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_amount.emit(input.value());
        })
    };

    let on_submit = {
        let form = form.clone();
        let form_error = form_error.clone();
        let submit = recommendation.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let tenure = form.tenure.parse::<u8>().unwrap_or_default();
            match RecommendationRequest::from_form(
                &form.amc,
                &form.category,
                &form.amount,
                tenure,
                &form.risk,
            ) {
                Ok(request) => {
                    form_error.set(None);
                    submit.emit(request);
                }
                Err(err) => {
                    console::warn!(&format!("Rejected recommendation form: {err}"));
                    form_error.set(Some(err.user_message()));
                }
            }
        })
    };

    let (amcs, categories) = options.state.data().map_or_else(
        || {
            (
                vec![SelectOption::any("All AMCs")],
                vec![SelectOption::any("All Categories")],
            )
        },
        |o| (o.amcs.clone(), o.categories.clone()),
    );

    html! {
        <section class="screen recommend">
            <h2>{"Investment Recommendations"}</h2>
            <Status phase={options.state.phase()} on_retry={options.retry.clone()} />

            <form class="recommend-form" onsubmit={on_submit}>
                <SelectField label="Preferred AMC" options={amcs}
                    value={form.amc.clone()} on_change={set_field(|f, v| f.amc = v)} />
                <SelectField label="Category" options={categories}
                    value={form.category.clone()} on_change={set_field(|f, v| f.category = v)} />
                <label class="field">
                    <span>{"Investment Amount (₹)"}</span>
                    <input type="number" min="1" value={form.amount.clone()} oninput={on_amount} />
                </label>
                <SelectField label="Investment Horizon" options={tenure_options()}
                    value={form.tenure.clone()} on_change={set_field(|f, v| f.tenure = v)} />
                <SelectField label="Risk Tolerance" options={risk_options()}
                    value={form.risk.clone()} on_change={set_field(|f, v| f.risk = v)} />
                <button type="submit" disabled={recommendation.screen.state.is_loading()}>
                    {"Get Recommendations"}
                </button>
                if let Some(msg) = (*form_error).clone() {
                    <p class="form-error">{msg}</p>
                }
            </form>

            <Status phase={recommendation.screen.state.phase()}
                on_retry={recommendation.screen.retry.clone()} />
            if let Some(view) = recommendation.screen.state.data() {
                { recommendation_body(view) }
            }
        </section>
    }
}

fn recommendation_body(view: &RecommendationView) -> Html {
    let summary = &view.summary;

    html! {
        <>
            if let Some(notice) = &view.notice {
                <p class={classes!("notice", (view.status == RecommendationStatus::PartialMatch).then_some("partial"))}>
                    {notice}
                </p>
            }
            <div class="summary-grid">
                <div class="summary-item"><h3>{"Amount"}</h3><p>{&summary.amount}</p></div>
                <div class="summary-item"><h3>{"Horizon (years)"}</h3><p>{&summary.tenure}</p></div>
                <div class="summary-item"><h3>{"Risk Tolerance"}</h3><p>{&summary.risk_tolerance}</p></div>
                <div class="summary-item"><h3>{"Category"}</h3><p>{&summary.category}</p></div>
            </div>
            <div class="fund-cards">
                { for view.cards.iter().map(|card| html! {
                    <div class="fund-card">
                        <span class="position">{format!("#{}", card.position)}</span>
                        <h4>{&card.scheme_name}</h4>
                        <p class="amc">{&card.amc_name}</p>
                        <dl>
                            <dt>{"Predicted Return"}</dt><dd>{&card.predicted_return}</dd>
                            <dt>{"Allocation"}</dt><dd>{&card.allocation}{" ("}{&card.allocation_share}{")"}</dd>
                            <dt>{"Rating"}</dt><dd>{&card.rating}</dd>
                            <dt>{"Risk"}</dt><dd>{&card.risk}</dd>
                            <dt>{"Score"}</dt><dd>{&card.score}</dd>
                        </dl>
                    </div>
                }) }
            </div>
        </>
    }
}
