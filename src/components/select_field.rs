use crate::models::catalog::SelectOption;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub label: AttrValue,
    pub options: Vec<SelectOption>,
    pub value: AttrValue,
    pub on_change: Callback<String>,
}

/// Labelled dropdown emitting the selected option's wire value
#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let on_change = {
        let callback = props.on_change.clone();
        Callback::from(move |e: Event| {
            let target: HtmlSelectElement = e.target_unchecked_into();
            callback.emit(target.value());
        })
    };

    html! {
        <label class="field">
            <span>{&props.label}</span>
            <select onchange={on_change} aria-label={props.label.clone()}>
                {
                    props.options.iter().map(|o| {
                        let selected = o.value == props.value.as_str();
                        html! {
                            <option value={o.value.clone()} {selected}>{&o.label}</option>
                        }
                    }).collect::<Html>()
                }
            </select>
        </label>
    }
}

#[derive(Properties, PartialEq)]
pub struct SearchBoxProps {
    pub value: AttrValue,
    pub on_input: Callback<String>,
    #[prop_or(AttrValue::Static("Search by fund or AMC name"))]
    pub placeholder: AttrValue,
}

#[function_component(SearchBox)]
pub fn search_box(props: &SearchBoxProps) -> Html {
    let on_input = {
        let callback = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let target: HtmlInputElement = e.target_unchecked_into();
            callback.emit(target.value());
        })
    };

    html! {
        <input
            class="search-box"
            type="search"
            value={props.value.clone()}
            placeholder={props.placeholder.clone()}
            oninput={on_input}
        />
    }
}
