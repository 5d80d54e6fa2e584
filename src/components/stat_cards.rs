use crate::models::series::StatCard;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardsProps {
    pub cards: Vec<StatCard>,
}

#[function_component(StatCards)]
pub fn stat_cards(props: &StatCardsProps) -> Html {
    html! {
        <div class="data-summary">
            <div class="summary-grid">
                { for props.cards.iter().map(|card| html! {
                    <div class="summary-item">
                        <h3>{&card.label}</h3>
                        <p class="summary-value">{&card.value}</p>
                        <p class="summary-caption">{&card.caption}</p>
                    </div>
                }) }
            </div>
        </div>
    }
}
