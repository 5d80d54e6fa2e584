use crate::hooks::use_screen::ScreenPhase;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusProps {
    pub phase: ScreenPhase,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Loading spinner or error banner. Renders nothing once data is in.
#[function_component(Status)]
pub fn status(props: &StatusProps) -> Html {
    match &props.phase {
        ScreenPhase::Idle | ScreenPhase::Loaded => html! {},
        ScreenPhase::Loading => html! {
            <div class="status loading">
                <div class="spinner"></div>
                <p>{"Loading data..."}</p>
            </div>
        },
        ScreenPhase::Error(msg) => {
            let retry = props.on_retry.clone().map(|cb| {
                let onclick = Callback::from(move |_: MouseEvent| cb.emit(()));
                html! { <button class="retry" {onclick}>{"Retry"}</button> }
            });
            html! {
                <div class="status error">
                    <p>{"❌ Error: "}{msg}</p>
                    {retry}
                </div>
            }
        }
    }
}
