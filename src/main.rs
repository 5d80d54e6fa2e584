use fund_explorer::components::{Analysis, Dashboard, FundExplorer, Recommend};
use fund_explorer::hooks::{use_api::ApiContext, use_screens::use_health};
use fund_explorer::services::api::FundApiClient;
use gloo::console;
use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum Screen {
    #[default]
    Dashboard,
    Analysis,
    Funds,
    Recommend,
}

impl Screen {
    const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Analysis => "Analysis",
            Self::Funds => "Fund Explorer",
            Self::Recommend => "Recommendations",
        }
    }

    const fn all() -> [Self; 4] {
        [Self::Dashboard, Self::Analysis, Self::Funds, Self::Recommend]
    }
}

#[function_component(HealthBadge)]
fn health_badge() -> Html {
    let health = use_health();

    match health.state.data() {
        Some(status) if status.is_healthy() => html! {
            <span class="health ok" title={status.message.clone()}>
                {if status.models_loaded { "● Models ready" } else { "● Online, models loading" }}
            </span>
        },
        Some(status) => html! {
            <span class="health degraded">{"● "}{&status.status}</span>
        },
        None if health.state.error().is_some() => html! {
            <span class="health down">{"● Offline"}</span>
        },
        None => html! {},
    }
}

#[function_component(App)]
fn app() -> Html {
    let screen = use_state(Screen::default);

    let nav = Screen::all()
        .into_iter()
        .map(|s| {
            let onclick = {
                let screen = screen.clone();
                Callback::from(move |_: MouseEvent| screen.set(s))
            };
            let class = classes!("nav-link", (*screen == s).then_some("active"));
            html! { <button {class} {onclick}>{s.label()}</button> }
        })
        .collect::<Html>();

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Mutual Fund Explorer"}</h1>
                <nav>{nav}</nav>
                <HealthBadge />
            </header>

            <main class="app-main">
                {
                    match *screen {
                        Screen::Dashboard => html! { <Dashboard /> },
                        Screen::Analysis => html! { <Analysis /> },
                        Screen::Funds => html! { <FundExplorer /> },
                        Screen::Recommend => html! { <Recommend /> },
                    }
                }
            </main>

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RootProps {
    api: ApiContext,
}

#[function_component(Root)]
fn root(props: &RootProps) -> Html {
    html! {
        <ContextProvider<ApiContext> context={props.api.clone()}>
            <App />
        </ContextProvider<ApiContext>>
    }
}

#[function_component(ConfigError)]
fn config_error() -> Html {
    html! {
        <div class="status error">
            <p>{"❌ The analytics service address is not configured correctly."}</p>
        </div>
    }
}

fn main() {
    match FundApiClient::new() {
        Ok(client) => {
            console::log!(&format!("Using backend at {}", client.config().base_url()));
            yew::Renderer::<Root>::with_props(RootProps {
                api: ApiContext::new(client),
            })
            .render();
        }
        Err(e) => {
            console::error!(&format!("Failed to create API client: {e}"));
            yew::Renderer::<ConfigError>::new().render();
        }
    }
}
