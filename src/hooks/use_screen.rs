use crate::hooks::use_api::use_api;
use crate::models::error::AppError;
use crate::services::api::FundApiClient;
use futures::future::{Abortable, abortable};
use gloo::console;
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(PartialEq, Debug)]
pub enum ScreenState<T> {
    /// Nothing requested yet, e.g. a form before its first submit
    Idle,
    Loading,
    Loaded(Rc<T>),
    Error(String),
}

// Manual impl: cloning the state only clones the `Rc`, so `T` need not be `Clone`.
impl<T> Clone for ScreenState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Idle => Self::Idle,
            Self::Loading => Self::Loading,
            Self::Loaded(data) => Self::Loaded(Rc::clone(data)),
            Self::Error(msg) => Self::Error(msg.clone()),
        }
    }
}

impl<T> ScreenState<T> {
    /// Returns true if the state is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the data if it is loaded
    pub fn data(&self) -> Option<&Rc<T>> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Settles a finished load. Errors keep only their user-facing message.
    pub fn from_result(result: Result<T, AppError>) -> Self {
        match result {
            Ok(data) => Self::Loaded(Rc::new(data)),
            Err(e) => Self::Error(e.user_message()),
        }
    }

    pub fn phase(&self) -> ScreenPhase {
        match self {
            Self::Idle => ScreenPhase::Idle,
            Self::Loading => ScreenPhase::Loading,
            Self::Loaded(_) => ScreenPhase::Loaded,
            Self::Error(msg) => ScreenPhase::Error(msg.clone()),
        }
    }
}

/// Data-free view of a `ScreenState`, for status banners.
#[derive(Clone, PartialEq, Debug)]
pub enum ScreenPhase {
    Idle,
    Loading,
    Loaded,
    Error(String),
}

const NO_CLIENT: &str = "API client is not configured";

/// State a screen enters each time its effect runs, before any result lands.
/// Retries re-run the effect, so a loaded or failed screen goes back to
/// `Loading` here.
pub fn entry_state<D, T>(deps: Option<&D>, has_client: bool) -> ScreenState<T> {
    match (deps, has_client) {
        (None, _) => ScreenState::Idle,
        (Some(_), false) => ScreenState::Error(NO_CLIENT.to_string()),
        (Some(_), true) => ScreenState::Loading,
    }
}

/// Awaits an in-flight load and settles it, or returns `None` when the load
/// was aborted or the screen moved on before the result arrived.
pub async fn settle<T, Fut>(
    task: Abortable<Fut>,
    aborted: Rc<Cell<bool>>,
) -> Option<ScreenState<T>>
where
    Fut: Future<Output = Result<T, AppError>>,
{
    match task.await {
        Ok(result) if !aborted.get() => Some(ScreenState::from_result(result)),
        _ => None,
    }
}

pub struct ScreenHandle<T> {
    pub state: ScreenState<T>,
    /// Re-runs the loader with the same inputs.
    pub retry: Callback<()>,
}

/// Runs `loader` whenever `deps` changes, or on retry. `None` deps leave the
/// screen idle.
///
/// The in-flight load is aborted when the deps change or the component
/// unmounts, and a result that lands afterwards is dropped.
#[hook]
pub fn use_screen_with<D, T, F, Fut>(deps: Option<D>, loader: F) -> ScreenHandle<T>
where
    D: PartialEq + Clone + 'static,
    T: 'static,
    F: FnOnce(Rc<FundApiClient>, D) -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    let client = use_api();
    let state = use_state(|| ScreenState::Idle);
    let attempt = use_state(|| 0u32);

    {
        let state = state.clone();

        use_effect_with((deps, *attempt), move |(deps, _)| {
            let aborted = Rc::new(Cell::new(false));
            let mut abort_handle = None;

            let entry = entry_state(deps.as_ref(), client.is_some());
            if let Some(msg) = entry.error() {
                console::error!(&format!("Screen cannot load: {msg}"));
            }
            state.set(entry);

            if let (Some(deps), Some(client)) = (deps.clone(), client) {
                let (task, handle) = abortable(loader(client, deps));
                abort_handle = Some(handle);
                let aborted_check = aborted.clone();

                spawn_local(async move {
                    if let Some(next) = settle(task, aborted_check).await {
                        if let Some(msg) = next.error() {
                            console::warn!(&format!("Screen load failed: {msg}"));
                        }
                        state.set(next);
                    }
                });
            }

            move || {
                aborted.set(true);
                if let Some(handle) = abort_handle {
                    handle.abort();
                }
            }
        });
    }

    let retry = {
        let attempt = attempt.clone();
        Callback::from(move |()| attempt.set(*attempt + 1))
    };

    ScreenHandle {
        state: (*state).clone(),
        retry,
    }
}

/// Loads once on mount; retry reloads.
#[hook]
pub fn use_screen<T, F, Fut>(loader: F) -> ScreenHandle<T>
where
    T: 'static,
    F: FnOnce(Rc<FundApiClient>) -> Fut + 'static,
    Fut: Future<Output = Result<T, AppError>> + 'static,
{
    use_screen_with(Some(()), move |client, ()| loader(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;

    #[test]
    fn test_entry_state() {
        // Retries re-run the effect with unchanged deps, landing on `Loading` again.
        assert_eq!(entry_state::<(), u32>(None, true), ScreenState::Idle);
        assert_eq!(entry_state::<(), u32>(None, false), ScreenState::Idle);
        assert_eq!(entry_state::<(), u32>(Some(&()), true), ScreenState::Loading);
        assert_eq!(
            entry_state::<(), u32>(Some(&()), false),
            ScreenState::Error(NO_CLIENT.to_string())
        );
    }

    #[tokio::test]
    async fn test_settle_delivers_result() {
        let (task, _handle) = abortable(async { Ok::<_, AppError>(42u32) });
        let settled = settle(task, Rc::new(Cell::new(false))).await;
        assert_eq!(settled, Some(ScreenState::Loaded(Rc::new(42))));
    }

    #[tokio::test]
    async fn test_settle_keeps_user_message_on_failure() {
        let (task, _handle) = abortable(async {
            Err::<u32, _>(AppError::Transport("connection refused".to_string()))
        });
        let settled = settle(task, Rc::new(Cell::new(false))).await;
        assert_eq!(
            settled,
            Some(ScreenState::Error("Unable to reach the analytics service".to_string()))
        );
    }

    #[tokio::test]
    async fn test_settle_drops_aborted_load() {
        let (task, handle) = abortable(std::future::pending::<Result<u32, AppError>>());
        handle.abort();
        assert_eq!(settle(task, Rc::new(Cell::new(false))).await, None);
    }

    #[tokio::test]
    async fn test_settle_drops_result_landing_after_teardown() {
        let (tx, rx) = oneshot::channel::<u32>();
        let (task, _handle) = abortable(async move {
            rx.await
                .map_err(|_| AppError::Transport("sender dropped".to_string()))
        });
        let aborted = Rc::new(Cell::new(false));
        let pending = settle(task, aborted.clone());

        aborted.set(true);
        tx.send(9).unwrap();
        assert_eq!(pending.await, None);
    }
}
