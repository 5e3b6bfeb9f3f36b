use std::ops::Deref;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::confirm::{DeleteConfirmation, DeleteTarget};
use crate::routes::Route;
use crate::session::Session;

/// One-shot message shown by the next page (e.g. "account created").
pub type Flash = UseStateHandle<Option<String>>;

#[hook]
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().unwrap_or_default()
}

#[hook]
pub fn use_session() -> Session {
    use_context::<Session>().unwrap_or_else(Session::browser)
}

/// The session, re-rendering the calling component whenever it changes.
#[hook]
pub fn use_session_changes() -> Session {
    let session = use_session();
    let update = use_force_update();
    {
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                let subscription = session.subscribe(move || update.force_update());
                move || drop(subscription)
            },
            (),
        );
    }
    session
}

/// Client bound to the token held at render time.
#[hook]
pub fn use_api() -> ApiClient {
    let config = use_config();
    let session = use_session();
    ApiClient::for_session(&config, &session)
}

#[hook]
pub fn use_navigate() -> Callback<Route> {
    use_context::<Callback<Route>>().unwrap_or_else(|| {
        Callback::from(|route: Route| log::warn!("no router to navigate to {}", route.path()))
    })
}

/// Reload counter for list pages. Bumps go through the reducer, so two
/// mutations finishing out of order each still move it forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefreshTick(pub u32);

pub struct Bump;

impl Reducible for RefreshTick {
    type Action = Bump;

    fn reduce(self: Rc<Self>, _: Bump) -> Rc<Self> {
        Rc::new(RefreshTick(self.0.wrapping_add(1)))
    }
}

#[hook]
pub fn use_refresh() -> UseReducerHandle<RefreshTick> {
    use_reducer(RefreshTick::default)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfirmState(DeleteConfirmation);

pub enum ConfirmAction {
    Arm(DeleteTarget),
    Tick,
    Cancel,
    Confirmed,
}

impl Deref for ConfirmState {
    type Target = DeleteConfirmation;

    fn deref(&self) -> &DeleteConfirmation {
        &self.0
    }
}

impl Reducible for ConfirmState {
    type Action = ConfirmAction;

    fn reduce(self: Rc<Self>, action: ConfirmAction) -> Rc<Self> {
        let mut next = self.0.clone();
        match action {
            ConfirmAction::Arm(target) => next.arm(target),
            ConfirmAction::Tick => next.tick(),
            ConfirmAction::Cancel => next.cancel(),
            ConfirmAction::Confirmed => {
                next.take_confirmed();
            }
        }
        Rc::new(ConfirmState(next))
    }
}

/// Delete-dialog state plus its one-second ticker. The interval only exists
/// while the countdown runs and is dropped when it stops, when the dialog
/// closes, or when the owning component unmounts.
#[hook]
pub fn use_delete_confirmation() -> UseReducerHandle<ConfirmState> {
    let state = use_reducer(ConfirmState::default);
    let counting = state.is_counting();
    {
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |counting| {
                let ticker = counting.then(|| {
                    Interval::new(1_000, move || dispatcher.dispatch(ConfirmAction::Tick))
                });
                move || drop(ticker)
            },
            counting,
        );
    }
    state
}
