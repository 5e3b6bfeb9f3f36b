mod api;
mod components;
mod config;
mod confirm;
mod error;
mod hooks;
mod models;
mod money;
mod pages;
mod period;
mod routes;
mod session;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use yew::prelude::*;

use crate::components::Layout;
use crate::config::AppConfig;
use crate::hooks::Flash;
use crate::models::TransactionKind;
use crate::pages::{
    AdminCategoriesPage, DashboardPage, LandingPage, LoginPage, NotFoundPage, RegisterPage,
    TransactionsPage,
};
use crate::routes::{redirect_target, Route};
use crate::session::Session;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn write_address(route: Route, replace: bool) {
    let history = match web_sys::window().and_then(|w| w.history().ok()) {
        Some(history) => history,
        None => return,
    };
    let result = if replace {
        history.replace_state_with_url(&JsValue::NULL, "", Some(route.path()))
    } else {
        history.push_state_with_url(&JsValue::NULL, "", Some(route.path()))
    };
    if let Err(err) = result {
        log::warn!("could not update address to {}: {:?}", route.path(), err);
    }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_state(AppConfig::from_env);
    let session = use_state(Session::browser);
    let route = use_state(|| Route::from_path(&current_path()));
    let flash: Flash = use_state(|| None::<String>);
    let update = use_force_update();

    {
        let session = (*session).clone();
        use_effect_with_deps(
            move |_| {
                let subscription = session.subscribe(move || update.force_update());
                move || drop(subscription)
            },
            (),
        );
    }

    // logins and logouts made in other tabs
    {
        let session = (*session).clone();
        use_effect_with_deps(
            move |_| {
                let listener = Closure::<dyn Fn()>::new(move || session.storage_changed());
                let window = web_sys::window();
                if let Some(window) = &window {
                    window.set_onstorage(Some(listener.as_ref().unchecked_ref()));
                }
                move || {
                    if let Some(window) = window {
                        window.set_onstorage(None);
                    }
                    drop(listener);
                }
            },
            (),
        );
    }

    // back and forward buttons
    {
        let route = route.clone();
        use_effect_with_deps(
            move |_| {
                let listener = Closure::<dyn Fn()>::new(move || {
                    route.set(Route::from_path(&current_path()));
                });
                let window = web_sys::window();
                if let Some(window) = &window {
                    window.set_onpopstate(Some(listener.as_ref().unchecked_ref()));
                }
                move || {
                    if let Some(window) = window {
                        window.set_onpopstate(None);
                    }
                    drop(listener);
                }
            },
            (),
        );
    }

    let requested = *route;
    let redirect = redirect_target(requested, &session);
    let resolved = redirect.unwrap_or(requested);
    {
        let route = route.clone();
        use_effect_with_deps(
            move |redirect| {
                if let Some(target) = *redirect {
                    write_address(target, true);
                    route.set(target);
                }
                || ()
            },
            redirect,
        );
    }

    let navigate = {
        let route = route.clone();
        Callback::from(move |target: Route| {
            write_address(target, false);
            route.set(target);
        })
    };

    let content = match resolved {
        Route::Landing => html! { <LandingPage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Register => html! { <RegisterPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
        Route::Dashboard => html! {
            <Layout active={resolved}>
                <DashboardPage />
            </Layout>
        },
        Route::Expenses => html! {
            <Layout active={resolved}>
                <TransactionsPage key="expense" kind={TransactionKind::Expense} />
            </Layout>
        },
        Route::Income => html! {
            <Layout active={resolved}>
                <TransactionsPage key="income" kind={TransactionKind::Income} />
            </Layout>
        },
        Route::AdminCategories => html! {
            <Layout active={resolved}>
                <AdminCategoriesPage />
            </Layout>
        },
    };

    html! {
        <ContextProvider<AppConfig> context={(*config).clone()}>
            <ContextProvider<Session> context={(*session).clone()}>
                <ContextProvider<Callback<Route>> context={navigate}>
                    <ContextProvider<Flash> context={flash}>
                        { content }
                    </ContextProvider<Flash>>
                </ContextProvider<Callback<Route>>>
            </ContextProvider<Session>>
        </ContextProvider<AppConfig>>
    }
}

fn main() {
    let config = AppConfig::from_env();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::info!("api at {}{}", config.api_base_url, config.api_prefix);
    yew::Renderer::<App>::new().render();
}
