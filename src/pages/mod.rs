mod admin_categories;
mod dashboard;
mod landing;
mod login;
mod not_found;
mod register;
mod transactions;

pub use admin_categories::AdminCategoriesPage;
pub use dashboard::DashboardPage;
pub use landing::LandingPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use register::RegisterPage;
pub use transactions::TransactionsPage;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

pub(crate) fn bind_input(state: &UseStateHandle<String>) -> Callback<InputEvent> {
    let state = state.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        state.set(input.value());
    })
}

pub(crate) fn bind_select_id(state: &UseStateHandle<Option<i64>>) -> Callback<Event> {
    let state = state.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        state.set(select.value().parse::<i64>().ok());
    })
}
