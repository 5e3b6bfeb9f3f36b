use yew::prelude::*;

use crate::hooks::{use_navigate, use_session};
use crate::routes::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    let navigate = use_navigate();
    let target = if use_session().is_authenticated() {
        Route::Dashboard
    } else {
        Route::Landing
    };
    let go_back = Callback::from(move |_| navigate.emit(target));

    html! {
        <div class="min-h-screen flex flex-col items-center justify-center bg-background gap-4">
            <h1 class="text-5xl font-black text-[#173E63]">{"404"}</h1>
            <p class="text-muted-foreground">{"This page does not exist."}</p>
            <button onclick={go_back} class="bg-primary text-primary-foreground px-6 py-2 rounded-xl font-bold text-sm">
                {"Go back"}
            </button>
        </div>
    }
}
