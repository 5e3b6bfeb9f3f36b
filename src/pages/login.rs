use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::hooks::{use_config, use_navigate, use_session, Flash};
use crate::pages::bind_input;
use crate::routes::Route;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let config = use_config();
    let session = use_session();
    let navigate = use_navigate();
    let flash = use_context::<Flash>();

    let email = use_state(String::new);
    let password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);
    // taken once so it does not reappear after the next navigation
    let notice = use_state(|| flash.as_ref().and_then(|f| (**f).clone()));
    {
        let flash = flash.clone();
        use_effect_with_deps(
            move |_| {
                if let Some(flash) = flash {
                    flash.set(None);
                }
                || ()
            },
            (),
        );
    }

    let to_register = {
        let navigate = navigate.clone();
        Callback::from(move |_| navigate.emit(Route::Register))
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();

            if email_val.is_empty() || password_val.is_empty() {
                error.set(Some("Email and password are required".to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let config = config.clone();
            let session = session.clone();
            let navigate = navigate.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                let result = async {
                    let token = ApiClient::new(&config, None)
                        .login(&email_val, &password_val)
                        .await?;
                    let user = ApiClient::new(&config, Some(token.access_token.clone()))
                        .me()
                        .await?;
                    if let Err(e) = session.login(&token.access_token, &user) {
                        log::error!("could not persist session: {}", e);
                    }
                    Ok::<(), ApiError>(())
                }
                .await;

                loading.set(false);
                match result {
                    Ok(()) => navigate.emit(Route::Dashboard),
                    Err(err) => {
                        log::warn!("login failed: {}", err);
                        error.set(Some(err.user_message()));
                    }
                }
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Welcome back"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Sign in to continue."}</p>
                </div>

                if let Some(msg) = &*notice {
                    <div class="mb-4 text-sm text-green-600">{ msg.clone() }</div>
                }

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input
                            type="email"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            value={(*email).clone()}
                            oninput={bind_input(&email)}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input
                            type="password"
                            class="w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary"
                            value={(*password).clone()}
                            oninput={bind_input(&password)}
                        />
                    </div>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else { "Login" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    {"No account?"}
                    <button class="ml-2 text-primary font-semibold" onclick={to_register}>{"Sign up"}</button>
                </div>
            </div>
        </div>
    }
}
