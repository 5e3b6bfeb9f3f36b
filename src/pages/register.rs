use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::hooks::{use_config, use_navigate, Flash};
use crate::pages::bind_input;
use crate::routes::Route;

pub const MIN_PASSWORD_LEN: usize = 6;

fn password_problem(password: &str, confirm: &str) -> Option<&'static str> {
    if password != confirm {
        Some("Passwords do not match")
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        Some("Password must be at least 6 characters")
    } else {
        None
    }
}

#[function_component(RegisterPage)]
pub fn register_page() -> Html {
    let config = use_config();
    let navigate = use_navigate();
    let flash = use_context::<Flash>();

    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    // shown live once both fields have something in them
    let password_error = if password.is_empty() || confirm_password.is_empty() {
        None
    } else {
        password_problem(&password, &confirm_password)
    };

    let on_submit = {
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let navigate = navigate.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let email_val = email.trim().to_string();
            let password_val = (*password).clone();

            if email_val.is_empty() {
                error.set(Some("Email is required".to_string()));
                return;
            }
            if let Some(problem) = password_problem(&password_val, &confirm_password) {
                error.set(Some(problem.to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let client = ApiClient::new(&config, None);
            let navigate = navigate.clone();
            let flash = flash.clone();
            let error = error.clone();
            let loading = loading.clone();
            spawn_local(async move {
                match client.register(&email_val, &password_val).await {
                    Ok(user) => {
                        log::info!("registered {}", user.email);
                        if let Some(flash) = flash {
                            flash.set(Some("Account created, you can sign in now.".to_string()));
                        }
                        navigate.emit(Route::Login);
                    }
                    Err(err) => {
                        log::warn!("registration failed: {}", err);
                        error.set(Some(err.user_message()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let to_login = Callback::from(move |_| navigate.emit(Route::Login));
    let input_class = "w-full px-4 py-2 bg-input border border-input rounded-lg text-foreground focus:outline-none focus:ring-2 focus:ring-primary";

    html! {
        <div class="min-h-screen flex items-center justify-center bg-background">
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-foreground">{"Create account"}</h1>
                    <p class="text-sm text-muted-foreground mt-2">{"Start managing your finances."}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Email"}</label>
                        <input type="email" class={input_class} value={(*email).clone()} oninput={bind_input(&email)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Password"}</label>
                        <input type="password" class={input_class} value={(*password).clone()} oninput={bind_input(&password)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-foreground">{"Confirm Password"}</label>
                        <input type="password" class={input_class} value={(*confirm_password).clone()} oninput={bind_input(&confirm_password)} />
                        if let Some(problem) = password_error {
                            <p class="text-xs text-red-500">{ problem }</p>
                        }
                    </div>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-primary text-primary-foreground py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading || password_error.is_some()}
                    >
                        { if *loading { "Please wait..." } else { "Sign up" } }
                    </button>
                </form>

                <div class="mt-6 text-center text-sm text-muted-foreground">
                    {"Already have an account?"}
                    <button class="ml-2 text-primary font-semibold" onclick={to_login}>{"Login"}</button>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_is_reported_first() {
        assert_eq!(password_problem("abc", "abd"), Some("Passwords do not match"));
    }

    #[test]
    fn short_password_is_rejected() {
        assert_eq!(
            password_problem("12345", "12345"),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn six_characters_are_enough() {
        assert_eq!(password_problem("123456", "123456"), None);
        assert_eq!(password_problem("пароль", "пароль"), None);
    }
}
