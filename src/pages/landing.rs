use chrono::Local;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::components::{page_shell, StatCard, StatIcon};
use crate::hooks::{use_config, use_navigate, use_session_changes};
use crate::models::{Transaction, TransactionKind};
use crate::money::format_currency;
use crate::period::{Overview, Period};
use crate::routes::Route;

/// Public start page. Signed-in visitors get their period summary; the page
/// drops back to the anonymous view as soon as any view logs out.
#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    let config = use_config();
    let session = use_session_changes();
    let navigate = use_navigate();

    let expenses = use_state(Vec::<Transaction>::new);
    let income = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| false);

    let authenticated = session.is_authenticated();
    let privileged = session.is_privileged();

    {
        let expenses = expenses.clone();
        let income = income.clone();
        let loading = loading.clone();
        let client = ApiClient::for_session(&config, &session);
        use_effect_with_deps(
            move |authenticated| {
                if *authenticated {
                    loading.set(true);
                    spawn_local(async move {
                        let (expense_res, income_res) = futures::join!(
                            client.list_transactions(TransactionKind::Expense),
                            client.list_transactions(TransactionKind::Income)
                        );
                        match (expense_res, income_res) {
                            (Ok(e), Ok(i)) => {
                                expenses.set(e);
                                income.set(i);
                            }
                            (Err(err), _) | (_, Err(err)) => {
                                log::error!("failed to load finance data: {}", err);
                            }
                        }
                        loading.set(false);
                    });
                } else {
                    expenses.set(Vec::new());
                    income.set(Vec::new());
                    loading.set(false);
                }
                || ()
            },
            authenticated,
        );
    }

    let go = |route: Route| {
        let navigate = navigate.clone();
        Callback::from(move |_: MouseEvent| navigate.emit(route))
    };

    let on_logout = {
        let session = session.clone();
        Callback::from(move |_| session.logout())
    };

    if !authenticated {
        return html! {
            <div class="min-h-screen flex items-center justify-center bg-background">
                <div class="w-full max-w-lg bg-card border border-border rounded-2xl shadow-lg p-8 text-center space-y-4">
                    <h1 class="text-3xl font-black text-[#173E63]">{"Kopilka"}</h1>
                    <p class="text-sm text-muted-foreground">{"Track income and expenses, see where the money goes by day, week and month."}</p>
                    <div class="flex gap-3 justify-center">
                        <button onclick={go(Route::Login)} class="bg-primary text-primary-foreground px-6 py-2 rounded-xl font-bold text-sm">{"Sign in"}</button>
                        <button onclick={go(Route::Register)} class="bg-[#B2CBDE] text-[#173E63] px-6 py-2 rounded-xl font-bold text-sm">{"Create account"}</button>
                    </div>
                </div>
            </div>
        };
    }

    let overview = Overview::compute(&expenses, &income, &Local::now());
    let symbol = config.currency_symbol.clone();
    let amount = |value: String| -> AttrValue {
        if *loading {
            "...".into()
        } else {
            value.into()
        }
    };

    html! {
        <div class="min-h-screen bg-background">
            { page_shell(
                "Overview",
                html! {
                    <div class="flex gap-2">
                        <button onclick={go(Route::Dashboard)} class="bg-primary text-primary-foreground px-4 py-2 rounded-xl font-bold text-sm">{"Dashboard"}</button>
                        <button onclick={go(Route::Expenses)} class="bg-secondary px-4 py-2 rounded-xl font-bold text-sm">{"Expenses"}</button>
                        <button onclick={go(Route::Income)} class="bg-secondary px-4 py-2 rounded-xl font-bold text-sm">{"Income"}</button>
                        if privileged {
                            <button onclick={go(Route::AdminCategories)} class="bg-secondary px-4 py-2 rounded-xl font-bold text-sm">{"Categories"}</button>
                        }
                        <button onclick={on_logout} class="bg-red-600 text-white px-4 py-2 rounded-xl font-bold text-sm">{"Log Out"}</button>
                    </div>
                },
                html! {
                    <>
                        <StatCard title="Balance" amount={amount(format_currency(overview.balance, &symbol))} icon={StatIcon::Wallet} />
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                            { for [Period::Today, Period::Week, Period::Month].into_iter().map(|period| html! {
                                <StatCard
                                    title={format!("Expenses · {}", period.label())}
                                    amount={amount(format_currency(overview.expenses.get(period), &symbol))}
                                    icon={StatIcon::CreditCard}
                                />
                            }) }
                            { for [Period::Today, Period::Week, Period::Month].into_iter().map(|period| html! {
                                <StatCard
                                    title={format!("Income · {}", period.label())}
                                    amount={amount(format_currency(overview.income.get(period), &symbol))}
                                    icon={StatIcon::UpRight}
                                />
                            }) }
                        </div>
                    </>
                }
            ) }
        </div>
    }
}
