use chrono::Local;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{page_shell, StatCard, StatIcon};
use crate::hooks::{use_api, use_config};
use crate::models::{Transaction, TransactionKind};
use crate::money::format_currency;
use crate::period::{recent, Overview};

const RECENT_LIMIT: usize = 5;

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let config = use_config();
    let client = use_api();
    let expenses = use_state(Vec::<Transaction>::new);
    let income = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);

    {
        let expenses = expenses.clone();
        let income = income.clone();
        let loading = loading.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    // both lists are needed before any total makes sense
                    let (income_res, expense_res) = futures::join!(
                        client.list_transactions(TransactionKind::Income),
                        client.list_transactions(TransactionKind::Expense)
                    );
                    match (income_res, expense_res) {
                        (Ok(i), Ok(e)) => {
                            income.set(i);
                            expenses.set(e);
                        }
                        (Err(err), _) | (_, Err(err)) => {
                            log::error!("dashboard load error: {}", err);
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (),
        );
    }

    let now = Local::now();
    let overview = Overview::compute(&expenses, &income, &now);
    let latest = recent(&expenses, &income, RECENT_LIMIT, &Local);
    let symbol = config.currency_symbol.clone();
    let show = |value: String| -> AttrValue {
        if *loading {
            "...".into()
        } else {
            value.into()
        }
    };

    html! {
        { page_shell(
            "Dashboard",
            html! {},
            html! {
                <>
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                        <StatCard title="Current Balance" amount={show(format_currency(overview.balance, &symbol))} icon={StatIcon::Wallet} />
                        <StatCard title="Total Income" amount={show(format!("+ {}", format_currency(overview.income.all, &symbol)))} icon={StatIcon::UpRight} />
                        <StatCard title="Total Expenses" amount={show(format!("- {}", format_currency(overview.expenses.all, &symbol)))} icon={StatIcon::CreditCard} />
                    </div>

                    <div class="bg-card rounded-[10px] shadow-sm border border-border overflow-hidden">
                        <div class="p-6 flex justify-between items-center border-b border-border">
                            <h3 class="font-bold text-foreground text-lg">{"Recent Transactions"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-muted/50 text-muted-foreground text-[10px] uppercase tracking-widest">
                                        <th class="px-8 py-4 font-bold">{"Date"}</th>
                                        <th class="px-8 py-4 font-bold">{"Description"}</th>
                                        <th class="px-8 py-4 font-bold">{"Type"}</th>
                                        <th class="px-8 py-4 font-bold text-right">{"Amount"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-border">
                                    { if *loading {
                                        html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
                                    } else if latest.is_empty() {
                                        html! { <tr><td colspan="4" class="px-8 py-6 text-center text-muted-foreground">{"No transactions yet."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for latest.iter().map(|movement| {
                                                    let tx = movement.transaction;
                                                    let amount_class = match movement.kind {
                                                        TransactionKind::Income => "px-8 py-4 text-right font-semibold text-green-600",
                                                        TransactionKind::Expense => "px-8 py-4 text-right font-semibold text-red-600",
                                                    };
                                                    html! {
                                                        <tr key={format!("{}-{}", movement.kind.path_segment(), tx.id)} class="text-sm hover:bg-muted/30 transition-colors">
                                                            <td class="px-8 py-4 text-muted-foreground">{ tx.created_at.map(|ts| ts.date_label(&Local)).unwrap_or_default() }</td>
                                                            <td class="px-8 py-4 text-foreground">{ tx.description_or_empty() }</td>
                                                            <td class="px-8 py-4">
                                                                <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ movement.kind.title() }</span>
                                                            </td>
                                                            <td class={amount_class}>{ format!("{} {}", movement.kind.sign(), format_currency(tx.amount, &symbol)) }</td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        ) }
    }
}
