use chrono::Local;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{icon_plus, icon_trash, page_shell, DeleteDialog, StatCard, StatIcon};
use crate::confirm::DeleteTarget;
use crate::hooks::{use_api, use_config, use_delete_confirmation, use_refresh, Bump, ConfirmAction};
use crate::models::{Category, NewTransaction, Transaction, TransactionKind};
use crate::money::{format_currency, Money};
use crate::pages::{bind_input, bind_select_id};
use crate::period::{bucket, category_name, group_by_category, total, CategoryGroup, Period, PeriodTotals};

/// The create form is only submittable with a positive amount and a chosen
/// category.
fn draft(amount: &str, description: &str, category_id: Option<i64>) -> Option<NewTransaction> {
    let amount = Money::parse_input(amount).ok().filter(|a| a.is_positive())?;
    Some(NewTransaction {
        amount,
        description: description.trim().to_string(),
        category_id: category_id?,
    })
}

/// Keeps the current selection if it still exists, else picks the first
/// category.
fn pick_category(current: Option<i64>, categories: &[Category]) -> Option<i64> {
    current
        .filter(|id| categories.iter().any(|c| c.id == *id))
        .or_else(|| categories.first().map(|c| c.id))
}

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub kind: TransactionKind,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let kind = props.kind;
    let config = use_config();
    let client = use_api();
    let symbol = config.currency_symbol.clone();

    let items = use_state(Vec::<Transaction>::new);
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let refresh = use_refresh();

    let form_amount = use_state(String::new);
    let form_description = use_state(String::new);
    let form_category = use_state(|| None::<i64>);
    let saving = use_state(|| false);

    let selected_period = use_state(|| None::<Period>);
    let confirm = use_delete_confirmation();

    {
        let client = client.clone();
        let items = items.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let form_category = form_category.clone();
        use_effect_with_deps(
            move |(kind, _)| {
                let kind = *kind;
                spawn_local(async move {
                    let (items_res, categories_res) = futures::join!(
                        client.list_transactions(kind),
                        client.list_categories(kind.category_kind())
                    );
                    match items_res {
                        Ok(list) => items.set(list),
                        Err(err) => log::error!("failed to load {}: {}", kind.path_segment(), err),
                    }
                    match categories_res {
                        Ok(list) => {
                            form_category.set(pick_category(*form_category, &list));
                            categories.set(list);
                        }
                        Err(err) => log::error!("failed to load {} categories: {}", kind.path_segment(), err),
                    }
                    loading.set(false);
                });
                || ()
            },
            (kind, refresh.0),
        );
    }

    let submission = draft(&form_amount, &form_description, *form_category);

    let on_create = {
        let client = client.clone();
        let submission = submission.clone();
        let form_amount = form_amount.clone();
        let form_description = form_description.clone();
        let refresh = refresh.clone();
        let saving = saving.clone();
        Callback::from(move |_: MouseEvent| {
            let payload = match submission.clone() {
                Some(payload) => payload,
                None => return,
            };
            saving.set(true);
            let client = client.clone();
            let form_amount = form_amount.clone();
            let form_description = form_description.clone();
            let refresh = refresh.clone();
            let saving = saving.clone();
            spawn_local(async move {
                match client.create_transaction(kind, &payload).await {
                    Ok(created) => {
                        log::info!("created {} {}", kind.path_segment(), created.id);
                        form_amount.set(String::new());
                        form_description.set(String::new());
                        refresh.dispatch(Bump);
                    }
                    Err(err) => log::error!("failed to create {}: {}", kind.path_segment(), err),
                }
                saving.set(false);
            });
        })
    };

    let on_cancel_delete = {
        let confirm = confirm.clone();
        Callback::from(move |_: ()| confirm.dispatch(ConfirmAction::Cancel))
    };

    let on_confirm_delete = {
        let confirm = confirm.clone();
        let client = client.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: ()| {
            if !confirm.can_confirm() {
                return;
            }
            let target = match confirm.target() {
                Some(target) => target.clone(),
                None => return,
            };
            confirm.dispatch(ConfirmAction::Confirmed);
            let client = client.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                // the list is reloaded either way; a failure only gets logged
                if let Err(err) = client.delete_transaction(kind, target.id).await {
                    log::error!("failed to delete {} {}: {}", kind.path_segment(), target.id, err);
                }
                refresh.dispatch(Bump);
            });
        })
    };

    let now = Local::now();
    let totals = PeriodTotals::compute(&items, &now);
    let today = bucket(&items, Period::Today, &now);
    let today_groups = group_by_category(&today, &categories);

    let period_cards = Period::EVERY.into_iter().map(|period| {
        let selected_period = selected_period.clone();
        let active = *selected_period == Some(period);
        let on_click = Callback::from(move |_: MouseEvent| {
            selected_period.set(if active { None } else { Some(period) })
        });
        let icon = if period == Period::All { StatIcon::Wallet } else { StatIcon::Calendar };
        html! {
            <StatCard
                title={period.label()}
                amount={format_currency(totals.get(period), &symbol)}
                {icon}
                on_click={Some(on_click)}
                {active}
            />
        }
    });

    let drill_down = match *selected_period {
        Some(period) => {
            let in_period = bucket(&items, period, &now);
            let groups = group_by_category(&in_period, &categories);
            let on_close = {
                let selected_period = selected_period.clone();
                Callback::from(move |_: MouseEvent| selected_period.set(None))
            };
            html! {
                <div class="bg-card rounded-[10px] p-6 border border-border">
                    <div class="flex items-center justify-between mb-4">
                        <h3 class="font-bold text-foreground text-lg">{ format!("{} · {}", kind.title(), period.label()) }</h3>
                        <div class="flex items-center gap-4">
                            <span class="text-sm font-bold">{ format!("Total: {}", format_currency(total(in_period.iter().copied()), &symbol)) }</span>
                            <button onclick={on_close} class="text-sm text-muted-foreground">{"Close"}</button>
                        </div>
                    </div>
                    { render_groups(&groups, &symbol, true) }
                </div>
            }
        }
        None => html! {},
    };

    let add_disabled = submission.is_none() || *saving;
    let field_class = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[11px] text-[#173E63] border-none";

    html! {
        <>
            { page_shell(
                kind.title(),
                html! {},
                html! {
                    <>
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-6">
                            { for period_cards }
                        </div>

                        { drill_down }

                        <div class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50">
                            <h4 class="text-[#1D617A] font-bold text-[15px] mb-3 tracking-wider">{ format!("Add {}", match kind { TransactionKind::Expense => "expense", TransactionKind::Income => "income" }) }</h4>
                            <div class="grid grid-cols-1 md:grid-cols-3 gap-3 mb-4">
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{ format!("Amount ({})", symbol) }</label>
                                    <input type="number" min="0" step="0.01" placeholder="0.00" value={(*form_amount).clone()} oninput={bind_input(&form_amount)} class={field_class} />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Description"}</label>
                                    <input type="text" placeholder="Optional" value={(*form_description).clone()} oninput={bind_input(&form_description)} class={field_class} />
                                </div>
                                <div class="space-y-1">
                                    <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                                    <select class={field_class} onchange={bind_select_id(&form_category)}>
                                        { for categories.iter().map(|c| html! {
                                            <option value={c.id.to_string()} selected={*form_category == Some(c.id)}>{ c.name.clone() }</option>
                                        }) }
                                    </select>
                                </div>
                            </div>
                            <button onclick={on_create} disabled={add_disabled} class="w-full bg-[#173E63] disabled:opacity-50 text-white py-2 rounded-[10px] text-[12px] font-bold flex items-center justify-center gap-2">
                                { icon_plus() }
                                { if *saving { "Saving..." } else { "Add" } }
                            </button>
                        </div>

                        <div class="bg-card rounded-[10px] p-6 border border-border">
                            <h3 class="font-bold text-foreground text-lg mb-4">{"Today by category"}</h3>
                            if today_groups.is_empty() {
                                <p class="text-sm text-muted-foreground">{"Nothing recorded today."}</p>
                            } else {
                                { render_groups(&today_groups, &symbol, false) }
                            }
                        </div>

                        <div class="bg-card rounded-2xl shadow-md border border-border overflow-hidden">
                            <div class="p-5 border-b border-border">
                                <h3 class="font-bold text-lg text-foreground">{"History"}</h3>
                            </div>
                            <div class="overflow-x-auto">
                                <table class="w-full text-left border-collapse">
                                    <thead>
                                        <tr class="bg-muted text-muted-foreground text-[10px] uppercase tracking-widest">
                                            <th class="px-8 py-4 font-bold">{"Date"}</th>
                                            <th class="px-8 py-4 font-bold">{"Description"}</th>
                                            <th class="px-8 py-4 font-bold">{"Category"}</th>
                                            <th class="px-8 py-4 font-bold">{"Amount"}</th>
                                            <th class="px-8 py-4 font-bold">{"Action"}</th>
                                        </tr>
                                    </thead>
                                    <tbody class="divide-y divide-border">
                                        { if *loading {
                                            html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"Loading..."}</td></tr> }
                                        } else if items.is_empty() {
                                            html! { <tr><td colspan="5" class="px-8 py-6 text-center text-muted-foreground">{"No records yet."}</td></tr> }
                                        } else {
                                            html! {
                                                <>
                                                    { for items.iter().map(|tx| {
                                                        let cat_name = category_name(&categories, tx.category_id);
                                                        let on_delete = {
                                                            let confirm = confirm.clone();
                                                            let target = DeleteTarget {
                                                                id: tx.id,
                                                                description: tx.description_or_empty().to_string(),
                                                                amount: tx.amount,
                                                                category_name: cat_name.clone(),
                                                            };
                                                            Callback::from(move |_: MouseEvent| confirm.dispatch(ConfirmAction::Arm(target.clone())))
                                                        };
                                                        html! {
                                                            <tr key={tx.id.to_string()} class="text-sm hover:bg-muted/40 transition-colors group">
                                                                <td class="px-8 py-4 text-muted-foreground">{ tx.created_at.map(|ts| ts.date_label(&Local)).unwrap_or_default() }</td>
                                                                <td class="px-8 py-4 text-foreground">{ tx.description_or_empty() }</td>
                                                                <td class="px-8 py-4">
                                                                    <span class="bg-secondary text-secondary-foreground px-3 py-1 rounded-full text-[10px] font-bold">{ cat_name }</span>
                                                                </td>
                                                                <td class="px-8 py-4 font-semibold text-foreground">{ format!("{} {}", kind.sign(), format_currency(tx.amount, &symbol)) }</td>
                                                                <td class="px-8 py-4">
                                                                    <button onclick={on_delete} class="p-2 rounded-lg hover:bg-red-50" aria-label="Delete">{ icon_trash() }</button>
                                                                </td>
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
            <DeleteDialog state={(**confirm).clone()} on_cancel={on_cancel_delete} on_confirm={on_confirm_delete} />
        </>
    }
}

fn render_groups(groups: &[CategoryGroup<'_>], symbol: &str, with_items: bool) -> Html {
    html! {
        <div class="space-y-3">
            { for groups.iter().map(|group| html! {
                <div class="border border-border rounded-[10px] p-3">
                    <div class="flex items-center justify-between text-sm">
                        <span class="font-bold text-foreground">{ group.name.clone() }</span>
                        <span class="font-semibold">{ format_currency(group.total, symbol) }</span>
                    </div>
                    if with_items {
                        <ul class="mt-2 space-y-1 text-xs text-muted-foreground">
                            { for group.items.iter().map(|tx| html! {
                                <li class="flex justify-between">
                                    <span>{ format!("{} {}", tx.created_at.map(|ts| ts.date_label(&Local)).unwrap_or_default(), tx.description_or_empty()) }</span>
                                    <span>{ format_currency(tx.amount, symbol) }</span>
                                </li>
                            }) }
                        </ul>
                    } else {
                        <p class="mt-1 text-xs text-muted-foreground">{ format!("{} record(s)", group.items.len()) }</p>
                    }
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(ids: &[i64]) -> Vec<Category> {
        ids.iter()
            .map(|id| Category {
                id: *id,
                name: format!("c{}", id),
                description: None,
                color: None,
                icon: None,
            })
            .collect()
    }

    #[test]
    fn draft_needs_positive_amount_and_category() {
        assert!(draft("", "x", Some(1)).is_none());
        assert!(draft("0", "x", Some(1)).is_none());
        assert!(draft("abc", "x", Some(1)).is_none());
        assert!(draft("10", "x", None).is_none());

        let ok = draft("99,90", "  Lunch ", Some(3)).unwrap();
        assert_eq!(ok.amount, Money::from_minor(9990));
        assert_eq!(ok.description, "Lunch");
        assert_eq!(ok.category_id, 3);
    }

    #[test]
    fn description_may_be_empty() {
        assert_eq!(draft("5", "", Some(1)).unwrap().description, "");
    }

    #[test]
    fn category_selection_survives_reload_when_present() {
        assert_eq!(pick_category(Some(2), &cats(&[1, 2])), Some(2));
        assert_eq!(pick_category(Some(9), &cats(&[1, 2])), Some(1));
        assert_eq!(pick_category(None, &cats(&[4])), Some(4));
        assert_eq!(pick_category(Some(1), &[]), None);
    }
}
