use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::{icon_plus, icon_trash, page_shell};
use crate::hooks::{use_api, use_refresh, Bump};
use crate::models::{Category, CategoryKind};
use crate::pages::bind_input;

fn clean_name(raw: &str) -> Option<String> {
    let name = raw.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn confirmed(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[derive(Clone, PartialEq)]
struct Editing {
    id: i64,
    name: String,
}

#[function_component(AdminCategoriesPage)]
pub fn admin_categories_page() -> Html {
    let client = use_api();
    let kind = use_state(|| CategoryKind::Expense);
    let categories = use_state(Vec::<Category>::new);
    let loading = use_state(|| true);
    let refresh = use_refresh();
    let new_name = use_state(String::new);
    let editing = use_state(|| None::<Editing>);
    let edit_name = use_state(String::new);
    let error = use_state(|| None::<String>);

    {
        let client = client.clone();
        let categories = categories.clone();
        let loading = loading.clone();
        let error = error.clone();
        use_effect_with_deps(
            move |(kind, _)| {
                let kind = *kind;
                loading.set(true);
                spawn_local(async move {
                    match client.list_categories(kind).await {
                        Ok(list) => {
                            categories.set(list);
                            error.set(None);
                        }
                        Err(err) => {
                            log::error!("failed to load {} categories: {}", kind.path_segment(), err);
                            error.set(Some(err.user_message()));
                        }
                    }
                    loading.set(false);
                });
                || ()
            },
            (*kind, refresh.0),
        );
    }

    let reload = {
        let refresh = refresh.clone();
        move || refresh.dispatch(Bump)
    };

    let switch_kind = |target: CategoryKind| {
        let kind = kind.clone();
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| {
            editing.set(None);
            kind.set(target);
        })
    };

    let on_create = {
        let client = client.clone();
        let kind = *kind;
        let new_name = new_name.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let name = match clean_name(&new_name) {
                Some(name) => name,
                None => return,
            };
            let client = client.clone();
            let new_name = new_name.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match client.create_category(kind, &name).await {
                    Ok(created) => {
                        log::info!("created {} category {}", kind.path_segment(), created.id);
                        new_name.set(String::new());
                    }
                    Err(err) => {
                        log::error!("failed to create category: {}", err);
                        error.set(Some(err.user_message()));
                    }
                }
                reload();
            });
        })
    };

    let on_save_edit = {
        let client = client.clone();
        let kind = *kind;
        let editing = editing.clone();
        let edit_name = edit_name.clone();
        let error = error.clone();
        let reload = reload.clone();
        Callback::from(move |_: MouseEvent| {
            let id = match &*editing {
                Some(current) => current.id,
                None => return,
            };
            let name = match clean_name(&edit_name) {
                Some(name) => name,
                None => return,
            };
            let client = client.clone();
            let editing = editing.clone();
            let error = error.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match client.update_category(kind, id, &name).await {
                    Ok(_) => editing.set(None),
                    Err(err) => {
                        log::error!("failed to rename category {}: {}", id, err);
                        error.set(Some(err.user_message()));
                    }
                }
                reload();
            });
        })
    };

    let on_cancel_edit = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(None))
    };

    let tab_class = |active: bool| {
        if active {
            "px-4 py-2 rounded-xl font-bold text-sm bg-primary text-primary-foreground"
        } else {
            "px-4 py-2 rounded-xl font-bold text-sm bg-secondary text-secondary-foreground"
        }
    };

    let rows = categories.iter().map(|category| {
        let is_editing = (*editing).as_ref().map(|e| e.id) == Some(category.id);
        let on_edit = {
            let editing = editing.clone();
            let edit_name = edit_name.clone();
            let current = Editing { id: category.id, name: category.name.clone() };
            Callback::from(move |_: MouseEvent| {
                edit_name.set(current.name.clone());
                editing.set(Some(current.clone()));
            })
        };
        let on_delete = {
            let client = client.clone();
            let kind = *kind;
            let id = category.id;
            let prompt = format!("Delete category \"{}\"?", category.name);
            let error = error.clone();
            let reload = reload.clone();
            Callback::from(move |_: MouseEvent| {
                if !confirmed(&prompt) {
                    return;
                }
                let client = client.clone();
                let error = error.clone();
                let reload = reload.clone();
                spawn_local(async move {
                    if let Err(err) = client.delete_category(kind, id).await {
                        log::error!("failed to delete category {}: {}", id, err);
                        error.set(Some(err.user_message()));
                    }
                    reload();
                });
            })
        };

        html! {
            <li key={category.id.to_string()} class="flex items-center justify-between px-5 py-3">
                if is_editing {
                    <input
                        class="flex-1 mr-3 px-3 py-1 bg-input border border-input rounded-lg text-sm"
                        value={(*edit_name).clone()}
                        oninput={bind_input(&edit_name)}
                    />
                    <div class="flex gap-2">
                        <button onclick={on_save_edit.clone()} class="text-sm font-bold text-primary">{"Save"}</button>
                        <button onclick={on_cancel_edit.clone()} class="text-sm text-muted-foreground">{"Cancel"}</button>
                    </div>
                } else {
                    <span class="text-sm text-foreground">{ category.name.clone() }</span>
                    <div class="flex gap-2">
                        <button onclick={on_edit} class="text-sm text-primary">{"Rename"}</button>
                        <button onclick={on_delete} class="p-1 rounded-lg hover:bg-red-50" aria-label="Delete">{ icon_trash() }</button>
                    </div>
                }
            </li>
        }
    });

    html! {
        { page_shell(
            "Categories",
            html! {
                <div class="flex gap-2">
                    <button onclick={switch_kind(CategoryKind::Expense)} class={tab_class(*kind == CategoryKind::Expense)}>{"Expense"}</button>
                    <button onclick={switch_kind(CategoryKind::Income)} class={tab_class(*kind == CategoryKind::Income)}>{"Income"}</button>
                </div>
            },
            html! {
                <>
                    <form onsubmit={on_create} class="flex gap-3">
                        <input
                            class="flex-1 px-4 py-2 bg-input border border-input rounded-lg text-sm"
                            placeholder="New category name"
                            value={(*new_name).clone()}
                            oninput={bind_input(&new_name)}
                        />
                        <button type="submit" disabled={clean_name(&new_name).is_none()} class="bg-primary text-primary-foreground px-4 py-2 rounded-lg font-semibold flex items-center gap-2 disabled:opacity-50">
                            { icon_plus() }
                            {"Add"}
                        </button>
                    </form>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <div class="bg-card rounded-[10px] border border-border">
                        <div class="p-5 border-b border-border">
                            <h3 class="font-bold text-lg text-foreground">{ kind.label() }</h3>
                        </div>
                        if *loading {
                            <p class="px-5 py-4 text-sm text-muted-foreground">{"Loading..."}</p>
                        } else if categories.is_empty() {
                            <p class="px-5 py-4 text-sm text-muted-foreground">{"No categories yet."}</p>
                        } else {
                            <ul class="divide-y divide-border">{ for rows }</ul>
                        }
                    </div>
                </>
            }
        ) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_must_not_be_blank() {
        assert_eq!(clean_name("  Food "), Some("Food".to_string()));
        assert_eq!(clean_name("   "), None);
        assert_eq!(clean_name(""), None);
    }
}
