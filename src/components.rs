use yew::prelude::*;

use crate::confirm::{DeleteConfirmation, DELETE_DELAY_SECS};
use crate::hooks::{use_config, use_navigate, use_session_changes};
use crate::money::format_currency;
use crate::routes::Route;

#[derive(Clone, Copy, PartialEq)]
pub enum StatIcon {
    UpRight,
    CreditCard,
    Wallet,
    Calendar,
}

pub fn page_shell(title: &'static str, actions: Html, children: Html) -> Html {
    html! {
        <div class="p-6 max-w-7xl mx-auto">
            <div class="flex items-center justify-between pb-4 border-b border-border">
                <h1 class="text-2xl font-bold text-foreground">{ title }</h1>
                { actions }
            </div>
            <div class="pt-5 space-y-6">
                { children }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub amount: AttrValue,
    pub icon: StatIcon,
    #[prop_or_default]
    pub on_click: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub active: bool,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let class_name = match (props.on_click.is_some(), props.active) {
        (_, true) => "bg-card p-6 rounded-[10px] shadow-sm border-2 border-primary flex justify-between items-start cursor-pointer",
        (true, false) => "bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start cursor-pointer hover:bg-muted/30",
        (false, false) => "bg-card p-6 rounded-[10px] shadow-sm border border-border flex justify-between items-start",
    };
    html! {
        <div class={class_name} onclick={props.on_click.clone()}>
            <div>
                <p class="text-muted-foreground text-[10px] font-bold mb-1 tracking-widest">{ props.title.clone() }</p>
                <h3 class="text-2xl font-bold text-[#1D617A] tracking-tight">{ props.amount.clone() }</h3>
            </div>
            <div class="p-3 bg-[#eef4f9] rounded-[10px]">
                {
                    match props.icon {
                        StatIcon::UpRight => icon_arrow_up_right(),
                        StatIcon::CreditCard => icon_credit_card(),
                        StatIcon::Wallet => icon_wallet(),
                        StatIcon::Calendar => icon_calendar(),
                    }
                }
            </div>
        </div>
    }
}

struct NavItem {
    label: &'static str,
    route: Route,
    icon: fn() -> Html,
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    pub children: Children,
    pub active: Route,
}

/// Navigation for signed-in pages. The admin link only shows for
/// superusers; logout drops back to the landing page.
#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let session = use_session_changes();
    let navigate = use_navigate();

    let mut nav_items = vec![
        NavItem {
            label: "Dashboard",
            route: Route::Dashboard,
            icon: icon_layout_grid,
        },
        NavItem {
            label: "Expenses",
            route: Route::Expenses,
            icon: icon_credit_card,
        },
        NavItem {
            label: "Income",
            route: Route::Income,
            icon: icon_trending_up,
        },
    ];
    if session.is_privileged() {
        nav_items.push(NavItem {
            label: "Categories",
            route: Route::AdminCategories,
            icon: icon_settings,
        });
    }

    let on_logout = {
        let session = session.clone();
        let navigate = navigate.clone();
        Callback::from(move |_| {
            session.logout();
            navigate.emit(Route::Landing);
        })
    };

    let email = session.get_user().map(|u| u.email).unwrap_or_default();

    html! {
        <div class="flex h-screen bg-background">
            <div class="hidden md:flex w-[220px] h-screen bg-[#D8E1E8] p-4 flex-col">
                <button type="button" class="flex items-center gap-3 px-2 mb-8" onclick={{
                    let navigate = navigate.clone();
                    Callback::from(move |_| navigate.emit(Route::Landing))
                }}>
                    <div class="w-12 h-12 bg-[#173E63] rounded-full flex items-center justify-center text-white font-bold text-xl">{"K"}</div>
                    <span class="text-[#173E63] text-2xl font-black tracking-tight">{"Kopilka"}</span>
                </button>

                <div class="flex-1 bg-[#173E63] rounded-[24px] flex flex-col py-6 px-3 shadow-lg">
                    <nav class="flex-1 space-y-2">
                        { for nav_items.iter().map(|item| {
                            let class_name = if item.route == props.active {
                                "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium bg-[#B2CBDE] text-[#173E63] w-full"
                            } else {
                                "flex items-center gap-3 px-4 py-3 rounded-xl transition-all text-[13px] font-medium text-slate-300 hover:bg-white/5 hover:text-white w-full"
                            };
                            let navigate = navigate.clone();
                            let route = item.route;
                            html! {
                                <button type="button" class={class_name} onclick={Callback::from(move |_| navigate.emit(route))}>
                                    <span class="shrink-0">{ (item.icon)() }</span>
                                    <span class="truncate whitespace-nowrap text-left">{ item.label }</span>
                                </button>
                            }
                        }) }
                    </nav>

                    <div class="mt-auto pt-4">
                        <p class="px-4 pb-2 text-[11px] text-slate-400 truncate">{ email }</p>
                        <button onclick={on_logout} class="flex items-center gap-3 w-full px-4 py-3 rounded-xl hover:bg-white/10 transition-colors text-[13px] font-medium text-slate-300">
                            { icon_log_out() }
                            <span>{"Log Out"}</span>
                        </button>
                    </div>
                </div>
            </div>

            <main class="flex-1 overflow-y-auto">
                { for props.children.iter() }
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DeleteDialogProps {
    pub state: DeleteConfirmation,
    pub on_cancel: Callback<()>,
    pub on_confirm: Callback<()>,
}

/// Modal showing what is about to be deleted. The confirm button stays
/// disabled until the countdown in `state` has finished.
#[function_component(DeleteDialog)]
pub fn delete_dialog(props: &DeleteDialogProps) -> Html {
    let config = use_config();
    let target = match props.state.target() {
        Some(target) => target.clone(),
        None => return html! {},
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };
    // clicking outside the panel dismisses the dialog
    let on_backdrop = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_| on_cancel.emit(()))
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
    let on_confirm = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_| on_confirm.emit(()))
    };
    let ready = props.state.can_confirm();
    let remaining = props.state.remaining();

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50" onclick={on_backdrop}>
            <div class="w-full max-w-md bg-card border border-border rounded-2xl shadow-lg p-6 space-y-4" onclick={keep_open}>
                <h3 class="text-lg font-bold text-foreground">{"Delete record?"}</h3>
                <div class="text-sm text-muted-foreground space-y-1">
                    <p>{ format!("Description: {}", if target.description.is_empty() { "-" } else { target.description.as_str() }) }</p>
                    <p>{ format!("Amount: {}", format_currency(target.amount, &config.currency_symbol)) }</p>
                    <p>{ format!("Category: {}", target.category_name) }</p>
                </div>
                <div class="h-2 w-full bg-secondary rounded-full overflow-hidden">
                    <div class="h-full bg-red-500 transition-all" style={format!("width: {}%", props.state.progress_percent())}></div>
                </div>
                <div class="flex gap-3">
                    <button onclick={on_cancel} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-sm font-bold">{"Cancel"}</button>
                    <button onclick={on_confirm} disabled={!ready} class="flex-1 bg-red-600 disabled:opacity-50 text-white py-2 rounded-[10px] text-sm font-bold">
                        { if ready { "Delete".to_string() } else { format!("Delete ({}s of {}s)", remaining, DELETE_DELAY_SECS) } }
                    </button>
                </div>
            </div>
        </div>
    }
}

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" class="text-foreground">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_layout_grid() -> Html {
    icon_base("M3 3h8v8H3zM13 3h8v8h-8zM3 13h8v8H3zM13 13h8v8h-8z")
}
pub fn icon_wallet() -> Html {
    icon_base("M3 7h18v10H3zM16 7V5H5v2")
}
pub fn icon_trending_up() -> Html {
    icon_base("M3 17l6-6 4 4 7-7")
}
pub fn icon_credit_card() -> Html {
    icon_base("M3 7h18v10H3zM3 11h18")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 5h18v16H3zM3 10h18M8 3v4M16 3v4")
}
pub fn icon_settings() -> Html {
    icon_base("M12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_trash() -> Html {
    icon_base("M3 6h18M8 6V4h8v2M6 6l1 14h10l1-14")
}
pub fn icon_arrow_up_right() -> Html {
    icon_base("M7 17L17 7M7 7h10v10")
}
