//! Боковое меню с разделами консоли

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    label: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Производство",
            items: vec![
                ("a001_work_order", "work-order"),
                ("a003_quantity_template", "matrix"),
            ],
        },
        MenuGroup {
            label: "Справочники",
            items: vec![("a002_process_step", "process-step")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    view! {
        <div class="app-sidebar__content">
            {menu_groups()
                .into_iter()
                .map(|group| {
                    view! {
                        <div class="app-sidebar__group">
                            <div class="app-sidebar__group-label">
                                {icon("chevron-right")}
                                <span>{group.label}</span>
                            </div>
                            {group
                                .items
                                .into_iter()
                                .map(|(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
