use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::api_utils::get_json;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a001_work_order::WorkOrder;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

async fn fetch_list() -> Result<Vec<WorkOrder>, String> {
    get_json(&format!("{}/list", WorkOrder::resource_path()))
        .await
        .map_err(|e| e.to_string())
}

#[component]
pub fn WorkOrderList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (items, set_items) = signal(Vec::<WorkOrder>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match fetch_list().await {
                Ok(list) => set_items.set(list),
                Err(e) => set_error.set(Some(format!("Ошибка сети: {}", e))),
            }
            set_loading.set(false);
        });
    };
    load_items();

    let open_distribution = move |order: &WorkOrder| {
        tabs_store.open_tab(
            &format!("{}_distribution_{}", WorkOrder::full_name(), order.to_string_id()),
            &detail_tab_label(WorkOrder::element_name(), &order.base.code),
        );
    };

    view! {
        <PageFrame page_id="a001_work_order--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{WorkOrder::list_name()}</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| load_items()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                <table class="table__data">
                    <thead>
                        <tr>
                            <th>"Номер"</th>
                            <th>"Артикул"</th>
                            <th>"Наименование"</th>
                            <th class="table__cell--right">"Количество"</th>
                            <th class="table__cell--right">"Распределено"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || items.get()
                            key=|o| o.to_string_id()
                            children=move |order: WorkOrder| {
                                let assigned: u64 = order
                                    .size_lines
                                    .iter()
                                    .flat_map(|l| l.colors.iter())
                                    .map(|c| c.quantity as u64)
                                    .sum();
                                let total = order.total_quantity();
                                let for_click = order.clone();
                                view! {
                                    <tr
                                        class="table__row"
                                        on:click=move |_| open_distribution(&for_click)
                                    >
                                        <td>{order.base.code.clone()}</td>
                                        <td>{order.article.clone()}</td>
                                        <td>{order.base.description.clone()}</td>
                                        <td class="table__cell--right">{total.to_string()}</td>
                                        <td class="table__cell--right">{assigned.to_string()}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        </PageFrame>
    }
}
