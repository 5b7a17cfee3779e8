use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::detail_tab_label;
use crate::shared::api_utils::get_json;
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a003_quantity_template::QuantityTemplate;
use contracts::domain::common::{AggregateId, AggregateRoot};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

async fn fetch_list() -> Result<Vec<QuantityTemplate>, String> {
    get_json(&format!("{}/list", QuantityTemplate::resource_path()))
        .await
        .map_err(|e| e.to_string())
}

#[component]
pub fn QuantityTemplateList() -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (items, set_items) = signal(Vec::<QuantityTemplate>::new());
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

    let open_detail = move |id: String, description: String| {
        tabs_store.open_tab(
            &format!("{}_detail_{}", QuantityTemplate::full_name(), id),
            &detail_tab_label(QuantityTemplate::element_name(), &description),
        );
    };

    let open_new = move |_| {
        tabs_store.open_tab(
            &format!("{}_new", QuantityTemplate::full_name()),
            &format!("Новый: {}", QuantityTemplate::element_name()),
        );
    };

    view! {
        <PageFrame page_id="a003_quantity_template--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{QuantityTemplate::list_name()}</h1>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Primary on_click=open_new>
                            "Создать"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| load_items()
                            disabled=Signal::derive(move || loading.get())
                        >
                            {move || if loading.get() { "Загрузка..." } else { "Обновить" }}
                        </Button>
                    </Flex>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                <table class="table__data">
                    <thead>
                        <tr>
                            <th>"Наименование"</th>
                            <th class="table__cell--right">"Строк"</th>
                            <th class="table__cell--right">"Колонок"</th>
                            <th class="table__cell--right">"Итого"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || items.get()
                            key=|t| t.base.id.as_string()
                            children=move |template: QuantityTemplate| {
                                let id = template.base.id.as_string();
                                let description = template.base.description.clone();
                                let for_click = description.clone();
                                view! {
                                    <tr
                                        class="table__row"
                                        on:click=move |_| open_detail(id.clone(), for_click.clone())
                                    >
                                        <td>{description}</td>
                                        <td class="table__cell--right">
                                            {template.matrix.rows.len().to_string()}
                                        </td>
                                        <td class="table__cell--right">
                                            {template.matrix.columns.len().to_string()}
                                        </td>
                                        <td class="table__cell--right">
                                            {template.matrix.total().to_string()}
                                        </td>
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
