//! Распределение размеров заказ-наряда по цветам

pub mod model;

use self::model::{fetch_by_id, fetch_colors, open_editor, WorkOrderDistributionSink};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use crate::shared::quantity_matrix::{AllocationMatrix, AllocationMatrixEditor};
use contracts::domain::a001_work_order::WorkOrder;
use contracts::shared::catalog::CatalogItemDto;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn WorkOrderDistribution(id: String, on_close: Callback<()>) -> impl IntoView {
    let order = RwSignal::new(None::<WorkOrder>);
    let colors = RwSignal::new(Vec::<CatalogItemDto>::new());
    let matrix = RwSignal::new(AllocationMatrix::default());
    let error = RwSignal::new(None::<String>);
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);

    spawn_local(async move {
        let loaded = match fetch_by_id(&id).await {
            Ok(doc) => fetch_colors().await.map(|list| (doc, list)),
            Err(e) => Err(e),
        };
        match loaded {
            Ok((doc, list)) => {
                matrix.set(open_editor(&doc, &list));
                colors.set(list);
                order.set(Some(doc));
            }
            Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
        }
        set_loading.set(false);
    });

    let save = move |_| {
        let Some(current) = order.get_untracked() else {
            return;
        };
        let editor = matrix.get_untracked();
        set_saving.set(true);
        spawn_local(async move {
            let sink = WorkOrderDistributionSink::new(current);
            match editor.save(&sink).await {
                Ok(()) => {
                    let rows = editor.distribution();
                    order.update(|o| {
                        if let Some(o) = o {
                            o.replace_distribution(&rows);
                        }
                    });
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Ошибка сохранения: {}", e))),
            }
            set_saving.set(false);
        });
    };

    let title = move || {
        order.with(|o| match o {
            Some(o) => format!("{} · {} · {}", o.base.code, o.article, o.base.description),
            None => "Заказ-наряд".to_string(),
        })
    };

    view! {
        <PageFrame page_id="a001_work_order--distribution" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{title}</h1>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=save
                            disabled=Signal::derive(move || saving.get() || loading.get())
                        >
                            {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_close.run(())
                        >
                            "Закрыть"
                        </Button>
                    </Flex>
                </div>
            </div>

            <div class="page__content">
                {move || {
                    error
                        .get()
                        .map(|e| view! { <div class="alert alert--error">{e}</div> })
                }}
                <Show
                    when=move || !loading.get()
                    fallback=|| view! { <Spinner /> }
                >
                    <AllocationMatrixEditor matrix=matrix catalog=colors error=error />
                </Show>
            </div>
        </PageFrame>
    }
}
