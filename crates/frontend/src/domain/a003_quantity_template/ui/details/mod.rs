//! Шаблон раскроя: произвольная матрица размер × цвет

pub mod model;

use self::model::{build_dto, fetch_by_id, form_from, save, validate};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_DETAIL};
use crate::shared::quantity_matrix::{FreeEntryMatrix, FreeEntryMatrixEditor};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn QuantityTemplateDetails(id: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let template_id = RwSignal::new(id.clone());
    let description = RwSignal::new(String::new());
    let comment = RwSignal::new(String::new());
    let matrix = RwSignal::new(FreeEntryMatrix::new());
    let error = RwSignal::new(None::<String>);
    let (loading, set_loading) = signal(id.is_some());
    let (saving, set_saving) = signal(false);

    if let Some(existing) = id {
        spawn_local(async move {
            match fetch_by_id(&existing).await {
                Ok(template) => {
                    let (loaded_id, loaded_description, loaded_comment, loaded_matrix) =
                        form_from(&template);
                    template_id.set(Some(loaded_id));
                    description.set(loaded_description);
                    comment.set(loaded_comment);
                    matrix.set(loaded_matrix);
                }
                Err(e) => error.set(Some(format!("Ошибка загрузки: {}", e))),
            }
            set_loading.set(false);
        });
    }

    let on_save = move |_| {
        let current = matrix.get_untracked();
        let name = description.get_untracked();
        if let Err(e) = validate(&name, &current) {
            error.set(Some(e));
            return;
        }
        let dto = build_dto(
            template_id.get_untracked(),
            &name,
            &comment.get_untracked(),
            &current,
        );
        set_saving.set(true);
        spawn_local(async move {
            match save(&dto).await {
                Ok(saved) => {
                    log::debug!("quantity template saved: {:?}", saved.id);
                    template_id.set(saved.id);
                    error.set(None);
                }
                Err(e) => error.set(Some(format!("Ошибка сохранения: {}", e))),
            }
            set_saving.set(false);
        });
    };

    view! {
        <PageFrame page_id="a003_quantity_template--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {move || if template_id.get().is_some() { "Шаблон раскроя" } else { "Новый шаблон раскроя" }}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=on_save
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
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                    <Flex vertical=true gap=FlexGap::Small>
                        <Label>"Наименование"</Label>
                        <Input value=description placeholder="Напр: Футболка, базовая раскладка" />
                        <Label>"Комментарий"</Label>
                        <Textarea value=comment />
                    </Flex>
                    <FreeEntryMatrixEditor matrix=matrix />
                </Show>
            </div>
        </PageFrame>
    }
}
