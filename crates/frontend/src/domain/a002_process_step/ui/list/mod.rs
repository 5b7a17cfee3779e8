//! Этапы производства: порядок меняется перетаскиванием

pub mod model;

use self::model::{build_store, create, drafts_to_create, fetch_list, new_draft, reorder_target};
use crate::shared::ordered_list::{
    persist_order, OrderedListStore, ReorderProtocol, ReorderableList,
};
use crate::shared::page_frame::{PageFrame, PAGE_CAT_LIST};
use contracts::domain::a002_process_step::{ProcessStep, ProcessStepDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn ProcessStepList() -> impl IntoView {
    let store = RwSignal::new(OrderedListStore::<ProcessStepDto>::default());
    let protocol = RwSignal::new(ReorderProtocol::new(reorder_target()));
    let error = RwSignal::new(None::<String>);
    let new_description = RwSignal::new(String::new());
    let (loading, set_loading) = signal(false);
    let (saving, set_saving) = signal(false);

    let load_items = move || {
        spawn_local(async move {
            set_loading.set(true);
            error.set(None);
            match fetch_list().await {
                Ok(list) => store.set(build_store(list)),
                Err(e) => error.set(Some(format!("Ошибка сети: {}", e))),
            }
            set_loading.set(false);
        });
    };
    load_items();

    let add_draft = move |_| {
        if protocol.with_untracked(|p| p.is_persisting()) {
            return;
        }
        let description = new_description.get_untracked();
        if description.trim().is_empty() {
            return;
        }
        store.update(|s| {
            s.push_draft(new_draft(&description));
        });
        new_description.set(String::new());
    };

    let save_drafts = move |_| {
        if saving.get_untracked() || protocol.with_untracked(|p| p.is_persisting()) {
            return;
        }
        let drafts = store.with_untracked(drafts_to_create);
        if drafts.is_empty() {
            return;
        }
        set_saving.set(true);
        spawn_local(async move {
            let mut created_any = false;
            for (key, dto) in drafts {
                match create(&dto).await {
                    Ok(created) => {
                        if let Some(id) = created.id {
                            store.update(|s| {
                                if let Some(pos) = s.position_of_local(key) {
                                    s.mark_persisted(pos, id);
                                }
                            });
                            created_any = true;
                        }
                    }
                    Err(e) => {
                        error.set(Some(format!("Этап «{}» не создан: {}", dto.description, e)));
                        break;
                    }
                }
            }
            set_saving.set(false);
            // новые этапы созданы в конце, порядок на экране пишем отдельно
            if created_any {
                persist_order(store, protocol, error);
            }
        });
    };

    let has_drafts = move || store.with(|s| s.items().iter().any(|i| i.is_draft()));
    let busy = move || saving.get() || protocol.with(|p| p.is_persisting());

    view! {
        <PageFrame page_id="a002_process_step--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{ProcessStep::list_name()}</h1>
                </div>
                <div class="page__header-right">
                    <Flex gap=FlexGap::Small>
                        <Show when=move || protocol.with(|p| p.is_persisting())>
                            <Spinner size=SpinnerSize::Tiny />
                        </Show>
                        <Button
                            appearance=ButtonAppearance::Primary
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

                <ReorderableList
                    store=store
                    protocol=protocol
                    error=error
                    locked=Signal::derive(move || saving.get())
                    render_item=|step: ProcessStepDto| {
                        view! {
                            <span class="process-step__code">{step.code}</span>
                            <span class="process-step__description">{step.description}</span>
                        }
                        .into_any()
                    }
                />

                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <Input value=new_description placeholder="Новый этап" />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=add_draft
                        disabled=Signal::derive(busy)
                    >
                        "Добавить"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=save_drafts
                        disabled=Signal::derive(move || busy() || !has_drafts())
                    >
                        "Сохранить новые"
                    </Button>
                </Flex>
            </div>
        </PageFrame>
    }
}
