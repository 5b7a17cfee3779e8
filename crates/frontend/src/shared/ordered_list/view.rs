use super::api::HttpReorderApi;
use super::protocol::{ReorderApi, ReorderOutcome, ReorderProtocol, ReorderStep};
use super::store::OrderedListStore;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Применить завершённый жест к списку и, если нужно, отправить порядок на сервер.
fn apply_drop<T>(
    store: RwSignal<OrderedListStore<T>>,
    protocol: RwSignal<ReorderProtocol>,
    error: RwSignal<Option<String>>,
) where
    T: Clone + Send + Sync + 'static,
{
    let mut list = store.get_untracked();
    let mut proto = protocol.get_untracked();
    let step = proto.reorder(&mut list);
    store.set(list);
    protocol.set(proto);
    send_order(store, protocol, error, step);
}

/// Записать текущий порядок списка одним пакетом (после сохранения черновиков).
pub fn persist_order<T>(
    store: RwSignal<OrderedListStore<T>>,
    protocol: RwSignal<ReorderProtocol>,
    error: RwSignal<Option<String>>,
) where
    T: Clone + Send + Sync + 'static,
{
    let mut proto = protocol.get_untracked();
    let step = store.with_untracked(|list| proto.persist_current(list));
    protocol.set(proto);
    send_order(store, protocol, error, step);
}

fn send_order<T>(
    store: RwSignal<OrderedListStore<T>>,
    protocol: RwSignal<ReorderProtocol>,
    error: RwSignal<Option<String>>,
    step: ReorderStep<T>,
) where
    T: Clone + Send + Sync + 'static,
{
    let pending = match step {
        ReorderStep::Done(_) => return,
        ReorderStep::Persist(pending) => pending,
    };
    let path = protocol.with_untracked(|p| p.target().path());
    error.set(None);

    spawn_local(async move {
        let result = HttpReorderApi.put_order(&path, pending.request()).await;

        let mut list = store.get_untracked();
        let mut proto = protocol.get_untracked();
        let outcome = proto.settle(&mut list, pending, result);
        store.set(list);
        protocol.set(proto);

        if let ReorderOutcome::RolledBack(e) = outcome {
            error.set(Some(format!("Порядок не сохранён: {}", e)));
        }
    });
}

/// Список с перетаскиванием строк мышью и кнопками ↑/↓.
///
/// Пока запись порядка не завершилась, строки не перетаскиваются.
#[component]
pub fn ReorderableList<T, R>(
    store: RwSignal<OrderedListStore<T>>,
    protocol: RwSignal<ReorderProtocol>,
    /// Сюда пишется текст ошибки после отката
    error: RwSignal<Option<String>>,
    /// Содержимое строки
    render_item: R,
    /// Запретить перестановку, пока страница пишет что-то своё
    #[prop(optional, into)]
    locked: Option<Signal<bool>>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    R: Fn(T) -> AnyView + Clone + Send + Sync + 'static,
{
    let persisting = move || {
        protocol.with(|p| p.is_persisting()) || locked.map(|l| l.get()).unwrap_or(false)
    };

    let move_by_key = move |from: usize, to: usize| {
        if persisting() {
            return;
        }
        let mut accepted = false;
        protocol.update(|p| accepted = p.keyboard_move(from, to));
        if accepted {
            apply_drop(store, protocol, error);
        }
    };

    let rows = move || {
        let len = store.with(|s| s.len());
        store
            .get()
            .items()
            .iter()
            .enumerate()
            .map(|(pos, item)| {
                let render_item = render_item.clone();
                let is_draft = item.is_draft();
                let ordinal = item.ordinal;
                let value = item.value.clone();
                view! {
                    <div
                        class="ordered-list__row"
                        class:ordered-list__row--draft=is_draft
                        draggable=move || if persisting() { "false" } else { "true" }
                        on:dragstart=move |ev| {
                            if persisting() {
                                ev.prevent_default();
                                return;
                            }
                            let mut started = false;
                            protocol.update(|p| started = p.begin_drag(pos));
                            if !started {
                                ev.prevent_default();
                                return;
                            }
                            if let Some(dt) = ev.data_transfer() {
                                let _ = dt.set_data("text/plain", &pos.to_string());
                            }
                        }
                        on:dragover=move |ev| ev.prevent_default()
                        on:drop=move |ev| {
                            ev.prevent_default();
                            let mut dropped = false;
                            protocol.update(|p| dropped = p.drop_at(pos));
                            if dropped {
                                apply_drop(store, protocol, error);
                            }
                        }
                        on:dragend=move |_| protocol.update(|p| p.cancel_drag())
                    >
                        <span class="ordered-list__handle">"⠿"</span>
                        <span class="ordered-list__ordinal">{ordinal.to_string()}</span>
                        <div class="ordered-list__content">{render_item(value)}</div>
                        <div class="ordered-list__keys">
                            <button
                                title="Выше"
                                disabled=move || pos == 0 || persisting()
                                on:click=move |_| move_by_key(pos, pos.saturating_sub(1))
                            >
                                "↑"
                            </button>
                            <button
                                title="Ниже"
                                disabled=move || pos + 1 >= len || persisting()
                                on:click=move |_| move_by_key(pos, pos + 1)
                            >
                                "↓"
                            </button>
                        </div>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="ordered-list" class:ordered-list--busy=persisting>
            {rows}
        </div>
    }
}
