use super::constrained::{AllocationMatrix, AllocationStatus};
use super::free_entry::{FreeEntryMatrix, NEW_COLUMN_LABEL, NEW_ROW_LABEL};
use super::model::{Axis, AxisKey};
use contracts::shared::catalog::CatalogItemDto;
use leptos::prelude::*;
use thaw::*;

fn status_class(status: AllocationStatus) -> &'static str {
    match status {
        AllocationStatus::Unassigned => "allocation__row allocation__row--empty",
        AllocationStatus::Partial => "allocation__row allocation__row--partial",
        AllocationStatus::Complete => "allocation__row allocation__row--complete",
        AllocationStatus::Exceeded => "allocation__row allocation__row--exceeded",
    }
}

/// Редактор матрицы "с нуля": строки и колонки добавляет оператор
#[component]
pub fn FreeEntryMatrixEditor(matrix: RwSignal<FreeEntryMatrix>) -> impl IntoView {
    let header = move || {
        let count = matrix.with(|m| m.column_count());
        (0..count)
            .map(|col| {
                let label = matrix.with(|m| m.column_label(col).unwrap_or_default().to_string());
                view! {
                    <th class="quantity-matrix__head">
                        <input
                            class="quantity-matrix__label"
                            prop:value=label
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                matrix.update(|m| {
                                    m.rename_column(col, value);
                                });
                            }
                        />
                        <button
                            class="quantity-matrix__remove"
                            title="Удалить колонку"
                            on:click=move |_| {
                                matrix.update(|m| {
                                    m.remove_column(col);
                                })
                            }
                        >
                            "✕"
                        </button>
                    </th>
                }
            })
            .collect_view()
    };

    let body = move || {
        let (rows, cols) = matrix.with(|m| (m.row_count(), m.column_count()));
        (0..rows)
            .map(|row| {
                let label = matrix.with(|m| m.row_label(row).unwrap_or_default().to_string());
                let total = matrix.with(|m| m.row_total(row));
                let cells = (0..cols)
                    .map(|col| {
                        let value = matrix.with(|m| m.cell(row, col));
                        view! {
                            <td class="quantity-matrix__cell">
                                <input
                                    type="number"
                                    min="0"
                                    class="quantity-matrix__input"
                                    prop:value=value.to_string()
                                    on:change=move |ev| {
                                        let raw = event_target_value(&ev);
                                        matrix.update(|m| {
                                            m.edit_cell(row, col, &raw);
                                        });
                                    }
                                />
                            </td>
                        }
                    })
                    .collect_view();

                view! {
                    <tr>
                        <th class="quantity-matrix__row-head">
                            <input
                                class="quantity-matrix__label"
                                prop:value=label
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    matrix.update(|m| {
                                        m.rename_row(row, value);
                                    });
                                }
                            />
                            <button
                                class="quantity-matrix__remove"
                                title="Удалить строку"
                                on:click=move |_| {
                                    matrix.update(|m| {
                                        m.remove_row(row);
                                    })
                                }
                            >
                                "✕"
                            </button>
                        </th>
                        {cells}
                        <td class="quantity-matrix__total">{total.to_string()}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    let footer = move || {
        let cols = matrix.with(|m| m.column_count());
        let totals = (0..cols)
            .map(|col| {
                let total = matrix.with(|m| m.column_total(col));
                view! { <td class="quantity-matrix__total">{total.to_string()}</td> }
            })
            .collect_view();
        let grand = matrix.with(|m| m.grand_total());
        view! {
            <tr>
                <th>"Итого"</th>
                {totals}
                <td class="quantity-matrix__grand-total">{grand.to_string()}</td>
            </tr>
        }
    };

    view! {
        <div class="quantity-matrix">
            <table class="quantity-matrix__table">
                <thead>
                    <tr>
                        <th></th>
                        {header}
                        <th>"Итого"</th>
                    </tr>
                </thead>
                <tbody>{body}</tbody>
                <tfoot>{footer}</tfoot>
            </table>

            <Flex gap=FlexGap::Small>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        matrix.update(|m| {
                            m.add_row(NEW_ROW_LABEL);
                        })
                    }
                >
                    "+ Строка"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| {
                        matrix.update(|m| {
                            m.add_column(NEW_COLUMN_LABEL);
                        })
                    }
                >
                    "+ Колонка"
                </Button>
            </Flex>
        </div>
    }
}

/// Редактор распределения итогов строк по выбранным колонкам.
///
/// Отклонённая запись не меняет матрицу; текст ошибки попадает в `error`.
#[component]
pub fn AllocationMatrixEditor(
    matrix: RwSignal<AllocationMatrix>,
    #[prop(into)] catalog: Signal<Vec<CatalogItemDto>>,
    error: RwSignal<Option<String>>,
) -> impl IntoView {
    let chooser = move || {
        catalog
            .get()
            .into_iter()
            .map(|item| {
                let key = AxisKey::new(item.id.clone());
                let key_for_check = key.clone();
                let label = item.description.clone();
                let is_checked = move || matrix.with(|m| m.is_active(&key_for_check));
                view! {
                    <label class="allocation__column-option">
                        <input
                            type="checkbox"
                            prop:checked=is_checked
                            on:change=move |_| {
                                let key = key.clone();
                                let label = label.clone();
                                matrix.update(|m| {
                                    m.toggle_column(key, label);
                                });
                                error.set(None);
                            }
                        />
                        {item.description}
                    </label>
                }
            })
            .collect_view()
    };

    let header = move || {
        matrix.with(|m| {
            m.active_columns()
                .iter()
                .map(|c| view! { <th class="quantity-matrix__head">{c.label.clone()}</th> })
                .collect_view()
        })
    };

    let body = move || {
        let (rows, columns) = matrix.with(|m| {
            (
                m.rows().iter().cloned().collect::<Vec<Axis>>(),
                m.active_columns().iter().cloned().collect::<Vec<Axis>>(),
            )
        });

        rows.into_iter()
            .map(|row| {
                let cells = columns
                    .iter()
                    .map(|column| {
                        let row_key = row.key.clone();
                        let column_key = column.key.clone();
                        let value = matrix.with(|m| m.cell(&row_key, &column_key));
                        view! {
                            <td class="quantity-matrix__cell">
                                <input
                                    type="number"
                                    min="0"
                                    class="quantity-matrix__input"
                                    prop:value=value.to_string()
                                    on:change=move |ev| {
                                        let raw = event_target_value(&ev);
                                        let mut next = matrix.get_untracked();
                                        match next.edit_cell(&row_key, &column_key, &raw) {
                                            Ok(_) => {
                                                matrix.set(next);
                                                error.set(None);
                                            }
                                            Err(e) => {
                                                event_target::<web_sys::HtmlInputElement>(&ev)
                                                    .set_value(&value.to_string());
                                                error.set(Some(e.to_string()));
                                            }
                                        }
                                    }
                                />
                            </td>
                        }
                    })
                    .collect_view();

                let (status, assigned, target) = matrix.with(|m| {
                    (
                        m.status(&row.key),
                        m.assigned_total(&row.key),
                        m.target(&row.key),
                    )
                });

                view! {
                    <tr class=status_class(status)>
                        <th class="quantity-matrix__row-head">{row.label.clone()}</th>
                        {cells}
                        <td class="allocation__progress">
                            {format!("{} / {}", assigned, target)}
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let summary = move || {
        let (assigned, target) = matrix.with(|m| (m.grand_assigned(), m.grand_target()));
        let class = if assigned == target {
            "allocation__summary allocation__summary--complete"
        } else {
            "allocation__summary"
        };
        view! { <div class=class>{format!("Распределено {} из {}", assigned, target)}</div> }
    };

    view! {
        <div class="allocation">
            <div class="allocation__columns">{chooser}</div>

            <Show
                when=move || matrix.with(|m| !m.active_columns().is_empty())
                fallback=|| view! { <div class="allocation__hint">"Выберите хотя бы один цвет"</div> }
            >
                <table class="quantity-matrix__table">
                    <thead>
                        <tr>
                            <th>"Размер"</th>
                            {header}
                            <th>"Назначено / план"</th>
                        </tr>
                    </thead>
                    <tbody>{body}</tbody>
                </table>
            </Show>

            {summary}
        </div>
    }
}
