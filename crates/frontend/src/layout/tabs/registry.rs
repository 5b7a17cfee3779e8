//! Маппинг tab.key → View. Все ключи табов собраны здесь.

use crate::domain::a001_work_order::ui::distribution::WorkOrderDistribution;
use crate::domain::a001_work_order::ui::list::WorkOrderList;
use crate::domain::a002_process_step::ui::list::ProcessStepList;
use crate::domain::a003_quantity_template::ui::details::QuantityTemplateDetails;
use crate::domain::a003_quantity_template::ui::list::QuantityTemplateList;
use crate::layout::global_context::AppGlobalContext;
use leptos::logging::log;
use leptos::prelude::*;

const WORK_ORDER_DISTRIBUTION_PREFIX: &str = "a001_work_order_distribution_";
const QUANTITY_TEMPLATE_DETAIL_PREFIX: &str = "a003_quantity_template_detail_";
const QUANTITY_TEMPLATE_NEW: &str = "a003_quantity_template_new";

/// Контент таба по ключу; `tabs_store` нужен detail-страницам для закрытия своего таба
pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    let key_for_close = key.to_string();
    let on_close = Callback::new(move |_| tabs_store.close_tab(&key_for_close));

    match key {
        "a001_work_order" => view! { <WorkOrderList /> }.into_any(),
        "a002_process_step" => view! { <ProcessStepList /> }.into_any(),
        "a003_quantity_template" => view! { <QuantityTemplateList /> }.into_any(),
        QUANTITY_TEMPLATE_NEW => {
            view! { <QuantityTemplateDetails id=None on_close=on_close /> }.into_any()
        }
        k => {
            if let Some(id) = k.strip_prefix(WORK_ORDER_DISTRIBUTION_PREFIX) {
                let id = id.to_string();
                view! { <WorkOrderDistribution id=id on_close=on_close /> }.into_any()
            } else if let Some(id) = k.strip_prefix(QUANTITY_TEMPLATE_DETAIL_PREFIX) {
                let id = Some(id.to_string());
                view! { <QuantityTemplateDetails id=id on_close=on_close /> }.into_any()
            } else {
                log!("⚠️ Unknown tab type: {}", key);
                view! { <div class="placeholder">{"Not implemented yet"}</div> }.into_any()
            }
        }
    }
}
