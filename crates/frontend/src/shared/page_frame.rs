//! PageFrame: корневая обёртка каждой страницы внутри таба.
//!
//! На корневом элементе всегда есть `id` вида `"{entity}--{category}"`
//! (например `"a002_process_step--list"`) и атрибут `data-page-category`.

use leptos::prelude::*;

pub const PAGE_CAT_LIST: &str = "list";
pub const PAGE_CAT_DETAIL: &str = "detail";

#[component]
pub fn PageFrame(
    /// HTML id в формате `{entity}--{category}`
    page_id: &'static str,
    /// PAGE_CAT_LIST или PAGE_CAT_DETAIL
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}
