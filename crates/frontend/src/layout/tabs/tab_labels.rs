//! Заголовки табов берутся из метаданных агрегатов в contracts

use contracts::domain::a001_work_order::WorkOrder;
use contracts::domain::a002_process_step::ProcessStep;
use contracts::domain::a003_quantity_template::QuantityTemplate;
use contracts::domain::common::AggregateRoot;

/// Заголовок таба списка по ключу. Для неизвестного ключа пустая строка.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "a001_work_order" => WorkOrder::list_name(),
        "a002_process_step" => ProcessStep::list_name(),
        "a003_quantity_template" => QuantityTemplate::list_name(),
        _ => "",
    }
}

/// Заголовок detail-таба: «<entity> · <identifier>»
pub fn detail_tab_label(entity_label: &str, identifier: &str) -> String {
    format!("{} · {}", entity_label, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a002_process_step"), "Этапы производства");
        assert_eq!(tab_label_for_key("zzz"), "");
        assert_eq!(detail_tab_label("Заказ-наряд", "OT-7"), "Заказ-наряд · OT-7");
    }
}
