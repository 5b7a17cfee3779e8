use crate::shared::api_utils::{get_json, post_json};
use crate::shared::ordered_list::{OrderedListStore, ReorderTarget};
use contracts::domain::a002_process_step::{ProcessStep, ProcessStepDto};
use contracts::domain::common::AggregateRoot;

pub fn reorder_target() -> ReorderTarget {
    ReorderTarget::ListKey(ProcessStep::collection_name().to_string())
}

pub async fn fetch_list() -> Result<Vec<ProcessStepDto>, String> {
    get_json(&format!("{}/list", ProcessStep::resource_path()))
        .await
        .map_err(|e| e.to_string())
}

/// Создать этап; сервер возвращает запись с присвоенным id
pub async fn create(dto: &ProcessStepDto) -> Result<ProcessStepDto, String> {
    post_json(&ProcessStep::resource_path(), dto)
        .await
        .map_err(|e| e.to_string())
}

/// Список в порядке `orden`, как его хранит сервер
pub fn build_store(mut items: Vec<ProcessStepDto>) -> OrderedListStore<ProcessStepDto> {
    items.sort_by_key(|s| s.orden);
    OrderedListStore::new(items.into_iter().map(|s| (s.id.clone(), s)))
}

pub fn new_draft(description: &str) -> ProcessStepDto {
    ProcessStepDto {
        id: None,
        code: String::new(),
        description: description.trim().to_string(),
        orden: 0,
    }
}

/// Черновики к созданию с локальными ключами. Номера идут после уже
/// сохранённых этапов, чтобы не пересекаться с ними до записи порядка.
pub fn drafts_to_create(store: &OrderedListStore<ProcessStepDto>) -> Vec<(u64, ProcessStepDto)> {
    let saved = store.items().iter().filter(|i| !i.is_draft()).count() as u32;
    store
        .items()
        .iter()
        .filter(|item| item.is_draft())
        .zip(saved + 1..)
        .map(|(item, orden)| {
            let mut dto = item.value.clone();
            dto.orden = orden;
            (item.local_key(), dto)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(id: &str, description: &str, orden: u32) -> ProcessStepDto {
        ProcessStepDto {
            id: Some(id.to_string()),
            code: String::new(),
            description: description.to_string(),
            orden,
        }
    }

    #[test]
    fn test_store_follows_server_order() {
        let store = build_store(vec![
            step("b", "Пошив", 2),
            step("c", "Упаковка", 3),
            step("a", "Раскрой", 1),
        ]);
        let ids: Vec<_> = store.ids().into_iter().flatten().collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.items()[2].ordinal, 3);
    }

    #[test]
    fn test_draft_is_not_in_reorder_request() {
        let mut store = build_store(vec![step("a", "Раскрой", 1), step("b", "Пошив", 2)]);
        store.push_draft(new_draft("  ОТК "));
        assert_eq!(store.items()[2].value.description, "ОТК");
        assert!(store.items()[2].is_draft());
        assert_eq!(store.reorder_request().len(), 2);
    }

    #[test]
    fn test_created_draft_found_after_move() {
        let mut store = build_store(vec![step("a", "Раскрой", 1)]);
        let key = store.push_draft(new_draft("ОТК"));
        store.move_item(1, 0);

        let pos = store.position_of_local(key);
        assert_eq!(pos, Some(0));
        assert!(store.mark_persisted(0, "d".to_string()));
        assert_eq!(store.reorder_request().len(), 2);
    }

    #[test]
    fn test_same_description_drafts_keep_own_ids() {
        let mut store = build_store(vec![step("a", "Раскрой", 1)]);
        let first = store.push_draft(new_draft("ОТК"));
        let second = store.push_draft(new_draft("ОТК"));
        store.move_item(2, 0);

        let pos = store.position_of_local(second).unwrap();
        assert!(store.mark_persisted(pos, "second".into()));
        let pos = store.position_of_local(first).unwrap();
        assert!(store.mark_persisted(pos, "first".into()));
        let ids: Vec<_> = store.ids().into_iter().flatten().collect();
        assert_eq!(ids, vec!["second", "a", "first"]);
    }

    #[test]
    fn test_draft_ordens_follow_saved_items() {
        let mut store = build_store(vec![step("a", "Раскрой", 1), step("b", "Пошив", 2)]);
        let key = store.push_draft(new_draft("ОТК"));
        store.move_item(2, 0);

        let drafts = drafts_to_create(&store);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].0, key);
        // на сервере пока 1 и 2, новый этап не должен получить занятый номер
        assert_eq!(drafts[0].1.orden, 3);

        let pos = store.position_of_local(key).unwrap();
        assert!(store.mark_persisted(pos, "d".into()));
        let request = store.reorder_request();
        let sent: Vec<_> = request.items.iter().map(|i| (i.id.as_str(), i.orden)).collect();
        assert_eq!(sent, vec![("d", 1), ("a", 2), ("b", 3)]);
    }

    #[test]
    fn test_reorder_path() {
        assert_eq!(reorder_target().path(), "/api/reorder/process_step");
    }
}
