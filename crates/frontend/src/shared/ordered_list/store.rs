//! Упорядоченный список сущностей со стабильными идентификаторами

use contracts::shared::reorder::{ReorderItem, ReorderRequest};
use std::collections::HashMap;

/// Элемент списка. `id == None` означает черновик, ещё не созданный на сервере.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedItem<T> {
    pub id: Option<String>,
    /// Позиция в списке, начиная с 1
    pub ordinal: u32,
    pub value: T,
    /// Локальный ключ, не меняется при перемещениях и откатах
    local_key: u64,
}

impl<T> OrderedItem<T> {
    pub fn is_draft(&self) -> bool {
        self.id.is_none()
    }

    pub fn local_key(&self) -> u64 {
        self.local_key
    }
}

#[derive(Debug, Clone)]
pub struct OrderedListStore<T> {
    items: Vec<OrderedItem<T>>,
    next_local_key: u64,
}

impl<T> Default for OrderedListStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_local_key: 0,
        }
    }
}

// счётчик ключей в сравнение не входит
impl<T: PartialEq> PartialEq for OrderedListStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Clone> OrderedListStore<T> {
    /// Построить список в переданном порядке; порядковые номера назначаются заново.
    pub fn new(entries: impl IntoIterator<Item = (Option<String>, T)>) -> Self {
        let items: Vec<OrderedItem<T>> = entries
            .into_iter()
            .zip(0u64..)
            .map(|((id, value), local_key)| OrderedItem {
                id,
                ordinal: 0,
                value,
                local_key,
            })
            .collect();
        let mut store = Self {
            next_local_key: items.len() as u64,
            items,
        };
        store.renumber();
        store
    }

    pub fn items(&self) -> &[OrderedItem<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> Vec<Option<String>> {
        self.items.iter().map(|i| i.id.clone()).collect()
    }

    /// Добавить черновик в конец списка. Возвращает его локальный ключ.
    pub fn push_draft(&mut self, value: T) -> u64 {
        let local_key = self.next_local_key;
        self.next_local_key += 1;
        self.items.push(OrderedItem {
            id: None,
            ordinal: 0,
            value,
            local_key,
        });
        self.renumber();
        local_key
    }

    pub fn position_of_local(&self, local_key: u64) -> Option<usize> {
        self.items.iter().position(|i| i.local_key == local_key)
    }

    /// Присвоить черновику серверный id после создания
    pub fn mark_persisted(&mut self, position: usize, id: String) -> bool {
        match self.items.get_mut(position) {
            Some(item) if item.id.is_none() => {
                item.id = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Переместить элемент `from` на позицию `to` (обе 0-based).
    ///
    /// Возвращает `false`, если позиции совпадают или выходят за пределы.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.items.len() || to >= self.items.len() {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        self.renumber();
        true
    }

    pub fn snapshot(&self) -> Vec<OrderedItem<T>> {
        self.items.clone()
    }

    /// Вернуть список к снимку. Черновики, получившие серверный id уже
    /// после снимка, остаются сохранёнными.
    pub fn restore(&mut self, snapshot: Vec<OrderedItem<T>>) {
        let assigned: HashMap<u64, String> = self
            .items
            .iter()
            .filter_map(|i| Some((i.local_key, i.id.clone()?)))
            .collect();
        self.items = snapshot;
        for item in self.items.iter_mut().filter(|i| i.id.is_none()) {
            if let Some(id) = assigned.get(&item.local_key) {
                item.id = Some(id.clone());
            }
        }
    }

    /// Тело запроса: только сохранённые элементы, пронумерованные 1..N
    /// в текущем порядке.
    pub fn reorder_request(&self) -> ReorderRequest {
        ReorderRequest {
            items: self
                .items
                .iter()
                .filter_map(|i| i.id.clone())
                .zip(1u32..)
                .map(|(id, orden)| ReorderItem { id, orden })
                .collect(),
        }
    }

    fn renumber(&mut self) {
        for (item, ordinal) in self.items.iter_mut().zip(1u32..) {
            item.ordinal = ordinal;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> OrderedListStore<&'static str> {
        OrderedListStore::new([
            (Some("A".to_string()), "a"),
            (Some("B".to_string()), "b"),
            (Some("C".to_string()), "c"),
        ])
    }

    #[test]
    fn test_ordinals_follow_positions() {
        let mut store = abc();
        assert!(store.move_item(2, 0));
        let values: Vec<_> = store.items().iter().map(|i| i.value).collect();
        let ordinals: Vec<_> = store.items().iter().map(|i| i.ordinal).collect();
        assert_eq!(values, vec!["c", "a", "b"]);
        assert_eq!(ordinals, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_on_self_or_out_of_range() {
        let mut store = abc();
        assert!(!store.move_item(1, 1));
        assert!(!store.move_item(0, 3));
        assert_eq!(store, abc());
    }

    #[test]
    fn test_request_skips_drafts() {
        let mut store = OrderedListStore::new([
            (Some("A".to_string()), 1),
            (None, 2),
            (Some("B".to_string()), 3),
        ]);
        store.move_item(2, 0);
        let request = store.reorder_request();
        assert_eq!(
            request.items,
            vec![
                ReorderItem {
                    id: "B".into(),
                    orden: 1
                },
                ReorderItem {
                    id: "A".into(),
                    orden: 2
                },
            ]
        );
    }

    #[test]
    fn test_draft_lifecycle() {
        let mut store = abc();
        store.push_draft("d");
        assert!(store.items()[3].is_draft());
        assert_eq!(store.items()[3].ordinal, 4);
        assert!(store.mark_persisted(3, "D".into()));
        assert!(!store.mark_persisted(3, "E".into()));
        assert_eq!(store.reorder_request().len(), 4);
    }

    #[test]
    fn test_restore_keeps_ids_assigned_after_snapshot() {
        let mut store = abc();
        let key = store.push_draft("d");
        let snapshot = store.snapshot();

        store.move_item(3, 0);
        let pos = store.position_of_local(key).unwrap();
        assert_eq!(pos, 0);
        assert!(store.mark_persisted(pos, "D".into()));

        store.restore(snapshot);
        assert_eq!(
            store.ids(),
            vec![
                Some("A".to_string()),
                Some("B".to_string()),
                Some("C".to_string()),
                Some("D".to_string())
            ]
        );
        assert_eq!(store.position_of_local(key), Some(3));
    }

    #[test]
    fn test_local_keys_are_not_reused_after_restore() {
        let mut store = abc();
        let snapshot = store.snapshot();
        let first = store.push_draft("d");
        store.restore(snapshot);
        let second = store.push_draft("e");
        assert_ne!(first, second);
        assert_eq!(store.position_of_local(first), None);
    }
}
