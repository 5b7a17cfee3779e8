use serde::{Deserialize, Serialize};

/// Позиция элемента в запросе на переупорядочивание
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: String,
    /// Порядковый номер, начиная с 1
    pub orden: u32,
}

/// Тело `PUT /reorder/{list_key}`: новые порядковые номера всех сохранённых элементов
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

impl ReorderRequest {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let request = ReorderRequest {
            items: vec![
                ReorderItem {
                    id: "c".into(),
                    orden: 1,
                },
                ReorderItem {
                    id: "a".into(),
                    orden: 2,
                },
            ],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "items": [{ "id": "c", "orden": 1 }, { "id": "a", "orden": 2 }] })
        );
    }
}
