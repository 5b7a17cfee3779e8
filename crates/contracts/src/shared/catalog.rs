use serde::{Deserialize, Serialize};

/// Элемент справочника для выбора (цвет, размер)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemDto {
    pub id: String,
    pub code: String,
    pub description: String,
}
