use crate::domain::common::{AggregateRoot, BaseAggregate, EntityMetadata};
use crate::shared::quantity_matrix::{ColumnQuantityDto, RowAllocationDto};
use crate::uuid_aggregate_id;
use serde::{Deserialize, Serialize};

uuid_aggregate_id!(
    /// ID типа для документа Заказ-наряд
    WorkOrderId
);

/// Количество изделий одного цвета внутри строки размера
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorQuantity {
    /// UUID цвета из справочника
    pub color_ref: String,
    pub quantity: u32,
}

/// Строка размера заказ-наряда
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLine {
    /// UUID размера из справочника
    pub size_ref: String,
    /// Наименование размера ("S", "M", "46")
    pub size_label: String,
    /// Итог по размеру, зафиксированный при создании документа
    pub quantity: u32,
    /// Разбивка итога по цветам
    #[serde(default)]
    pub colors: Vec<ColorQuantity>,
}

/// Документ Заказ-наряд (агрегат a001)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<WorkOrderId>,

    /// Артикул модели
    pub article: String,

    /// Строки по размерам
    #[serde(default)]
    pub size_lines: Vec<SizeLine>,
}

impl WorkOrder {
    pub fn new(id: WorkOrderId, code: String, description: String, article: String) -> Self {
        Self {
            base: BaseAggregate::new(id, code, description),
            article,
            size_lines: Vec::new(),
        }
    }

    pub fn to_string_id(&self) -> String {
        use crate::domain::common::AggregateId;
        self.base.id.as_string()
    }

    /// Итог по всем размерам
    pub fn total_quantity(&self) -> u64 {
        self.size_lines.iter().map(|l| l.quantity as u64).sum()
    }

    /// Текущая разбивка размеров по цветам в wire-формате
    pub fn distribution(&self) -> Vec<RowAllocationDto> {
        self.size_lines
            .iter()
            .map(|line| RowAllocationDto {
                row_ref: line.size_ref.clone(),
                columns: line
                    .colors
                    .iter()
                    .map(|c| ColumnQuantityDto {
                        column_ref: c.color_ref.clone(),
                        quantity: c.quantity,
                    })
                    .collect(),
            })
            .collect()
    }

    /// Полностью заменить разбивку по цветам.
    ///
    /// Размеры, отсутствующие в `rows`, остаются без цветов.
    pub fn replace_distribution(&mut self, rows: &[RowAllocationDto]) {
        for line in &mut self.size_lines {
            line.colors = rows
                .iter()
                .find(|r| r.row_ref == line.size_ref)
                .map(|r| {
                    r.columns
                        .iter()
                        .filter(|c| c.quantity > 0)
                        .map(|c| ColorQuantity {
                            color_ref: c.column_ref.clone(),
                            quantity: c.quantity,
                        })
                        .collect()
                })
                .unwrap_or_default();
        }
        self.base.touch();
    }
}

impl AggregateRoot for WorkOrder {
    type Id = WorkOrderId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "work_order"
    }

    fn element_name() -> &'static str {
        "Заказ-наряд"
    }

    fn list_name() -> &'static str {
        "Заказ-наряды"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkOrder {
        let mut order = WorkOrder::new(
            WorkOrderId::new_v4(),
            "OT-001".into(),
            "Футболка базовая".into(),
            "TS-100".into(),
        );
        order.size_lines = vec![
            SizeLine {
                size_ref: "s".into(),
                size_label: "S".into(),
                quantity: 6,
                colors: vec![ColorQuantity {
                    color_ref: "red".into(),
                    quantity: 6,
                }],
            },
            SizeLine {
                size_ref: "m".into(),
                size_label: "M".into(),
                quantity: 10,
                colors: vec![],
            },
        ];
        order
    }

    #[test]
    fn test_replace_distribution_is_wholesale() {
        let mut order = sample();
        order.replace_distribution(&[RowAllocationDto {
            row_ref: "m".into(),
            columns: vec![
                ColumnQuantityDto {
                    column_ref: "blue".into(),
                    quantity: 7,
                },
                ColumnQuantityDto {
                    column_ref: "green".into(),
                    quantity: 0,
                },
            ],
        }]);

        assert!(order.size_lines[0].colors.is_empty());
        assert_eq!(
            order.size_lines[1].colors,
            vec![ColorQuantity {
                color_ref: "blue".into(),
                quantity: 7
            }]
        );
    }

    #[test]
    fn test_serialized_payload_is_flat() {
        let order = sample();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["code"], "OT-001");
        assert_eq!(json["size_lines"][0]["colors"][0]["quantity"], 6);
        assert_eq!(order.total_quantity(), 16);
        assert_eq!(WorkOrder::resource_path(), "/api/work_order");
    }
}
