use crate::shared::api_utils::{get_json, put_json, ApiError};
use crate::shared::quantity_matrix::{AllocationMatrix, AllocationRow, AxisKey, DistributionSink};
use async_trait::async_trait;
use contracts::domain::a001_work_order::WorkOrder;
use contracts::domain::common::AggregateRoot;
use contracts::shared::catalog::CatalogItemDto;
use contracts::shared::quantity_matrix::RowAllocationDto;

pub async fn fetch_by_id(id: &str) -> Result<WorkOrder, String> {
    get_json(&format!("{}/{}", WorkOrder::resource_path(), id))
        .await
        .map_err(|e| e.to_string())
}

/// Справочник цветов: колонки матрицы распределения
pub async fn fetch_colors() -> Result<Vec<CatalogItemDto>, String> {
    get_json("/api/color/list").await.map_err(|e| e.to_string())
}

/// Строки распределения: размеры документа с их итогами
pub fn allocation_rows(order: &WorkOrder) -> Vec<AllocationRow> {
    order
        .size_lines
        .iter()
        .map(|line| AllocationRow {
            key: AxisKey::new(line.size_ref.clone()),
            label: line.size_label.clone(),
            target: line.quantity,
        })
        .collect()
}

pub fn open_editor(order: &WorkOrder, colors: &[CatalogItemDto]) -> AllocationMatrix {
    let catalog: Vec<(AxisKey, String)> = colors
        .iter()
        .map(|c| (AxisKey::new(c.id.clone()), c.description.clone()))
        .collect();
    AllocationMatrix::from_persisted(allocation_rows(order), &catalog, &order.distribution())
}

fn with_distribution(order: &WorkOrder, rows: &[RowAllocationDto]) -> WorkOrder {
    let mut updated = order.clone();
    updated.replace_distribution(rows);
    updated
}

/// Сохраняет разбивку, перезаписывая документ целиком через `PUT /api/work_order/{id}`
pub struct WorkOrderDistributionSink {
    order: WorkOrder,
}

impl WorkOrderDistributionSink {
    pub fn new(order: WorkOrder) -> Self {
        Self { order }
    }
}

#[async_trait(?Send)]
impl DistributionSink for WorkOrderDistributionSink {
    async fn replace_distribution(&self, rows: Vec<RowAllocationDto>) -> Result<(), ApiError> {
        let updated = with_distribution(&self.order, &rows);
        let path = format!("{}/{}", WorkOrder::resource_path(), updated.to_string_id());
        put_json(&path, &updated).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::quantity_matrix::AllocationStatus;
    use contracts::domain::a001_work_order::{ColorQuantity, SizeLine, WorkOrderId};
    use contracts::shared::quantity_matrix::ColumnQuantityDto;

    fn order() -> WorkOrder {
        let mut order = WorkOrder::new(
            WorkOrderId::new_v4(),
            "OT-7".into(),
            "Платье летнее".into(),
            "DR-7".into(),
        );
        order.size_lines = vec![
            SizeLine {
                size_ref: "size-m".into(),
                size_label: "M".into(),
                quantity: 10,
                colors: vec![ColorQuantity {
                    color_ref: "blue".into(),
                    quantity: 4,
                }],
            },
            SizeLine {
                size_ref: "size-l".into(),
                size_label: "L".into(),
                quantity: 5,
                colors: vec![],
            },
        ];
        order
    }

    fn colors() -> Vec<CatalogItemDto> {
        vec![
            CatalogItemDto {
                id: "blue".into(),
                code: "001".into(),
                description: "Синий".into(),
            },
            CatalogItemDto {
                id: "green".into(),
                code: "002".into(),
                description: "Зелёный".into(),
            },
        ]
    }

    #[test]
    fn test_allocation_rows_follow_size_lines() {
        let rows = allocation_rows(&order());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, AxisKey::from("size-m"));
        assert_eq!(rows[0].label, "M");
        assert_eq!(rows[0].target, 10);
        assert_eq!(rows[1].target, 5);
    }

    #[test]
    fn test_open_editor_seeds_saved_colors() {
        let editor = open_editor(&order(), &colors());
        let m = AxisKey::from("size-m");
        let l = AxisKey::from("size-l");

        assert!(editor.is_active(&AxisKey::from("blue")));
        assert!(!editor.is_active(&AxisKey::from("green")));
        assert_eq!(editor.active_columns().label_of(&AxisKey::from("blue")), Some("Синий"));
        assert_eq!(editor.cell(&m, &AxisKey::from("blue")), 4);
        assert_eq!(editor.status(&m), AllocationStatus::Partial);
        assert_eq!(editor.status(&l), AllocationStatus::Unassigned);
    }

    #[test]
    fn test_saved_payload_replaces_whole_breakdown() {
        let source = order();
        let updated = with_distribution(
            &source,
            &[RowAllocationDto {
                row_ref: "size-l".into(),
                columns: vec![ColumnQuantityDto {
                    column_ref: "green".into(),
                    quantity: 5,
                }],
            }],
        );

        assert!(updated.size_lines[0].colors.is_empty());
        assert_eq!(updated.size_lines[1].colors.len(), 1);
        // исходный документ не меняется
        assert_eq!(source.size_lines[0].colors.len(), 1);
    }
}
