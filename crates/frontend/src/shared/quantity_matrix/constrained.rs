//! Распределение зафиксированных итогов строк по выбранным колонкам.
//!
//! Каждая строка (размер) имеет план `target`, заданный документом-владельцем.
//! Сумма по строке никогда не превышает план: запись, которая нарушила бы
//! это, отклоняется до применения.

use super::model::{parse_quantity, AxisKey, AxisSet, QuantityMatrix};
use crate::shared::api_utils::ApiError;
use async_trait::async_trait;
use contracts::shared::quantity_matrix::{ColumnQuantityDto, RowAllocationDto};
use std::collections::HashMap;
use thiserror::Error;

/// Строка с планом, передаваемая при открытии редактора
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRow {
    pub key: AxisKey,
    pub label: String,
    pub target: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("Размер «{row_label}»: итого {attempted} превышает план {target}")]
    ExceedsTarget {
        row_label: String,
        attempted: u64,
        target: u32,
    },
    #[error("Строка {0} отсутствует в распределении")]
    UnknownRow(AxisKey),
    #[error("Колонка {0} не выбрана")]
    UnknownColumn(AxisKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    Unassigned,
    Partial,
    Complete,
    /// Только для данных, загруженных с сервера в таком виде
    Exceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnToggle {
    Added { auto_assigned: bool },
    Removed,
}

/// Получатель сериализованного распределения. Заменяет сохранённую
/// разбивку владельца целиком.
#[async_trait(?Send)]
pub trait DistributionSink {
    async fn replace_distribution(&self, rows: Vec<RowAllocationDto>) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationMatrix {
    matrix: QuantityMatrix,
    targets: HashMap<AxisKey, u32>,
}

impl AllocationMatrix {
    pub fn new(rows: impl IntoIterator<Item = AllocationRow>) -> Self {
        let mut matrix = QuantityMatrix::new();
        let mut targets = HashMap::new();
        for row in rows {
            matrix.push_row(row.key.clone(), row.label);
            targets.insert(row.key, row.target);
        }
        Self { matrix, targets }
    }

    /// Открыть редактор с уже сохранённой разбивкой.
    ///
    /// Активными становятся колонки, у которых есть ненулевое количество;
    /// подписи берутся из `catalog`, для неизвестных колонок используется ключ.
    pub fn from_persisted(
        rows: impl IntoIterator<Item = AllocationRow>,
        catalog: &[(AxisKey, String)],
        distribution: &[RowAllocationDto],
    ) -> Self {
        let mut this = Self::new(rows);

        for row in distribution {
            let row_key = AxisKey::new(row.row_ref.clone());
            if !this.matrix.rows().contains(&row_key) {
                log::warn!("allocation: persisted row {} is not on the document", row_key);
                continue;
            }
            for column in row.columns.iter().filter(|c| c.quantity > 0) {
                let column_key = AxisKey::new(column.column_ref.clone());
                if !this.matrix.columns().contains(&column_key) {
                    let label = catalog
                        .iter()
                        .find(|(k, _)| *k == column_key)
                        .map(|(_, l)| l.clone())
                        .unwrap_or_else(|| column_key.to_string());
                    this.matrix.push_column(column_key.clone(), label);
                }
                this.matrix = this.matrix.set_cell(&row_key, &column_key, column.quantity);
            }
            if this.status(&row_key) == AllocationStatus::Exceeded {
                log::warn!(
                    "allocation: persisted row {} exceeds its target ({} > {})",
                    row_key,
                    this.assigned_total(&row_key),
                    this.target(&row_key)
                );
            }
        }
        this
    }

    pub fn matrix(&self) -> &QuantityMatrix {
        &self.matrix
    }

    pub fn rows(&self) -> &AxisSet {
        self.matrix.rows()
    }

    pub fn active_columns(&self) -> &AxisSet {
        self.matrix.columns()
    }

    pub fn is_active(&self, column: &AxisKey) -> bool {
        self.matrix.columns().contains(column)
    }

    pub fn cell(&self, row: &AxisKey, column: &AxisKey) -> u32 {
        self.matrix.cell(row, column)
    }

    /// Добавить колонку в набор или убрать её.
    ///
    /// Первая выбранная колонка забирает весь план каждой строки. Ячейки
    /// убранной колонки удаляются; освободившееся количество остаётся
    /// нераспределённым.
    pub fn toggle_column(&mut self, key: AxisKey, label: impl Into<String>) -> ColumnToggle {
        if let Some(position) = self.matrix.columns().position_of(&key) {
            self.matrix.remove_column_at(position);
            log::debug!("allocation: column {} removed", key);
            return ColumnToggle::Removed;
        }

        let is_first = self.matrix.columns().is_empty();
        self.matrix.push_column(key.clone(), label.into());

        let has_targets = self.targets.values().any(|t| *t > 0);
        if !(is_first && has_targets) {
            return ColumnToggle::Added {
                auto_assigned: false,
            };
        }

        let rows: Vec<AxisKey> = self.matrix.rows().keys().cloned().collect();
        for row in rows {
            let target = self.target(&row);
            self.matrix = self.matrix.set_cell(&row, &key, target);
        }
        log::debug!("allocation: column {} absorbed all row targets", key);
        ColumnToggle::Added {
            auto_assigned: true,
        }
    }

    /// Записать количество в ячейку с проверкой плана строки.
    ///
    /// При отказе матрица не меняется.
    pub fn edit_cell(
        &mut self,
        row: &AxisKey,
        column: &AxisKey,
        raw_value: &str,
    ) -> Result<u32, AllocationError> {
        if !self.matrix.rows().contains(row) {
            return Err(AllocationError::UnknownRow(row.clone()));
        }
        if !self.is_active(column) {
            return Err(AllocationError::UnknownColumn(column.clone()));
        }

        let value = parse_quantity(raw_value);
        let other_columns = self.assigned_total(row) - self.matrix.cell(row, column) as u64;
        let attempted = value as u64 + other_columns;
        let target = self.target(row);
        if attempted > target as u64 {
            let err = AllocationError::ExceedsTarget {
                row_label: self.matrix.rows().label_of(row).unwrap_or_default().to_string(),
                attempted,
                target,
            };
            log::debug!("allocation: edit rejected: {}", err);
            return Err(err);
        }

        self.matrix = self.matrix.set_cell(row, column, value);
        Ok(value)
    }

    pub fn target(&self, row: &AxisKey) -> u32 {
        self.targets.get(row).copied().unwrap_or(0)
    }

    pub fn assigned_total(&self, row: &AxisKey) -> u64 {
        self.matrix.row_total(row)
    }

    pub fn remaining(&self, row: &AxisKey) -> u64 {
        (self.target(row) as u64).saturating_sub(self.assigned_total(row))
    }

    pub fn status(&self, row: &AxisKey) -> AllocationStatus {
        let assigned = self.assigned_total(row);
        let target = self.target(row) as u64;
        if assigned > target {
            AllocationStatus::Exceeded
        } else if assigned == target && target > 0 {
            AllocationStatus::Complete
        } else if assigned == 0 {
            AllocationStatus::Unassigned
        } else {
            AllocationStatus::Partial
        }
    }

    pub fn grand_assigned(&self) -> u64 {
        self.matrix
            .rows()
            .keys()
            .map(|row| self.assigned_total(row))
            .sum()
    }

    pub fn grand_target(&self) -> u64 {
        self.targets.values().map(|t| *t as u64).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.grand_assigned() == self.grand_target()
    }

    /// Разбивка в wire-формате: по каждой строке только ненулевые колонки.
    pub fn distribution(&self) -> Vec<RowAllocationDto> {
        self.matrix
            .rows()
            .iter()
            .map(|row| RowAllocationDto {
                row_ref: row.key.to_string(),
                columns: self
                    .matrix
                    .columns()
                    .keys()
                    .filter_map(|column| {
                        let quantity = self.matrix.cell(&row.key, column);
                        (quantity > 0).then(|| ColumnQuantityDto {
                            column_ref: column.to_string(),
                            quantity,
                        })
                    })
                    .collect(),
            })
            .collect()
    }

    /// Отправить разбивку получателю. Состояние редактора не меняется ни при
    /// успехе, ни при ошибке.
    pub async fn save<S>(&self, sink: &S) -> Result<(), ApiError>
    where
        S: DistributionSink + ?Sized,
    {
        let rows = self.distribution();
        match sink.replace_distribution(rows).await {
            Ok(()) => {
                log::debug!("allocation: saved {} units", self.grand_assigned());
                Ok(())
            }
            Err(e) => {
                log::warn!("allocation: save failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cell::RefCell;

    fn key(s: &str) -> AxisKey {
        AxisKey::from(s)
    }

    fn row(k: &str, label: &str, target: u32) -> AllocationRow {
        AllocationRow {
            key: key(k),
            label: label.to_string(),
            target,
        }
    }

    struct RecordingSink {
        fail_with: Option<ApiError>,
        received: RefCell<Vec<Vec<RowAllocationDto>>>,
    }

    impl RecordingSink {
        fn ok() -> Self {
            Self {
                fail_with: None,
                received: RefCell::new(Vec::new()),
            }
        }

        fn failing(err: ApiError) -> Self {
            Self {
                fail_with: Some(err),
                received: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl DistributionSink for RecordingSink {
        async fn replace_distribution(
            &self,
            rows: Vec<RowAllocationDto>,
        ) -> Result<(), ApiError> {
            self.received.borrow_mut().push(rows);
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_first_column_absorbs_targets_and_second_overflow_is_rejected() {
        let mut m = AllocationMatrix::new([row("m", "M", 10)]);

        assert_eq!(
            m.toggle_column(key("blue"), "Blue"),
            ColumnToggle::Added { auto_assigned: true }
        );
        assert_eq!(m.cell(&key("m"), &key("blue")), 10);

        assert_eq!(
            m.toggle_column(key("green"), "Green"),
            ColumnToggle::Added { auto_assigned: false }
        );
        assert_eq!(m.cell(&key("m"), &key("green")), 0);

        let before = m.clone();
        let err = m.edit_cell(&key("m"), &key("green"), "4").unwrap_err();
        assert_eq!(
            err,
            AllocationError::ExceedsTarget {
                row_label: "M".into(),
                attempted: 14,
                target: 10,
            }
        );
        assert_eq!(m, before);
        assert_eq!(m.cell(&key("m"), &key("blue")), 10);

        // after Blue is reduced the same edit fits
        m.edit_cell(&key("m"), &key("blue"), "6").unwrap();
        assert_eq!(m.edit_cell(&key("m"), &key("green"), "4"), Ok(4));
        assert_eq!(m.status(&key("m")), AllocationStatus::Complete);
    }

    #[test]
    fn test_error_message_names_row_and_numbers() {
        let err = AllocationError::ExceedsTarget {
            row_label: "M".into(),
            attempted: 14,
            target: 10,
        };
        let text = err.to_string();
        assert!(text.contains("M"));
        assert!(text.contains("14"));
        assert!(text.contains("10"));
    }

    #[test]
    fn test_no_auto_assign_without_targets() {
        let mut m = AllocationMatrix::new([row("s", "S", 0)]);
        assert_eq!(
            m.toggle_column(key("red"), "Red"),
            ColumnToggle::Added { auto_assigned: false }
        );
        assert_eq!(m.grand_assigned(), 0);
    }

    #[test]
    fn test_remove_column_frees_quantity_without_redistribution() {
        let mut m = AllocationMatrix::new([row("s", "S", 8), row("m", "M", 4)]);
        m.toggle_column(key("red"), "Red");
        m.toggle_column(key("blue"), "Blue");
        m.edit_cell(&key("s"), &key("red"), "5").unwrap();
        m.edit_cell(&key("s"), &key("blue"), "3").unwrap();

        assert_eq!(m.toggle_column(key("red"), "Red"), ColumnToggle::Removed);
        assert!(!m.is_active(&key("red")));
        assert_eq!(m.cell(&key("s"), &key("blue")), 3);
        assert_eq!(m.remaining(&key("s")), 5);
        assert_eq!(m.status(&key("s")), AllocationStatus::Partial);
        assert_eq!(m.status(&key("m")), AllocationStatus::Unassigned);
        assert_eq!(m.matrix().cells().count(), 1);
    }

    #[test]
    fn test_unknown_row_or_inactive_column() {
        let mut m = AllocationMatrix::new([row("s", "S", 5)]);
        m.toggle_column(key("red"), "Red");
        assert_eq!(
            m.edit_cell(&key("xl"), &key("red"), "1"),
            Err(AllocationError::UnknownRow(key("xl")))
        );
        assert_eq!(
            m.edit_cell(&key("s"), &key("blue"), "1"),
            Err(AllocationError::UnknownColumn(key("blue")))
        );
    }

    #[test]
    fn test_garbage_input_clears_cell() {
        let mut m = AllocationMatrix::new([row("s", "S", 5)]);
        m.toggle_column(key("red"), "Red");
        assert_eq!(m.edit_cell(&key("s"), &key("red"), "пять"), Ok(0));
        assert_eq!(m.assigned_total(&key("s")), 0);
    }

    #[test]
    fn test_from_persisted_restores_columns() {
        let rows = [row("s", "S", 6), row("m", "M", 10)];
        let catalog = vec![(key("blue"), "Синий".to_string())];
        let distribution = vec![RowAllocationDto {
            row_ref: "m".into(),
            columns: vec![
                ColumnQuantityDto {
                    column_ref: "blue".into(),
                    quantity: 7,
                },
                ColumnQuantityDto {
                    column_ref: "ghost".into(),
                    quantity: 3,
                },
            ],
        }];
        let m = AllocationMatrix::from_persisted(rows, &catalog, &distribution);

        assert_eq!(m.active_columns().label_of(&key("blue")), Some("Синий"));
        assert_eq!(m.active_columns().label_of(&key("ghost")), Some("ghost"));
        assert_eq!(m.assigned_total(&key("m")), 10);
        assert_eq!(m.grand_target(), 16);
        assert!(!m.is_complete());
    }

    #[test]
    fn test_distribution_is_sparse_and_covers_every_row() {
        let mut m = AllocationMatrix::new([row("s", "S", 3), row("m", "M", 0)]);
        m.toggle_column(key("red"), "Red");
        m.toggle_column(key("blue"), "Blue");

        let rows = m.distribution();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0].columns,
            vec![ColumnQuantityDto {
                column_ref: "red".into(),
                quantity: 3
            }]
        );
        assert!(rows[1].columns.is_empty());
    }

    #[tokio::test]
    async fn test_save_hands_distribution_to_sink() {
        let mut m = AllocationMatrix::new([row("m", "M", 10)]);
        m.toggle_column(key("blue"), "Blue");
        let sink = RecordingSink::ok();

        m.save(&sink).await.unwrap();

        let received = sink.received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0], m.distribution());
    }

    #[tokio::test]
    async fn test_failed_save_leaves_editor_intact() {
        let mut m = AllocationMatrix::new([row("m", "M", 10)]);
        m.toggle_column(key("blue"), "Blue");
        let before = m.clone();
        let sink = RecordingSink::failing(ApiError::Status {
            status: 500,
            body: "boom".into(),
        });

        let err = m.save(&sink).await.unwrap_err();

        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert_eq!(m, before);
    }

    proptest! {
        #[test]
        fn edits_never_exceed_targets(
            targets in proptest::collection::vec(0u32..50, 1..4),
            edits in proptest::collection::vec((0usize..4, 0usize..3, 0u32..60), 0..40),
        ) {
            let rows: Vec<AllocationRow> = targets
                .iter()
                .enumerate()
                .map(|(i, t)| row(&format!("r{}", i), &format!("R{}", i), *t))
                .collect();
            let columns = ["c0", "c1", "c2"];
            let mut m = AllocationMatrix::new(rows.clone());
            for c in columns {
                m.toggle_column(key(c), c);
            }

            for (r, c, q) in edits {
                let row_key = &rows[r % rows.len()].key;
                let before = m.clone();
                match m.edit_cell(row_key, &key(columns[c]), &q.to_string()) {
                    Ok(_) => {
                        for r in &rows {
                            prop_assert!(m.assigned_total(&r.key) <= r.target as u64);
                        }
                    }
                    Err(_) => prop_assert_eq!(&m, &before),
                }
            }
        }
    }
}
