//! Свободный ввод матрицы: оператор сам создаёт строки и колонки,
//! итоги только вычисляются.

use super::model::{parse_quantity, AxisKey, QuantityMatrix};
use contracts::shared::quantity_matrix::{MatrixAxisDto, MatrixCellDto, QuantityMatrixDto};

/// Заголовок новой строки до переименования оператором
pub const NEW_ROW_LABEL: &str = "Новый размер";
/// Заголовок новой колонки до переименования оператором
pub const NEW_COLUMN_LABEL: &str = "Новый цвет";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreeEntryMatrix {
    matrix: QuantityMatrix,
    next_local_id: u64,
}

impl FreeEntryMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Восстановить матрицу из сохранённого шаблона.
    ///
    /// Ячейки со ссылками на несуществующие позиции отбрасываются.
    pub fn from_dto(dto: &QuantityMatrixDto) -> Self {
        let mut this = Self::new();

        let mut rows = dto.rows.clone();
        rows.sort_by_key(|r| r.position);
        let mut columns = dto.columns.clone();
        columns.sort_by_key(|c| c.position);

        let row_keys: Vec<(usize, AxisKey)> = rows
            .into_iter()
            .map(|r| {
                let position = this.add_row(r.label);
                (r.position, this.row_key(position))
            })
            .collect();
        let column_keys: Vec<(usize, AxisKey)> = columns
            .into_iter()
            .map(|c| {
                let position = this.add_column(c.label);
                (c.position, this.column_key(position))
            })
            .collect();

        for cell in &dto.cells {
            let row = row_keys.iter().find(|(p, _)| *p == cell.row).map(|(_, k)| k);
            let column = column_keys
                .iter()
                .find(|(p, _)| *p == cell.column)
                .map(|(_, k)| k);
            match (row, column) {
                (Some(row), Some(column)) => {
                    this.matrix = this.matrix.set_cell(row, column, cell.quantity);
                }
                _ => log::warn!(
                    "quantity matrix: dropping cell at ({}, {}) with no matching axis",
                    cell.row,
                    cell.column
                ),
            }
        }
        this
    }

    pub fn matrix(&self) -> &QuantityMatrix {
        &self.matrix
    }

    pub fn row_count(&self) -> usize {
        self.matrix.rows().len()
    }

    pub fn column_count(&self) -> usize {
        self.matrix.columns().len()
    }

    pub fn row_label(&self, position: usize) -> Option<&str> {
        self.matrix.rows().get(position).map(|a| a.label.as_str())
    }

    pub fn column_label(&self, position: usize) -> Option<&str> {
        self.matrix.columns().get(position).map(|a| a.label.as_str())
    }

    pub fn add_row(&mut self, label: impl Into<String>) -> usize {
        let key = self.next_key("row");
        self.matrix.push_row(key, label.into())
    }

    pub fn add_column(&mut self, label: impl Into<String>) -> usize {
        let key = self.next_key("col");
        self.matrix.push_column(key, label.into())
    }

    pub fn remove_row(&mut self, position: usize) -> bool {
        self.matrix.remove_row_at(position).is_some()
    }

    pub fn remove_column(&mut self, position: usize) -> bool {
        self.matrix.remove_column_at(position).is_some()
    }

    pub fn rename_row(&mut self, position: usize, label: impl Into<String>) -> bool {
        self.matrix.rename_row(position, label.into())
    }

    pub fn rename_column(&mut self, position: usize, label: impl Into<String>) -> bool {
        self.matrix.rename_column(position, label.into())
    }

    /// Записать значение ячейки. Некорректный ввод превращается в 0.
    ///
    /// Возвращает `false`, если позиции нет в матрице.
    pub fn edit_cell(&mut self, row_pos: usize, col_pos: usize, raw_value: &str) -> bool {
        let (Some(row), Some(column)) = (
            self.matrix.rows().get(row_pos).map(|a| a.key.clone()),
            self.matrix.columns().get(col_pos).map(|a| a.key.clone()),
        ) else {
            return false;
        };
        self.matrix = self.matrix.set_cell(&row, &column, parse_quantity(raw_value));
        true
    }

    pub fn cell(&self, row_pos: usize, col_pos: usize) -> u32 {
        match (
            self.matrix.rows().get(row_pos),
            self.matrix.columns().get(col_pos),
        ) {
            (Some(row), Some(column)) => self.matrix.cell(&row.key, &column.key),
            _ => 0,
        }
    }

    pub fn row_total(&self, position: usize) -> u64 {
        self.matrix
            .rows()
            .get(position)
            .map(|a| self.matrix.row_total(&a.key))
            .unwrap_or(0)
    }

    pub fn column_total(&self, position: usize) -> u64 {
        self.matrix
            .columns()
            .get(position)
            .map(|a| self.matrix.column_total(&a.key))
            .unwrap_or(0)
    }

    pub fn grand_total(&self) -> u64 {
        self.matrix.grand_total()
    }

    /// Сериализовать матрицу в `{rows, columns, cells}`; нулевые ячейки не передаются.
    pub fn to_dto(&self) -> QuantityMatrixDto {
        let rows = self.matrix.rows();
        let columns = self.matrix.columns();
        let mut cells = self
            .matrix
            .cells()
            .filter_map(|(row, column, quantity)| {
                Some(MatrixCellDto {
                    row: rows.position_of(row)?,
                    column: columns.position_of(column)?,
                    quantity,
                })
            })
            .collect::<Vec<_>>();
        cells.sort_by_key(|c| (c.row, c.column));

        QuantityMatrixDto {
            rows: rows
                .iter()
                .enumerate()
                .map(|(position, a)| MatrixAxisDto {
                    label: a.label.clone(),
                    position,
                })
                .collect(),
            columns: columns
                .iter()
                .enumerate()
                .map(|(position, a)| MatrixAxisDto {
                    label: a.label.clone(),
                    position,
                })
                .collect(),
            cells,
        }
    }

    fn next_key(&mut self, prefix: &str) -> AxisKey {
        self.next_local_id += 1;
        AxisKey(format!("{}-{}", prefix, self.next_local_id))
    }

    fn row_key(&self, position: usize) -> AxisKey {
        self.matrix.rows().get(position).map(|a| a.key.clone()).unwrap_or_default()
    }

    fn column_key(&self, position: usize) -> AxisKey {
        self.matrix.columns().get(position).map(|a| a.key.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell_scenario() {
        let mut m = FreeEntryMatrix::new();
        m.add_row("S");
        m.add_column("Red");
        assert!(m.edit_cell(0, 0, "5"));
        assert_eq!(m.row_total(0), 5);
        assert_eq!(m.column_total(0), 5);
        assert_eq!(m.grand_total(), 5);
    }

    #[test]
    fn test_no_upper_bound_and_bad_input() {
        let mut m = FreeEntryMatrix::new();
        m.add_row(NEW_ROW_LABEL);
        m.add_column(NEW_COLUMN_LABEL);
        m.edit_cell(0, 0, "1000000");
        assert_eq!(m.grand_total(), 1_000_000);
        m.edit_cell(0, 0, "дюжина");
        assert_eq!(m.cell(0, 0), 0);
        assert_eq!(m.grand_total(), 0);
    }

    #[test]
    fn test_edit_out_of_range_is_refused() {
        let mut m = FreeEntryMatrix::new();
        m.add_row("S");
        assert!(!m.edit_cell(0, 0, "3"));
        assert!(!m.edit_cell(4, 0, "3"));
    }

    #[test]
    fn test_remove_keeps_positions_dense() {
        let mut m = FreeEntryMatrix::new();
        m.add_row("S");
        m.add_row("M");
        m.add_row("L");
        m.add_column("Red");
        m.edit_cell(1, 0, "2");
        m.edit_cell(2, 0, "3");

        assert!(m.remove_row(0));
        assert_eq!(m.row_count(), 2);
        assert_eq!(m.row_label(0), Some("M"));
        assert_eq!(m.row_label(1), Some("L"));
        assert_eq!(m.row_total(0), 2);
        assert_eq!(m.row_total(1), 3);

        // positions appended after a removal continue densely
        assert_eq!(m.add_row("XL"), 2);
        assert!(!m.remove_row(7));
    }

    #[test]
    fn test_remove_column_drops_its_cells() {
        let mut m = FreeEntryMatrix::new();
        m.add_row("S");
        m.add_column("Red");
        m.add_column("Blue");
        m.edit_cell(0, 0, "4");
        m.edit_cell(0, 1, "6");
        assert!(m.remove_column(0));
        assert_eq!(m.column_label(0), Some("Blue"));
        assert_eq!(m.grand_total(), 6);
    }

    #[test]
    fn test_rename_does_not_touch_cells() {
        let mut m = FreeEntryMatrix::new();
        m.add_row(NEW_ROW_LABEL);
        m.add_column(NEW_COLUMN_LABEL);
        m.edit_cell(0, 0, "9");
        assert!(m.rename_row(0, "M"));
        assert!(m.rename_column(0, "Green"));
        assert_eq!(m.row_label(0), Some("M"));
        assert_eq!(m.column_label(0), Some("Green"));
        assert_eq!(m.cell(0, 0), 9);
        assert!(!m.rename_row(3, "X"));
    }

    #[test]
    fn test_dto_survives_reopen() {
        let mut m = FreeEntryMatrix::new();
        m.add_row("S");
        m.add_row("M");
        m.add_column("Red");
        m.add_column("Blue");
        m.edit_cell(0, 1, "2");
        m.edit_cell(1, 0, "7");

        let dto = m.to_dto();
        assert_eq!(dto.cells.len(), 2);
        assert_eq!(dto.total(), 9);
        assert_eq!(dto.cells[0], MatrixCellDto { row: 0, column: 1, quantity: 2 });

        let reopened = FreeEntryMatrix::from_dto(&dto);
        assert_eq!(reopened.to_dto(), dto);
        assert_eq!(reopened.row_total(1), 7);
    }

    #[test]
    fn test_from_dto_drops_orphan_cells() {
        let dto = QuantityMatrixDto {
            rows: vec![MatrixAxisDto { label: "S".into(), position: 0 }],
            columns: vec![MatrixAxisDto { label: "Red".into(), position: 0 }],
            cells: vec![
                MatrixCellDto { row: 0, column: 0, quantity: 3 },
                MatrixCellDto { row: 1, column: 0, quantity: 8 },
            ],
        };
        let m = FreeEntryMatrix::from_dto(&dto);
        assert_eq!(m.grand_total(), 3);
    }
}
