//! Wire-форматы матрицы количеств (размер × цвет)

use serde::{Deserialize, Serialize};

/// Строка или колонка матрицы в свободном режиме
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixAxisDto {
    pub label: String,
    pub position: usize,
}

/// Непустая ячейка матрицы, адресуемая позициями
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCellDto {
    pub row: usize,
    pub column: usize,
    pub quantity: u32,
}

/// Матрица, построенная оператором "с нуля".
///
/// Ячейки с нулевым количеством не передаются.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityMatrixDto {
    pub rows: Vec<MatrixAxisDto>,
    pub columns: Vec<MatrixAxisDto>,
    pub cells: Vec<MatrixCellDto>,
}

impl QuantityMatrixDto {
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|c| c.quantity as u64).sum()
    }
}

/// Количество, назначенное одной колонке (например, цвету)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnQuantityDto {
    pub column_ref: String,
    pub quantity: u32,
}

/// Распределение итога строки (например, размера) по колонкам
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowAllocationDto {
    pub row_ref: String,
    pub columns: Vec<ColumnQuantityDto>,
}
