//! Модель матрицы: строки × колонки неотрицательных количеств.
//!
//! Строки и колонки хранятся в арене (`Vec<Axis>`) с индексом ключ → позиция,
//! индекс перестраивается после каждого структурного изменения, позиции идут
//! подряд с нуля. Ячейки разрежены: нет записи значит 0.

use std::collections::{BTreeMap, HashMap};

/// Постоянный ключ строки или колонки
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisKey(pub String);

impl AxisKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AxisKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for AxisKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    pub key: AxisKey,
    pub label: String,
}

/// Упорядоченный набор строк или колонок
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisSet {
    items: Vec<Axis>,
    index: HashMap<AxisKey, usize>,
}

impl AxisSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Axis> {
        self.items.get(position)
    }

    pub fn position_of(&self, key: &AxisKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &AxisKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn label_of(&self, key: &AxisKey) -> Option<&str> {
        self.position_of(key)
            .and_then(|p| self.items.get(p))
            .map(|a| a.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Axis> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &AxisKey> {
        self.items.iter().map(|a| &a.key)
    }

    /// Добавить ось и вернуть её позицию. Повторный ключ не добавляется,
    /// возвращается уже существующая позиция.
    pub fn push(&mut self, key: AxisKey, label: String) -> usize {
        if let Some(position) = self.position_of(&key) {
            return position;
        }
        let position = self.items.len();
        self.index.insert(key.clone(), position);
        self.items.push(Axis { key, label });
        position
    }

    pub fn remove_at(&mut self, position: usize) -> Option<Axis> {
        if position >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(position);
        self.rebuild_index();
        Some(removed)
    }

    pub fn rename(&mut self, position: usize, label: String) -> bool {
        match self.items.get_mut(position) {
            Some(axis) => {
                axis.label = label;
                true
            }
            None => false,
        }
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(position, axis)| (axis.key.clone(), position))
            .collect();
    }
}

/// Разбор ввода оператора. Всё, что не целое неотрицательное число
/// (пусто, текст, минус, дробь, переполнение), даёт 0.
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse::<u32>().unwrap_or(0)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityMatrix {
    rows: AxisSet,
    columns: AxisSet,
    cells: BTreeMap<(AxisKey, AxisKey), u32>,
}

impl QuantityMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &AxisSet {
        &self.rows
    }

    pub fn columns(&self) -> &AxisSet {
        &self.columns
    }

    pub fn cell(&self, row: &AxisKey, column: &AxisKey) -> u32 {
        self.cells
            .get(&(row.clone(), column.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Ненулевые ячейки в порядке (ключ строки, ключ колонки)
    pub fn cells(&self) -> impl Iterator<Item = (&AxisKey, &AxisKey, u32)> {
        self.cells.iter().map(|((r, c), q)| (r, c, *q))
    }

    pub fn row_total(&self, row: &AxisKey) -> u64 {
        self.cells
            .iter()
            .filter(|((r, _), _)| r == row)
            .map(|(_, q)| *q as u64)
            .sum()
    }

    pub fn column_total(&self, column: &AxisKey) -> u64 {
        self.cells
            .iter()
            .filter(|((_, c), _)| c == column)
            .map(|(_, q)| *q as u64)
            .sum()
    }

    pub fn grand_total(&self) -> u64 {
        self.cells.values().map(|q| *q as u64).sum()
    }

    /// Новая матрица с заменённой ячейкой. Запись 0 удаляет ячейку.
    /// Ключи вне осей оставляют состояние без изменений.
    pub fn set_cell(&self, row: &AxisKey, column: &AxisKey, quantity: u32) -> QuantityMatrix {
        let mut next = self.clone();
        if !self.rows.contains(row) || !self.columns.contains(column) {
            return next;
        }
        let key = (row.clone(), column.clone());
        if quantity == 0 {
            next.cells.remove(&key);
        } else {
            next.cells.insert(key, quantity);
        }
        next
    }

    pub(crate) fn push_row(&mut self, key: AxisKey, label: String) -> usize {
        self.rows.push(key, label)
    }

    pub(crate) fn push_column(&mut self, key: AxisKey, label: String) -> usize {
        self.columns.push(key, label)
    }

    pub(crate) fn rename_row(&mut self, position: usize, label: String) -> bool {
        self.rows.rename(position, label)
    }

    pub(crate) fn rename_column(&mut self, position: usize, label: String) -> bool {
        self.columns.rename(position, label)
    }

    pub(crate) fn remove_row_at(&mut self, position: usize) -> Option<Axis> {
        let removed = self.rows.remove_at(position)?;
        self.cells.retain(|(r, _), _| *r != removed.key);
        Some(removed)
    }

    pub(crate) fn remove_column_at(&mut self, position: usize) -> Option<Axis> {
        let removed = self.columns.remove_at(position)?;
        self.cells.retain(|(_, c), _| *c != removed.key);
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(s: &str) -> AxisKey {
        AxisKey::from(s)
    }

    fn two_by_two() -> QuantityMatrix {
        let mut m = QuantityMatrix::new();
        m.push_row(key("s"), "S".into());
        m.push_row(key("m"), "M".into());
        m.push_column(key("red"), "Red".into());
        m.push_column(key("blue"), "Blue".into());
        m
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("5"), 5);
        assert_eq!(parse_quantity("  12 "), 12);
        assert_eq!(parse_quantity(""), 0);
        assert_eq!(parse_quantity("abc"), 0);
        assert_eq!(parse_quantity("-3"), 0);
        assert_eq!(parse_quantity("2.5"), 0);
        assert_eq!(parse_quantity("99999999999"), 0);
    }

    #[test]
    fn test_set_cell_is_pure() {
        let m = two_by_two();
        let next = m.set_cell(&key("s"), &key("red"), 4);
        assert_eq!(m.cell(&key("s"), &key("red")), 0);
        assert_eq!(next.cell(&key("s"), &key("red")), 4);
        assert_eq!(next.row_total(&key("s")), 4);
        assert_eq!(next.column_total(&key("red")), 4);
        assert_eq!(next.grand_total(), 4);
    }

    #[test]
    fn test_zero_write_removes_cell() {
        let m = two_by_two().set_cell(&key("m"), &key("blue"), 3);
        let cleared = m.set_cell(&key("m"), &key("blue"), 0);
        assert_eq!(cleared.cells().count(), 0);
        assert_eq!(cleared, two_by_two());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let m = two_by_two();
        assert_eq!(m.set_cell(&key("xl"), &key("red"), 7), m);
        assert_eq!(m.set_cell(&key("s"), &key("green"), 7), m);
    }

    #[test]
    fn test_remove_reindexes_and_drops_cells() {
        let mut m = two_by_two()
            .set_cell(&key("s"), &key("red"), 1)
            .set_cell(&key("m"), &key("blue"), 2);
        let removed = m.remove_row_at(0).unwrap();
        assert_eq!(removed.label, "S");
        assert_eq!(m.rows().position_of(&key("m")), Some(0));
        assert_eq!(m.rows().len(), 1);
        assert_eq!(m.grand_total(), 2);
        assert!(m.remove_row_at(5).is_none());
    }

    #[test]
    fn test_duplicate_push_keeps_position() {
        let mut m = two_by_two();
        assert_eq!(m.push_column(key("red"), "Again".into()), 0);
        assert_eq!(m.columns().len(), 2);
        assert_eq!(m.columns().label_of(&key("red")), Some("Red"));
    }

    proptest! {
        #[test]
        fn grand_total_tracks_every_write(
            writes in proptest::collection::vec((0usize..3, 0usize..3, 0u32..1_000), 0..64),
        ) {
            let rows = ["r0", "r1", "r2"];
            let cols = ["c0", "c1", "c2"];
            let mut m = QuantityMatrix::new();
            for r in rows {
                m.push_row(key(r), r.to_uppercase());
            }
            for c in cols {
                m.push_column(key(c), c.to_uppercase());
            }

            let mut expected: HashMap<(usize, usize), u32> = HashMap::new();
            for (r, c, q) in writes {
                m = m.set_cell(&key(rows[r]), &key(cols[c]), q);
                expected.insert((r, c), q);
            }

            let sum: u64 = expected.values().map(|q| *q as u64).sum();
            prop_assert_eq!(m.grand_total(), sum);

            let by_rows: u64 = rows.iter().map(|r| m.row_total(&key(r))).sum();
            let by_cols: u64 = cols.iter().map(|c| m.column_total(&key(c))).sum();
            prop_assert_eq!(by_rows, sum);
            prop_assert_eq!(by_cols, sum);
        }
    }
}
