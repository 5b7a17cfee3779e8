//! Матрица количеств (размер × цвет) в двух режимах:
//! свободный ввод и распределение зафиксированных итогов.

pub mod constrained;
pub mod free_entry;
pub mod model;
pub mod view;

pub use constrained::{
    AllocationError, AllocationMatrix, AllocationRow, AllocationStatus, ColumnToggle,
    DistributionSink,
};
pub use free_entry::{FreeEntryMatrix, NEW_COLUMN_LABEL, NEW_ROW_LABEL};
pub use model::{parse_quantity, Axis, AxisKey, AxisSet, QuantityMatrix};
pub use view::{AllocationMatrixEditor, FreeEntryMatrixEditor};
