pub mod catalog;
pub mod quantity_matrix;
pub mod reorder;
