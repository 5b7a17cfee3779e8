pub mod aggregate;

pub use aggregate::{ColorQuantity, SizeLine, WorkOrder, WorkOrderId};
