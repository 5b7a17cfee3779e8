pub mod aggregate;

pub use aggregate::{QuantityTemplate, QuantityTemplateDto, QuantityTemplateId};
