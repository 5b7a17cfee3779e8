pub mod aggregate;

pub use aggregate::{ProcessStep, ProcessStepDto, ProcessStepId};
