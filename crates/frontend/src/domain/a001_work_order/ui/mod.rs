pub mod distribution;
pub mod list;
