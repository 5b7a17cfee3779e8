//! Список с перетаскиванием: порядок меняется сразу, новые порядковые
//! номера сохраняются пакетом, при ошибке список возвращается к прежнему виду.

pub mod api;
pub mod protocol;
pub mod store;
pub mod view;

pub use api::HttpReorderApi;
pub use protocol::{
    PendingWrite, ReorderApi, ReorderOutcome, ReorderPhase, ReorderProtocol, ReorderStep,
    ReorderTarget,
};
pub use store::{OrderedItem, OrderedListStore};
pub use view::{persist_order, ReorderableList};
