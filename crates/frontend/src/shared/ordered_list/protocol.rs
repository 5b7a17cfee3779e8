//! Оптимистичная перестановка: список меняется сразу, новые номера
//! уходят на сервер одним пакетом, при ошибке список возвращается к снимку.
//!
//! Idle → Dragging → Dropped → Reordering → Persisting → Settled | RolledBack

use super::store::{OrderedItem, OrderedListStore};
use crate::shared::api_utils::ApiError;
use async_trait::async_trait;
use contracts::shared::reorder::ReorderRequest;

/// Куда пишется пакет номеров для конкретного списка
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderTarget {
    /// `PUT /api/reorder/{key}`
    ListKey(String),
    /// `PUT /api/{path}` для списков внутри другого ресурса
    ResourcePath(String),
}

impl ReorderTarget {
    pub fn path(&self) -> String {
        match self {
            ReorderTarget::ListKey(key) => format!("/api/reorder/{}", key),
            ReorderTarget::ResourcePath(path) => {
                format!("/api/{}", path.trim_start_matches('/'))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderPhase {
    Idle,
    Dragging { from: usize },
    Dropped { from: usize, to: usize },
    Reordering,
    Persisting,
    Settled,
    RolledBack,
}

#[async_trait(?Send)]
pub trait ReorderApi {
    async fn put_order(&self, path: &str, request: &ReorderRequest) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    /// Бросок на себя или нет жеста
    Unchanged,
    /// Двигались только черновики, писать нечего
    NothingToPersist,
    Settled { persisted: usize },
    RolledBack(ApiError),
}

/// Запись в полёте: что отправить и к чему откатиться при ошибке
#[derive(Debug, Clone)]
pub struct PendingWrite<T> {
    snapshot: Vec<OrderedItem<T>>,
    request: ReorderRequest,
}

impl<T> PendingWrite<T> {
    pub fn request(&self) -> &ReorderRequest {
        &self.request
    }
}

#[derive(Debug)]
pub enum ReorderStep<T> {
    Done(ReorderOutcome),
    Persist(PendingWrite<T>),
}

#[derive(Debug, Clone)]
pub struct ReorderProtocol {
    target: ReorderTarget,
    phase: ReorderPhase,
}

impl ReorderProtocol {
    pub fn new(target: ReorderTarget) -> Self {
        Self {
            target,
            phase: ReorderPhase::Idle,
        }
    }

    pub fn target(&self) -> &ReorderTarget {
        &self.target
    }

    pub fn phase(&self) -> ReorderPhase {
        self.phase
    }

    pub fn is_persisting(&self) -> bool {
        self.phase == ReorderPhase::Persisting
    }

    /// Начать жест. Пока предыдущая запись не завершилась, игнорируется.
    pub fn begin_drag(&mut self, from: usize) -> bool {
        if self.is_persisting() {
            log::debug!("reorder {:?}: drag ignored, write in flight", self.target);
            return false;
        }
        self.phase = ReorderPhase::Dragging { from };
        true
    }

    pub fn cancel_drag(&mut self) {
        if let ReorderPhase::Dragging { .. } = self.phase {
            self.phase = ReorderPhase::Idle;
        }
    }

    pub fn drop_at(&mut self, to: usize) -> bool {
        match self.phase {
            ReorderPhase::Dragging { from } => {
                self.phase = ReorderPhase::Dropped { from, to };
                true
            }
            _ => false,
        }
    }

    /// Перемещение кнопками: тот же Dropped, что и у мыши
    pub fn keyboard_move(&mut self, from: usize, to: usize) -> bool {
        self.begin_drag(from) && self.drop_at(to)
    }

    /// Сразу применить брошенный жест к `store`.
    ///
    /// Возвращает запись, которую нужно выполнить, или итог, если сеть
    /// не нужна.
    pub fn reorder<T: Clone>(&mut self, store: &mut OrderedListStore<T>) -> ReorderStep<T> {
        let ReorderPhase::Dropped { from, to } = self.phase else {
            return ReorderStep::Done(ReorderOutcome::Unchanged);
        };
        if from == to {
            self.phase = ReorderPhase::Idle;
            return ReorderStep::Done(ReorderOutcome::Unchanged);
        }

        let snapshot = store.snapshot();
        self.phase = ReorderPhase::Reordering;
        if !store.move_item(from, to) {
            self.phase = ReorderPhase::Idle;
            return ReorderStep::Done(ReorderOutcome::Unchanged);
        }

        let request = store.reorder_request();
        if request.is_empty() {
            self.phase = ReorderPhase::Settled;
            return ReorderStep::Done(ReorderOutcome::NothingToPersist);
        }

        log::debug!(
            "reorder {:?}: moved {} -> {}, persisting {} items",
            self.target,
            from,
            to,
            request.len()
        );
        self.phase = ReorderPhase::Persisting;
        ReorderStep::Persist(PendingWrite { snapshot, request })
    }

    /// Записать текущий порядок без жеста, например после сохранения
    /// черновиков. Откат при ошибке такой же, как после перестановки.
    pub fn persist_current<T: Clone>(&mut self, store: &OrderedListStore<T>) -> ReorderStep<T> {
        if self.is_persisting() {
            log::debug!("reorder {:?}: write already in flight", self.target);
            return ReorderStep::Done(ReorderOutcome::Unchanged);
        }
        let request = store.reorder_request();
        if request.is_empty() {
            self.phase = ReorderPhase::Settled;
            return ReorderStep::Done(ReorderOutcome::NothingToPersist);
        }
        self.phase = ReorderPhase::Persisting;
        ReorderStep::Persist(PendingWrite {
            snapshot: store.snapshot(),
            request,
        })
    }

    /// Завершить запись. При ошибке список возвращается к снимку, но черновики,
    /// успевшие получить id, остаются сохранёнными.
    pub fn settle<T>(
        &mut self,
        store: &mut OrderedListStore<T>,
        pending: PendingWrite<T>,
        result: Result<(), ApiError>,
    ) -> ReorderOutcome
    where
        T: Clone,
    {
        match result {
            Ok(()) => {
                self.phase = ReorderPhase::Settled;
                ReorderOutcome::Settled {
                    persisted: pending.request.len(),
                }
            }
            Err(e) => {
                log::warn!("reorder {:?}: rolled back: {}", self.target, e);
                store.restore(pending.snapshot);
                self.phase = ReorderPhase::RolledBack;
                ReorderOutcome::RolledBack(e)
            }
        }
    }

    /// Бросок, перестановка, запись и завершение за один вызов
    pub async fn drop_and_persist<T, A>(
        &mut self,
        store: &mut OrderedListStore<T>,
        to: usize,
        api: &A,
    ) -> ReorderOutcome
    where
        T: Clone,
        A: ReorderApi + ?Sized,
    {
        if !self.drop_at(to) {
            return ReorderOutcome::Unchanged;
        }
        match self.reorder(store) {
            ReorderStep::Done(outcome) => outcome,
            ReorderStep::Persist(pending) => {
                let result = api.put_order(&self.target.path(), pending.request()).await;
                self.settle(store, pending, result)
            }
        }
    }
}
