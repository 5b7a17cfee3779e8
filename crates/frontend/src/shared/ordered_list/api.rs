use super::protocol::ReorderApi;
use crate::shared::api_utils::{put_json, ApiError};
use async_trait::async_trait;
use contracts::shared::reorder::ReorderRequest;

/// Запись пакета номеров на сервер по HTTP
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpReorderApi;

#[async_trait(?Send)]
impl ReorderApi for HttpReorderApi {
    async fn put_order(&self, path: &str, request: &ReorderRequest) -> Result<(), ApiError> {
        put_json(path, request).await
    }
}
